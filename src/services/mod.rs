pub mod email_service;
pub mod storage_service;
