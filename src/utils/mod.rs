pub mod cookie;
pub mod extractors;
pub mod slug;
pub mod validation;
