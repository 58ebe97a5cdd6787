pub mod admin_queries;
pub mod message_queries;
pub mod product_queries;
