mod app_error;

pub use app_error::AppError;

/// Result type returned by queries, services and handlers.
pub type Result<T> = std::result::Result<T, AppError>;
