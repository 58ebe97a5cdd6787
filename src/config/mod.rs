mod app_config;
mod s3_config;
mod ses_config;

pub use app_config::{
    AdminBootstrap, AppConfig, CorsConfig, DatabaseConfig, Environment, MailConfig, ServerConfig,
    StorageConfig,
};
pub use s3_config::*;
pub use ses_config::*;
