use crate::error::{AppError, Result};
use std::env;

const DEFAULT_UPLOAD_MAX_BYTES: usize = 5 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub cors: CorsConfig,
    pub storage: StorageConfig,
    pub mail: MailConfig,
    pub admin: Option<AdminBootstrap>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub max_body_size: usize,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

/// An empty origin list means any origin is allowed.
#[derive(Debug, Clone, Default)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub endpoint: String,
    pub region: String,
    pub bucket: String,
    pub access_key_id: String,
    pub secret_access_key: String,
    pub public_url: String,
    pub max_upload_bytes: usize,
    pub allowed_mime_prefixes: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct MailConfig {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub region: String,
    pub endpoint: Option<String>,
    pub from_address: String,
    pub admin_address: String,
}

#[derive(Debug, Clone)]
pub struct AdminBootstrap {
    pub username: String,
    pub password: String,
    pub email: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        let storage_endpoint =
            env::var("STORAGE_ENDPOINT").unwrap_or_else(|_| "https://s3.tebi.io".to_string());
        let bucket = required("STORAGE_BUCKET")?;
        let public_url = env::var("STORAGE_PUBLIC_URL").unwrap_or_else(|_| {
            format!("{}/{}", storage_endpoint.trim_end_matches('/'), bucket)
        });

        Ok(Self {
            environment: Environment::parse(
                &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
            )?,
            server: ServerConfig {
                host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: env::var("PORT")
                    .unwrap_or_else(|_| "3000".to_string())
                    .parse()
                    .map_err(|_| AppError::ConfigError("Invalid PORT value".to_string()))?,
                max_body_size: env::var("MAX_BODY_SIZE")
                    .unwrap_or_else(|_| "10485760".to_string())
                    .parse()
                    .map_err(|_| AppError::ConfigError("Invalid MAX_BODY_SIZE value".to_string()))?,
            },
            database: DatabaseConfig {
                url: env::var("DB_URL")?,
                max_connections: env::var("DB_MAX_CONNECTIONS")
                    .unwrap_or_else(|_| "20".to_string())
                    .parse()
                    .map_err(|_| {
                        AppError::ConfigError("Invalid DB_MAX_CONNECTIONS value".to_string())
                    })?,
            },
            cors: CorsConfig {
                allowed_origins: parse_origins(&env::var("FRONTEND_URL").unwrap_or_default()),
            },
            storage: StorageConfig {
                endpoint: storage_endpoint,
                region: env::var("STORAGE_REGION").unwrap_or_else(|_| "us-east-1".to_string()),
                bucket,
                access_key_id: required("STORAGE_ACCESS_KEY_ID")?,
                secret_access_key: required("STORAGE_SECRET_ACCESS_KEY")?,
                public_url: public_url.trim_end_matches('/').to_string(),
                max_upload_bytes: env::var("UPLOAD_MAX_BYTES")
                    .map(|v| {
                        v.parse().map_err(|_| {
                            AppError::ConfigError("Invalid UPLOAD_MAX_BYTES value".to_string())
                        })
                    })
                    .unwrap_or(Ok(DEFAULT_UPLOAD_MAX_BYTES))?,
                allowed_mime_prefixes: split_list(
                    &env::var("UPLOAD_ALLOWED_PREFIXES").unwrap_or_else(|_| "image/".to_string()),
                ),
            },
            mail: MailConfig {
                access_key_id: required("AWS_ACCESS_KEY_ID")?,
                secret_access_key: required("AWS_SECRET_ACCESS_KEY")?,
                region: env::var("AWS_REGION").unwrap_or_else(|_| "us-east-1".to_string()),
                endpoint: env::var("SES_ENDPOINT").ok(),
                from_address: required("MAIL_FROM")?,
                admin_address: required("MAIL_ADMIN_TO")?,
            },
            admin: match (env::var("ADMIN_USERNAME"), env::var("ADMIN_PASSWORD")) {
                (Ok(username), Ok(password)) if !username.trim().is_empty() => {
                    Some(AdminBootstrap {
                        username: username.trim().to_string(),
                        password,
                        email: env::var("ADMIN_EMAIL").ok(),
                    })
                }
                _ => None,
            },
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl Environment {
    pub fn parse(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" | "local" => Ok(Environment::Development),
            "production" | "prod" => Ok(Environment::Production),
            other => Err(AppError::ConfigError(format!("Unknown APP_ENV '{}'", other))),
        }
    }

    pub fn is_production(self) -> bool {
        self == Environment::Production
    }
}

fn required(key: &str) -> Result<String> {
    env::var(key).map_err(|_| AppError::ConfigError(format!("{} not set", key)))
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn parse_origins(raw: &str) -> Vec<String> {
    let origins = split_list(raw);
    if origins.iter().any(|o| o == "*") {
        return Vec::new();
    }
    origins
}
