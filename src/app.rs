use std::sync::Arc;

use aws_sdk_s3::Client as S3Client;
use aws_sdk_sesv2::Client as SesClient;
use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
};
use sqlx::PgPool;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    config::{self, AppConfig},
    database,
    error::{AppError, Result},
    queries::admin_queries,
    routes,
};

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub s3_client: S3Client,
    pub ses_client: SesClient,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub async fn new(config: AppConfig, db: PgPool) -> Self {
        let s3_client = config::load_s3_client(&config.storage).await;
        let ses_client = config::load_ses_client(&config.mail).await;

        Self {
            db,
            s3_client,
            ses_client,
            config: Arc::new(config),
        }
    }
}

pub async fn build(config: &AppConfig) -> Result<Router> {
    let pool = database::create_pool(&config.database).await?;
    bootstrap_admin(&pool, config).await?;

    let state = AppState::new(config.clone(), pool).await;
    router(state)
}

pub fn router(state: AppState) -> Result<Router> {
    let cors = cors_layer(&state.config)?;
    let max_body_size = state.config.server.max_body_size;

    let app = routes::create_router()
        .layer(DefaultBodyLimit::max(max_body_size))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    Ok(app)
}

fn cors_layer(config: &AppConfig) -> Result<CorsLayer> {
    let methods = [
        Method::GET,
        Method::POST,
        Method::PUT,
        Method::PATCH,
        Method::DELETE,
        Method::OPTIONS,
    ];

    if config.cors.allowed_origins.is_empty() {
        return Ok(CorsLayer::new()
            .allow_methods(methods)
            .allow_headers(Any)
            .allow_origin(Any));
    }

    let allowed_origins: Vec<HeaderValue> = config
        .cors
        .allowed_origins
        .iter()
        .map(|origin| {
            origin
                .parse::<HeaderValue>()
                .map_err(|_| AppError::ConfigError(format!("Invalid CORS origin: {}", origin)))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(CorsLayer::new()
        .allow_methods(methods)
        .allow_headers([http::header::CONTENT_TYPE, http::header::COOKIE])
        .allow_credentials(true)
        .allow_origin(AllowOrigin::list(allowed_origins)))
}

/// Creates the configured admin account on first start.
async fn bootstrap_admin(pool: &PgPool, config: &AppConfig) -> Result<()> {
    let Some(admin) = &config.admin else {
        return Ok(());
    };

    if admin_queries::find_by_username(pool, &admin.username)
        .await?
        .is_some()
    {
        return Ok(());
    }

    let password_hash = bcrypt::hash(&admin.password, bcrypt::DEFAULT_COST)
        .map_err(|e| AppError::InternalError(format!("Password hashing failed: {}", e)))?;

    admin_queries::create_admin(pool, &admin.username, &password_hash, admin.email.as_deref())
        .await?;

    tracing::info!("Created admin account '{}'", admin.username);

    Ok(())
}
