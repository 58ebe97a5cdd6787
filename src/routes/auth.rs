use axum::{
    Extension,
    extract::State,
    http::{HeaderMap, HeaderValue, header::SET_COOKIE},
};
use serde_json::{Value, json};

use crate::{
    AppState,
    error::{AppError, Result},
    models::{AdminIdentity, AdminProfile, LoginRequest, LoginResponse},
    queries::admin_queries,
    utils::{cookie, extractors::Json},
};

const BCRYPT_PREFIXES: [&str; 3] = ["$2a$", "$2b$", "$2y$"];

pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<(HeaderMap, Json<LoginResponse>)> {
    let username = payload.username.trim();
    if username.is_empty() || payload.password.is_empty() {
        return Err(AppError::BadRequest(
            "Username and password are required".to_string(),
        ));
    }

    let Some(admin) = admin_queries::find_by_username(&state.db, username).await? else {
        tracing::warn!("Login attempt for unknown admin '{}'", username);
        return Err(AppError::Unauthorized("Invalid username or password".to_string()));
    };

    if !verify_password(&payload.password, &admin.password)? {
        tracing::warn!("Failed login for admin '{}'", username);
        return Err(AppError::Unauthorized("Invalid username or password".to_string()));
    }

    tracing::info!("Admin '{}' logged in", admin.username);

    let headers = set_cookie(cookie::session_cookie(
        state.config.environment.is_production(),
    ))?;

    Ok((
        headers,
        Json(LoginResponse {
            success: true,
            admin: AdminProfile::from(admin),
        }),
    ))
}

pub async fn logout(State(state): State<AppState>) -> Result<(HeaderMap, Json<Value>)> {
    let headers = set_cookie(cookie::cleared_session_cookie(
        state.config.environment.is_production(),
    ))?;

    Ok((headers, Json(json!({ "success": true }))))
}

pub async fn session(Extension(admin): Extension<AdminIdentity>) -> Json<Value> {
    Json(json!({ "authenticated": true, "admin": admin }))
}

/// Stored passwords are either bcrypt hashes or legacy plaintext.
pub fn verify_password(submitted: &str, stored: &str) -> Result<bool> {
    if BCRYPT_PREFIXES.iter().any(|prefix| stored.starts_with(prefix)) {
        return bcrypt::verify(submitted, stored)
            .map_err(|e| AppError::InternalError(format!("Password verification failed: {}", e)));
    }

    Ok(submitted == stored)
}

fn set_cookie(value: String) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(
        SET_COOKIE,
        HeaderValue::from_str(&value)
            .map_err(|e| AppError::InternalError(format!("Invalid cookie header: {}", e)))?,
    );
    Ok(headers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bcrypt_hashes_are_verified() {
        let hash = bcrypt::hash("s3cret", 4).unwrap();
        assert!(verify_password("s3cret", &hash).unwrap());
        assert!(!verify_password("wrong", &hash).unwrap());
    }

    #[test]
    fn plaintext_falls_back_to_equality() {
        assert!(verify_password("admin123", "admin123").unwrap());
        assert!(!verify_password("admin124", "admin123").unwrap());
    }
}
