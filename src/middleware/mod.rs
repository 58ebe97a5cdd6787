use axum::{extract::Request, middleware::Next, response::Response};

use crate::{error::AppError, models::AdminIdentity, utils::cookie};

/// Lets the request through when the `admin_logged_in` cookie is `"true"`.
/// The session is not checked against the database.
pub async fn admin_middleware(mut req: Request, next: Next) -> Result<Response, AppError> {
    if !cookie::is_admin_session(req.headers()) {
        return Err(AppError::Unauthorized("Authentication required".to_string()));
    }

    req.extensions_mut().insert(AdminIdentity::fixed());

    Ok(next.run(req).await)
}
