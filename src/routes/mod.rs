mod auth;
mod health;
mod messages;
mod products;
mod upload;

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::{AppState, middleware::admin_middleware};

pub fn create_router() -> Router<AppState> {
    let public = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .route("/api/products", get(products::list_products))
        .route("/api/products/{slug}", get(products::get_product_by_slug))
        .route("/api/contact", post(messages::submit_contact))
        .route("/api/admin/login", post(auth::login))
        .route("/api/admin/logout", post(auth::logout));

    let admin = Router::new()
        .route("/api/admin/session", get(auth::session))
        .route("/api/admin/stats", get(messages::dashboard_stats))
        .route(
            "/api/admin/products",
            get(products::list_products_admin).post(products::create_product),
        )
        .route(
            "/api/admin/products/{id}",
            get(products::get_product)
                .put(products::update_product)
                .delete(products::delete_product),
        )
        .route("/api/admin/messages", get(messages::list_messages))
        .route(
            "/api/admin/messages/{id}",
            get(messages::get_message)
                .patch(messages::mark_message)
                .delete(messages::delete_message),
        )
        .route("/api/tebi/upload", post(upload::upload_file))
        .route_layer(middleware::from_fn(admin_middleware));

    public.merge(admin)
}
