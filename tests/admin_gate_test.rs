mod common;

use axum::http::{Method, StatusCode};
use common::{ADMIN_COOKIE, offline_app, response_json, send, set_cookie};
use serde_json::json;

#[tokio::test]
async fn admin_routes_require_cookie() {
    let app = offline_app().await;

    let routes = [
        (Method::GET, "/api/admin/session"),
        (Method::GET, "/api/admin/stats"),
        (Method::GET, "/api/admin/products"),
        (Method::POST, "/api/admin/products"),
        (Method::GET, "/api/admin/products/1"),
        (Method::PUT, "/api/admin/products/1"),
        (Method::DELETE, "/api/admin/products/1"),
        (Method::GET, "/api/admin/messages"),
        (Method::GET, "/api/admin/messages/1"),
        (Method::PATCH, "/api/admin/messages/1"),
        (Method::DELETE, "/api/admin/messages/1"),
        (Method::POST, "/api/tebi/upload"),
    ];

    for (method, uri) in routes {
        let response = send(&app, method.clone(), uri, Some(json!({})), None).await;
        assert_eq!(
            response.status(),
            StatusCode::UNAUTHORIZED,
            "{} {} should be gated",
            method,
            uri
        );
        let body = response_json(response).await;
        assert_eq!(body["error"], "Authentication required");
    }
}

#[tokio::test]
async fn cookie_must_be_exactly_true() {
    let app = offline_app().await;

    for cookie in ["admin_logged_in=false", "admin_logged_in=1", "other=true"] {
        let response = send(&app, Method::GET, "/api/admin/session", None, Some(cookie)).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "cookie {}", cookie);
    }
}

#[tokio::test]
async fn session_returns_fixed_identity() {
    let app = offline_app().await;

    let response = send(
        &app,
        Method::GET,
        "/api/admin/session",
        None,
        Some(&format!("lang=tr; {}", ADMIN_COOKIE)),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["authenticated"], true);
    assert_eq!(body["admin"]["username"], "admin");
}

#[tokio::test]
async fn logout_clears_cookie() {
    let app = offline_app().await;

    let response = send(&app, Method::POST, "/api/admin/logout", None, Some(ADMIN_COOKIE)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let cookie = set_cookie(&response).expect("set-cookie header");
    assert!(cookie.starts_with("admin_logged_in=;"));
    assert!(cookie.contains("Max-Age=0"));
}

#[tokio::test]
async fn login_requires_both_fields() {
    let app = offline_app().await;

    let response = send(
        &app,
        Method::POST,
        "/api/admin/login",
        Some(json!({ "username": "admin", "password": "" })),
        None,
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(set_cookie(&response).is_none());
}

#[tokio::test]
async fn health_is_public() {
    let app = offline_app().await;

    let response = send(&app, Method::GET, "/health", None, None).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["status"], "ok");
}
