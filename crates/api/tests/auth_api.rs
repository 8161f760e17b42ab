//! Integration tests for authentication and authorization behaviour that is
//! enforced before any database access: missing/invalid bearer tokens and
//! role checks.

mod common;

use axum::body::Body;
use axum::http::header::AUTHORIZATION;
use axum::http::{Method, Request, StatusCode};
use common::{body_json, get};
use masark_api::auth::jwt::generate_access_token;
use masark_core::types::TenantId;
use tower::ServiceExt;

async fn get_with_auth(app: axum::Router, uri: &str, auth: &str) -> axum::response::Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .header(AUTHORIZATION, auth)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

// ---------------------------------------------------------------------------
// Missing credentials
// ---------------------------------------------------------------------------

#[tokio::test]
async fn me_without_token_returns_401() {
    let app = common::build_test_app(common::lazy_pool());
    let response = get(app, "/api/v1/auth/me").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let json = body_json(response).await;
    assert_eq!(json["code"], "UNAUTHORIZED");
    assert!(json["error"].is_string());
}

#[tokio::test]
async fn admin_users_without_token_returns_401() {
    let app = common::build_test_app(common::lazy_pool());
    let response = get(app, "/api/v1/admin/users").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn admin_stats_without_token_returns_401() {
    let app = common::build_test_app(common::lazy_pool());
    let response = get(app, "/api/v1/admin/stats").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Malformed and invalid credentials
// ---------------------------------------------------------------------------

#[tokio::test]
async fn non_bearer_authorization_returns_401() {
    let app = common::build_test_app(common::lazy_pool());
    let response = get_with_auth(app, "/api/v1/auth/me", "Basic dXNlcjpwYXNz").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn garbage_bearer_token_returns_401() {
    let app = common::build_test_app(common::lazy_pool());
    let response = get_with_auth(app, "/api/v1/auth/me", "Bearer not-a-jwt").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let json = body_json(response).await;
    assert_eq!(json["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn token_signed_with_other_secret_returns_401() {
    let app = common::build_test_app(common::lazy_pool());

    // Signed with a different secret than the test app's.
    let other = masark_api::auth::jwt::JwtConfig {
        secret: "a-completely-different-secret".to_string(),
        access_token_expiry_mins: 15,
        refresh_token_expiry_days: 7,
    };
    let token = generate_access_token(1, TenantId(1), "admin", &other).unwrap();

    let response = get_with_auth(app, "/api/v1/admin/users", &format!("Bearer {token}")).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Role enforcement
// ---------------------------------------------------------------------------

#[tokio::test]
async fn non_admin_token_on_admin_route_returns_403() {
    let app = common::build_test_app(common::lazy_pool());

    let config = common::test_config();
    let token = generate_access_token(7, TenantId(1), "user", &config.jwt).unwrap();

    let response = get_with_auth(app, "/api/v1/admin/users", &format!("Bearer {token}")).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let json = body_json(response).await;
    assert_eq!(json["code"], "FORBIDDEN");
}

#[tokio::test]
async fn admin_session_filter_rejects_unknown_state() {
    let app = common::build_test_app(common::lazy_pool());

    let config = common::test_config();
    let token = generate_access_token(1, TenantId(1), "admin", &config.jwt).unwrap();

    // The filter is validated before any query runs.
    let response = get_with_auth(
        app,
        "/api/v1/admin/sessions?state=finished",
        &format!("Bearer {token}"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
}
