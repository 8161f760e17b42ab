//! Integration tests for assessment and career endpoint input validation.
//!
//! Everything asserted here is rejected before a database query is issued,
//! so the tests run against a lazily-connecting pool.

mod common;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use common::{body_json, get, post_json};
use serde_json::json;
use tower::ServiceExt;

// ---------------------------------------------------------------------------
// Language validation
// ---------------------------------------------------------------------------

#[tokio::test]
async fn questions_with_unknown_language_returns_400() {
    let app = common::build_test_app(common::lazy_pool());
    let response = get(app, "/api/v1/assessment/questions?lang=fr").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn personality_types_with_unknown_language_returns_400() {
    let app = common::build_test_app(common::lazy_pool());
    let response = get(app, "/api/v1/personality-types?lang=de").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Session creation validation
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_session_with_unknown_language_returns_400() {
    let app = common::build_test_app(common::lazy_pool());
    let response = post_json(
        app,
        "/api/v1/assessment/sessions",
        json!({ "language": "fr" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn create_session_with_unknown_deployment_mode_returns_400() {
    let app = common::build_test_app(common::lazy_pool());
    let response = post_json(
        app,
        "/api/v1/assessment/sessions",
        json!({ "deployment_mode": "enterprise" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Tenant header validation
// ---------------------------------------------------------------------------

#[tokio::test]
async fn malformed_tenant_header_returns_400() {
    let app = common::build_test_app(common::lazy_pool());

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/v1/assessment/sessions")
        .header("content-type", "application/json")
        .header("x-tenant-id", "not-a-number")
        .body(Body::from(json!({}).to_string()))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn non_positive_tenant_header_returns_400() {
    let app = common::build_test_app(common::lazy_pool());

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/v1/assessment/sessions")
        .header("content-type", "application/json")
        .header("x-tenant-id", "0")
        .body(Body::from(json!({}).to_string()))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Career endpoint validation
// ---------------------------------------------------------------------------

#[tokio::test]
async fn career_search_with_blank_term_returns_400() {
    let app = common::build_test_app(common::lazy_pool());
    let response = get(app, "/api/v1/careers/search?q=%20%20").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn career_match_with_unknown_language_returns_400() {
    let app = common::build_test_app(common::lazy_pool());
    let response = get(
        app,
        "/api/v1/careers/match?personality_type=INTJ&lang=zz",
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn career_detail_with_unknown_deployment_mode_returns_400() {
    let app = common::build_test_app(common::lazy_pool());
    let response = get(app, "/api/v1/careers/42?deployment_mode=pilot").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
