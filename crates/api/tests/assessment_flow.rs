//! Database-backed integration tests for the assessment lifecycle and
//! API-key tracking. Each test gets a fresh schema with the seeds applied.

mod common;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use common::{body_json, get, post_json};
use serde_json::json;
use sqlx::PgPool;
use tower::ServiceExt;

/// Start a session and return its token.
async fn start_session(app: &axum::Router) -> String {
    let response = post_json(app.clone(), "/api/v1/assessment/sessions", json!({})).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    body["data"]["session_token"]
        .as_str()
        .expect("session token in response")
        .to_string()
}

// ---------------------------------------------------------------------------
// Bulk answer submission
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn bulk_submission_must_cover_every_question(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = start_session(&app).await;

    let response = post_json(
        app,
        &format!("/api/v1/assessment/sessions/{token}/answers/bulk"),
        json!({ "answers": [{ "question_id": 1, "selected_option": "A" }] }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["code"], "BAD_REQUEST");
    assert!(
        body["error"].as_str().unwrap().contains("36"),
        "error should state the required count"
    );
}

#[sqlx::test(migrations = "../db/migrations")]
async fn bulk_submission_rejects_duplicate_padding(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = start_session(&app).await;

    // 36 items but only one distinct question.
    let answers: Vec<_> = (0..36)
        .map(|_| json!({ "question_id": 1, "selected_option": "A" }))
        .collect();
    let response = post_json(
        app,
        &format!("/api/v1/assessment/sessions/{token}/answers/bulk"),
        json!({ "answers": answers }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Full questionnaire flow
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn full_questionnaire_completes_with_a_calculated_type(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = start_session(&app).await;

    let questions = body_json(get(app.clone(), "/api/v1/assessment/questions").await).await;
    assert_eq!(questions["count"], 36);

    // Option A maps to the first pole on every seeded question, so a uniform
    // "A" run scores 9-0 on each dimension.
    let answers: Vec<_> = questions["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|q| json!({ "question_id": q["id"], "selected_option": "A" }))
        .collect();

    let bulk = post_json(
        app.clone(),
        &format!("/api/v1/assessment/sessions/{token}/answers/bulk"),
        json!({ "answers": answers }),
    )
    .await;
    assert_eq!(bulk.status(), StatusCode::OK);
    assert_eq!(body_json(bulk).await["data"]["answered_count"], 36);

    let done = post_json(
        app.clone(),
        &format!("/api/v1/assessment/sessions/{token}/transition"),
        json!({ "target": "calculate" }),
    )
    .await;
    assert_eq!(done.status(), StatusCode::OK);
    assert_eq!(body_json(done).await["data"]["state"], "completed");

    let results = body_json(
        get(
            app.clone(),
            &format!("/api/v1/assessment/sessions/{token}/results"),
        )
        .await,
    )
    .await;
    assert_eq!(results["data"]["personality_type"]["code"], "ESTJ");
    for dim in results["data"]["dimensions"].as_array().unwrap() {
        assert_eq!(dim["strength"], 1.0);
        assert_eq!(dim["clarity"], "very_clear");
        assert_eq!(dim["borderline"], false);
    }

    // Career matches for the calculated type, best first and capped.
    let careers = body_json(
        get(
            app,
            &format!("/api/v1/assessment/sessions/{token}/careers?limit=5"),
        )
        .await,
    )
    .await;
    let matches = careers["data"].as_array().unwrap();
    assert_eq!(matches.len(), 5);
    assert_eq!(matches[0]["name"], "Business Manager");
    for pair in matches.windows(2) {
        assert!(
            pair[0]["match_score"].as_f64() >= pair[1]["match_score"].as_f64(),
            "matches must be sorted best first"
        );
    }
}

// ---------------------------------------------------------------------------
// API-key tracking
// ---------------------------------------------------------------------------

async fn get_with_api_key(app: axum::Router, uri: &str, key: &str) -> axum::response::Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .header("x-api-key", key)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

#[sqlx::test(migrations = "../db/migrations")]
async fn api_key_callers_are_tracked(pool: PgPool) {
    use masark_api::auth::jwt::generate_api_key;
    use masark_core::types::TenantId;
    use masark_db::models::api_key::CreateApiKey;
    use masark_db::models::user::CreateUser;
    use masark_db::repositories::{ApiKeyRepo, UserRepo};

    let tenant = TenantId(1);
    let owner = UserRepo::create(
        &pool,
        tenant,
        &CreateUser {
            username: "integrations".to_string(),
            email: "integrations@example.com".to_string(),
            password_hash: "unused".to_string(),
            role_id: 1,
        },
    )
    .await
    .unwrap();

    let (plaintext, key_hash, key_prefix) = generate_api_key();
    let key = ApiKeyRepo::create(
        &pool,
        tenant,
        &CreateApiKey {
            name: "partner".to_string(),
            description: None,
            key_hash,
            key_prefix,
            created_by: owner.id,
            rate_limit_per_minute: 60,
            rate_limit_per_day: 10_000,
            expires_at: None,
        },
    )
    .await
    .unwrap();

    let app = common::build_test_app(pool.clone());

    // Unknown keys are rejected before routing.
    let denied = get_with_api_key(
        app.clone(),
        "/api/v1/assessment/questions",
        "mk_0000000000000000000000000000000",
    )
    .await;
    assert_eq!(denied.status(), StatusCode::UNAUTHORIZED);

    // A valid key passes through and the call lands in the usage log.
    let allowed = get_with_api_key(app, "/api/v1/assessment/questions", &plaintext).await;
    assert_eq!(allowed.status(), StatusCode::OK);

    let usage = ApiKeyRepo::list_usage(&pool, tenant, key.id, 10, 0)
        .await
        .unwrap();
    assert_eq!(usage.len(), 1);
    assert_eq!(usage[0].method, "GET");
    assert_eq!(usage[0].path, "/api/v1/assessment/questions");
    assert_eq!(usage[0].response_status, 200);

    let refreshed = ApiKeyRepo::find_by_id(&pool, tenant, key.id)
        .await
        .unwrap()
        .unwrap();
    assert!(refreshed.last_used_at.is_some());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn revoked_api_key_is_rejected(pool: PgPool) {
    use masark_api::auth::jwt::generate_api_key;
    use masark_core::types::TenantId;
    use masark_db::models::api_key::CreateApiKey;
    use masark_db::models::user::CreateUser;
    use masark_db::repositories::{ApiKeyRepo, UserRepo};

    let tenant = TenantId(1);
    let owner = UserRepo::create(
        &pool,
        tenant,
        &CreateUser {
            username: "integrations".to_string(),
            email: "integrations@example.com".to_string(),
            password_hash: "unused".to_string(),
            role_id: 1,
        },
    )
    .await
    .unwrap();

    let (plaintext, key_hash, key_prefix) = generate_api_key();
    let key = ApiKeyRepo::create(
        &pool,
        tenant,
        &CreateApiKey {
            name: "short-lived".to_string(),
            description: None,
            key_hash,
            key_prefix,
            created_by: owner.id,
            rate_limit_per_minute: 60,
            rate_limit_per_day: 10_000,
            expires_at: None,
        },
    )
    .await
    .unwrap();
    ApiKeyRepo::revoke(&pool, tenant, key.id).await.unwrap();

    let app = common::build_test_app(pool);
    let denied = get_with_api_key(app, "/api/v1/assessment/questions", &plaintext).await;
    assert_eq!(denied.status(), StatusCode::UNAUTHORIZED);
}
