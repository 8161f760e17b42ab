//! Database-backed integration tests for login throttling.

mod common;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use common::{body_json, post_json};
use masark_api::auth::password::hash_password;
use masark_core::types::TenantId;
use masark_db::models::user::CreateUser;
use masark_db::repositories::UserRepo;
use serde_json::json;
use sqlx::PgPool;

const TENANT: TenantId = TenantId(1);
const PASSWORD: &str = "a-perfectly-fine-password";

async fn seed_user(pool: &PgPool, username: &str) -> masark_db::models::user::User {
    UserRepo::create(
        pool,
        TENANT,
        &CreateUser {
            username: username.to_string(),
            email: format!("{username}@example.com"),
            password_hash: hash_password(PASSWORD).expect("hashing should succeed"),
            role_id: 2,
        },
    )
    .await
    .unwrap()
}

#[sqlx::test(migrations = "../db/migrations")]
async fn active_lock_rejects_even_the_correct_password(pool: PgPool) {
    let user = seed_user(&pool, "throttled").await;
    UserRepo::lock_account(&pool, TENANT, user.id, Utc::now() + Duration::minutes(15))
        .await
        .unwrap();

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/auth/login",
        json!({ "username": "throttled", "password": PASSWORD }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("locked"));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn expired_lock_resets_the_failure_count(pool: PgPool) {
    let user = seed_user(&pool, "throttled").await;

    // Five failures locked the account; the lock has since run out.
    for _ in 0..5 {
        UserRepo::increment_failed_login(&pool, TENANT, user.id)
            .await
            .unwrap();
    }
    UserRepo::lock_account(&pool, TENANT, user.id, Utc::now() - Duration::minutes(1))
        .await
        .unwrap();

    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/auth/login",
        json!({ "username": "throttled", "password": "not-the-password-at-all" }),
    )
    .await;

    // One wrong password after an expired lock is an ordinary failure, not
    // a fresh lock.
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Invalid username or password");

    let row = UserRepo::find_by_username(&pool, TENANT, "throttled")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(row.failed_login_count, 1);
    assert!(row.locked_until.is_none());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn login_succeeds_after_an_expired_lock(pool: PgPool) {
    let user = seed_user(&pool, "recovered").await;
    for _ in 0..5 {
        UserRepo::increment_failed_login(&pool, TENANT, user.id)
            .await
            .unwrap();
    }
    UserRepo::lock_account(&pool, TENANT, user.id, Utc::now() - Duration::minutes(1))
        .await
        .unwrap();

    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/auth/login",
        json!({ "username": "recovered", "password": PASSWORD }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert!(body["data"]["access_token"].is_string());

    let row = UserRepo::find_by_username(&pool, TENANT, "recovered")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(row.failed_login_count, 0);
    assert!(row.locked_until.is_none());
}
