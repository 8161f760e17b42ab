//! Admin handlers for API key management and usage logs.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use masark_core::types::{DbId, Timestamp};
use masark_db::models::api_key::{ApiKeyListItem, ApiUsageLogEntry, CreateApiKey};
use masark_db::repositories::ApiKeyRepo;
use masark_db::{clamp_limit, clamp_offset};
use serde::{Deserialize, Serialize};

use crate::auth::jwt::generate_api_key;
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Default rate limits applied when a request omits them.
const DEFAULT_RATE_PER_MINUTE: i32 = 60;
const DEFAULT_RATE_PER_DAY: i32 = 10_000;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /admin/api-keys`.
#[derive(Debug, Deserialize)]
pub struct CreateApiKeyRequest {
    pub name: String,
    pub description: Option<String>,
    pub rate_limit_per_minute: Option<i32>,
    pub rate_limit_per_day: Option<i32>,
    pub expires_at: Option<Timestamp>,
}

/// Request body for `PATCH /admin/api-keys/{id}`.
#[derive(Debug, Deserialize)]
pub struct UpdateLimitsRequest {
    pub rate_limit_per_minute: i32,
    pub rate_limit_per_day: i32,
}

/// Response for creation and rotation. The only place the plaintext key
/// ever appears.
#[derive(Debug, Serialize)]
pub struct ApiKeyCreatedResponse {
    /// Full plaintext key. Shown exactly once; store it now.
    pub api_key: String,
    #[serde(flatten)]
    pub key: ApiKeyListItem,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/admin/api-keys
pub async fn create_key(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Json(input): Json<CreateApiKeyRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<ApiKeyCreatedResponse>>)> {
    if input.name.trim().is_empty() {
        return Err(AppError::BadRequest("Key name must not be empty".into()));
    }
    let per_minute = input.rate_limit_per_minute.unwrap_or(DEFAULT_RATE_PER_MINUTE);
    let per_day = input.rate_limit_per_day.unwrap_or(DEFAULT_RATE_PER_DAY);
    validate_limits(per_minute, per_day)?;

    let (plaintext, hash, prefix) = generate_api_key();
    let key = ApiKeyRepo::create(
        &state.pool,
        admin.tenant,
        &CreateApiKey {
            name: input.name.trim().to_string(),
            description: input.description,
            key_hash: hash,
            key_prefix: prefix,
            created_by: admin.user_id,
            rate_limit_per_minute: per_minute,
            rate_limit_per_day: per_day,
            expires_at: input.expires_at,
        },
    )
    .await?;

    tracing::info!(key_id = key.id, by = admin.user_id, "API key created");
    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: ApiKeyCreatedResponse {
                api_key: plaintext,
                key: key.into(),
            },
        }),
    ))
}

/// GET /api/v1/admin/api-keys
pub async fn list_keys(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Vec<ApiKeyListItem>>>> {
    let limit = clamp_limit(params.limit);
    let offset = clamp_offset(params.offset);
    let keys = ApiKeyRepo::list(&state.pool, admin.tenant, limit, offset).await?;
    Ok(Json(DataResponse { data: keys }))
}

/// GET /api/v1/admin/api-keys/{id}
pub async fn get_key(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ApiKeyListItem>>> {
    let key = ApiKeyRepo::find_by_id(&state.pool, admin.tenant, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("API key {id} not found")))?;
    Ok(Json(DataResponse { data: key.into() }))
}

/// PATCH /api/v1/admin/api-keys/{id}
pub async fn update_key_limits(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateLimitsRequest>,
) -> AppResult<Json<DataResponse<ApiKeyListItem>>> {
    validate_limits(input.rate_limit_per_minute, input.rate_limit_per_day)?;

    let key = ApiKeyRepo::update_limits(
        &state.pool,
        admin.tenant,
        id,
        input.rate_limit_per_minute,
        input.rate_limit_per_day,
    )
    .await?
    .ok_or_else(|| AppError::NotFound(format!("API key {id} not found")))?;
    Ok(Json(DataResponse { data: key.into() }))
}

/// DELETE /api/v1/admin/api-keys/{id}
///
/// Revocation is permanent; a revoked key cannot be rotated back to life.
pub async fn revoke_key(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    ApiKeyRepo::revoke(&state.pool, admin.tenant, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("API key {id} not found or already revoked")))?;

    tracing::info!(key_id = id, by = admin.user_id, "API key revoked");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/admin/api-keys/{id}/rotate
///
/// Replaces the key material; the old plaintext stops working immediately.
pub async fn rotate_key(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ApiKeyCreatedResponse>>> {
    let (plaintext, hash, prefix) = generate_api_key();
    let key = ApiKeyRepo::rotate(&state.pool, admin.tenant, id, &hash, &prefix)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("API key {id} not found or revoked")))?;

    tracing::info!(key_id = id, by = admin.user_id, "API key rotated");
    Ok(Json(DataResponse {
        data: ApiKeyCreatedResponse {
            api_key: plaintext,
            key: key.into(),
        },
    }))
}

/// GET /api/v1/admin/api-keys/{id}/usage
pub async fn list_key_usage(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Vec<ApiUsageLogEntry>>>> {
    // 404 for keys outside the tenant before reading the log.
    ApiKeyRepo::find_by_id(&state.pool, admin.tenant, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("API key {id} not found")))?;

    let limit = clamp_limit(params.limit);
    let offset = clamp_offset(params.offset);
    let usage = ApiKeyRepo::list_usage(&state.pool, admin.tenant, id, limit, offset).await?;
    Ok(Json(DataResponse { data: usage }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn validate_limits(per_minute: i32, per_day: i32) -> AppResult<()> {
    if per_minute <= 0 || per_day <= 0 {
        return Err(AppError::BadRequest(
            "Rate limits must be positive integers".into(),
        ));
    }
    Ok(())
}
