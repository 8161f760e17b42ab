//! API-key tracking for programmatic callers.
//!
//! Partner integrations send an `X-API-Key` header. When the header is
//! present the key must resolve to an active, unrevoked, unexpired row; the
//! request is then recorded in the usage log and the key's `last_used_at`
//! stamp refreshed. Requests without the header pass through untouched, so
//! browser and JWT traffic is unaffected.

use std::time::Instant;

use axum::body::Body;
use axum::extract::State;
use axum::http::header::USER_AGENT;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use masark_core::error::CoreError;
use masark_db::repositories::ApiKeyRepo;

use crate::auth::jwt::hash_api_key;
use crate::error::AppError;
use crate::state::AppState;

/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Resolve and track an `X-API-Key` header if one is present.
pub async fn track_api_key_usage(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let presented = request
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);

    let Some(presented) = presented else {
        return next.run(request).await;
    };

    let key = match ApiKeyRepo::find_active_by_hash(&state.pool, &hash_api_key(&presented)).await {
        Ok(Some(key)) => key,
        Ok(None) => {
            return AppError::Core(CoreError::Unauthorized("Invalid API key".into()))
                .into_response();
        }
        Err(err) => return AppError::Database(err).into_response(),
    };

    let method = request.method().to_string();
    let path = request.uri().path().to_string();
    let user_agent = request
        .headers()
        .get(USER_AGENT)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);

    let started = Instant::now();
    let response = next.run(request).await;

    let elapsed_ms = i32::try_from(started.elapsed().as_millis()).unwrap_or(i32::MAX);
    let status = response.status().as_u16() as i16;

    // Bookkeeping failures are logged, never surfaced to the caller.
    if let Err(err) = ApiKeyRepo::touch_last_used(&state.pool, key.id).await {
        tracing::warn!(error = %err, key_id = key.id, "Failed to stamp API key last_used_at");
    }
    if let Err(err) = ApiKeyRepo::insert_usage(
        &state.pool,
        key.id,
        &method,
        &path,
        status,
        Some(elapsed_ms),
        None,
        user_agent.as_deref(),
    )
    .await
    {
        tracing::warn!(error = %err, key_id = key.id, "Failed to record API key usage");
    }

    response
}
