//! Route definitions for `/admin/api-keys`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::api_keys;
use crate::state::AppState;

/// Routes mounted at `/admin/api-keys`. All require the `admin` role.
///
/// ```text
/// GET    /               list keys
/// POST   /               create key (plaintext returned once)
/// GET    /{id}           key detail
/// PATCH  /{id}           update rate limits
/// DELETE /{id}           revoke (permanent)
/// POST   /{id}/rotate    rotate key material
/// GET    /{id}/usage     usage log, newest first
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(api_keys::list_keys).post(api_keys::create_key))
        .route(
            "/{id}",
            get(api_keys::get_key)
                .patch(api_keys::update_key_limits)
                .delete(api_keys::revoke_key),
        )
        .route("/{id}/rotate", post(api_keys::rotate_key))
        .route("/{id}/usage", get(api_keys::list_key_usage))
}
