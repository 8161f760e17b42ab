//! Route definitions for the `/personality-types` reference data.

use axum::routing::get;
use axum::Router;

use crate::handlers::personality_types;
use crate::state::AppState;

/// Routes mounted at `/personality-types`.
///
/// ```text
/// GET /        -> all 16 types
/// GET /{code}  -> one type by 4-letter code
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(personality_types::list_types))
        .route("/{code}", get(personality_types::get_type))
}
