//! Route definitions for admin session monitoring.

use axum::routing::get;
use axum::Router;

use crate::handlers::monitoring;
use crate::state::AppState;

/// Routes mounted at `/admin`. All require the `admin` role.
///
/// ```text
/// GET /sessions  paginated session listing (?state=, limit, offset)
/// GET /stats     session counts by state
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/sessions", get(monitoring::list_sessions))
        .route("/stats", get(monitoring::get_stats))
}
