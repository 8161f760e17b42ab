//! Route definitions for the `/careers` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::careers;
use crate::state::AppState;

/// Routes mounted at `/careers`.
///
/// ```text
/// GET /match                    top matches for a type code (?personality_type=)
/// GET /search                   substring search (?q=)
/// GET /clusters                 all career clusters
/// GET /clusters/{id}/careers    careers within a cluster
/// GET /{id}                     career detail with pathways
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/match", get(careers::match_careers))
        .route("/search", get(careers::search_careers))
        .route("/clusters", get(careers::list_clusters))
        .route("/clusters/{id}/careers", get(careers::list_cluster_careers))
        .route("/{id}", get(careers::get_career))
}
