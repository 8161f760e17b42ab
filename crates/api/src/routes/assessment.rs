//! Route definitions for the `/assessment` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::assessment;
use crate::state::AppState;

/// Routes mounted at `/assessment`.
///
/// ```text
/// GET  /questions                               active question set (public)
/// POST /sessions                                start a session
/// GET  /sessions/{token}                        session status
/// POST /sessions/{token}/answers                record one answer
/// POST /sessions/{token}/answers/bulk           record a batch of answers
/// POST /sessions/{token}/cluster-ratings        record cluster interest ratings
/// GET  /sessions/{token}/tie-breakers           tie-breaker questions
/// POST /sessions/{token}/tie-breakers           record a tie-breaker answer
/// POST /sessions/{token}/transition             move through the lifecycle
/// GET  /sessions/{token}/results                calculated results
/// GET  /sessions/{token}/careers                top career matches
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/questions", get(assessment::list_questions))
        .route("/sessions", post(assessment::create_session))
        .route("/sessions/{token}", get(assessment::get_session))
        .route("/sessions/{token}/answers", post(assessment::submit_answer))
        .route(
            "/sessions/{token}/answers/bulk",
            post(assessment::submit_answers_bulk),
        )
        .route(
            "/sessions/{token}/cluster-ratings",
            post(assessment::submit_cluster_ratings),
        )
        .route(
            "/sessions/{token}/tie-breakers",
            get(assessment::list_tie_breakers).post(assessment::submit_tie_breaker),
        )
        .route("/sessions/{token}/transition", post(assessment::transition))
        .route("/sessions/{token}/results", get(assessment::get_results))
        .route(
            "/sessions/{token}/careers",
            get(assessment::get_session_careers),
        )
}
