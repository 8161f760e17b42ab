//! Admin monitoring handlers: session listings and aggregate statistics.

use axum::extract::{Query, State};
use axum::Json;
use masark_core::session_state::SessionState;
use masark_db::models::assessment::{SessionListItem, SessionStateCount};
use masark_db::repositories::AssessmentRepo;
use masark_db::{clamp_limit, clamp_offset};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for `GET /admin/sessions`.
#[derive(Debug, Deserialize)]
pub struct SessionListParams {
    /// Optional state filter, e.g. `completed`.
    pub state: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Response body for `GET /admin/stats`.
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub total_sessions: i64,
    pub by_state: Vec<SessionStateCount>,
}

/// GET /api/v1/admin/sessions
///
/// Paginated session listing, newest first, with an optional state filter.
pub async fn list_sessions(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Query(params): Query<SessionListParams>,
) -> AppResult<Json<DataResponse<Vec<SessionListItem>>>> {
    // Reject unknown state filters instead of silently returning nothing.
    let state_filter = match params.state.as_deref() {
        None => None,
        Some(raw) => Some(
            SessionState::from_str_db(raw)
                .map_err(|_| AppError::BadRequest(format!("Unknown session state '{raw}'")))?
                .as_str(),
        ),
    };

    let limit = clamp_limit(params.limit);
    let offset = clamp_offset(params.offset);
    let sessions =
        AssessmentRepo::list_sessions(&state.pool, admin.tenant, state_filter, limit, offset)
            .await?;
    Ok(Json(DataResponse { data: sessions }))
}

/// GET /api/v1/admin/stats
///
/// Session counts grouped by state plus the overall total.
pub async fn get_stats(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
) -> AppResult<Json<DataResponse<StatsResponse>>> {
    let by_state = AssessmentRepo::count_by_state(&state.pool, admin.tenant).await?;
    let total_sessions = by_state.iter().map(|c| c.count).sum();
    Ok(Json(DataResponse {
        data: StatsResponse {
            total_sessions,
            by_state,
        },
    }))
}
