//! Assessment session, answer, cluster-rating, and tie-breaker models.

use masark_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Full row from the `assessment_sessions` table.
///
/// Strength/clarity columns are `NULL` until results are calculated.
#[derive(Debug, Clone, FromRow)]
pub struct AssessmentSession {
    pub id: DbId,
    pub tenant_id: DbId,
    pub session_token: String,
    pub student_name: Option<String>,
    pub student_email: Option<String>,
    pub student_external_id: Option<String>,
    /// Content language: `en` or `ar`.
    pub language: String,
    /// Deployment mode: `standard` or `mawhiba`.
    pub deployment_mode: String,
    /// Session state, see `masark_core::session_state::SessionState`.
    pub state: String,
    pub personality_type_id: Option<DbId>,
    pub strength_ei: Option<f64>,
    pub strength_sn: Option<f64>,
    pub strength_tf: Option<f64>,
    pub strength_jp: Option<f64>,
    pub clarity_ei: Option<String>,
    pub clarity_sn: Option<String>,
    pub clarity_tf: Option<String>,
    pub clarity_jp: Option<String>,
    pub started_at: Timestamp,
    pub completed_at: Option<Timestamp>,
    pub updated_at: Timestamp,
}

/// DTO for creating a new assessment session.
#[derive(Debug)]
pub struct CreateAssessmentSession {
    pub session_token: String,
    pub student_name: Option<String>,
    pub student_email: Option<String>,
    pub student_external_id: Option<String>,
    pub language: String,
    pub deployment_mode: String,
}

/// Calculated results persisted when a session completes.
#[derive(Debug)]
pub struct SessionResults {
    pub personality_type_id: DbId,
    /// Preference strengths in EI, SN, TF, JP order.
    pub strengths: [f64; 4],
    /// Clarity labels in EI, SN, TF, JP order.
    pub clarities: [&'static str; 4],
}

/// A row from the `assessment_answers` table.
#[derive(Debug, Clone, FromRow)]
pub struct AssessmentAnswer {
    pub id: DbId,
    pub session_id: DbId,
    pub question_id: DbId,
    /// Selected option: `A` or `B`.
    pub selected_option: String,
    pub answered_at: Timestamp,
}

/// Answer joined with the scoring fields of its question.
#[derive(Debug, Clone, FromRow)]
pub struct AnswerWithQuestion {
    pub question_id: DbId,
    pub selected_option: String,
    pub dimension: String,
    pub option_a_maps_to_first: bool,
}

/// A row from the `assessment_cluster_ratings` table (1-5 scale).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ClusterRating {
    pub id: DbId,
    pub session_id: DbId,
    pub cluster_id: DbId,
    pub rating: i32,
    pub created_at: Timestamp,
}

/// Tie-breaker answer joined with its question's scoring fields.
#[derive(Debug, Clone, FromRow)]
pub struct TieBreakerAnswerWithQuestion {
    pub question_id: DbId,
    pub selected_option: String,
    pub dimension: String,
    pub option_a_maps_to_first: bool,
}

/// Session listing row for the admin monitoring endpoints.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SessionListItem {
    pub id: DbId,
    pub session_token: String,
    pub student_name: Option<String>,
    pub language: String,
    pub deployment_mode: String,
    pub state: String,
    pub personality_type_code: Option<String>,
    pub started_at: Timestamp,
    pub completed_at: Option<Timestamp>,
}

/// Aggregate count of sessions per state.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SessionStateCount {
    pub state: String,
    pub count: i64,
}
