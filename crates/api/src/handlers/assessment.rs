//! Handlers for the `/assessment` resource: questions, sessions, answers,
//! cluster ratings, tie-breakers, state transitions, and results.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use masark_core::deployment::DeploymentMode;
use masark_core::dimension::{AnswerOption, PersonalityDimension};
use masark_core::language::Language;
use masark_core::scoring::{self, DimensionScores, TieResolutions, TOTAL_QUESTIONS};
use masark_core::session_state::{validate_transition, SessionState};
use masark_core::types::{DbId, TenantId, Timestamp};
use masark_db::models::assessment::{AssessmentSession, CreateAssessmentSession, SessionResults};
use masark_db::models::career::LocalizedCareerMatch;
use masark_db::models::personality_type::LocalizedPersonalityType;
use masark_db::models::question::{LocalizedQuestion, LocalizedTieBreakerQuestion};
use masark_db::repositories::{AssessmentRepo, CareerRepo, PersonalityTypeRepo, QuestionRepo};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::middleware::tenant::TenantContext;
use crate::query::LanguageParams;
use crate::response::{DataResponse, ListResponse};
use crate::state::AppState;

/// Default number of career matches returned for a completed session.
const DEFAULT_MATCH_LIMIT: i64 = 10;

/// Hard cap on career matches per request.
const MAX_MATCH_LIMIT: i64 = 50;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /assessment/sessions`.
#[derive(Debug, Deserialize)]
pub struct CreateSessionRequest {
    pub student_name: Option<String>,
    pub student_email: Option<String>,
    pub student_external_id: Option<String>,
    /// Content language: `en` (default) or `ar`.
    pub language: Option<String>,
    /// Deployment mode: `standard` (default) or `mawhiba`.
    pub deployment_mode: Option<String>,
}

/// Public session view. Never exposes scoring internals beyond what the
/// results endpoint returns.
#[derive(Debug, Serialize)]
pub struct SessionView {
    pub session_token: String,
    pub state: String,
    pub language: String,
    pub deployment_mode: String,
    pub answered_count: i64,
    pub total_questions: u32,
    pub started_at: Timestamp,
    pub completed_at: Option<Timestamp>,
}

/// Request body for `POST .../answers` and each bulk item.
#[derive(Debug, Deserialize)]
pub struct AnswerRequest {
    pub question_id: DbId,
    /// `A` or `B`.
    pub selected_option: String,
}

/// Request body for `POST .../answers/bulk`.
#[derive(Debug, Deserialize)]
pub struct BulkAnswersRequest {
    pub answers: Vec<AnswerRequest>,
}

/// One cluster rating in `POST .../cluster-ratings`.
#[derive(Debug, Deserialize)]
pub struct ClusterRatingInput {
    pub cluster_id: DbId,
    /// 1-5 scale.
    pub rating: i32,
}

/// Request body for `POST .../cluster-ratings`.
#[derive(Debug, Deserialize)]
pub struct ClusterRatingsRequest {
    pub ratings: Vec<ClusterRatingInput>,
}

/// Request body for `POST .../transition`.
///
/// `target` names the requested move: `cluster_rating`, `tie_breaker`,
/// `calculate` (finish and score), or `abandon`.
#[derive(Debug, Deserialize)]
pub struct TransitionRequest {
    pub target: String,
}

/// Per-dimension entry in the results payload.
#[derive(Debug, Serialize)]
pub struct DimensionResultView {
    pub dimension: &'static str,
    pub strength: f64,
    pub clarity: String,
    pub borderline: bool,
}

/// Response body for `GET .../results`.
#[derive(Debug, Serialize)]
pub struct ResultsView {
    pub personality_type: LocalizedPersonalityType,
    pub dimensions: Vec<DimensionResultView>,
    pub completed_at: Option<Timestamp>,
}

// ---------------------------------------------------------------------------
// Question handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/assessment/questions
///
/// The active question set in presentation order, localized. The per-question
/// pole mapping is never exposed.
pub async fn list_questions(
    State(state): State<AppState>,
    TenantContext(tenant): TenantContext,
    Query(params): Query<LanguageParams>,
) -> AppResult<Json<ListResponse<LocalizedQuestion>>> {
    let lang = params.language()?;
    let questions = QuestionRepo::list_active(&state.pool, tenant).await?;
    let localized = questions.iter().map(|q| q.localize(lang)).collect();
    Ok(Json(ListResponse::new(localized)))
}

// ---------------------------------------------------------------------------
// Session handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/assessment/sessions
///
/// Start a new assessment session. Returns the opaque session token the
/// client uses for all subsequent calls.
pub async fn create_session(
    State(state): State<AppState>,
    TenantContext(tenant): TenantContext,
    Json(input): Json<CreateSessionRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<SessionView>>)> {
    // Validate enums up front so a typo is a 400, not a DB constraint error.
    let language = match input.language.as_deref() {
        None => Language::default(),
        Some(raw) => Language::from_str_db(raw)?,
    };
    let mode = match input.deployment_mode.as_deref() {
        None => DeploymentMode::default(),
        Some(raw) => DeploymentMode::from_str_db(raw)?,
    };

    let create = CreateAssessmentSession {
        session_token: Uuid::new_v4().to_string(),
        student_name: input.student_name,
        student_email: input.student_email,
        student_external_id: input.student_external_id,
        language: language.as_str().to_string(),
        deployment_mode: mode.as_str().to_string(),
    };

    let session = AssessmentRepo::create_session(&state.pool, tenant, &create).await?;
    tracing::info!(session_id = session.id, "Assessment session created");

    let view = session_view(&session, 0);
    Ok((StatusCode::CREATED, Json(DataResponse { data: view })))
}

/// GET /api/v1/assessment/sessions/{token}
///
/// Session status and progress.
pub async fn get_session(
    State(state): State<AppState>,
    TenantContext(tenant): TenantContext,
    Path(token): Path<String>,
) -> AppResult<Json<DataResponse<SessionView>>> {
    let session = load_session(&state, tenant, &token).await?;
    let answered = AssessmentRepo::count_answers(&state.pool, session.id).await?;
    Ok(Json(DataResponse {
        data: session_view(&session, answered),
    }))
}

// ---------------------------------------------------------------------------
// Answer handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/assessment/sessions/{token}/answers
///
/// Record (or replace) a single answer. Only accepted while the session is
/// in the questionnaire phase.
pub async fn submit_answer(
    State(state): State<AppState>,
    TenantContext(tenant): TenantContext,
    Path(token): Path<String>,
    Json(input): Json<AnswerRequest>,
) -> AppResult<Json<DataResponse<SessionView>>> {
    let session = load_session(&state, tenant, &token).await?;
    require_state(&session, SessionState::InProgress)?;

    let option = AnswerOption::from_str_db(&input.selected_option)?;
    let question = QuestionRepo::find_active_by_id(&state.pool, tenant, input.question_id)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!("Question {} not found", input.question_id))
        })?;

    AssessmentRepo::upsert_answer(&state.pool, session.id, question.id, option.as_str()).await?;

    let answered = AssessmentRepo::count_answers(&state.pool, session.id).await?;
    Ok(Json(DataResponse {
        data: session_view(&session, answered),
    }))
}

/// POST /api/v1/assessment/sessions/{token}/answers/bulk
///
/// Record the full questionnaire in one transaction. A bulk submission must
/// cover all questions, one answer each; partial batches go through the
/// single-answer endpoint instead. Every item is validated before anything
/// is written.
pub async fn submit_answers_bulk(
    State(state): State<AppState>,
    TenantContext(tenant): TenantContext,
    Path(token): Path<String>,
    Json(input): Json<BulkAnswersRequest>,
) -> AppResult<Json<DataResponse<SessionView>>> {
    let session = load_session(&state, tenant, &token).await?;
    require_state(&session, SessionState::InProgress)?;

    // Count distinct question ids so a duplicated item cannot pad the batch.
    let distinct: std::collections::HashSet<DbId> =
        input.answers.iter().map(|a| a.question_id).collect();
    if distinct.len() != TOTAL_QUESTIONS as usize {
        return Err(AppError::BadRequest(format!(
            "All {TOTAL_QUESTIONS} questions must be answered"
        )));
    }

    // One query for the valid question ids instead of a lookup per item.
    let questions = QuestionRepo::list_active(&state.pool, tenant).await?;
    let valid_ids: std::collections::HashSet<DbId> = questions.iter().map(|q| q.id).collect();

    let mut rows = Vec::with_capacity(input.answers.len());
    for answer in &input.answers {
        let option = AnswerOption::from_str_db(&answer.selected_option)?;
        if !valid_ids.contains(&answer.question_id) {
            return Err(AppError::NotFound(format!(
                "Question {} not found",
                answer.question_id
            )));
        }
        rows.push((answer.question_id, option.as_str().to_string()));
    }

    AssessmentRepo::upsert_answers(&state.pool, session.id, &rows).await?;

    let answered = AssessmentRepo::count_answers(&state.pool, session.id).await?;
    Ok(Json(DataResponse {
        data: session_view(&session, answered),
    }))
}

// ---------------------------------------------------------------------------
// Cluster rating handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/assessment/sessions/{token}/cluster-ratings
///
/// Record interest ratings (1-5) for career clusters. Only accepted in the
/// `cluster_rating` state.
pub async fn submit_cluster_ratings(
    State(state): State<AppState>,
    TenantContext(tenant): TenantContext,
    Path(token): Path<String>,
    Json(input): Json<ClusterRatingsRequest>,
) -> AppResult<StatusCode> {
    let session = load_session(&state, tenant, &token).await?;
    require_state(&session, SessionState::ClusterRating)?;

    if input.ratings.is_empty() {
        return Err(AppError::BadRequest("No ratings provided".into()));
    }

    for item in &input.ratings {
        scoring::validate_cluster_rating(item.rating)?;
        CareerRepo::find_cluster_by_id(&state.pool, tenant, item.cluster_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Career cluster {} not found", item.cluster_id))
            })?;
    }

    for item in &input.ratings {
        AssessmentRepo::upsert_cluster_rating(&state.pool, session.id, item.cluster_id, item.rating)
            .await?;
    }

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Tie-breaker handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/assessment/sessions/{token}/tie-breakers
///
/// The tie-breaker questions for this session's tied dimensions, localized.
pub async fn list_tie_breakers(
    State(state): State<AppState>,
    TenantContext(tenant): TenantContext,
    Path(token): Path<String>,
    Query(params): Query<LanguageParams>,
) -> AppResult<Json<ListResponse<LocalizedTieBreakerQuestion>>> {
    let session = load_session(&state, tenant, &token).await?;
    require_state(&session, SessionState::TieBreaker)?;

    let scores = tally_answers(&state, session.id).await?;
    let tied = scores.tied_dimensions();
    let dims: Vec<&str> = tied.iter().map(|d| d.as_str()).collect();

    let questions = QuestionRepo::list_tie_breakers(&state.pool, tenant, &dims).await?;

    let lang = match params.lang {
        Some(_) => params.language()?,
        None => Language::from_str_db(&session.language)?,
    };
    let localized = questions.iter().map(|q| q.localize(lang)).collect();
    Ok(Json(ListResponse::new(localized)))
}

/// POST /api/v1/assessment/sessions/{token}/tie-breakers
///
/// Record a tie-breaker answer. The question's dimension must actually be
/// tied for this session.
pub async fn submit_tie_breaker(
    State(state): State<AppState>,
    TenantContext(tenant): TenantContext,
    Path(token): Path<String>,
    Json(input): Json<AnswerRequest>,
) -> AppResult<StatusCode> {
    let session = load_session(&state, tenant, &token).await?;
    require_state(&session, SessionState::TieBreaker)?;

    let option = AnswerOption::from_str_db(&input.selected_option)?;
    let question = QuestionRepo::find_tie_breaker_by_id(&state.pool, tenant, input.question_id)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!(
                "Tie-breaker question {} not found",
                input.question_id
            ))
        })?;

    let dimension = PersonalityDimension::from_str_db(&question.dimension)?;
    let scores = tally_answers(&state, session.id).await?;
    if !scores.tied_dimensions().contains(&dimension) {
        return Err(AppError::BadRequest(format!(
            "Dimension {} is not tied for this session",
            dimension.as_str()
        )));
    }

    AssessmentRepo::upsert_tie_breaker_answer(&state.pool, session.id, question.id, option.as_str())
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Transition handler
// ---------------------------------------------------------------------------

/// POST /api/v1/assessment/sessions/{token}/transition
///
/// Move the session through its lifecycle. Targets:
///
/// - `cluster_rating` -- enter cluster rating (requires all answers)
/// - `tie_breaker`    -- enter tie-breaking (requires all answers and at
///                       least one tied dimension)
/// - `calculate`      -- score the session and complete it (requires all
///                       answers)
/// - `abandon`        -- abandon from any non-terminal state
pub async fn transition(
    State(state): State<AppState>,
    TenantContext(tenant): TenantContext,
    Path(token): Path<String>,
    Json(input): Json<TransitionRequest>,
) -> AppResult<Json<DataResponse<SessionView>>> {
    let session = load_session(&state, tenant, &token).await?;
    let current = parse_state(&session)?;

    let target = match input.target.as_str() {
        "cluster_rating" => SessionState::ClusterRating,
        "tie_breaker" => SessionState::TieBreaker,
        "calculate" => SessionState::Completed,
        "abandon" => SessionState::Abandoned,
        other => {
            return Err(AppError::BadRequest(format!(
                "Unknown transition target '{other}'"
            )))
        }
    };

    validate_transition(current, target)?;

    // Every forward move past the questionnaire requires the full answer set.
    if target != SessionState::Abandoned {
        let answered = AssessmentRepo::count_answers(&state.pool, session.id).await?;
        if answered != i64::from(TOTAL_QUESTIONS) {
            return Err(AppError::BadRequest(format!(
                "All {TOTAL_QUESTIONS} questions must be answered ({answered} recorded)"
            )));
        }
    }

    let updated = match target {
        SessionState::Completed => complete_session(&state, tenant, &session).await?,
        SessionState::TieBreaker => {
            let scores = tally_answers(&state, session.id).await?;
            if scores.tied_dimensions().is_empty() {
                return Err(AppError::BadRequest(
                    "No dimension is tied; tie-breaking is not applicable".into(),
                ));
            }
            update_state(&state, tenant, session.id, target).await?
        }
        _ => update_state(&state, tenant, session.id, target).await?,
    };

    let answered = AssessmentRepo::count_answers(&state.pool, updated.id).await?;
    Ok(Json(DataResponse {
        data: session_view(&updated, answered),
    }))
}

// ---------------------------------------------------------------------------
// Results handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/assessment/sessions/{token}/results
///
/// The calculated personality type with per-dimension strength and clarity.
/// Only available once the session is completed.
pub async fn get_results(
    State(state): State<AppState>,
    TenantContext(tenant): TenantContext,
    Path(token): Path<String>,
    Query(params): Query<LanguageParams>,
) -> AppResult<Json<DataResponse<ResultsView>>> {
    let session = load_session(&state, tenant, &token).await?;
    require_state(&session, SessionState::Completed)?;

    let type_id = session.personality_type_id.ok_or_else(|| {
        AppError::InternalError("Completed session has no personality type".into())
    })?;
    let personality_type = PersonalityTypeRepo::find_by_id(&state.pool, tenant, type_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Personality type {type_id} not found")))?;

    let lang = match params.lang {
        Some(_) => params.language()?,
        None => Language::from_str_db(&session.language)?,
    };

    let dimensions = stored_dimension_results(&session)?;

    Ok(Json(DataResponse {
        data: ResultsView {
            personality_type: personality_type.localize(lang),
            dimensions,
            completed_at: session.completed_at,
        },
    }))
}

/// Query parameters for the session careers endpoint.
#[derive(Debug, Deserialize)]
pub struct SessionCareersParams {
    pub limit: Option<i64>,
    pub lang: Option<String>,
}

/// GET /api/v1/assessment/sessions/{token}/careers
///
/// Top career matches for the session's calculated type, best first.
pub async fn get_session_careers(
    State(state): State<AppState>,
    TenantContext(tenant): TenantContext,
    Path(token): Path<String>,
    Query(params): Query<SessionCareersParams>,
) -> AppResult<Json<DataResponse<Vec<LocalizedCareerMatch>>>> {
    let session = load_session(&state, tenant, &token).await?;
    require_state(&session, SessionState::Completed)?;

    let type_id = session.personality_type_id.ok_or_else(|| {
        AppError::InternalError("Completed session has no personality type".into())
    })?;

    let limit = params
        .limit
        .unwrap_or(DEFAULT_MATCH_LIMIT)
        .clamp(1, MAX_MATCH_LIMIT);

    let lang = match params.lang.as_deref() {
        Some(raw) => Language::from_str_db(raw)?,
        None => Language::from_str_db(&session.language)?,
    };

    let matches = CareerRepo::top_matches(&state.pool, tenant, type_id, limit).await?;
    let localized = matches.iter().map(|m| m.localize(lang)).collect();
    Ok(Json(DataResponse { data: localized }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Load a session by token within the tenant, or 404.
async fn load_session(
    state: &AppState,
    tenant: TenantId,
    token: &str,
) -> AppResult<AssessmentSession> {
    AssessmentRepo::find_by_token(&state.pool, tenant, token)
        .await?
        .ok_or_else(|| AppError::NotFound("Assessment session not found".into()))
}

fn parse_state(session: &AssessmentSession) -> AppResult<SessionState> {
    SessionState::from_str_db(&session.state)
        .map_err(|_| AppError::InternalError(format!("Corrupt session state '{}'", session.state)))
}

/// Reject the request unless the session is in the expected state.
fn require_state(session: &AssessmentSession, expected: SessionState) -> AppResult<()> {
    let current = parse_state(session)?;
    if current != expected {
        return Err(AppError::BadRequest(format!(
            "Session is in state '{}'; this operation requires '{}'",
            current.as_str(),
            expected.as_str()
        )));
    }
    Ok(())
}

fn session_view(session: &AssessmentSession, answered: i64) -> SessionView {
    SessionView {
        session_token: session.session_token.clone(),
        state: session.state.clone(),
        language: session.language.clone(),
        deployment_mode: session.deployment_mode.clone(),
        answered_count: answered,
        total_questions: TOTAL_QUESTIONS,
        started_at: session.started_at,
        completed_at: session.completed_at,
    }
}

/// Tally the session's answers into per-pole counters.
async fn tally_answers(state: &AppState, session_id: DbId) -> AppResult<DimensionScores> {
    let answers = AssessmentRepo::list_answers_with_questions(&state.pool, session_id).await?;
    let mut scores = DimensionScores::default();
    for row in &answers {
        let dimension = PersonalityDimension::from_str_db(&row.dimension)?;
        let option = AnswerOption::from_str_db(&row.selected_option)?;
        scores.record_answer(dimension, option, row.option_a_maps_to_first);
    }
    Ok(scores)
}

/// Collect the session's tie-breaker answers into per-dimension resolutions.
async fn tie_resolutions(state: &AppState, session_id: DbId) -> AppResult<TieResolutions> {
    let answers = AssessmentRepo::list_tie_breaker_answers(&state.pool, session_id).await?;
    let mut ties = TieResolutions::default();
    for row in &answers {
        let dimension = PersonalityDimension::from_str_db(&row.dimension)?;
        let option = AnswerOption::from_str_db(&row.selected_option)?;
        ties.set(dimension, option.maps_to_first_pole(row.option_a_maps_to_first));
    }
    Ok(ties)
}

/// Score the session, persist the results, and mark it completed.
async fn complete_session(
    state: &AppState,
    tenant: TenantId,
    session: &AssessmentSession,
) -> AppResult<AssessmentSession> {
    let scores = tally_answers(state, session.id).await?;
    let ties = tie_resolutions(state, session.id).await?;
    let outcome = scoring::resolve_type(&scores, &ties)?;

    let personality_type = PersonalityTypeRepo::find_by_code(&state.pool, tenant, &outcome.code)
        .await?
        .ok_or_else(|| {
            AppError::InternalError(format!("Personality type '{}' is not seeded", outcome.code))
        })?;

    let mut strengths = [0.0; 4];
    let mut clarities = [""; 4];
    for (i, dim) in outcome.dimensions.iter().enumerate() {
        strengths[i] = dim.strength;
        clarities[i] = dim.clarity.as_str();
    }

    let results = SessionResults {
        personality_type_id: personality_type.id,
        strengths,
        clarities,
    };

    let updated = AssessmentRepo::record_results(&state.pool, tenant, session.id, &results)
        .await?
        .ok_or_else(|| AppError::NotFound("Assessment session not found".into()))?;

    tracing::info!(
        session_id = session.id,
        code = %outcome.code,
        "Assessment session completed"
    );

    Ok(updated)
}

async fn update_state(
    state: &AppState,
    tenant: TenantId,
    session_id: DbId,
    target: SessionState,
) -> AppResult<AssessmentSession> {
    AssessmentRepo::update_state(&state.pool, tenant, session_id, target.as_str())
        .await?
        .ok_or_else(|| AppError::NotFound("Assessment session not found".into()))
}

/// Rebuild per-dimension results from the columns persisted at completion.
fn stored_dimension_results(session: &AssessmentSession) -> AppResult<Vec<DimensionResultView>> {
    let stored = [
        ("EI", session.strength_ei, session.clarity_ei.as_deref()),
        ("SN", session.strength_sn, session.clarity_sn.as_deref()),
        ("TF", session.strength_tf, session.clarity_tf.as_deref()),
        ("JP", session.strength_jp, session.clarity_jp.as_deref()),
    ];

    stored
        .into_iter()
        .map(|(dimension, strength, clarity)| {
            let strength = strength.ok_or_else(|| {
                AppError::InternalError(format!("Missing strength for dimension {dimension}"))
            })?;
            let clarity = clarity.ok_or_else(|| {
                AppError::InternalError(format!("Missing clarity for dimension {dimension}"))
            })?;
            Ok(DimensionResultView {
                dimension,
                strength,
                clarity: clarity.to_string(),
                borderline: strength < scoring::BORDERLINE_THRESHOLD,
            })
        })
        .collect()
}
