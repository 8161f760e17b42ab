//! Repository for assessment sessions, answers, cluster ratings, and
//! tie-breaker answers.
//!
//! Session lookups are tenant-scoped; child tables (answers, ratings,
//! tie-breakers) are keyed by `session_id`, which callers only obtain
//! through a tenant-filtered session lookup.

use masark_core::types::{DbId, TenantId};
use sqlx::PgPool;

use crate::models::assessment::{
    AnswerWithQuestion, AssessmentSession, ClusterRating, CreateAssessmentSession, SessionListItem,
    SessionResults, SessionStateCount, TieBreakerAnswerWithQuestion,
};

const SESSION_COLUMNS: &str = "id, tenant_id, session_token, student_name, student_email, \
                                student_external_id, language, deployment_mode, state, \
                                personality_type_id, strength_ei, strength_sn, strength_tf, \
                                strength_jp, clarity_ei, clarity_sn, clarity_tf, clarity_jp, \
                                started_at, completed_at, updated_at";

const LIST_COLUMNS: &str = "s.id, s.session_token, s.student_name, s.language, \
                             s.deployment_mode, s.state, pt.code AS personality_type_code, \
                             s.started_at, s.completed_at";

pub struct AssessmentRepo;

impl AssessmentRepo {
    // -----------------------------------------------------------------------
    // Sessions
    // -----------------------------------------------------------------------

    /// Insert a new session in the `in_progress` state.
    pub async fn create_session(
        pool: &PgPool,
        tenant: TenantId,
        input: &CreateAssessmentSession,
    ) -> Result<AssessmentSession, sqlx::Error> {
        let query = format!(
            "INSERT INTO assessment_sessions
                (tenant_id, session_token, student_name, student_email, student_external_id,
                 language, deployment_mode)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {SESSION_COLUMNS}"
        );
        sqlx::query_as::<_, AssessmentSession>(&query)
            .bind(tenant.0)
            .bind(&input.session_token)
            .bind(&input.student_name)
            .bind(&input.student_email)
            .bind(&input.student_external_id)
            .bind(&input.language)
            .bind(&input.deployment_mode)
            .fetch_one(pool)
            .await
    }

    /// Find a session by its public token within a tenant.
    pub async fn find_by_token(
        pool: &PgPool,
        tenant: TenantId,
        token: &str,
    ) -> Result<Option<AssessmentSession>, sqlx::Error> {
        let query = format!(
            "SELECT {SESSION_COLUMNS} FROM assessment_sessions
             WHERE tenant_id = $1 AND session_token = $2"
        );
        sqlx::query_as::<_, AssessmentSession>(&query)
            .bind(tenant.0)
            .bind(token)
            .fetch_optional(pool)
            .await
    }

    /// Set a session's state. The caller validates the transition.
    pub async fn update_state(
        pool: &PgPool,
        tenant: TenantId,
        id: DbId,
        state: &str,
    ) -> Result<Option<AssessmentSession>, sqlx::Error> {
        let query = format!(
            "UPDATE assessment_sessions SET state = $3, updated_at = NOW()
             WHERE tenant_id = $1 AND id = $2
             RETURNING {SESSION_COLUMNS}"
        );
        sqlx::query_as::<_, AssessmentSession>(&query)
            .bind(tenant.0)
            .bind(id)
            .bind(state)
            .fetch_optional(pool)
            .await
    }

    /// Persist calculated results and mark the session completed, in one
    /// statement so a half-written result can never be observed.
    pub async fn record_results(
        pool: &PgPool,
        tenant: TenantId,
        id: DbId,
        results: &SessionResults,
    ) -> Result<Option<AssessmentSession>, sqlx::Error> {
        let query = format!(
            "UPDATE assessment_sessions SET
                state = 'completed',
                personality_type_id = $3,
                strength_ei = $4, strength_sn = $5, strength_tf = $6, strength_jp = $7,
                clarity_ei = $8, clarity_sn = $9, clarity_tf = $10, clarity_jp = $11,
                completed_at = NOW(),
                updated_at = NOW()
             WHERE tenant_id = $1 AND id = $2
             RETURNING {SESSION_COLUMNS}"
        );
        sqlx::query_as::<_, AssessmentSession>(&query)
            .bind(tenant.0)
            .bind(id)
            .bind(results.personality_type_id)
            .bind(results.strengths[0])
            .bind(results.strengths[1])
            .bind(results.strengths[2])
            .bind(results.strengths[3])
            .bind(results.clarities[0])
            .bind(results.clarities[1])
            .bind(results.clarities[2])
            .bind(results.clarities[3])
            .fetch_optional(pool)
            .await
    }

    /// List a tenant's sessions, newest first, optionally filtered by state.
    pub async fn list_sessions(
        pool: &PgPool,
        tenant: TenantId,
        state: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<SessionListItem>, sqlx::Error> {
        let query = format!(
            "SELECT {LIST_COLUMNS}
             FROM assessment_sessions s
             LEFT JOIN personality_types pt ON s.personality_type_id = pt.id
             WHERE s.tenant_id = $1 AND ($2::TEXT IS NULL OR s.state = $2)
             ORDER BY s.started_at DESC
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, SessionListItem>(&query)
            .bind(tenant.0)
            .bind(state)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Count a tenant's sessions grouped by state.
    pub async fn count_by_state(
        pool: &PgPool,
        tenant: TenantId,
    ) -> Result<Vec<SessionStateCount>, sqlx::Error> {
        sqlx::query_as::<_, SessionStateCount>(
            "SELECT state, COUNT(*) AS count FROM assessment_sessions
             WHERE tenant_id = $1
             GROUP BY state
             ORDER BY state",
        )
        .bind(tenant.0)
        .fetch_all(pool)
        .await
    }

    // -----------------------------------------------------------------------
    // Answers
    // -----------------------------------------------------------------------

    /// Insert or replace a single answer (re-answering a question updates
    /// the stored option).
    pub async fn upsert_answer(
        pool: &PgPool,
        session_id: DbId,
        question_id: DbId,
        selected_option: &str,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO assessment_answers (session_id, question_id, selected_option)
             VALUES ($1, $2, $3)
             ON CONFLICT (session_id, question_id)
             DO UPDATE SET selected_option = EXCLUDED.selected_option, answered_at = NOW()",
        )
        .bind(session_id)
        .bind(question_id)
        .bind(selected_option)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Upsert a full answer set in one transaction (bulk submission).
    pub async fn upsert_answers(
        pool: &PgPool,
        session_id: DbId,
        answers: &[(DbId, String)],
    ) -> Result<(), sqlx::Error> {
        let mut tx = pool.begin().await?;
        for (question_id, selected_option) in answers {
            sqlx::query(
                "INSERT INTO assessment_answers (session_id, question_id, selected_option)
                 VALUES ($1, $2, $3)
                 ON CONFLICT (session_id, question_id)
                 DO UPDATE SET selected_option = EXCLUDED.selected_option, answered_at = NOW()",
            )
            .bind(session_id)
            .bind(question_id)
            .bind(selected_option)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await
    }

    /// Count answers recorded for a session.
    pub async fn count_answers(pool: &PgPool, session_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM assessment_answers WHERE session_id = $1")
            .bind(session_id)
            .fetch_one(pool)
            .await
    }

    /// List a session's answers joined with each question's scoring fields.
    pub async fn list_answers_with_questions(
        pool: &PgPool,
        session_id: DbId,
    ) -> Result<Vec<AnswerWithQuestion>, sqlx::Error> {
        sqlx::query_as::<_, AnswerWithQuestion>(
            "SELECT a.question_id, a.selected_option, q.dimension, q.option_a_maps_to_first
             FROM assessment_answers a
             JOIN questions q ON a.question_id = q.id
             WHERE a.session_id = $1
             ORDER BY q.order_index",
        )
        .bind(session_id)
        .fetch_all(pool)
        .await
    }

    // -----------------------------------------------------------------------
    // Cluster ratings
    // -----------------------------------------------------------------------

    /// Insert or replace a cluster rating for a session.
    pub async fn upsert_cluster_rating(
        pool: &PgPool,
        session_id: DbId,
        cluster_id: DbId,
        rating: i32,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO assessment_cluster_ratings (session_id, cluster_id, rating)
             VALUES ($1, $2, $3)
             ON CONFLICT (session_id, cluster_id)
             DO UPDATE SET rating = EXCLUDED.rating",
        )
        .bind(session_id)
        .bind(cluster_id)
        .bind(rating)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// List a session's cluster ratings.
    pub async fn list_cluster_ratings(
        pool: &PgPool,
        session_id: DbId,
    ) -> Result<Vec<ClusterRating>, sqlx::Error> {
        sqlx::query_as::<_, ClusterRating>(
            "SELECT id, session_id, cluster_id, rating, created_at
             FROM assessment_cluster_ratings
             WHERE session_id = $1
             ORDER BY cluster_id",
        )
        .bind(session_id)
        .fetch_all(pool)
        .await
    }

    // -----------------------------------------------------------------------
    // Tie-breaker answers
    // -----------------------------------------------------------------------

    /// Insert or replace a tie-breaker answer for a session.
    pub async fn upsert_tie_breaker_answer(
        pool: &PgPool,
        session_id: DbId,
        question_id: DbId,
        selected_option: &str,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO assessment_tie_breaker_answers (session_id, question_id, selected_option)
             VALUES ($1, $2, $3)
             ON CONFLICT (session_id, question_id)
             DO UPDATE SET selected_option = EXCLUDED.selected_option",
        )
        .bind(session_id)
        .bind(question_id)
        .bind(selected_option)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// List a session's tie-breaker answers joined with their questions'
    /// scoring fields.
    pub async fn list_tie_breaker_answers(
        pool: &PgPool,
        session_id: DbId,
    ) -> Result<Vec<TieBreakerAnswerWithQuestion>, sqlx::Error> {
        sqlx::query_as::<_, TieBreakerAnswerWithQuestion>(
            "SELECT a.question_id, a.selected_option, q.dimension, q.option_a_maps_to_first
             FROM assessment_tie_breaker_answers a
             JOIN tie_breaker_questions q ON a.question_id = q.id
             WHERE a.session_id = $1
             ORDER BY q.id",
        )
        .bind(session_id)
        .fetch_all(pool)
        .await
    }
}
