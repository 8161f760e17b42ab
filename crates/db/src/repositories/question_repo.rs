//! Repository for the `questions` and `tie_breaker_questions` tables.

use masark_core::types::{DbId, TenantId};
use sqlx::PgPool;

use crate::models::question::{Question, TieBreakerQuestion};

const QUESTION_COLUMNS: &str = "id, tenant_id, dimension, order_index, text_en, text_ar, \
                                 option_a_text_en, option_a_text_ar, option_b_text_en, \
                                 option_b_text_ar, option_a_maps_to_first, is_active, created_at";

const TIE_BREAKER_COLUMNS: &str = "id, tenant_id, dimension, text_en, text_ar, \
                                    option_a_text_en, option_a_text_ar, option_b_text_en, \
                                    option_b_text_ar, option_a_maps_to_first, created_at";

pub struct QuestionRepo;

impl QuestionRepo {
    /// List a tenant's active questions in presentation order.
    pub async fn list_active(
        pool: &PgPool,
        tenant: TenantId,
    ) -> Result<Vec<Question>, sqlx::Error> {
        let query = format!(
            "SELECT {QUESTION_COLUMNS} FROM questions
             WHERE tenant_id = $1 AND is_active = true
             ORDER BY order_index"
        );
        sqlx::query_as::<_, Question>(&query)
            .bind(tenant.0)
            .fetch_all(pool)
            .await
    }

    /// Count a tenant's active questions.
    pub async fn count_active(pool: &PgPool, tenant: TenantId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM questions WHERE tenant_id = $1 AND is_active = true",
        )
        .bind(tenant.0)
        .fetch_one(pool)
        .await
    }

    /// Find an active question by id.
    pub async fn find_active_by_id(
        pool: &PgPool,
        tenant: TenantId,
        id: DbId,
    ) -> Result<Option<Question>, sqlx::Error> {
        let query = format!(
            "SELECT {QUESTION_COLUMNS} FROM questions
             WHERE tenant_id = $1 AND id = $2 AND is_active = true"
        );
        sqlx::query_as::<_, Question>(&query)
            .bind(tenant.0)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List the tenant's tie-breaker questions for the given dimensions.
    pub async fn list_tie_breakers(
        pool: &PgPool,
        tenant: TenantId,
        dimensions: &[&str],
    ) -> Result<Vec<TieBreakerQuestion>, sqlx::Error> {
        let query = format!(
            "SELECT {TIE_BREAKER_COLUMNS} FROM tie_breaker_questions
             WHERE tenant_id = $1 AND dimension = ANY($2)
             ORDER BY id"
        );
        sqlx::query_as::<_, TieBreakerQuestion>(&query)
            .bind(tenant.0)
            .bind(dimensions)
            .fetch_all(pool)
            .await
    }

    /// Find a tie-breaker question by id.
    pub async fn find_tie_breaker_by_id(
        pool: &PgPool,
        tenant: TenantId,
        id: DbId,
    ) -> Result<Option<TieBreakerQuestion>, sqlx::Error> {
        let query = format!(
            "SELECT {TIE_BREAKER_COLUMNS} FROM tie_breaker_questions
             WHERE tenant_id = $1 AND id = $2"
        );
        sqlx::query_as::<_, TieBreakerQuestion>(&query)
            .bind(tenant.0)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
