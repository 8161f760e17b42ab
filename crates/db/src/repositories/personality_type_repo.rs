//! Repository for the `personality_types` reference table.

use masark_core::types::{DbId, TenantId};
use sqlx::PgPool;

use crate::models::personality_type::PersonalityType;

const COLUMNS: &str = "id, tenant_id, code, name_en, name_ar, description_en, description_ar, \
                        strengths_en, strengths_ar, challenges_en, challenges_ar, created_at";

pub struct PersonalityTypeRepo;

impl PersonalityTypeRepo {
    /// List a tenant's 16 personality types in seed order.
    pub async fn list(
        pool: &PgPool,
        tenant: TenantId,
    ) -> Result<Vec<PersonalityType>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM personality_types WHERE tenant_id = $1 ORDER BY id");
        sqlx::query_as::<_, PersonalityType>(&query)
            .bind(tenant.0)
            .fetch_all(pool)
            .await
    }

    /// Find a personality type by its 4-letter code.
    pub async fn find_by_code(
        pool: &PgPool,
        tenant: TenantId,
        code: &str,
    ) -> Result<Option<PersonalityType>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM personality_types WHERE tenant_id = $1 AND code = $2");
        sqlx::query_as::<_, PersonalityType>(&query)
            .bind(tenant.0)
            .bind(code)
            .fetch_optional(pool)
            .await
    }

    /// Find a personality type by internal id.
    pub async fn find_by_id(
        pool: &PgPool,
        tenant: TenantId,
        id: DbId,
    ) -> Result<Option<PersonalityType>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM personality_types WHERE tenant_id = $1 AND id = $2");
        sqlx::query_as::<_, PersonalityType>(&query)
            .bind(tenant.0)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
