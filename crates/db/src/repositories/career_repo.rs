//! Repository for careers, clusters, pathways, and precomputed
//! personality-to-career matches.

use masark_core::types::{DbId, TenantId};
use sqlx::PgPool;

use crate::models::career::{
    Career, CareerCluster, CareerMatchRow, CareerSummaryRow, Pathway,
};

const CAREER_COLUMNS: &str = "id, tenant_id, cluster_id, name_en, name_ar, description_en, \
                               description_ar, ssoc_code, is_active, created_at";

const CLUSTER_COLUMNS: &str = "id, tenant_id, name_en, name_ar, description_en, description_ar, \
                                created_at";

const PATHWAY_COLUMNS: &str = "p.id, p.tenant_id, p.source, p.name_en, p.name_ar, \
                                p.description_en, p.description_ar, p.created_at";

const MATCH_COLUMNS: &str = "c.id AS career_id, c.name_en, c.name_ar, c.ssoc_code, \
                              m.match_score, cl.id AS cluster_id, \
                              cl.name_en AS cluster_name_en, cl.name_ar AS cluster_name_ar";

const SUMMARY_COLUMNS: &str = "id, cluster_id, name_en, name_ar, ssoc_code";

pub struct CareerRepo;

impl CareerRepo {
    /// Top career matches for a personality type, highest score first.
    pub async fn top_matches(
        pool: &PgPool,
        tenant: TenantId,
        personality_type_id: DbId,
        limit: i64,
    ) -> Result<Vec<CareerMatchRow>, sqlx::Error> {
        let query = format!(
            "SELECT {MATCH_COLUMNS}
             FROM personality_career_matches m
             JOIN careers c ON m.career_id = c.id
             JOIN career_clusters cl ON c.cluster_id = cl.id
             WHERE c.tenant_id = $1 AND m.personality_type_id = $2 AND c.is_active = true
             ORDER BY m.match_score DESC, c.id
             LIMIT $3"
        );
        sqlx::query_as::<_, CareerMatchRow>(&query)
            .bind(tenant.0)
            .bind(personality_type_id)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Case-insensitive substring search over English and Arabic names.
    pub async fn search(
        pool: &PgPool,
        tenant: TenantId,
        term: &str,
        limit: i64,
    ) -> Result<Vec<CareerSummaryRow>, sqlx::Error> {
        let pattern = format!("%{term}%");
        let query = format!(
            "SELECT {SUMMARY_COLUMNS} FROM careers
             WHERE tenant_id = $1 AND is_active = true
               AND (name_en ILIKE $2 OR name_ar ILIKE $2)
             ORDER BY name_en
             LIMIT $3"
        );
        sqlx::query_as::<_, CareerSummaryRow>(&query)
            .bind(tenant.0)
            .bind(&pattern)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Find an active career by id.
    pub async fn find_by_id(
        pool: &PgPool,
        tenant: TenantId,
        id: DbId,
    ) -> Result<Option<Career>, sqlx::Error> {
        let query = format!(
            "SELECT {CAREER_COLUMNS} FROM careers
             WHERE tenant_id = $1 AND id = $2 AND is_active = true"
        );
        sqlx::query_as::<_, Career>(&query)
            .bind(tenant.0)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a tenant's career clusters.
    pub async fn list_clusters(
        pool: &PgPool,
        tenant: TenantId,
    ) -> Result<Vec<CareerCluster>, sqlx::Error> {
        let query =
            format!("SELECT {CLUSTER_COLUMNS} FROM career_clusters WHERE tenant_id = $1 ORDER BY id");
        sqlx::query_as::<_, CareerCluster>(&query)
            .bind(tenant.0)
            .fetch_all(pool)
            .await
    }

    /// Find a cluster by id.
    pub async fn find_cluster_by_id(
        pool: &PgPool,
        tenant: TenantId,
        id: DbId,
    ) -> Result<Option<CareerCluster>, sqlx::Error> {
        let query =
            format!("SELECT {CLUSTER_COLUMNS} FROM career_clusters WHERE tenant_id = $1 AND id = $2");
        sqlx::query_as::<_, CareerCluster>(&query)
            .bind(tenant.0)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List active careers within a cluster.
    pub async fn list_by_cluster(
        pool: &PgPool,
        tenant: TenantId,
        cluster_id: DbId,
    ) -> Result<Vec<CareerSummaryRow>, sqlx::Error> {
        let query = format!(
            "SELECT {SUMMARY_COLUMNS} FROM careers
             WHERE tenant_id = $1 AND cluster_id = $2 AND is_active = true
             ORDER BY name_en"
        );
        sqlx::query_as::<_, CareerSummaryRow>(&query)
            .bind(tenant.0)
            .bind(cluster_id)
            .fetch_all(pool)
            .await
    }

    /// Education pathways linked to a career, optionally filtered by source
    /// (`moe`, `mawhiba`). Deployment-mode filtering happens at the handler.
    pub async fn pathways_for_career(
        pool: &PgPool,
        tenant: TenantId,
        career_id: DbId,
        sources: &[&str],
    ) -> Result<Vec<Pathway>, sqlx::Error> {
        let query = format!(
            "SELECT {PATHWAY_COLUMNS}
             FROM pathways p
             JOIN career_pathways cp ON cp.pathway_id = p.id
             WHERE p.tenant_id = $1 AND cp.career_id = $2 AND p.source = ANY($3)
             ORDER BY p.id"
        );
        sqlx::query_as::<_, Pathway>(&query)
            .bind(tenant.0)
            .bind(career_id)
            .bind(sources)
            .fetch_all(pool)
            .await
    }
}
