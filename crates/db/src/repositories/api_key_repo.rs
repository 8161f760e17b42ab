//! Repository for the `api_keys` and `api_usage_log` tables.

use masark_core::types::{DbId, TenantId};
use sqlx::PgPool;

use crate::models::api_key::{ApiKey, ApiKeyListItem, ApiUsageLogEntry, CreateApiKey};

const COLUMNS: &str = "id, tenant_id, name, description, key_hash, key_prefix, created_by, \
                        rate_limit_per_minute, rate_limit_per_day, is_active, last_used_at, \
                        expires_at, revoked_at, created_at, updated_at";

const LIST_COLUMNS: &str = "id, name, description, key_prefix, rate_limit_per_minute, \
                             rate_limit_per_day, is_active, last_used_at, expires_at, \
                             revoked_at, created_at";

pub struct ApiKeyRepo;

impl ApiKeyRepo {
    /// Insert a new key row.
    pub async fn create(
        pool: &PgPool,
        tenant: TenantId,
        input: &CreateApiKey,
    ) -> Result<ApiKey, sqlx::Error> {
        let query = format!(
            "INSERT INTO api_keys
                (tenant_id, name, description, key_hash, key_prefix, created_by,
                 rate_limit_per_minute, rate_limit_per_day, expires_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ApiKey>(&query)
            .bind(tenant.0)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.key_hash)
            .bind(&input.key_prefix)
            .bind(input.created_by)
            .bind(input.rate_limit_per_minute)
            .bind(input.rate_limit_per_day)
            .bind(input.expires_at)
            .fetch_one(pool)
            .await
    }

    /// List a tenant's keys, newest first. Never exposes `key_hash`.
    pub async fn list(
        pool: &PgPool,
        tenant: TenantId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ApiKeyListItem>, sqlx::Error> {
        let query = format!(
            "SELECT {LIST_COLUMNS} FROM api_keys
             WHERE tenant_id = $1
             ORDER BY created_at DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, ApiKeyListItem>(&query)
            .bind(tenant.0)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Find a key by id.
    pub async fn find_by_id(
        pool: &PgPool,
        tenant: TenantId,
        id: DbId,
    ) -> Result<Option<ApiKey>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM api_keys WHERE tenant_id = $1 AND id = $2");
        sqlx::query_as::<_, ApiKey>(&query)
            .bind(tenant.0)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Resolve a presented key by its hash. Only active, unrevoked,
    /// unexpired keys match; the lookup spans tenants because the key row
    /// itself identifies the tenant.
    pub async fn find_active_by_hash(
        pool: &PgPool,
        key_hash: &str,
    ) -> Result<Option<ApiKey>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM api_keys
             WHERE key_hash = $1 AND is_active = true AND revoked_at IS NULL
               AND (expires_at IS NULL OR expires_at > NOW())"
        );
        sqlx::query_as::<_, ApiKey>(&query)
            .bind(key_hash)
            .fetch_optional(pool)
            .await
    }

    /// Update per-minute and per-day rate limits.
    pub async fn update_limits(
        pool: &PgPool,
        tenant: TenantId,
        id: DbId,
        per_minute: i32,
        per_day: i32,
    ) -> Result<Option<ApiKey>, sqlx::Error> {
        let query = format!(
            "UPDATE api_keys SET rate_limit_per_minute = $3, rate_limit_per_day = $4,
                                 updated_at = NOW()
             WHERE tenant_id = $1 AND id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ApiKey>(&query)
            .bind(tenant.0)
            .bind(id)
            .bind(per_minute)
            .bind(per_day)
            .fetch_optional(pool)
            .await
    }

    /// Revoke a key. Revocation is permanent; rotation of a revoked key
    /// is rejected at the handler.
    pub async fn revoke(
        pool: &PgPool,
        tenant: TenantId,
        id: DbId,
    ) -> Result<Option<ApiKey>, sqlx::Error> {
        let query = format!(
            "UPDATE api_keys SET is_active = false, revoked_at = NOW(), updated_at = NOW()
             WHERE tenant_id = $1 AND id = $2 AND revoked_at IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ApiKey>(&query)
            .bind(tenant.0)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Replace a key's hash and prefix with freshly generated material.
    pub async fn rotate(
        pool: &PgPool,
        tenant: TenantId,
        id: DbId,
        key_hash: &str,
        key_prefix: &str,
    ) -> Result<Option<ApiKey>, sqlx::Error> {
        let query = format!(
            "UPDATE api_keys SET key_hash = $3, key_prefix = $4, updated_at = NOW()
             WHERE tenant_id = $1 AND id = $2 AND revoked_at IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ApiKey>(&query)
            .bind(tenant.0)
            .bind(id)
            .bind(key_hash)
            .bind(key_prefix)
            .fetch_optional(pool)
            .await
    }

    /// Record a usage-log entry for a key.
    pub async fn insert_usage(
        pool: &PgPool,
        api_key_id: DbId,
        method: &str,
        path: &str,
        response_status: i16,
        response_time_ms: Option<i32>,
        ip_address: Option<&str>,
        user_agent: Option<&str>,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO api_usage_log
                (api_key_id, method, path, response_status, response_time_ms,
                 ip_address, user_agent)
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(api_key_id)
        .bind(method)
        .bind(path)
        .bind(response_status)
        .bind(response_time_ms)
        .bind(ip_address)
        .bind(user_agent)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// List recent usage entries for a key, newest first.
    pub async fn list_usage(
        pool: &PgPool,
        tenant: TenantId,
        api_key_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ApiUsageLogEntry>, sqlx::Error> {
        sqlx::query_as::<_, ApiUsageLogEntry>(
            "SELECT u.id, u.api_key_id, u.method, u.path, u.response_status,
                    u.response_time_ms, u.ip_address, u.user_agent, u.created_at
             FROM api_usage_log u
             JOIN api_keys k ON u.api_key_id = k.id
             WHERE k.tenant_id = $1 AND u.api_key_id = $2
             ORDER BY u.created_at DESC
             LIMIT $3 OFFSET $4",
        )
        .bind(tenant.0)
        .bind(api_key_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await
    }

    /// Stamp `last_used_at`. Fire-and-forget from the caller's perspective.
    pub async fn touch_last_used(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE api_keys SET last_used_at = NOW() WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }
}
