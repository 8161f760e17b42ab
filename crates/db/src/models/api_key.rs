//! API key and usage-log models.

use masark_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Full API key row including the SHA-256 key hash.
///
/// The plaintext key is shown to the caller exactly once at creation or
/// rotation; only the hash and a short display prefix are stored.
#[derive(Debug, Clone, FromRow)]
pub struct ApiKey {
    pub id: DbId,
    pub tenant_id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub key_hash: String,
    pub key_prefix: String,
    pub created_by: DbId,
    pub rate_limit_per_minute: i32,
    pub rate_limit_per_day: i32,
    pub is_active: bool,
    pub last_used_at: Option<Timestamp>,
    pub expires_at: Option<Timestamp>,
    pub revoked_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Input for creating an API key row. `key_hash`/`key_prefix` are derived
/// from a freshly generated plaintext key by the caller.
#[derive(Debug, Clone)]
pub struct CreateApiKey {
    pub name: String,
    pub description: Option<String>,
    pub key_hash: String,
    pub key_prefix: String,
    pub created_by: DbId,
    pub rate_limit_per_minute: i32,
    pub rate_limit_per_day: i32,
    pub expires_at: Option<Timestamp>,
}

/// API key listing row. Does **not** include `key_hash`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ApiKeyListItem {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub key_prefix: String,
    pub rate_limit_per_minute: i32,
    pub rate_limit_per_day: i32,
    pub is_active: bool,
    pub last_used_at: Option<Timestamp>,
    pub expires_at: Option<Timestamp>,
    pub revoked_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

impl From<ApiKey> for ApiKeyListItem {
    fn from(key: ApiKey) -> Self {
        ApiKeyListItem {
            id: key.id,
            name: key.name,
            description: key.description,
            key_prefix: key.key_prefix,
            rate_limit_per_minute: key.rate_limit_per_minute,
            rate_limit_per_day: key.rate_limit_per_day,
            is_active: key.is_active,
            last_used_at: key.last_used_at,
            expires_at: key.expires_at,
            revoked_at: key.revoked_at,
            created_at: key.created_at,
        }
    }
}

/// A row from the `api_usage_log` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ApiUsageLogEntry {
    pub id: DbId,
    pub api_key_id: Option<DbId>,
    pub method: String,
    pub path: String,
    pub response_status: i16,
    pub response_time_ms: Option<i32>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub created_at: Timestamp,
}
