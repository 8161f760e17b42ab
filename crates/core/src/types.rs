use serde::{Deserialize, Serialize};

/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Identifies the tenant a record belongs to.
///
/// Every tenant-scoped repository function takes a `TenantId` as an explicit
/// parameter, so tenant filtering happens in exactly one layer. Handlers only
/// obtain a value through the auth or tenant-context extractors -- they never
/// build tenant SQL themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TenantId(pub DbId);

/// The tenant seeded by the initial migration, used when a public request
/// carries no `X-Tenant-Id` header.
pub const DEFAULT_TENANT_ID: TenantId = TenantId(1);

impl std::fmt::Display for TenantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
