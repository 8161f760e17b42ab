//! Refresh-token auth session model.

use masark_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `auth_sessions` table. Only the SHA-256 hash of the
/// refresh token is stored; the plaintext never touches the database.
#[derive(Debug, Clone, FromRow)]
pub struct AuthSession {
    pub id: DbId,
    pub user_id: DbId,
    pub refresh_token_hash: String,
    pub expires_at: Timestamp,
    pub revoked_at: Option<Timestamp>,
    pub user_agent: Option<String>,
    pub ip_address: Option<String>,
    pub created_at: Timestamp,
}

/// DTO for creating a new auth session.
#[derive(Debug)]
pub struct CreateAuthSession {
    pub user_id: DbId,
    pub refresh_token_hash: String,
    pub expires_at: Timestamp,
    pub user_agent: Option<String>,
    pub ip_address: Option<String>,
}
