//! Repository for the `auth_sessions` table (refresh-token sessions).
//!
//! Sessions are scoped by user id; tenancy is enforced one level up where
//! the user row itself is tenant-filtered.

use masark_core::types::DbId;
use sqlx::PgPool;

use crate::models::session::{AuthSession, CreateAuthSession};

const COLUMNS: &str = "id, user_id, refresh_token_hash, expires_at, revoked_at, \
                        user_agent, ip_address, created_at";

pub struct SessionRepo;

impl SessionRepo {
    /// Insert a new session row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateAuthSession,
    ) -> Result<AuthSession, sqlx::Error> {
        let query = format!(
            "INSERT INTO auth_sessions
                (user_id, refresh_token_hash, expires_at, user_agent, ip_address)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AuthSession>(&query)
            .bind(input.user_id)
            .bind(&input.refresh_token_hash)
            .bind(input.expires_at)
            .bind(&input.user_agent)
            .bind(&input.ip_address)
            .fetch_one(pool)
            .await
    }

    /// Find an active (non-revoked, non-expired) session by token hash.
    pub async fn find_by_refresh_token_hash(
        pool: &PgPool,
        token_hash: &str,
    ) -> Result<Option<AuthSession>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM auth_sessions
             WHERE refresh_token_hash = $1 AND revoked_at IS NULL AND expires_at > NOW()"
        );
        sqlx::query_as::<_, AuthSession>(&query)
            .bind(token_hash)
            .fetch_optional(pool)
            .await
    }

    /// Revoke a single session.
    pub async fn revoke(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE auth_sessions SET revoked_at = NOW() WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Revoke all active sessions for a user (logout everywhere).
    pub async fn revoke_all_for_user(pool: &PgPool, user_id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE auth_sessions SET revoked_at = NOW()
             WHERE user_id = $1 AND revoked_at IS NULL",
        )
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }
}
