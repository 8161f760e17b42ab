//! Authentication handlers: login, token refresh, logout, and current user.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::{Duration, Utc};
use masark_core::error::CoreError;
use masark_core::types::{DbId, TenantId};
use masark_db::models::session::CreateAuthSession;
use masark_db::models::user::{User, UserResponse};
use masark_db::repositories::{RoleRepo, SessionRepo, UserRepo};
use serde::{Deserialize, Serialize};

use crate::auth::jwt::{generate_access_token, generate_refresh_token, hash_refresh_token};
use crate::auth::password::verify_password;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::tenant::TenantContext;
use crate::response::DataResponse;
use crate::state::AppState;

/// Failed logins before the account is locked.
const MAX_FAILED_ATTEMPTS: i32 = 5;

/// How long a locked account stays locked.
const LOCK_DURATION_MINS: i64 = 15;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Response body for successful login / refresh.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: &'static str,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
}

/// Request body for `POST /auth/refresh` and `POST /auth/logout`.
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/login
///
/// Verify credentials and issue an access/refresh token pair. Failed attempts
/// are counted per user; after [`MAX_FAILED_ATTEMPTS`] the account is locked
/// for [`LOCK_DURATION_MINS`] minutes. The error message never reveals
/// whether the username exists.
pub async fn login(
    State(state): State<AppState>,
    TenantContext(tenant): TenantContext,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<DataResponse<TokenResponse>>> {
    // 1. Look up the user. Unknown usernames fail with the same message as
    //    bad passwords.
    let user = UserRepo::find_by_username(&state.pool, tenant, &input.username)
        .await?
        .ok_or_else(invalid_credentials)?;

    // 2. Reject inactive and currently-locked accounts. An expired lock is
    //    cleared together with its failure count, so the next lock again
    //    takes MAX_FAILED_ATTEMPTS consecutive failures.
    if !user.is_active {
        return Err(invalid_credentials());
    }
    let mut failed_count = user.failed_login_count;
    if let Some(locked_until) = user.locked_until {
        if locked_until > Utc::now() {
            return Err(AppError::Core(CoreError::Unauthorized(
                "Account is temporarily locked. Try again later".into(),
            )));
        }
        UserRepo::clear_expired_lock(&state.pool, tenant, user.id).await?;
        failed_count = 0;
    }

    // 3. Verify the password; on failure bump the counter and maybe lock.
    let verified = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification failed: {e}")))?;
    if !verified {
        UserRepo::increment_failed_login(&state.pool, tenant, user.id).await?;
        if failed_count + 1 >= MAX_FAILED_ATTEMPTS {
            let until = Utc::now() + Duration::minutes(LOCK_DURATION_MINS);
            UserRepo::lock_account(&state.pool, tenant, user.id, until).await?;
            tracing::warn!(user_id = user.id, "Account locked after repeated failures");
        }
        return Err(invalid_credentials());
    }

    // 4. Success: reset counters and issue tokens.
    UserRepo::record_successful_login(&state.pool, tenant, user.id).await?;
    let tokens = issue_tokens(&state, &user).await?;
    tracing::info!(user_id = user.id, "User logged in");

    Ok(Json(DataResponse { data: tokens }))
}

/// POST /api/v1/auth/refresh
///
/// Exchange a valid refresh token for a new token pair. The presented token
/// is revoked (single use); reusing an already-rotated token fails.
pub async fn refresh(
    State(state): State<AppState>,
    Json(input): Json<RefreshRequest>,
) -> AppResult<Json<DataResponse<TokenResponse>>> {
    let hash = hash_refresh_token(&input.refresh_token);
    let session = SessionRepo::find_by_refresh_token_hash(&state.pool, &hash)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid or expired refresh token".into(),
            ))
        })?;

    // The session only stores the user id; re-resolve the user to pick up
    // role changes and deactivation since the token was issued.
    let user = find_session_user(&state, session.user_id).await?;

    // Rotate: revoke the old session before issuing the replacement.
    SessionRepo::revoke(&state.pool, session.id).await?;
    let tokens = issue_tokens(&state, &user).await?;

    Ok(Json(DataResponse { data: tokens }))
}

/// POST /api/v1/auth/logout
///
/// Revoke the presented refresh token. Always returns 204, even for tokens
/// that are already revoked or unknown.
pub async fn logout(
    State(state): State<AppState>,
    Json(input): Json<RefreshRequest>,
) -> AppResult<StatusCode> {
    let hash = hash_refresh_token(&input.refresh_token);
    if let Some(session) = SessionRepo::find_by_refresh_token_hash(&state.pool, &hash).await? {
        SessionRepo::revoke(&state.pool, session.id).await?;
        tracing::info!(user_id = session.user_id, "User logged out");
    }
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/auth/logout-all
///
/// Revoke every active refresh session for the authenticated user.
pub async fn logout_all(State(state): State<AppState>, user: AuthUser) -> AppResult<StatusCode> {
    let revoked = SessionRepo::revoke_all_for_user(&state.pool, user.user_id).await?;
    tracing::info!(user_id = user.user_id, revoked, "All sessions revoked");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/auth/me
///
/// The authenticated user's own profile.
pub async fn me(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    let row = UserRepo::find_by_id(&state.pool, user.tenant, user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: user.user_id,
        }))?;
    let role = RoleRepo::resolve_name(&state.pool, row.role_id).await?;
    Ok(Json(DataResponse {
        data: user_response(row, role),
    }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn invalid_credentials() -> AppError {
    AppError::Core(CoreError::Unauthorized("Invalid username or password".into()))
}

/// Build a [`UserResponse`] from a full row and a resolved role name.
pub fn user_response(user: User, role: String) -> UserResponse {
    UserResponse {
        id: user.id,
        username: user.username,
        email: user.email,
        role,
        role_id: user.role_id,
        is_active: user.is_active,
        last_login_at: user.last_login_at,
        created_at: user.created_at,
    }
}

/// Resolve an active user for a refresh session. Auth sessions only store
/// the user id; the user row itself carries the tenant.
async fn find_session_user(state: &AppState, user_id: DbId) -> AppResult<User> {
    let user = UserRepo::find_by_id_global(&state.pool, user_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid or expired refresh token".into(),
            ))
        })?;
    if !user.is_active {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Account is deactivated".into(),
        )));
    }
    Ok(user)
}

/// Issue a fresh access/refresh pair for the user and persist the refresh
/// session.
async fn issue_tokens(state: &AppState, user: &User) -> AppResult<TokenResponse> {
    let tenant = TenantId(user.tenant_id);
    let role = RoleRepo::resolve_name(&state.pool, user.role_id).await?;

    let access_token = generate_access_token(user.id, tenant, &role, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation failed: {e}")))?;

    let (refresh_plain, refresh_hash) = generate_refresh_token();
    let expires_at = Utc::now() + Duration::days(state.config.jwt.refresh_token_expiry_days);
    SessionRepo::create(
        &state.pool,
        &CreateAuthSession {
            user_id: user.id,
            refresh_token_hash: refresh_hash,
            expires_at,
            user_agent: None,
            ip_address: None,
        },
    )
    .await?;

    Ok(TokenResponse {
        access_token,
        refresh_token: refresh_plain,
        token_type: "Bearer",
        expires_in: state.config.jwt.access_token_expiry_mins * 60,
    })
}
