//! Admin handlers for user management. Every route requires the `admin` role.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use masark_core::error::CoreError;
use masark_core::types::DbId;
use masark_db::models::user::{CreateUser, UpdateUser, UserResponse};
use masark_db::repositories::{RoleRepo, SessionRepo, UserRepo};
use serde::Deserialize;

use crate::auth::password::{hash_password, validate_password_strength};
use crate::error::{AppError, AppResult};
use crate::handlers::auth::user_response;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /admin/users`.
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    /// Role name: `admin` or `user`. Defaults to `user`.
    pub role: Option<String>,
}

/// Request body for `PATCH /admin/users/{id}`.
#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
    pub is_active: Option<bool>,
}

/// Request body for `POST /admin/users/{id}/reset-password`.
#[derive(Debug, Deserialize)]
pub struct ResetPasswordRequest {
    pub new_password: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/users
pub async fn list_users(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
) -> AppResult<Json<DataResponse<Vec<UserResponse>>>> {
    let users = UserRepo::list(&state.pool, admin.tenant).await?;

    let mut out = Vec::with_capacity(users.len());
    for user in users {
        let role = RoleRepo::resolve_name(&state.pool, user.role_id).await?;
        out.push(user_response(user, role));
    }
    Ok(Json(DataResponse { data: out }))
}

/// POST /api/v1/admin/users
pub async fn create_user(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Json(input): Json<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<UserResponse>>)> {
    // 1. Validate inputs before touching the database.
    if input.username.trim().is_empty() {
        return Err(AppError::BadRequest("Username must not be empty".into()));
    }
    if !input.email.contains('@') {
        return Err(AppError::BadRequest("Invalid email address".into()));
    }
    validate_password_strength(&input.password, input.username.trim())?;

    // 2. Resolve the requested role.
    let role_name = input.role.as_deref().unwrap_or(masark_core::roles::ROLE_USER);
    let role = RoleRepo::find_by_name(&state.pool, role_name)
        .await?
        .ok_or_else(|| AppError::BadRequest(format!("Unknown role '{role_name}'")))?;

    // 3. Hash the password and insert. Duplicate usernames/emails surface
    //    as 409 via the unique-constraint mapping.
    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing failed: {e}")))?;

    let user = UserRepo::create(
        &state.pool,
        admin.tenant,
        &CreateUser {
            username: input.username.trim().to_string(),
            email: input.email.trim().to_string(),
            password_hash,
            role_id: role.id,
        },
    )
    .await?;

    tracing::info!(user_id = user.id, created_by = admin.user_id, "User created");
    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: user_response(user, role.name),
        }),
    ))
}

/// GET /api/v1/admin/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    let user = UserRepo::find_by_id(&state.pool, admin.tenant, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;
    let role = RoleRepo::resolve_name(&state.pool, user.role_id).await?;
    Ok(Json(DataResponse {
        data: user_response(user, role),
    }))
}

/// PATCH /api/v1/admin/users/{id}
pub async fn update_user(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateUserRequest>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    let role_id = match input.role.as_deref() {
        None => None,
        Some(name) => {
            let role = RoleRepo::find_by_name(&state.pool, name)
                .await?
                .ok_or_else(|| AppError::BadRequest(format!("Unknown role '{name}'")))?;
            Some(role.id)
        }
    };

    let update = UpdateUser {
        username: input.username,
        email: input.email,
        role_id,
        is_active: input.is_active,
    };

    let user = UserRepo::update(&state.pool, admin.tenant, id, &update)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;
    let role = RoleRepo::resolve_name(&state.pool, user.role_id).await?;
    Ok(Json(DataResponse {
        data: user_response(user, role),
    }))
}

/// DELETE /api/v1/admin/users/{id}
///
/// Soft-deactivates the user and revokes all their refresh sessions.
pub async fn deactivate_user(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if id == admin.user_id {
        return Err(AppError::BadRequest(
            "Cannot deactivate your own account".into(),
        ));
    }

    let deactivated = UserRepo::deactivate(&state.pool, admin.tenant, id).await?;
    if !deactivated {
        return Err(AppError::Core(CoreError::NotFound { entity: "User", id }));
    }
    SessionRepo::revoke_all_for_user(&state.pool, id).await?;

    tracing::info!(user_id = id, by = admin.user_id, "User deactivated");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/admin/users/{id}/reset-password
///
/// Sets a new password and revokes the user's refresh sessions so stolen
/// tokens die with the old credential.
pub async fn reset_password(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<ResetPasswordRequest>,
) -> AppResult<StatusCode> {
    // The policy needs the username, so resolve the user before validating.
    let user = UserRepo::find_by_id(&state.pool, admin.tenant, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;
    validate_password_strength(&input.new_password, &user.username)?;

    let password_hash = hash_password(&input.new_password)
        .map_err(|e| AppError::InternalError(format!("Password hashing failed: {e}")))?;

    let updated = UserRepo::update_password(&state.pool, admin.tenant, id, &password_hash).await?;
    if !updated {
        return Err(AppError::Core(CoreError::NotFound { entity: "User", id }));
    }
    SessionRepo::revoke_all_for_user(&state.pool, id).await?;

    tracing::info!(user_id = id, by = admin.user_id, "Password reset");
    Ok(StatusCode::NO_CONTENT)
}
