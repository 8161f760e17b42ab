//! Route definitions for `/admin` user management.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// Routes mounted at `/admin`. All require the `admin` role.
///
/// ```text
/// GET    /users                      list users
/// POST   /users                      create user
/// GET    /users/{id}                 get user
/// PATCH  /users/{id}                 update user
/// DELETE /users/{id}                 deactivate user
/// POST   /users/{id}/reset-password  reset password
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", get(admin::list_users).post(admin::create_user))
        .route(
            "/users/{id}",
            get(admin::get_user)
                .patch(admin::update_user)
                .delete(admin::deactivate_user),
        )
        .route("/users/{id}/reset-password", post(admin::reset_password))
}
