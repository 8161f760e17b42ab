pub mod admin;
pub mod api_keys;
pub mod assessment;
pub mod auth;
pub mod careers;
pub mod health;
pub mod monitoring;
pub mod personality_types;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                                      login (public)
/// /auth/refresh                                    refresh (public)
/// /auth/logout                                     logout
/// /auth/logout-all                                 revoke all sessions (auth)
/// /auth/me                                         current user (auth)
///
/// /assessment/questions                            question set (public)
/// /assessment/sessions                             start session (POST)
/// /assessment/sessions/{token}                     session status
/// /assessment/sessions/{token}/answers             record answer (POST)
/// /assessment/sessions/{token}/answers/bulk        record batch (POST)
/// /assessment/sessions/{token}/cluster-ratings     cluster ratings (POST)
/// /assessment/sessions/{token}/tie-breakers        tie-breakers (GET, POST)
/// /assessment/sessions/{token}/transition          lifecycle moves (POST)
/// /assessment/sessions/{token}/results             calculated results
/// /assessment/sessions/{token}/careers             top career matches
///
/// /personality-types                               all 16 types
/// /personality-types/{code}                        one type by code
///
/// /careers/match                                   matches for a type code
/// /careers/search                                  name search
/// /careers/clusters                                career clusters
/// /careers/clusters/{id}/careers                   careers within a cluster
/// /careers/{id}                                    career detail + pathways
///
/// /admin/users                                     list, create (admin only)
/// /admin/users/{id}                                get, update, deactivate
/// /admin/users/{id}/reset-password                 reset password
///
/// /admin/api-keys                                  list, create (admin only)
/// /admin/api-keys/{id}                             get, update limits, revoke
/// /admin/api-keys/{id}/rotate                      rotate key material
/// /admin/api-keys/{id}/usage                       usage log
///
/// /admin/sessions                                  session monitoring
/// /admin/stats                                     session counts by state
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Authentication routes (login, refresh, logout).
        .nest("/auth", auth::router())
        // Assessment lifecycle: questions, sessions, answers, results.
        .nest("/assessment", assessment::router())
        // Personality type reference data.
        .nest("/personality-types", personality_types::router())
        // Career exploration: matches, search, clusters, pathways.
        .nest("/careers", careers::router())
        // Admin routes (user management + session monitoring).
        .nest("/admin", admin::router().merge(monitoring::router()))
        .nest("/admin/api-keys", api_keys::router())
}
