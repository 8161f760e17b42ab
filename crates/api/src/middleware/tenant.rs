//! Tenant resolution for public (unauthenticated) endpoints.
//!
//! Authenticated requests carry their tenant inside the JWT (`tid` claim) and
//! use [`AuthUser`](super::auth::AuthUser) instead. Public endpoints resolve
//! the tenant from the `X-Tenant-Id` header, falling back to the default
//! tenant when the header is absent. A malformed header is a 400, never a
//! silent fallback.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use masark_core::types::{TenantId, DEFAULT_TENANT_ID};

use crate::error::AppError;
use crate::state::AppState;

/// Header carrying the tenant id on public requests.
pub const TENANT_HEADER: &str = "x-tenant-id";

/// Tenant context for public endpoints.
#[derive(Debug, Clone, Copy)]
pub struct TenantContext(pub TenantId);

impl FromRequestParts<AppState> for TenantContext {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match parts.headers.get(TENANT_HEADER) {
            None => Ok(TenantContext(DEFAULT_TENANT_ID)),
            Some(raw) => {
                let id: i64 = raw
                    .to_str()
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .ok_or_else(|| {
                        AppError::BadRequest("X-Tenant-Id must be a positive integer".into())
                    })?;
                if id <= 0 {
                    return Err(AppError::BadRequest(
                        "X-Tenant-Id must be a positive integer".into(),
                    ));
                }
                Ok(TenantContext(TenantId(id)))
            }
        }
    }
}
