//! Handlers for the `/personality-types` reference data.

use axum::extract::{Path, Query, State};
use axum::Json;
use masark_db::models::personality_type::LocalizedPersonalityType;
use masark_db::repositories::PersonalityTypeRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::tenant::TenantContext;
use crate::query::LanguageParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/personality-types
///
/// All 16 types, localized, in seed order.
pub async fn list_types(
    State(state): State<AppState>,
    TenantContext(tenant): TenantContext,
    Query(params): Query<LanguageParams>,
) -> AppResult<Json<DataResponse<Vec<LocalizedPersonalityType>>>> {
    let lang = params.language()?;
    let types = PersonalityTypeRepo::list(&state.pool, tenant).await?;
    let localized = types.iter().map(|t| t.localize(lang)).collect();
    Ok(Json(DataResponse { data: localized }))
}

/// GET /api/v1/personality-types/{code}
///
/// One type by its 4-letter code. Codes are matched case-insensitively.
pub async fn get_type(
    State(state): State<AppState>,
    TenantContext(tenant): TenantContext,
    Path(code): Path<String>,
    Query(params): Query<LanguageParams>,
) -> AppResult<Json<DataResponse<LocalizedPersonalityType>>> {
    let lang = params.language()?;
    let code = code.to_uppercase();
    let row = PersonalityTypeRepo::find_by_code(&state.pool, tenant, &code)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Personality type '{code}' not found")))?;
    Ok(Json(DataResponse {
        data: row.localize(lang),
    }))
}
