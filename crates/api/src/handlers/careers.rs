//! Handlers for careers, clusters, and education pathways.

use axum::extract::{Path, Query, State};
use axum::Json;
use masark_core::deployment::{DeploymentMode, PathwaySource};
use masark_core::language::Language;
use masark_core::types::DbId;
use masark_db::models::career::{
    LocalizedCareerMatch, LocalizedCareerSummary, LocalizedCluster, LocalizedPathway,
};
use masark_db::repositories::{CareerRepo, PersonalityTypeRepo};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::tenant::TenantContext;
use crate::query::LanguageParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Default and maximum result counts for career listings.
const DEFAULT_LIMIT: i64 = 10;
const MAX_LIMIT: i64 = 50;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Query parameters for `GET /careers/match`.
#[derive(Debug, Deserialize)]
pub struct MatchParams {
    /// 4-letter personality type code, e.g. `INTJ`.
    pub personality_type: String,
    pub limit: Option<i64>,
    pub lang: Option<String>,
}

/// Query parameters for `GET /careers/search`.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: String,
    pub limit: Option<i64>,
    pub lang: Option<String>,
}

/// Query parameters for the career detail endpoint.
#[derive(Debug, Deserialize)]
pub struct CareerDetailParams {
    pub lang: Option<String>,
    /// Deployment mode controlling pathway visibility. Defaults to
    /// `standard` (MOE pathways only).
    pub deployment_mode: Option<String>,
}

/// Career detail with its cluster and visible pathways.
#[derive(Debug, Serialize)]
pub struct CareerDetailView {
    pub id: DbId,
    pub name: String,
    pub description: String,
    pub ssoc_code: Option<String>,
    pub cluster: LocalizedCluster,
    pub pathways: Vec<LocalizedPathway>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/careers/match?personality_type=INTJ
///
/// Top career matches for a personality type code, best first. Useful for
/// exploring matches outside a completed session.
pub async fn match_careers(
    State(state): State<AppState>,
    TenantContext(tenant): TenantContext,
    Query(params): Query<MatchParams>,
) -> AppResult<Json<DataResponse<Vec<LocalizedCareerMatch>>>> {
    let lang = parse_lang(params.lang.as_deref())?;
    let limit = clamp(params.limit);

    let code = params.personality_type.to_uppercase();
    let ptype = PersonalityTypeRepo::find_by_code(&state.pool, tenant, &code)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Personality type '{code}' not found")))?;

    let matches = CareerRepo::top_matches(&state.pool, tenant, ptype.id, limit).await?;
    let localized = matches.iter().map(|m| m.localize(lang)).collect();
    Ok(Json(DataResponse { data: localized }))
}

/// GET /api/v1/careers/search?q=engineer
///
/// Case-insensitive substring search over English and Arabic career names.
pub async fn search_careers(
    State(state): State<AppState>,
    TenantContext(tenant): TenantContext,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<DataResponse<Vec<LocalizedCareerSummary>>>> {
    let term = params.q.trim();
    if term.is_empty() {
        return Err(AppError::BadRequest("Search term must not be empty".into()));
    }
    let lang = parse_lang(params.lang.as_deref())?;
    let limit = clamp(params.limit);

    let rows = CareerRepo::search(&state.pool, tenant, term, limit).await?;
    let localized = rows.iter().map(|r| r.localize(lang)).collect();
    Ok(Json(DataResponse { data: localized }))
}

/// GET /api/v1/careers/clusters
pub async fn list_clusters(
    State(state): State<AppState>,
    TenantContext(tenant): TenantContext,
    Query(params): Query<LanguageParams>,
) -> AppResult<Json<DataResponse<Vec<LocalizedCluster>>>> {
    let lang = params.language()?;
    let clusters = CareerRepo::list_clusters(&state.pool, tenant).await?;
    let localized = clusters.iter().map(|c| c.localize(lang)).collect();
    Ok(Json(DataResponse { data: localized }))
}

/// GET /api/v1/careers/clusters/{id}/careers
pub async fn list_cluster_careers(
    State(state): State<AppState>,
    TenantContext(tenant): TenantContext,
    Path(cluster_id): Path<DbId>,
    Query(params): Query<LanguageParams>,
) -> AppResult<Json<DataResponse<Vec<LocalizedCareerSummary>>>> {
    let lang = params.language()?;
    CareerRepo::find_cluster_by_id(&state.pool, tenant, cluster_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Career cluster {cluster_id} not found")))?;

    let rows = CareerRepo::list_by_cluster(&state.pool, tenant, cluster_id).await?;
    let localized = rows.iter().map(|r| r.localize(lang)).collect();
    Ok(Json(DataResponse { data: localized }))
}

/// GET /api/v1/careers/{id}
///
/// Full career detail with its cluster and the pathways visible in the
/// requested deployment mode. Standard deployments only see MOE pathways.
pub async fn get_career(
    State(state): State<AppState>,
    TenantContext(tenant): TenantContext,
    Path(career_id): Path<DbId>,
    Query(params): Query<CareerDetailParams>,
) -> AppResult<Json<DataResponse<CareerDetailView>>> {
    let lang = parse_lang(params.lang.as_deref())?;
    let mode = match params.deployment_mode.as_deref() {
        None => DeploymentMode::default(),
        Some(raw) => DeploymentMode::from_str_db(raw)?,
    };

    let career = CareerRepo::find_by_id(&state.pool, tenant, career_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Career {career_id} not found")))?;
    let cluster = CareerRepo::find_cluster_by_id(&state.pool, tenant, career.cluster_id)
        .await?
        .ok_or_else(|| {
            AppError::InternalError(format!("Career {career_id} references a missing cluster"))
        })?;

    let sources = visible_sources(mode);
    let pathways = CareerRepo::pathways_for_career(&state.pool, tenant, career_id, &sources).await?;

    let (name, description) = match lang {
        Language::En => (career.name_en.clone(), career.description_en.clone()),
        Language::Ar => (career.name_ar.clone(), career.description_ar.clone()),
    };

    Ok(Json(DataResponse {
        data: CareerDetailView {
            id: career.id,
            name,
            description,
            ssoc_code: career.ssoc_code.clone(),
            cluster: cluster.localize(lang),
            pathways: pathways.iter().map(|p| p.localize(lang)).collect(),
        },
    }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn parse_lang(raw: Option<&str>) -> AppResult<Language> {
    match raw {
        None => Ok(Language::default()),
        Some(raw) => Ok(Language::from_str_db(raw)?),
    }
}

fn clamp(limit: Option<i64>) -> i64 {
    limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
}

/// The pathway sources visible in a deployment mode.
fn visible_sources(mode: DeploymentMode) -> Vec<&'static str> {
    [PathwaySource::Moe, PathwaySource::Mawhiba]
        .into_iter()
        .filter(|s| mode.includes_source(*s))
        .map(|s| s.as_str())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_mode_sources() {
        assert_eq!(visible_sources(DeploymentMode::Standard), vec!["moe"]);
    }

    #[test]
    fn test_mawhiba_mode_sources() {
        assert_eq!(
            visible_sources(DeploymentMode::Mawhiba),
            vec!["moe", "mawhiba"]
        );
    }

    #[test]
    fn test_limit_clamping() {
        assert_eq!(clamp(None), DEFAULT_LIMIT);
        assert_eq!(clamp(Some(0)), 1);
        assert_eq!(clamp(Some(25)), 25);
        assert_eq!(clamp(Some(500)), MAX_LIMIT);
    }
}
