//! Career, cluster, pathway, and match models.

use masark_core::language::Language;
use masark_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Full bilingual row from the `career_clusters` table.
#[derive(Debug, Clone, FromRow)]
pub struct CareerCluster {
    pub id: DbId,
    pub tenant_id: DbId,
    pub name_en: String,
    pub name_ar: String,
    pub description_en: String,
    pub description_ar: String,
    pub created_at: Timestamp,
}

/// Single-language cluster view.
#[derive(Debug, Clone, Serialize)]
pub struct LocalizedCluster {
    pub id: DbId,
    pub name: String,
    pub description: String,
}

impl CareerCluster {
    pub fn localize(&self, lang: Language) -> LocalizedCluster {
        let (name, description) = match lang {
            Language::En => (&self.name_en, &self.description_en),
            Language::Ar => (&self.name_ar, &self.description_ar),
        };
        LocalizedCluster {
            id: self.id,
            name: name.clone(),
            description: description.clone(),
        }
    }
}

/// Full bilingual row from the `careers` table.
#[derive(Debug, Clone, FromRow)]
pub struct Career {
    pub id: DbId,
    pub tenant_id: DbId,
    pub cluster_id: DbId,
    pub name_en: String,
    pub name_ar: String,
    pub description_en: String,
    pub description_ar: String,
    /// Saudi Standard Occupational Classification code.
    pub ssoc_code: Option<String>,
    pub is_active: bool,
    pub created_at: Timestamp,
}

/// Full bilingual row from the `pathways` table.
#[derive(Debug, Clone, FromRow)]
pub struct Pathway {
    pub id: DbId,
    pub tenant_id: DbId,
    /// Pathway source: `moe` or `mawhiba`.
    pub source: String,
    pub name_en: String,
    pub name_ar: String,
    pub description_en: String,
    pub description_ar: String,
    pub created_at: Timestamp,
}

/// Single-language pathway view.
#[derive(Debug, Clone, Serialize)]
pub struct LocalizedPathway {
    pub id: DbId,
    pub source: String,
    pub name: String,
    pub description: String,
}

impl Pathway {
    pub fn localize(&self, lang: Language) -> LocalizedPathway {
        let (name, description) = match lang {
            Language::En => (&self.name_en, &self.description_en),
            Language::Ar => (&self.name_ar, &self.description_ar),
        };
        LocalizedPathway {
            id: self.id,
            source: self.source.clone(),
            name: name.clone(),
            description: description.clone(),
        }
    }
}

/// Career match row: precomputed match joined with the career and its
/// cluster, ordered by score descending.
#[derive(Debug, Clone, FromRow)]
pub struct CareerMatchRow {
    pub career_id: DbId,
    pub name_en: String,
    pub name_ar: String,
    pub ssoc_code: Option<String>,
    pub match_score: f64,
    pub cluster_id: DbId,
    pub cluster_name_en: String,
    pub cluster_name_ar: String,
}

/// Single-language match view returned by the API.
#[derive(Debug, Clone, Serialize)]
pub struct LocalizedCareerMatch {
    pub career_id: DbId,
    pub name: String,
    pub ssoc_code: Option<String>,
    pub match_score: f64,
    pub cluster_id: DbId,
    pub cluster_name: String,
}

impl CareerMatchRow {
    pub fn localize(&self, lang: Language) -> LocalizedCareerMatch {
        let (name, cluster_name) = match lang {
            Language::En => (&self.name_en, &self.cluster_name_en),
            Language::Ar => (&self.name_ar, &self.cluster_name_ar),
        };
        LocalizedCareerMatch {
            career_id: self.career_id,
            name: name.clone(),
            ssoc_code: self.ssoc_code.clone(),
            match_score: self.match_score,
            cluster_id: self.cluster_id,
            cluster_name: cluster_name.clone(),
        }
    }
}

/// Career search / cluster-listing row (no match score).
#[derive(Debug, Clone, FromRow)]
pub struct CareerSummaryRow {
    pub id: DbId,
    pub cluster_id: DbId,
    pub name_en: String,
    pub name_ar: String,
    pub ssoc_code: Option<String>,
}

/// Single-language career summary.
#[derive(Debug, Clone, Serialize)]
pub struct LocalizedCareerSummary {
    pub id: DbId,
    pub cluster_id: DbId,
    pub name: String,
    pub ssoc_code: Option<String>,
}

impl CareerSummaryRow {
    pub fn localize(&self, lang: Language) -> LocalizedCareerSummary {
        let name = match lang {
            Language::En => &self.name_en,
            Language::Ar => &self.name_ar,
        };
        LocalizedCareerSummary {
            id: self.id,
            cluster_id: self.cluster_id,
            name: name.clone(),
            ssoc_code: self.ssoc_code.clone(),
        }
    }
}
