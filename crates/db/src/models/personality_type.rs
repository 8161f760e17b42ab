//! Personality type reference model.

use masark_core::language::Language;
use masark_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Full bilingual row from the `personality_types` table. Seeded reference
/// data, effectively immutable.
#[derive(Debug, Clone, FromRow)]
pub struct PersonalityType {
    pub id: DbId,
    pub tenant_id: DbId,
    pub code: String,
    pub name_en: String,
    pub name_ar: String,
    pub description_en: String,
    pub description_ar: String,
    pub strengths_en: String,
    pub strengths_ar: String,
    pub challenges_en: String,
    pub challenges_ar: String,
    pub created_at: Timestamp,
}

/// Single-language view returned by the API.
#[derive(Debug, Clone, Serialize)]
pub struct LocalizedPersonalityType {
    pub id: DbId,
    pub code: String,
    pub name: String,
    pub description: String,
    pub strengths: String,
    pub challenges: String,
}

impl PersonalityType {
    /// Project one language side of the bilingual row.
    pub fn localize(&self, lang: Language) -> LocalizedPersonalityType {
        let (name, description, strengths, challenges) = match lang {
            Language::En => (
                &self.name_en,
                &self.description_en,
                &self.strengths_en,
                &self.challenges_en,
            ),
            Language::Ar => (
                &self.name_ar,
                &self.description_ar,
                &self.strengths_ar,
                &self.challenges_ar,
            ),
        };
        LocalizedPersonalityType {
            id: self.id,
            code: self.code.clone(),
            name: name.clone(),
            description: description.clone(),
            strengths: strengths.clone(),
            challenges: challenges.clone(),
        }
    }
}
