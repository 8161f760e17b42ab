//! Assessment question and tie-breaker question models.

use masark_core::language::Language;
use masark_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Full bilingual row from the `questions` table. Seeded reference data.
#[derive(Debug, Clone, FromRow)]
pub struct Question {
    pub id: DbId,
    pub tenant_id: DbId,
    /// Dimension code: `EI`, `SN`, `TF`, or `JP`.
    pub dimension: String,
    pub order_index: i32,
    pub text_en: String,
    pub text_ar: String,
    pub option_a_text_en: String,
    pub option_a_text_ar: String,
    pub option_b_text_en: String,
    pub option_b_text_ar: String,
    /// Whether option A maps to the dimension's first pole letter.
    pub option_a_maps_to_first: bool,
    pub is_active: bool,
    pub created_at: Timestamp,
}

/// Single-language question view served to assessment clients.
///
/// Deliberately omits `option_a_maps_to_first` so the scoring key is not
/// exposed to the client.
#[derive(Debug, Clone, Serialize)]
pub struct LocalizedQuestion {
    pub id: DbId,
    pub dimension: String,
    pub order_index: i32,
    pub text: String,
    pub option_a: String,
    pub option_b: String,
}

impl Question {
    pub fn localize(&self, lang: Language) -> LocalizedQuestion {
        let (text, option_a, option_b) = match lang {
            Language::En => (&self.text_en, &self.option_a_text_en, &self.option_b_text_en),
            Language::Ar => (&self.text_ar, &self.option_a_text_ar, &self.option_b_text_ar),
        };
        LocalizedQuestion {
            id: self.id,
            dimension: self.dimension.clone(),
            order_index: self.order_index,
            text: text.clone(),
            option_a: option_a.clone(),
            option_b: option_b.clone(),
        }
    }
}

/// Full bilingual row from the `tie_breaker_questions` table (one per
/// dimension).
#[derive(Debug, Clone, FromRow)]
pub struct TieBreakerQuestion {
    pub id: DbId,
    pub tenant_id: DbId,
    pub dimension: String,
    pub text_en: String,
    pub text_ar: String,
    pub option_a_text_en: String,
    pub option_a_text_ar: String,
    pub option_b_text_en: String,
    pub option_b_text_ar: String,
    pub option_a_maps_to_first: bool,
    pub created_at: Timestamp,
}

/// Single-language tie-breaker view.
#[derive(Debug, Clone, Serialize)]
pub struct LocalizedTieBreakerQuestion {
    pub id: DbId,
    pub dimension: String,
    pub text: String,
    pub option_a: String,
    pub option_b: String,
}

impl TieBreakerQuestion {
    pub fn localize(&self, lang: Language) -> LocalizedTieBreakerQuestion {
        let (text, option_a, option_b) = match lang {
            Language::En => (&self.text_en, &self.option_a_text_en, &self.option_b_text_en),
            Language::Ar => (&self.text_ar, &self.option_a_text_ar, &self.option_b_text_ar),
        };
        LocalizedTieBreakerQuestion {
            id: self.id,
            dimension: self.dimension.clone(),
            text: text.clone(),
            option_a: option_a.clone(),
            option_b: option_b.clone(),
        }
    }
}
