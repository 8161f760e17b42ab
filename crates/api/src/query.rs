//! Shared query parameter types for API handlers.
//!
//! Common query structs that appear across multiple handler modules are
//! extracted here to avoid duplication.

use masark_core::language::Language;
use serde::Deserialize;

use crate::error::AppError;

/// Generic pagination parameters (`?limit=&offset=`).
///
/// Used by any handler that supports paginated listing. Values are clamped
/// in the repository layer via `clamp_limit` / `clamp_offset`.
#[derive(Debug, Deserialize)]
pub struct PaginationParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Language selection parameter (`?lang=en|ar`).
///
/// Defaults to English when absent. An unrecognized value is a 400 rather
/// than a silent fallback.
#[derive(Debug, Deserialize)]
pub struct LanguageParams {
    pub lang: Option<String>,
}

impl LanguageParams {
    pub fn language(&self) -> Result<Language, AppError> {
        match self.lang.as_deref() {
            None => Ok(Language::default()),
            Some(raw) => Language::from_str_db(raw).map_err(AppError::Core),
        }
    }
}
