//! Personality scoring: tallying answers into per-pole counters and
//! resolving the 4-letter type code.
//!
//! Each answered question increments one pole counter of its dimension. Per
//! dimension the higher count wins; an exact tie is resolved by the session's
//! tie-breaker answer or, failing that, by the deterministic defaults
//! I / N / F / P. Preference strength is the winning count over the
//! dimension total, so it always falls in `[0.5, 1.0]`.

use serde::{Deserialize, Serialize};

use crate::dimension::{AnswerOption, PersonalityDimension, ALL_DIMENSIONS};
use crate::error::CoreError;

/// Number of seeded questions per dimension.
pub const QUESTIONS_PER_DIMENSION: u32 = 9;

/// Total number of seeded assessment questions.
pub const TOTAL_QUESTIONS: u32 = 36;

/// A dimension whose preference strength falls below this value is reported
/// as borderline.
pub const BORDERLINE_THRESHOLD: f64 = 0.55;

/// The 16 valid personality type codes, in seed order.
pub const VALID_TYPE_CODES: [&str; 16] = [
    "INTJ", "INTP", "ENTJ", "ENTP", "INFJ", "INFP", "ENFJ", "ENFP", "ISTJ", "ISFJ", "ESTJ",
    "ESFJ", "ISTP", "ISFP", "ESTP", "ESFP",
];

/// How clearly a dimension preference is expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PreferenceClarity {
    Slight,
    Moderate,
    Clear,
    VeryClear,
}

impl PreferenceClarity {
    /// Classify a preference strength in `[0.5, 1.0]`.
    pub fn from_strength(strength: f64) -> Self {
        if strength < 0.60 {
            PreferenceClarity::Slight
        } else if strength < 0.75 {
            PreferenceClarity::Moderate
        } else if strength < 0.90 {
            PreferenceClarity::Clear
        } else {
            PreferenceClarity::VeryClear
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PreferenceClarity::Slight => "slight",
            PreferenceClarity::Moderate => "moderate",
            PreferenceClarity::Clear => "clear",
            PreferenceClarity::VeryClear => "very_clear",
        }
    }

    pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
        match s {
            "slight" => Ok(PreferenceClarity::Slight),
            "moderate" => Ok(PreferenceClarity::Moderate),
            "clear" => Ok(PreferenceClarity::Clear),
            "very_clear" => Ok(PreferenceClarity::VeryClear),
            other => Err(CoreError::Validation(format!(
                "Invalid preference clarity '{other}'"
            ))),
        }
    }
}

/// Per-pole answer counters for all four dimensions.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DimensionScores {
    first: [u32; 4],
    second: [u32; 4],
}

fn index(dimension: PersonalityDimension) -> usize {
    match dimension {
        PersonalityDimension::Ei => 0,
        PersonalityDimension::Sn => 1,
        PersonalityDimension::Tf => 2,
        PersonalityDimension::Jp => 3,
    }
}

impl DimensionScores {
    /// Count one answer toward a pole of the given dimension.
    pub fn record(&mut self, dimension: PersonalityDimension, toward_first_pole: bool) {
        let i = index(dimension);
        if toward_first_pole {
            self.first[i] += 1;
        } else {
            self.second[i] += 1;
        }
    }

    /// Count one answer given the selected option and the question's
    /// `option_a_maps_to_first` flag.
    pub fn record_answer(
        &mut self,
        dimension: PersonalityDimension,
        option: AnswerOption,
        option_a_maps_to_first: bool,
    ) {
        self.record(dimension, option.maps_to_first_pole(option_a_maps_to_first));
    }

    pub fn first_count(&self, dimension: PersonalityDimension) -> u32 {
        self.first[index(dimension)]
    }

    pub fn second_count(&self, dimension: PersonalityDimension) -> u32 {
        self.second[index(dimension)]
    }

    /// Answers recorded for one dimension.
    pub fn dimension_total(&self, dimension: PersonalityDimension) -> u32 {
        let i = index(dimension);
        self.first[i] + self.second[i]
    }

    /// Answers recorded across all dimensions.
    pub fn total_answers(&self) -> u32 {
        self.first.iter().sum::<u32>() + self.second.iter().sum::<u32>()
    }

    /// Dimensions whose pole counts are exactly equal.
    pub fn tied_dimensions(&self) -> Vec<PersonalityDimension> {
        ALL_DIMENSIONS
            .into_iter()
            .filter(|d| self.first_count(*d) == self.second_count(*d))
            .collect()
    }
}

/// Tie-breaker outcomes per dimension: `Some(true)` picks the first pole,
/// `Some(false)` the second, `None` falls back to the default.
#[derive(Debug, Default, Clone, Copy)]
pub struct TieResolutions {
    resolved: [Option<bool>; 4],
}

impl TieResolutions {
    pub fn set(&mut self, dimension: PersonalityDimension, toward_first_pole: bool) {
        self.resolved[index(dimension)] = Some(toward_first_pole);
    }

    pub fn get(&self, dimension: PersonalityDimension) -> Option<bool> {
        self.resolved[index(dimension)]
    }
}

/// The resolved outcome for a single dimension.
#[derive(Debug, Clone, Serialize)]
pub struct DimensionResult {
    pub dimension: PersonalityDimension,
    pub letter: char,
    /// Winning count over the dimension total, in `[0.5, 1.0]`.
    pub strength: f64,
    pub clarity: PreferenceClarity,
    /// True when the pole counts were equal and a tie-breaker (or the
    /// default) decided the letter.
    pub tied: bool,
    /// True when the strength falls below [`BORDERLINE_THRESHOLD`].
    pub borderline: bool,
}

/// The full scoring outcome: a valid 4-letter code plus per-dimension detail.
#[derive(Debug, Clone, Serialize)]
pub struct TypeOutcome {
    pub code: String,
    pub dimensions: Vec<DimensionResult>,
}

/// Resolve the personality type from tallied scores.
///
/// Requires all [`TOTAL_QUESTIONS`] answers to be recorded; partial tallies
/// are a validation error. Ties are decided by `ties` when present, else by
/// the second-pole defaults (I / N / F / P).
pub fn resolve_type(
    scores: &DimensionScores,
    ties: &TieResolutions,
) -> Result<TypeOutcome, CoreError> {
    let total = scores.total_answers();
    if total != TOTAL_QUESTIONS {
        return Err(CoreError::Validation(format!(
            "Cannot calculate results: {total} of {TOTAL_QUESTIONS} answers recorded"
        )));
    }

    let mut code = String::with_capacity(4);
    let mut dimensions = Vec::with_capacity(4);

    for dim in ALL_DIMENSIONS {
        let first = scores.first_count(dim);
        let second = scores.second_count(dim);
        let dim_total = first + second;
        if dim_total == 0 {
            return Err(CoreError::Validation(format!(
                "No answers recorded for dimension {}",
                dim.as_str()
            )));
        }

        let tied = first == second;
        let toward_first = if tied {
            // Default to the second pole when no tie-breaker answer exists.
            ties.get(dim).unwrap_or(false)
        } else {
            first > second
        };

        let letter = if toward_first {
            dim.first_pole()
        } else {
            dim.second_pole()
        };
        let winning = first.max(second);
        let strength = f64::from(winning) / f64::from(dim_total);

        code.push(letter);
        dimensions.push(DimensionResult {
            dimension: dim,
            letter,
            strength,
            clarity: PreferenceClarity::from_strength(strength),
            tied,
            borderline: strength < BORDERLINE_THRESHOLD,
        });
    }

    debug_assert!(VALID_TYPE_CODES.contains(&code.as_str()));

    Ok(TypeOutcome { code, dimensions })
}

/// Validate a cluster rating value (1-5 scale).
pub fn validate_cluster_rating(rating: i32) -> Result<(), CoreError> {
    if (1..=5).contains(&rating) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid cluster rating {rating}. Must be between 1 and 5"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Record `first` answers toward the first pole and fill the dimension
    /// to 9 answers with the second pole.
    fn fill(scores: &mut DimensionScores, dim: PersonalityDimension, first: u32) {
        for _ in 0..first {
            scores.record(dim, true);
        }
        for _ in 0..(QUESTIONS_PER_DIMENSION - first) {
            scores.record(dim, false);
        }
    }

    fn full_scores(ei: u32, sn: u32, tf: u32, jp: u32) -> DimensionScores {
        let mut scores = DimensionScores::default();
        fill(&mut scores, PersonalityDimension::Ei, ei);
        fill(&mut scores, PersonalityDimension::Sn, sn);
        fill(&mut scores, PersonalityDimension::Tf, tf);
        fill(&mut scores, PersonalityDimension::Jp, jp);
        scores
    }

    // -----------------------------------------------------------------------
    // Tallying
    // -----------------------------------------------------------------------

    #[test]
    fn test_record_answer_respects_option_mapping() {
        let mut scores = DimensionScores::default();
        // Option A with the flag set counts toward the first pole.
        scores.record_answer(PersonalityDimension::Ei, AnswerOption::A, true);
        // Option B with the flag set counts toward the second pole.
        scores.record_answer(PersonalityDimension::Ei, AnswerOption::B, true);
        // Option A with the flag cleared counts toward the second pole.
        scores.record_answer(PersonalityDimension::Ei, AnswerOption::A, false);

        assert_eq!(scores.first_count(PersonalityDimension::Ei), 1);
        assert_eq!(scores.second_count(PersonalityDimension::Ei), 2);
        assert_eq!(scores.total_answers(), 3);
    }

    // -----------------------------------------------------------------------
    // Type resolution
    // -----------------------------------------------------------------------

    #[test]
    fn test_all_first_poles_give_estj() {
        let scores = full_scores(9, 9, 9, 9);
        let outcome = resolve_type(&scores, &TieResolutions::default()).expect("should resolve");
        assert_eq!(outcome.code, "ESTJ");
        for d in &outcome.dimensions {
            assert_eq!(d.strength, 1.0);
            assert_eq!(d.clarity, PreferenceClarity::VeryClear);
            assert!(!d.tied);
            assert!(!d.borderline);
        }
    }

    #[test]
    fn test_all_second_poles_give_infp() {
        let scores = full_scores(0, 0, 0, 0);
        let outcome = resolve_type(&scores, &TieResolutions::default()).expect("should resolve");
        assert_eq!(outcome.code, "INFP");
    }

    #[test]
    fn test_mixed_sequence_gives_known_code() {
        let scores = full_scores(5, 3, 7, 2);
        let outcome = resolve_type(&scores, &TieResolutions::default()).expect("should resolve");
        assert_eq!(outcome.code, "ENTP");
        assert!(VALID_TYPE_CODES.contains(&outcome.code.as_str()));
    }

    #[test]
    fn test_every_extreme_combination_is_valid_code() {
        // 2^4 all-or-nothing splits cover all 16 codes.
        for bits in 0..16u32 {
            let pick = |b: u32| if bits & (1 << b) != 0 { 9 } else { 0 };
            let scores = full_scores(pick(0), pick(1), pick(2), pick(3));
            let outcome =
                resolve_type(&scores, &TieResolutions::default()).expect("should resolve");
            assert!(
                VALID_TYPE_CODES.contains(&outcome.code.as_str()),
                "unexpected code {}",
                outcome.code
            );
        }
    }

    #[test]
    fn test_narrow_majority_is_borderline_slight() {
        let scores = full_scores(5, 9, 9, 9);
        let outcome = resolve_type(&scores, &TieResolutions::default()).expect("should resolve");
        assert_eq!(outcome.code, "ESTJ");

        let ei = &outcome.dimensions[0];
        assert!((ei.strength - 5.0 / 9.0).abs() < 1e-9);
        assert_eq!(ei.clarity, PreferenceClarity::Slight);
        assert!(ei.borderline);
    }

    #[test]
    fn test_partial_tally_rejected() {
        let mut scores = DimensionScores::default();
        scores.record(PersonalityDimension::Ei, true);
        let result = resolve_type(&scores, &TieResolutions::default());
        assert!(result.is_err(), "partial tallies must not resolve");
    }

    // -----------------------------------------------------------------------
    // Tie handling (even splits are only reachable with a modified question
    // corpus, but the rules are fixed: tie-breaker answer, else I/N/F/P)
    // -----------------------------------------------------------------------

    /// A tally with EI split evenly and the rest filled to 36 answers.
    fn tied_ei_scores() -> DimensionScores {
        let mut scores = DimensionScores::default();
        for _ in 0..5 {
            scores.record(PersonalityDimension::Ei, true);
            scores.record(PersonalityDimension::Ei, false);
        }
        fill(&mut scores, PersonalityDimension::Sn, 9);
        fill(&mut scores, PersonalityDimension::Tf, 9);
        // 8 answers here keeps the total at 36 without tying JP.
        for _ in 0..8 {
            scores.record(PersonalityDimension::Jp, true);
        }
        scores
    }

    #[test]
    fn test_tie_defaults_to_second_pole() {
        let scores = tied_ei_scores();
        assert_eq!(scores.tied_dimensions(), vec![PersonalityDimension::Ei]);

        let outcome = resolve_type(&scores, &TieResolutions::default()).expect("should resolve");
        assert_eq!(outcome.code, "ISTJ");

        let ei = &outcome.dimensions[0];
        assert!(ei.tied);
        assert_eq!(ei.letter, 'I');
        assert_eq!(ei.strength, 0.5);
        assert_eq!(ei.clarity, PreferenceClarity::Slight);
    }

    #[test]
    fn test_tie_breaker_answer_overrides_default() {
        let scores = tied_ei_scores();
        let mut ties = TieResolutions::default();
        ties.set(PersonalityDimension::Ei, true);

        let outcome = resolve_type(&scores, &ties).expect("should resolve");
        assert_eq!(outcome.code, "ESTJ");
        assert!(outcome.dimensions[0].tied);
    }

    // -----------------------------------------------------------------------
    // Clarity thresholds
    // -----------------------------------------------------------------------

    #[test]
    fn test_clarity_thresholds() {
        assert_eq!(
            PreferenceClarity::from_strength(0.50),
            PreferenceClarity::Slight
        );
        assert_eq!(
            PreferenceClarity::from_strength(0.599),
            PreferenceClarity::Slight
        );
        assert_eq!(
            PreferenceClarity::from_strength(0.60),
            PreferenceClarity::Moderate
        );
        assert_eq!(
            PreferenceClarity::from_strength(0.749),
            PreferenceClarity::Moderate
        );
        assert_eq!(
            PreferenceClarity::from_strength(0.75),
            PreferenceClarity::Clear
        );
        assert_eq!(
            PreferenceClarity::from_strength(0.899),
            PreferenceClarity::Clear
        );
        assert_eq!(
            PreferenceClarity::from_strength(0.90),
            PreferenceClarity::VeryClear
        );
        assert_eq!(
            PreferenceClarity::from_strength(1.0),
            PreferenceClarity::VeryClear
        );
    }

    #[test]
    fn test_clarity_round_trip() {
        for clarity in [
            PreferenceClarity::Slight,
            PreferenceClarity::Moderate,
            PreferenceClarity::Clear,
            PreferenceClarity::VeryClear,
        ] {
            assert_eq!(
                PreferenceClarity::from_str_db(clarity.as_str()).unwrap(),
                clarity
            );
        }
        assert!(PreferenceClarity::from_str_db("fuzzy").is_err());
    }

    // -----------------------------------------------------------------------
    // Cluster rating validation
    // -----------------------------------------------------------------------

    #[test]
    fn test_cluster_rating_bounds() {
        for r in 1..=5 {
            assert!(validate_cluster_rating(r).is_ok());
        }
        assert!(validate_cluster_rating(0).is_err());
        assert!(validate_cluster_rating(6).is_err());
        assert!(validate_cluster_rating(-1).is_err());
    }
}
