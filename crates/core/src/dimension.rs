//! Assessment dimensions and answer options.
//!
//! Each of the 36 questions targets one of four dimensions; each dimension
//! has two poles (e.g. `E`/`I`) and contributes one letter to the final
//! 4-letter personality code. Answers pick option `A` or `B`; which pole a
//! given option maps to is a per-question flag (`option_a_maps_to_first`).

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// One of the four assessment dimensions, stored in the DB as `"EI"`,
/// `"SN"`, `"TF"`, or `"JP"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PersonalityDimension {
    Ei,
    Sn,
    Tf,
    Jp,
}

/// All dimensions in code-letter order (EI, SN, TF, JP).
pub const ALL_DIMENSIONS: [PersonalityDimension; 4] = [
    PersonalityDimension::Ei,
    PersonalityDimension::Sn,
    PersonalityDimension::Tf,
    PersonalityDimension::Jp,
];

impl PersonalityDimension {
    /// Database representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            PersonalityDimension::Ei => "EI",
            PersonalityDimension::Sn => "SN",
            PersonalityDimension::Tf => "TF",
            PersonalityDimension::Jp => "JP",
        }
    }

    /// Parse the database representation.
    pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
        match s {
            "EI" => Ok(PersonalityDimension::Ei),
            "SN" => Ok(PersonalityDimension::Sn),
            "TF" => Ok(PersonalityDimension::Tf),
            "JP" => Ok(PersonalityDimension::Jp),
            other => Err(CoreError::Validation(format!(
                "Invalid personality dimension '{other}'. Must be one of: EI, SN, TF, JP"
            ))),
        }
    }

    /// The first pole's letter (`E`, `S`, `T`, `J`).
    pub fn first_pole(&self) -> char {
        match self {
            PersonalityDimension::Ei => 'E',
            PersonalityDimension::Sn => 'S',
            PersonalityDimension::Tf => 'T',
            PersonalityDimension::Jp => 'J',
        }
    }

    /// The second pole's letter (`I`, `N`, `F`, `P`).
    pub fn second_pole(&self) -> char {
        match self {
            PersonalityDimension::Ei => 'I',
            PersonalityDimension::Sn => 'N',
            PersonalityDimension::Tf => 'F',
            PersonalityDimension::Jp => 'P',
        }
    }
}

/// An answer to a two-option question, stored in the DB as `"A"` or `"B"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnswerOption {
    A,
    B,
}

impl AnswerOption {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnswerOption::A => "A",
            AnswerOption::B => "B",
        }
    }

    /// Parse the database/API representation. Anything other than `"A"` or
    /// `"B"` is a validation error (surfaced as HTTP 400).
    pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
        match s {
            "A" => Ok(AnswerOption::A),
            "B" => Ok(AnswerOption::B),
            other => Err(CoreError::Validation(format!(
                "Invalid answer option '{other}'. Must be 'A' or 'B'"
            ))),
        }
    }

    /// Whether this answer points at the dimension's first pole, given the
    /// question's `option_a_maps_to_first` flag.
    pub fn maps_to_first_pole(&self, option_a_maps_to_first: bool) -> bool {
        match self {
            AnswerOption::A => option_a_maps_to_first,
            AnswerOption::B => !option_a_maps_to_first,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimension_round_trip() {
        for dim in ALL_DIMENSIONS {
            let parsed = PersonalityDimension::from_str_db(dim.as_str())
                .expect("known dimension string should parse");
            assert_eq!(parsed, dim);
        }
    }

    #[test]
    fn test_invalid_dimension_rejected() {
        assert!(PersonalityDimension::from_str_db("XY").is_err());
        assert!(PersonalityDimension::from_str_db("ei").is_err());
        assert!(PersonalityDimension::from_str_db("").is_err());
    }

    #[test]
    fn test_pole_letters() {
        assert_eq!(PersonalityDimension::Ei.first_pole(), 'E');
        assert_eq!(PersonalityDimension::Ei.second_pole(), 'I');
        assert_eq!(PersonalityDimension::Jp.first_pole(), 'J');
        assert_eq!(PersonalityDimension::Jp.second_pole(), 'P');
    }

    #[test]
    fn test_answer_option_parse() {
        assert_eq!(AnswerOption::from_str_db("A").unwrap(), AnswerOption::A);
        assert_eq!(AnswerOption::from_str_db("B").unwrap(), AnswerOption::B);
        assert!(AnswerOption::from_str_db("C").is_err());
        assert!(AnswerOption::from_str_db("a").is_err());
        assert!(AnswerOption::from_str_db("1").is_err());
    }

    #[test]
    fn test_option_pole_mapping() {
        // When option A maps to the first pole, B maps to the second.
        assert!(AnswerOption::A.maps_to_first_pole(true));
        assert!(!AnswerOption::B.maps_to_first_pole(true));
        // When the flag is inverted, so is the mapping.
        assert!(!AnswerOption::A.maps_to_first_pole(false));
        assert!(AnswerOption::B.maps_to_first_pole(false));
    }
}
