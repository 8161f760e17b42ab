//! Deployment modes and pathway sources.
//!
//! The platform runs in two deployments: the standard Ministry-of-Education
//! deployment, where career details only surface MOE pathways, and the
//! Mawhiba (gifted-program) deployment, where all pathways are visible.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeploymentMode {
    #[default]
    Standard,
    Mawhiba,
}

impl DeploymentMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeploymentMode::Standard => "standard",
            DeploymentMode::Mawhiba => "mawhiba",
        }
    }

    pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
        match s {
            "standard" => Ok(DeploymentMode::Standard),
            "mawhiba" => Ok(DeploymentMode::Mawhiba),
            other => Err(CoreError::Validation(format!(
                "Invalid deployment mode '{other}'. Must be 'standard' or 'mawhiba'"
            ))),
        }
    }

    /// Whether pathways from the given source are visible in this mode.
    pub fn includes_source(&self, source: PathwaySource) -> bool {
        match self {
            DeploymentMode::Standard => source == PathwaySource::Moe,
            DeploymentMode::Mawhiba => true,
        }
    }
}

/// Origin of an education pathway, stored in the DB as `"moe"` or `"mawhiba"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathwaySource {
    Moe,
    Mawhiba,
}

impl PathwaySource {
    pub fn as_str(&self) -> &'static str {
        match self {
            PathwaySource::Moe => "moe",
            PathwaySource::Mawhiba => "mawhiba",
        }
    }

    pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
        match s {
            "moe" => Ok(PathwaySource::Moe),
            "mawhiba" => Ok(PathwaySource::Mawhiba),
            other => Err(CoreError::Validation(format!(
                "Invalid pathway source '{other}'. Must be 'moe' or 'mawhiba'"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_round_trip() {
        assert_eq!(
            DeploymentMode::from_str_db("standard").unwrap(),
            DeploymentMode::Standard
        );
        assert_eq!(
            DeploymentMode::from_str_db("mawhiba").unwrap(),
            DeploymentMode::Mawhiba
        );
        assert!(DeploymentMode::from_str_db("STANDARD").is_err());
    }

    #[test]
    fn test_standard_mode_hides_mawhiba_pathways() {
        let mode = DeploymentMode::Standard;
        assert!(mode.includes_source(PathwaySource::Moe));
        assert!(!mode.includes_source(PathwaySource::Mawhiba));
    }

    #[test]
    fn test_mawhiba_mode_shows_all_pathways() {
        let mode = DeploymentMode::Mawhiba;
        assert!(mode.includes_source(PathwaySource::Moe));
        assert!(mode.includes_source(PathwaySource::Mawhiba));
    }
}
