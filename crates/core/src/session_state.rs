//! Assessment session state machine.
//!
//! A session moves through: questions (`in_progress`) → optional career
//! cluster ratings → optional tie-breaker resolution → `completed` (results
//! calculated on entry). `abandoned` is reachable from any non-terminal
//! state. Transitions are requested explicitly by the client naming the
//! target state; illegal requests are typed validation errors, never panics.
//!
//! The API layer additionally requires all 36 answers before any state past
//! `in_progress` is entered, and at least one tied dimension before
//! `tie_breaker`.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    InProgress,
    ClusterRating,
    TieBreaker,
    Completed,
    Abandoned,
}

impl SessionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionState::InProgress => "in_progress",
            SessionState::ClusterRating => "cluster_rating",
            SessionState::TieBreaker => "tie_breaker",
            SessionState::Completed => "completed",
            SessionState::Abandoned => "abandoned",
        }
    }

    pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
        match s {
            "in_progress" => Ok(SessionState::InProgress),
            "cluster_rating" => Ok(SessionState::ClusterRating),
            "tie_breaker" => Ok(SessionState::TieBreaker),
            "completed" => Ok(SessionState::Completed),
            "abandoned" => Ok(SessionState::Abandoned),
            other => Err(CoreError::Validation(format!(
                "Invalid session state '{other}'"
            ))),
        }
    }

    /// Terminal states accept no further transitions or answers.
    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionState::Completed | SessionState::Abandoned)
    }

    /// Whether a transition from `self` to `target` is legal.
    pub fn can_transition(&self, target: SessionState) -> bool {
        use SessionState::*;
        match (self, target) {
            (InProgress, ClusterRating | TieBreaker | Completed | Abandoned) => true,
            (ClusterRating, TieBreaker | Completed | Abandoned) => true,
            (TieBreaker, Completed | Abandoned) => true,
            _ => false,
        }
    }
}

/// Validate a requested transition, producing the error message surfaced to
/// the client on an illegal request.
pub fn validate_transition(from: SessionState, to: SessionState) -> Result<(), CoreError> {
    if from.can_transition(to) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Cannot transition session from '{}' to '{}'",
            from.as_str(),
            to.as_str()
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use SessionState::*;

    const ALL_STATES: [SessionState; 5] =
        [InProgress, ClusterRating, TieBreaker, Completed, Abandoned];

    #[test]
    fn test_state_round_trip() {
        for state in ALL_STATES {
            assert_eq!(SessionState::from_str_db(state.as_str()).unwrap(), state);
        }
        assert!(SessionState::from_str_db("paused").is_err());
    }

    #[test]
    fn test_exact_transition_table() {
        // Every legal (from, to) pair, nothing else.
        let legal = [
            (InProgress, ClusterRating),
            (InProgress, TieBreaker),
            (InProgress, Completed),
            (InProgress, Abandoned),
            (ClusterRating, TieBreaker),
            (ClusterRating, Completed),
            (ClusterRating, Abandoned),
            (TieBreaker, Completed),
            (TieBreaker, Abandoned),
        ];

        for from in ALL_STATES {
            for to in ALL_STATES {
                let expected = legal.contains(&(from, to));
                assert_eq!(
                    from.can_transition(to),
                    expected,
                    "transition {} -> {}",
                    from.as_str(),
                    to.as_str()
                );
            }
        }
    }

    #[test]
    fn test_terminal_states_accept_nothing() {
        for terminal in [Completed, Abandoned] {
            assert!(terminal.is_terminal());
            for to in ALL_STATES {
                assert!(!terminal.can_transition(to));
            }
        }
        assert!(!InProgress.is_terminal());
    }

    #[test]
    fn test_validate_transition_error_names_states() {
        let err = validate_transition(Completed, InProgress).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("completed"));
        assert!(msg.contains("in_progress"));
    }

    #[test]
    fn test_no_skipping_back_to_questions() {
        assert!(!ClusterRating.can_transition(InProgress));
        assert!(!TieBreaker.can_transition(InProgress));
        assert!(!TieBreaker.can_transition(ClusterRating));
    }
}
