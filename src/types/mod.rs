use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::randomness::RandomnessError;

pub mod constants;

/// The result of running one trial to its end.
///
/// A trial either satisfies its termination predicate, or hits the step bound its
/// configuration imposes. Censored outcomes must be kept apart from completed ones
/// when aggregating, otherwise the statistic is biased towards the bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrialOutcome<T> {
    /// The termination predicate held
    Completed(T),
    /// The step bound was exhausted after `steps` transitions
    Censored { steps: u64 },
}

impl<T> TrialOutcome<T> {
    pub fn is_censored(&self) -> bool {
        matches!(self, TrialOutcome::Censored { .. })
    }

    /// Returns the completed value, if any
    pub fn completed(&self) -> Option<&T> {
        match self {
            TrialOutcome::Completed(value) => Some(value),
            TrialOutcome::Censored { .. } => None,
        }
    }
}

impl<T: fmt::Display> fmt::Display for TrialOutcome<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrialOutcome::Completed(value) => write!(f, "{}", value),
            TrialOutcome::Censored { steps } => write!(f, "censored after {} steps", steps),
        }
    }
}

/// Errors raised while configuring or running a trial
#[derive(Debug, Error)]
pub enum TrialError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("Randomness service failure: {0}")]
    Randomness(#[from] RandomnessError),
    #[error("Worker failed: {0}")]
    Worker(String),
}

impl TrialError {
    pub fn invalid(message: impl Into<String>) -> Self {
        TrialError::InvalidConfiguration(message.into())
    }
}
