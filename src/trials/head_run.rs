use crate::randomness::RandomSource;
use crate::trial::{step_until, Trial};
use crate::types::{TrialError, TrialOutcome};

use super::validate_step_bound;

/// Tosses a fair coin until `run_length` heads in a row. The outcome is the number of
/// tosses, including the final run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeadRun {
    run_length: u32,
    max_steps: Option<u64>,
}

impl HeadRun {
    pub fn new(run_length: u32, max_steps: Option<u64>) -> Result<Self, TrialError> {
        if run_length == 0 {
            return Err(TrialError::invalid("Run length must be at least 1"));
        }
        validate_step_bound(max_steps)?;
        Ok(Self { run_length, max_steps })
    }

    pub fn run_length(&self) -> u32 {
        self.run_length
    }
}

impl Trial for HeadRun {
    type Outcome = TrialOutcome<u64>;

    fn name(&self) -> &'static str {
        "head_run"
    }

    fn run_trial(&self, rng: &mut RandomSource) -> Result<TrialOutcome<u64>, TrialError> {
        // Only the current streak matters for the next toss
        let mut streak: u32 = 0;
        step_until(self.max_steps, &mut streak, |streak| {
            if rng.coin_flip() {
                *streak += 1;
            } else {
                *streak = 0;
            }
            Ok(*streak >= self.run_length)
        })
    }
}
