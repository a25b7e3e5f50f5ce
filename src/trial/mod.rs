use std::fmt::Debug;

use crate::randomness::RandomSource;
use crate::types::{TrialError, TrialOutcome};

/// One randomized process that can be run to completion.
///
/// Implementations validate their configuration on construction, so `run_trial`
/// is only ever reached with a well-formed configuration. A trial must be a pure
/// function of the draws it consumes from `rng`.
pub trait Trial: Send + Sync {
    /// Result of a single trial
    type Outcome: Clone + Debug + Send + 'static;

    /// Short identifier used in logs and result files
    fn name(&self) -> &'static str;

    /// Runs one trial from its initial state to termination or censoring
    fn run_trial(&self, rng: &mut RandomSource) -> Result<Self::Outcome, TrialError>;
}

/// Drives a trial state through its transitions.
///
/// `transition` applies one step to `state` and returns whether the termination
/// predicate now holds. Stepping stops at the first `true`, giving
/// `Completed(steps)`, or after `max_steps` transitions without termination, giving
/// `Censored { steps: max_steps }`. Without a bound the loop runs until termination.
pub fn step_until<S, F>(max_steps: Option<u64>, state: &mut S, mut transition: F) -> Result<TrialOutcome<u64>, TrialError>
where
    F: FnMut(&mut S) -> Result<bool, TrialError>,
{
    let mut steps: u64 = 0;
    loop {
        if let Some(bound) = max_steps {
            if steps >= bound {
                return Ok(TrialOutcome::Censored { steps });
            }
        }
        let terminated = transition(state)?;
        steps += 1;
        if terminated {
            return Ok(TrialOutcome::Completed(steps));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_until_completes() {
        let mut counter = 0u32;
        let outcome = step_until(None, &mut counter, |c| {
            *c += 1;
            Ok(*c == 5)
        })
        .unwrap();
        assert_eq!(outcome, TrialOutcome::Completed(5));
    }

    #[test]
    fn test_step_until_censors_at_bound() {
        let mut counter = 0u32;
        let outcome = step_until(Some(3), &mut counter, |c| {
            *c += 1;
            Ok(false)
        })
        .unwrap();
        assert_eq!(outcome, TrialOutcome::Censored { steps: 3 });
        assert_eq!(counter, 3);
    }

    #[test]
    fn test_step_until_zero_bound_never_steps() {
        let mut counter = 0u32;
        let outcome = step_until(Some(0), &mut counter, |c| {
            *c += 1;
            Ok(true)
        })
        .unwrap();
        assert_eq!(outcome, TrialOutcome::Censored { steps: 0 });
        assert_eq!(counter, 0);
    }

    #[test]
    fn test_step_until_propagates_errors() {
        let mut counter = 0u32;
        let result = step_until(Some(10), &mut counter, |_| Err(TrialError::invalid("boom")));
        assert!(matches!(result, Err(TrialError::InvalidConfiguration(_))));
    }
}
