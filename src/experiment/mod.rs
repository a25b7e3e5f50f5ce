//! Runs a configured number of independent trials.
//!
//! Trial `i` of an experiment always draws from `RandomSource::for_trial(seed, i)`, so the
//! sequential and the parallel runner produce the same outcomes for the same seed, no
//! matter how trial indices are spread over workers.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use futures::future::try_join_all;
use serde::{Deserialize, Serialize};

use crate::randomness::{draw_seed, RandomSource};
use crate::trial::Trial;
use crate::types::TrialError;
use crate::utils::logging::log;

/// How many trials to run, from which seed, on how many workers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Experiment {
    pub trials: u64,
    /// Drawn at run time when absent
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default = "default_workers")]
    pub workers: usize,
}

fn default_workers() -> usize {
    1
}

impl Experiment {
    pub fn new(trials: u64) -> Self {
        Self {
            trials,
            seed: None,
            workers: default_workers(),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    pub fn validate(&self) -> Result<(), TrialError> {
        if self.trials == 0 {
            return Err(TrialError::invalid("An experiment needs at least one trial"));
        }
        if self.workers == 0 {
            return Err(TrialError::invalid("An experiment needs at least one worker"));
        }
        Ok(())
    }

    /// The configured seed, or a freshly drawn one. Report the returned seed with the
    /// results so the run can be reproduced.
    pub fn resolved_seed(&self) -> u64 {
        self.seed.unwrap_or_else(draw_seed)
    }
}

/// Runs every trial on the calling thread, in index order
pub fn run_experiment<T: Trial>(experiment: &Experiment, seed: u64, trial: &T) -> Result<Vec<T::Outcome>, TrialError> {
    experiment.validate()?;
    log(
        "experiment",
        &format!("Running {} {} trials with seed {}", experiment.trials, trial.name(), seed),
    );
    (0..experiment.trials)
        .map(|i| trial.run_trial(&mut RandomSource::for_trial(seed, i)))
        .collect()
}

/// Spreads the trials over `experiment.workers` blocking tasks.
///
/// Each worker runs a contiguous range of trial indices. The first failing trial stops
/// every worker and its error is returned.
pub async fn run_experiment_parallel<T>(experiment: &Experiment, seed: u64, trial: Arc<T>) -> Result<Vec<T::Outcome>, TrialError>
where
    T: Trial + 'static,
{
    experiment.validate()?;
    let workers = (experiment.workers as u64).min(experiment.trials);
    let chunk = experiment.trials.div_ceil(workers);
    let tasks = experiment.trials.div_ceil(chunk);
    log(
        "experiment",
        &format!(
            "Running {} {} trials with seed {} on {} workers",
            experiment.trials,
            trial.name(),
            seed,
            tasks
        ),
    );

    let abort = Arc::new(AtomicBool::new(false));
    // Ceil-sized chunks can cover every trial with fewer than `workers` tasks
    let handles = (0..experiment.trials).step_by(chunk as usize).map(|start| {
        let trial = Arc::clone(&trial);
        let abort = Arc::clone(&abort);
        let end = (start + chunk).min(experiment.trials);
        tokio::task::spawn_blocking(move || {
            let mut outcomes = Vec::with_capacity((end - start) as usize);
            for i in start..end {
                if abort.load(Ordering::Relaxed) {
                    break;
                }
                match trial.run_trial(&mut RandomSource::for_trial(seed, i)) {
                    Ok(outcome) => outcomes.push(outcome),
                    Err(e) => {
                        abort.store(true, Ordering::Relaxed);
                        return Err(e);
                    }
                }
            }
            Ok(outcomes)
        })
    });

    let results = try_join_all(handles)
        .await
        .map_err(|e| TrialError::Worker(e.to_string()))?;

    let mut outcomes = Vec::with_capacity(experiment.trials as usize);
    for result in results {
        outcomes.extend(result?);
    }
    Ok(outcomes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trials::{HeadRun, LatticeWalk};
    use crate::types::TrialOutcome;

    struct FailsAt(u64);

    impl Trial for FailsAt {
        type Outcome = u64;

        fn name(&self) -> &'static str {
            "fails_at"
        }

        fn run_trial(&self, rng: &mut RandomSource) -> Result<u64, TrialError> {
            let draw = rng.uniform_index(100)? as u64;
            if draw == self.0 {
                return Err(TrialError::invalid("unlucky draw"));
            }
            Ok(draw)
        }
    }

    #[test]
    fn test_validate() {
        assert!(Experiment::new(0).validate().is_err());
        assert!(Experiment::new(10).with_workers(0).validate().is_err());
        assert!(Experiment::new(10).with_workers(4).validate().is_ok());
        assert_eq!(Experiment::new(1).with_seed(9).resolved_seed(), 9);
    }

    #[test]
    fn test_same_seed_same_outcomes() {
        let trial = HeadRun::new(3, None).unwrap();
        let experiment = Experiment::new(200).with_seed(5);
        let first = run_experiment(&experiment, 5, &trial).unwrap();
        let second = run_experiment(&experiment, 5, &trial).unwrap();
        assert_eq!(first, second);
        assert_ne!(first, run_experiment(&experiment, 6, &trial).unwrap());
    }

    #[tokio::test]
    async fn test_parallel_matches_sequential() {
        let trial = Arc::new(LatticeWalk::diagonal_line(1_000).unwrap());
        let experiment = Experiment::new(301).with_workers(4);
        let mut sequential = run_experiment(&experiment, 77, trial.as_ref()).unwrap();
        let mut parallel = run_experiment_parallel(&experiment, 77, trial).await.unwrap();
        assert_eq!(parallel.len(), 301);

        let key = |o: &TrialOutcome<u64>| match *o {
            TrialOutcome::Completed(s) => (0, s),
            TrialOutcome::Censored { steps } => (1, steps),
        };
        sequential.sort_by_key(key);
        parallel.sort_by_key(key);
        assert_eq!(sequential, parallel);
    }

    #[tokio::test]
    async fn test_more_workers_than_trials() {
        let trial = Arc::new(HeadRun::new(1, None).unwrap());
        let experiment = Experiment::new(3).with_workers(16);
        let outcomes = run_experiment_parallel(&experiment, 1, trial).await.unwrap();
        assert_eq!(outcomes.len(), 3);
    }

    #[tokio::test]
    async fn test_uneven_split_over_workers() {
        let trial = Arc::new(HeadRun::new(2, None).unwrap());
        for (trials, workers) in [(5, 4), (100, 48), (7, 7), (10, 3)] {
            let experiment = Experiment::new(trials).with_workers(workers);
            let mut sequential = run_experiment(&experiment, 11, trial.as_ref()).unwrap();
            let mut parallel = run_experiment_parallel(&experiment, 11, Arc::clone(&trial)).await.unwrap();
            assert_eq!(parallel.len() as u64, trials);
            sequential.sort_by_key(|o| format!("{:?}", o));
            parallel.sort_by_key(|o| format!("{:?}", o));
            assert_eq!(sequential, parallel);
        }
    }

    #[tokio::test]
    async fn test_trial_error_aborts_run() {
        let experiment = Experiment::new(1_000).with_workers(3);
        assert!(run_experiment(&experiment, 2, &FailsAt(42)).is_err());
        assert!(matches!(
            run_experiment_parallel(&experiment, 2, Arc::new(FailsAt(42))).await,
            Err(TrialError::InvalidConfiguration(_))
        ));
    }
}
