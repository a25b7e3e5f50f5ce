use toymc::aggregate::{AggregateResult, StepStatistics, Summary};
use toymc::{run_experiment, Experiment, Trial};

/// Seed shared by the statistical tests
pub const TEST_SEED: u64 = 20_240_601;

/// Runs `trials` trials of `trial` sequentially from `TEST_SEED`
pub fn run<T: Trial>(trial: &T, trials: u64) -> Vec<T::Outcome> {
    let experiment = Experiment::new(trials).with_seed(TEST_SEED);
    run_experiment(&experiment, TEST_SEED, trial).expect("experiment failed")
}

pub fn step_statistics(result: &AggregateResult) -> &StepStatistics {
    match &result.summary {
        Summary::Steps(stats) => stats,
        other => panic!("expected step statistics, got {:?}", other),
    }
}

pub fn assert_close(actual: f64, expected: f64, tolerance: f64, what: &str) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "{}: got {}, expected {} +- {}",
        what,
        actual,
        expected,
        tolerance
    );
}
