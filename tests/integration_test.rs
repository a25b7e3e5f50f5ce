mod common;

use std::sync::Arc;

use toymc::aggregate::{AggregateResult, StepStatistics};
use toymc::trials::{AirplaneBoarding, Boundary, CoinRace, DotPlacement, HeadRun, LatticeWalk, TankCapture, VertexWalk};
use toymc::{run_experiment, run_experiment_parallel, Experiment, TrialError, TrialOutcome};

use common::{run, step_statistics, TEST_SEED};

#[test]
fn test_fixed_seed_reproduces_run() {
    let trial = AirplaneBoarding::new(30).unwrap();
    assert_eq!(run(&trial, 500), run(&trial, 500));

    let walk = VertexWalk::cube_opposite_corner().unwrap();
    assert_eq!(run(&walk, 500), run(&walk, 500));
}

#[test]
fn test_degenerate_configurations_rejected() {
    for passengers in [0, 1] {
        assert!(matches!(
            AirplaneBoarding::new(passengers),
            Err(TrialError::InvalidConfiguration(_))
        ));
    }
    assert!(DotPlacement::new(3, 0).is_err());
    assert!(DotPlacement::new(0, 4).is_err());
    assert!(CoinRace::new(0).is_err());
    assert!(HeadRun::new(0, None).is_err());
    assert!(HeadRun::new(3, Some(0)).is_err());
    assert!(TankCapture::new(&[5, 9], 3).is_err());
    assert!(LatticeWalk::new(Boundary::Diagonal { intercept: 1 }, None).is_err());
    assert!(run_experiment(&Experiment::new(0), TEST_SEED, &CoinRace::new(2).unwrap()).is_err());
}

#[test]
fn test_small_bound_forces_censoring() {
    // Three heads in a row can never happen within two tosses
    let trial = HeadRun::new(3, Some(2)).unwrap();
    let outcomes = run(&trial, 100);
    assert!(outcomes.iter().all(|o| *o == TrialOutcome::Censored { steps: 2 }));

    let stats = StepStatistics::from_outcomes(&outcomes);
    assert_eq!(stats.censored, 100);
    assert_eq!(stats.mean, None);
    assert_eq!(stats.truncated_mean, Some(2.0));
}

#[test]
fn test_diagonal_truncated_mean_grows_with_bound() {
    // Trial i replays the same walk under every bound, so the truncated mean can only grow
    let mut previous = 0.0;
    for bound in [10, 100, 1_000, 10_000] {
        let walk = LatticeWalk::diagonal_line(bound).unwrap();
        let stats = StepStatistics::from_outcomes(&run(&walk, 400));
        let truncated = stats.truncated_mean.unwrap();
        assert!(truncated >= previous, "bound {}: {} < {}", bound, truncated, previous);
        assert!(stats.censored > 0);
        previous = truncated;
    }
}

#[test]
fn test_aggregation_is_idempotent() {
    let outcomes = run(&LatticeWalk::square_box().unwrap(), 1_000);
    let first = AggregateResult::steps(&outcomes, Some(4.5));
    let second = AggregateResult::steps(&outcomes, Some(4.5));
    assert_eq!(first, second);

    let json = serde_json::to_string(&first).unwrap();
    let parsed: AggregateResult = serde_json::from_str(&json).unwrap();
    assert_eq!(step_statistics(&parsed).histogram, step_statistics(&first).histogram);
}

#[tokio::test]
async fn test_parallel_and_sequential_aggregates_agree() {
    let experiment = Experiment::new(2_000).with_seed(TEST_SEED).with_workers(6);
    let walk = Arc::new(VertexWalk::cube_opposite_corner().unwrap());

    let sequential = run_experiment(&experiment, TEST_SEED, walk.as_ref()).unwrap();
    let parallel = run_experiment_parallel(&experiment, TEST_SEED, walk).await.unwrap();

    assert_eq!(
        AggregateResult::steps(&sequential, Some(10.0)),
        AggregateResult::steps(&parallel, Some(10.0))
    );
}
