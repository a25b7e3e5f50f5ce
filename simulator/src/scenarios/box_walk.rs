use std::path::PathBuf;
use toymc::aggregate::Summary;
use toymc::trials::{Boundary, LatticeWalk};
use toymc::types::constants::{SQUARE_BOX_EXIT_STEPS, SQUARE_BOX_HALF_SIDE};
use toymc::AggregateResult;

use super::utils::{describe, run_trials, setup_logging};
use crate::config::BoxWalkConfig;
use crate::error::SimulatorError;
use crate::simulation_results::SimulationResults;

/// Seconds an ant needs to reach the walls of a square box from its centre
pub async fn run_box_walk() -> Result<PathBuf, SimulatorError> {
    let scenario = BoxWalkConfig::SCENARIO;
    setup_logging(scenario);
    let config = BoxWalkConfig::load()?;
    let experiment = config.experiment.to_experiment();
    let seed = experiment.resolved_seed();
    let boundary = Boundary::Square {
        half_side: config.walk.half_side,
    };
    let mut results = SimulationResults::new(scenario, &experiment, seed, &boundary)?;

    // The expectation is only known for the 40 cm box
    let reference = (config.walk.half_side == SQUARE_BOX_HALF_SIDE).then_some(SQUARE_BOX_EXIT_STEPS);
    let outcomes = run_trials(&experiment, seed, LatticeWalk::new(boundary, None)?).await?;
    let result = AggregateResult::steps(&outcomes, reference);
    if let Summary::Steps(stats) = &result.summary {
        if let Some(mean) = stats.mean {
            println!("{}", describe("Steps to the wall", mean, stats.std_error.unwrap_or(0.0), reference));
        }
    }

    results.push_point(serde_json::Value::Null, result)?;
    results.save()
}
