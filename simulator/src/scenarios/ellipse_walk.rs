use std::path::PathBuf;
use toymc::aggregate::Summary;
use toymc::trials::{Boundary, LatticeWalk};
use toymc::types::constants::{ELLIPSE_CENTER, ELLIPSE_EXIT_STEPS, ELLIPSE_SEMI_AXES};
use toymc::AggregateResult;

use super::utils::{describe, run_trials, setup_logging};
use crate::config::EllipseWalkConfig;
use crate::error::SimulatorError;
use crate::simulation_results::SimulationResults;

/// Seconds an ant needs to leave an elliptic barrier
pub async fn run_ellipse_walk() -> Result<PathBuf, SimulatorError> {
    let scenario = EllipseWalkConfig::SCENARIO;
    setup_logging(scenario);
    let config = EllipseWalkConfig::load()?;
    let experiment = config.experiment.to_experiment();
    let seed = experiment.resolved_seed();
    let boundary = Boundary::Ellipse {
        center: config.walk.center,
        semi_axes: config.walk.semi_axes,
    };
    let mut results = SimulationResults::new(scenario, &experiment, seed, &boundary)?;

    let classic = config.walk.center == ELLIPSE_CENTER && config.walk.semi_axes == ELLIPSE_SEMI_AXES;
    let reference = classic.then_some(ELLIPSE_EXIT_STEPS);
    let outcomes = run_trials(&experiment, seed, LatticeWalk::new(boundary, None)?).await?;
    let result = AggregateResult::steps(&outcomes, reference);
    if let Summary::Steps(stats) = &result.summary {
        if let Some(mean) = stats.mean {
            println!("{}", describe("Steps through the barrier", mean, stats.std_error.unwrap_or(0.0), reference));
        }
    }

    results.push_point(serde_json::Value::Null, result)?;
    results.save()
}
