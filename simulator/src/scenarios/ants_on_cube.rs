use std::path::PathBuf;
use toymc::aggregate::Summary;
use toymc::trials::{TransitionTable, VertexWalk};
use toymc::types::constants::CUBE_OPPOSITE_VERTEX_STEPS;
use toymc::AggregateResult;

use super::utils::{describe, run_trials, setup_logging};
use crate::config::AntsOnCubeConfig;
use crate::error::SimulatorError;
use crate::simulation_results::SimulationResults;

/// Edges an ant walks along a cube between two vertices
pub async fn run_ants_on_cube() -> Result<PathBuf, SimulatorError> {
    let scenario = AntsOnCubeConfig::SCENARIO;
    setup_logging(scenario);
    let config = AntsOnCubeConfig::load()?;
    let experiment = config.experiment.to_experiment();
    let seed = experiment.resolved_seed();
    let mut results = SimulationResults::new(scenario, &experiment, seed, &config.walk)?;

    let walk = VertexWalk::new(
        TransitionTable::cube(),
        config.walk.start_vertex,
        config.walk.end_vertex,
        config.walk.max_steps,
    )?;
    // Only opposite corners have a known expectation
    let opposite = config.walk.start_vertex ^ config.walk.end_vertex == 7;
    let reference = opposite.then_some(CUBE_OPPOSITE_VERTEX_STEPS);

    let outcomes = run_trials(&experiment, seed, walk).await?;
    let result = AggregateResult::steps(&outcomes, reference);
    if let Summary::Steps(stats) = &result.summary {
        if let Some(mean) = stats.mean {
            println!("{}", describe("Edges walked", mean, stats.std_error.unwrap_or(0.0), reference));
        }
        if stats.censored > 0 {
            println!("Censored walks: {}", stats.censored);
        }
    }

    results.push_point(serde_json::Value::Null, result)?;
    results.save()
}
