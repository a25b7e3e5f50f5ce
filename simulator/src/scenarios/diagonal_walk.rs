use std::path::PathBuf;
use toymc::aggregate::Summary;
use toymc::trials::{Boundary, LatticeWalk};
use toymc::{AggregateResult, Experiment};

use super::sweep_runner::SweepRunner;
use super::utils::{run_trials, setup_logging};
use crate::config::DiagonalWalkConfig;
use crate::error::SimulatorError;
use crate::simulation_results::SimulationResults;

async fn walk_to_line(experiment: Experiment, seed: u64, intercept: i64, max_steps: u64) -> Result<AggregateResult, SimulatorError> {
    let walk = LatticeWalk::new(Boundary::Diagonal { intercept }, Some(max_steps))?;
    let outcomes = run_trials(&experiment, seed, walk).await?;
    Ok(AggregateResult::steps(&outcomes, None))
}

/// Seconds an ant needs to reach a straight line of food.
///
/// The exit time has no finite mean, so each sweep point caps the walk. Every point
/// replays the same trial streams, and the truncated mean grows with the cap instead of
/// settling.
pub async fn run_diagonal_walk() -> Result<PathBuf, SimulatorError> {
    let scenario = DiagonalWalkConfig::SCENARIO;
    setup_logging(scenario);
    let config = DiagonalWalkConfig::load()?;
    let experiment = config.experiment.to_experiment();
    let seed = experiment.resolved_seed();
    let intercept = config.sweep.intercept;

    let mut results = SimulationResults::new(scenario, &experiment, seed, &config.sweep)?.with_sweep_parameter("max_steps");
    let runner = SweepRunner::new("Diagonal Walk", "max_steps", config.sweep.max_steps.clone());
    let points = runner
        .run(|max_steps| walk_to_line(experiment, seed, intercept, max_steps))
        .await?;

    let mut truncated_means = Vec::with_capacity(points.len());
    for (max_steps, result) in points {
        if let Summary::Steps(stats) = &result.summary {
            println!(
                "Step bound {}: truncated mean {:.2}, censored {:.2}%",
                max_steps,
                stats.truncated_mean.unwrap_or(0.0),
                100.0 * stats.censored_fraction()
            );
            truncated_means.push(stats.truncated_mean);
        }
        results.push_point(max_steps, result)?;
    }
    results.insert_derived("truncated_means", truncated_means)?;
    results.save()
}
