use std::path::PathBuf;
use toymc::aggregate::Summary;
use toymc::trials::DotPlacement;
use toymc::{analytical, AggregateResult, Experiment};

use super::sweep_runner::SweepRunner;
use super::utils::{describe, run_trials, setup_logging};
use crate::config::DotsOnEdgesConfig;
use crate::error::SimulatorError;
use crate::simulation_results::SimulationResults;

async fn place_dots(experiment: Experiment, seed: u64, dots: usize, edges: usize) -> Result<AggregateResult, SimulatorError> {
    let outcomes = run_trials(&experiment, seed, DotPlacement::new(dots, edges)?).await?;
    let reference = analytical::same_edge_probability(dots, edges);
    Ok(AggregateResult::proportion(&outcomes, reference))
}

/// Probability that every dot lands on the same edge, for shapes with more and more edges
pub async fn run_dots_on_edges() -> Result<PathBuf, SimulatorError> {
    let scenario = DotsOnEdgesConfig::SCENARIO;
    setup_logging(scenario);
    let config = DotsOnEdgesConfig::load()?;
    let experiment = config.experiment.to_experiment();
    let seed = experiment.resolved_seed();
    let dots = config.sweep.dots;

    let mut results = SimulationResults::new(scenario, &experiment, seed, &config.sweep)?.with_sweep_parameter("edges");
    let runner = SweepRunner::new("Dots on Edges", "edges", config.sweep.edges.clone());
    let points = runner.run(|edges| place_dots(experiment, seed, dots, edges)).await?;

    for (edges, result) in points {
        if let Summary::Proportion(estimate) = &result.summary {
            println!(
                "{}",
                describe(
                    &format!("{} edges", edges),
                    estimate.probability,
                    estimate.error,
                    result.reference.first().copied()
                )
            );
        }
        results.push_point(edges, result)?;
    }
    results.save()
}
