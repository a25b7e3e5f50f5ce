use std::path::PathBuf;
use toymc::aggregate::Summary;
use toymc::trials::HeadRun;
use toymc::{analytical, AggregateResult};

use super::utils::{describe, run_trials, setup_logging};
use crate::config::ThreeHeadsConfig;
use crate::error::SimulatorError;
use crate::simulation_results::SimulationResults;

/// Tosses of a fair coin until a run of heads
pub async fn run_three_heads() -> Result<PathBuf, SimulatorError> {
    let scenario = ThreeHeadsConfig::SCENARIO;
    setup_logging(scenario);
    let config = ThreeHeadsConfig::load()?;
    let experiment = config.experiment.to_experiment();
    let seed = experiment.resolved_seed();
    let mut results = SimulationResults::new(scenario, &experiment, seed, &config.run)?;

    let reference = analytical::expected_tosses_for_run(config.run.run_length);
    let outcomes = run_trials(&experiment, seed, HeadRun::new(config.run.run_length, config.run.max_steps)?).await?;
    let result = AggregateResult::steps(&outcomes, Some(reference));
    if let Summary::Steps(stats) = &result.summary {
        if let Some(mean) = stats.mean {
            println!("{}", describe("Tosses", mean, stats.std_error.unwrap_or(0.0), Some(reference)));
        }
        if stats.censored > 0 {
            println!(
                "Censored runs: {} ({:.2}%)",
                stats.censored,
                100.0 * stats.censored_fraction()
            );
        }
    }

    results.push_point(serde_json::Value::Null, result)?;
    results.save()
}
