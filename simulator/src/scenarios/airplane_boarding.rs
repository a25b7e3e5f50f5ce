use std::path::PathBuf;
use toymc::aggregate::Summary;
use toymc::trials::AirplaneBoarding;
use toymc::{analytical, AggregateResult, Experiment};

use super::sweep_runner::SweepRunner;
use super::utils::{describe, run_trials, setup_logging};
use crate::config::AirplaneBoardingConfig;
use crate::error::SimulatorError;
use crate::simulation_results::SimulationResults;

async fn board_planes(experiment: Experiment, seed: u64, passengers: usize) -> Result<AggregateResult, SimulatorError> {
    let outcomes = run_trials(&experiment, seed, AirplaneBoarding::new(passengers)?).await?;
    Ok(AggregateResult::proportion(&outcomes, analytical::last_passenger_probability()))
}

/// Probability that the last passenger to board finds their own seat, for a range of
/// plane sizes
pub async fn run_airplane_boarding() -> Result<PathBuf, SimulatorError> {
    let scenario = AirplaneBoardingConfig::SCENARIO;
    setup_logging(scenario);
    let config = AirplaneBoardingConfig::load()?;
    let experiment = config.experiment.to_experiment();
    let seed = experiment.resolved_seed();

    let mut results = SimulationResults::new(scenario, &experiment, seed, &config.sweep)?
        .with_sweep_parameter("passengers");
    let runner = SweepRunner::new("Airplane Boarding", "passengers", config.sweep.passengers.clone());
    let points = runner
        .run(|passengers| board_planes(experiment, seed, passengers))
        .await?;

    for (passengers, result) in points {
        if let Summary::Proportion(estimate) = &result.summary {
            println!(
                "{}",
                describe(
                    &format!("{} passengers", passengers),
                    estimate.probability,
                    estimate.error,
                    result.reference.first().copied()
                )
            );
        }
        results.push_point(passengers, result)?;
    }
    results.save()
}
