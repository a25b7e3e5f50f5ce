use std::path::PathBuf;
use toymc::aggregate::{MassFunction, Summary};
use toymc::trials::TankCapture;
use toymc::{analytical, AggregateResult, Experiment};

use super::sweep_runner::SweepRunner;
use super::utils::{run_trials, setup_logging};
use crate::config::TankProblemConfig;
use crate::error::SimulatorError;
use crate::simulation_results::SimulationResults;

async fn capture_tanks(experiment: Experiment, seed: u64, serials: Vec<u64>, total_tanks: u64) -> Result<AggregateResult, SimulatorError> {
    let capture = TankCapture::new(&serials, total_tanks)?;
    let reference = analytical::tank_match_probability(capture.max_serial(), serials.len(), total_tanks);
    let outcomes = run_trials(&experiment, seed, capture).await?;
    Ok(AggregateResult::proportion(&outcomes, reference))
}

/// German tank problem: the posterior mass function of the number of produced tanks,
/// estimated from how often each hypothesis reproduces the captured serials
pub async fn run_tank_problem() -> Result<PathBuf, SimulatorError> {
    let scenario = TankProblemConfig::SCENARIO;
    setup_logging(scenario);
    let config = TankProblemConfig::load()?;
    let experiment = config.experiment.to_experiment();
    let seed = experiment.resolved_seed();
    let serials = config.tanks.serials.clone();
    let captured = serials.len();
    let max_serial = config.tanks.max_serial();

    let mut results = SimulationResults::new(scenario, &experiment, seed, &config.tanks)?.with_sweep_parameter("total_tanks");
    let hypotheses: Vec<u64> = (config.tanks.min_total_tanks()..=config.tanks.max_total_tanks).collect();
    let runner = SweepRunner::new("German Tank Problem", "total_tanks", hypotheses.clone());
    let points = runner
        .run(|total_tanks| capture_tanks(experiment, seed, serials.clone(), total_tanks))
        .await?;

    let mut weights = Vec::with_capacity(points.len());
    for (total_tanks, result) in points {
        if let Summary::Proportion(estimate) = &result.summary {
            weights.push(estimate.probability);
        }
        results.push_point(total_tanks, result)?;
    }

    let mass = MassFunction::from_weights(hypotheses.clone(), &weights)?;
    let stirling: Vec<f64> = hypotheses
        .iter()
        .map(|&n| analytical::tank_stirling_pmf(max_serial, captured, n))
        .collect();
    let residual: Vec<f64> = mass.pmf.iter().zip(&stirling).map(|(p, s)| p - s).collect();
    let bayesian = analytical::tank_bayesian_expectation(max_serial, captured);

    println!("Numerical expectation value: {:.2}", mass.expectation());
    if let Some(expectation) = bayesian {
        println!("Analytical Bayesian expectation value: {:.2}", expectation);
    }
    let stirling_expectation: f64 = hypotheses.iter().zip(&stirling).map(|(&n, p)| n as f64 * p).sum();
    println!("Stirling approximation expectation value: {:.2}", stirling_expectation);
    println!("Median: {}", mass.median());

    results.insert_derived("expectation", mass.expectation())?;
    results.insert_derived("median", mass.median())?;
    results.insert_derived("bayesian_expectation", bayesian)?;
    results.insert_derived("stirling_expectation", stirling_expectation)?;
    results.insert_derived("pmf", &mass.pmf)?;
    results.insert_derived("cmf", &mass.cmf)?;
    results.insert_derived("stirling_pmf", &stirling)?;
    results.insert_derived("residual", residual)?;
    results.save()
}
