use std::env;
use std::fs;
use std::future::Future;
use std::path::Path;
use std::process::Command;
use std::sync::Arc;
use toymc::utils::logging;
use toymc::{run_experiment, run_experiment_parallel, Experiment, Trial};

use crate::error::SimulatorError;
use crate::simulation_results::results_dir;

const PLOT_SCRIPT: &str = "simulator/scripts/plot_results.py";

/// Sets up logging into `simulator/results/<scenario>/simulation.log` if ENABLE_LOGS is set
pub fn setup_logging(scenario: &str) {
    if env::var("ENABLE_LOGS").is_ok() {
        let dir = results_dir(scenario);
        if let Err(e) = fs::create_dir_all(&dir) {
            eprintln!("Error creating results directory {}: {}", dir, e);
        }

        // Start every run with a fresh log
        let log_path = format!("{}/simulation.log", dir);
        if let Err(e) = fs::remove_file(&log_path) {
            if e.kind() != std::io::ErrorKind::NotFound {
                eprintln!("Error deleting log file: {}", e);
            }
        }

        env::set_var("TOYMC_LOGGING", "true");
        env::set_var("TOYMC_LOG_TO_FILE", "true");
        env::set_var("TOYMC_LOG_FILE", log_path);
        logging::init_logging();
    }
}

/// Runs all trials of one configuration, fanning out over worker tasks when the
/// experiment has more than one worker
pub async fn run_trials<T>(experiment: &Experiment, seed: u64, trial: T) -> Result<Vec<T::Outcome>, SimulatorError>
where
    T: Trial + 'static,
{
    let outcomes = if experiment.workers > 1 {
        run_experiment_parallel(experiment, seed, Arc::new(trial)).await?
    } else {
        run_experiment(experiment, seed, &trial)?
    };
    Ok(outcomes)
}

/// Runs a scenario and, once it succeeded, plots its results file
pub async fn run_simulation_with_plotting<F, Fut>(simulation_fn: F, simulation_name: &str) -> Result<(), SimulatorError>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<std::path::PathBuf, SimulatorError>>,
{
    logging::log("SIMULATOR", &format!("=== Running {} ===", simulation_name));

    let results_path = simulation_fn().await?;

    logging::log("SIMULATOR", &format!("{} completed successfully", simulation_name));
    plot_results(simulation_name, &results_path);
    Ok(())
}

/// Invokes the plotting script on a results file. Plotting is optional, so failures are
/// only logged.
pub fn plot_results(simulation_name: &str, results_path: &Path) {
    logging::log("PLOT", &format!("Generating plots for {}...", simulation_name));
    let output = Command::new("python3").arg(PLOT_SCRIPT).arg(results_path).output();
    match output {
        Ok(output) if output.status.success() => {
            logging::log("PLOT", &format!("Plots for {} generated successfully!", simulation_name));
        }
        Ok(output) => {
            let err = String::from_utf8_lossy(&output.stderr);
            logging::log("PLOT", &format!("Plot generation failed for {}: {}", simulation_name, err));
        }
        Err(e) => {
            logging::log("PLOT", &format!("Failed to execute plotting script for {}: {}", simulation_name, e));
        }
    }
}

/// Formats an estimate and its reference for the console summary
pub fn describe(label: &str, estimate: f64, error: f64, reference: Option<f64>) -> String {
    match reference {
        Some(reference) => format!("{}: {:.4} +- {:.4} (analytical {:.4})", label, estimate, error, reference),
        None => format!("{}: {:.4} +- {:.4}", label, estimate, error),
    }
}
