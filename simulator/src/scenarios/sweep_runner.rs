use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::fmt::Debug;
use std::future::Future;
use toymc::utils::logging;
use toymc::AggregateResult;

use crate::error::SimulatorError;

/// Runs one configuration per parameter value, in order, and collects their aggregates
pub struct SweepRunner<T> {
    sweep_name: String,
    parameter_name: String,
    parameter_values: Vec<T>,
}

impl<T: Debug + Clone + Serialize> SweepRunner<T> {
    pub fn new(sweep_name: &str, parameter_name: &str, parameter_values: Vec<T>) -> Self {
        Self {
            sweep_name: sweep_name.to_string(),
            parameter_name: parameter_name.to_string(),
            parameter_values,
        }
    }

    /// Runs the complete sweep. `run_point` runs all trials of one parameter value.
    /// The first failing point stops the sweep.
    pub async fn run<F, Fut>(&self, mut run_point: F) -> Result<Vec<(T, AggregateResult)>, SimulatorError>
    where
        F: FnMut(T) -> Fut,
        Fut: Future<Output = Result<AggregateResult, SimulatorError>>,
    {
        let total = self.parameter_values.len();
        self.log_sweep_start();
        println!("Running Sweep: {}", self.sweep_name);
        let progress_bar = self.create_progress_bar(total);

        let mut all_results = Vec::with_capacity(total);
        for (index, value) in self.parameter_values.iter().enumerate() {
            logging::log(
                "SIMULATOR",
                &format!("Running simulation {}/{} with {}: {:?}", index + 1, total, self.parameter_name, value),
            );

            let result = run_point(value.clone()).await.map_err(|e| SimulatorError::SweepFailed {
                context: format!(
                    "Sweep '{}' failed during simulation {}/{} with {}: {:?}",
                    self.sweep_name,
                    index + 1,
                    total,
                    self.parameter_name,
                    value
                ),
                source: Box::new(e),
            })?;
            all_results.push((value.clone(), result));

            progress_bar.inc(1);
            progress_bar.set_message(self.format_progress_message(index, total, value));
        }
        progress_bar.finish();
        println!("Sweep simulation complete");

        logging::log("SIMULATOR", "=== Sweep Simulation Complete ===");
        logging::log("SIMULATOR", &format!("Total simulations completed: {}", all_results.len()));
        Ok(all_results)
    }

    fn create_progress_bar(&self, num_simulations: usize) -> ProgressBar {
        let progress_bar = ProgressBar::new(num_simulations as u64);
        let style = ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {msg}")
            .map(|style| style.progress_chars("+>-"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(style);
        progress_bar
    }

    fn log_sweep_start(&self) {
        logging::log("SIMULATOR", &format!("=== Sweep {} Simulation ===", self.sweep_name));
        logging::log("SIMULATOR", &format!("Number of simulations: {}", self.parameter_values.len()));
        logging::log("SIMULATOR", &format!("{} values: {:?}", self.parameter_name, self.parameter_values));
        logging::log("SIMULATOR", "================================");
    }

    fn format_progress_message(&self, index: usize, total: usize, value: &T) -> String {
        format!("Simulation {}/{} with {}: {:?}", index + 1, total, self.parameter_name, value)
    }
}
