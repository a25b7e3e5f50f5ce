use chrono::Local;
use serde::Serialize;
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use toymc::utils::logging;
use toymc::{AggregateResult, Experiment};

use crate::error::SimulatorError;

/// One configuration of a scenario and the aggregate of its trials
#[derive(Debug, Clone, Serialize)]
pub struct SweepPoint {
    /// The swept parameter's value, `null` for scenarios without a sweep
    pub value: Value,
    pub result: AggregateResult,
}

/// Everything a scenario run produced, written as `results.json`
#[derive(Debug, Serialize)]
pub struct SimulationResults {
    pub scenario: String,
    pub start_time: String,
    /// Resolved seed; rerunning with it reproduces every outcome
    pub seed: u64,
    pub trials: u64,
    pub workers: usize,
    /// The scenario's parameter table as configured
    pub parameters: Value,
    /// Name of the swept parameter, if any
    pub sweep_parameter: Option<String>,
    pub points: Vec<SweepPoint>,
    /// Scenario-specific quantities derived from the points
    pub derived: Map<String, Value>,
    pub elapsed_seconds: f64,
    #[serde(skip)]
    started: Instant,
}

impl SimulationResults {
    pub fn new(scenario: &str, experiment: &Experiment, seed: u64, parameters: &impl Serialize) -> Result<Self, SimulatorError> {
        let start_time = Local::now();
        logging::log("SIMULATOR", &format!("=== {} ===", scenario));
        logging::log("SIMULATOR", &format!("Start Time: {}", start_time.format("%Y-%m-%d %H:%M:%S")));
        logging::log("SIMULATOR", &format!("Trials: {}", experiment.trials));
        logging::log("SIMULATOR", &format!("Seed: {}", seed));
        logging::log("SIMULATOR", &format!("Workers: {}", experiment.workers));

        Ok(Self {
            scenario: scenario.to_string(),
            start_time: start_time.to_rfc3339(),
            seed,
            trials: experiment.trials,
            workers: experiment.workers,
            parameters: serde_json::to_value(parameters)?,
            sweep_parameter: None,
            points: Vec::new(),
            derived: Map::new(),
            elapsed_seconds: 0.0,
            started: Instant::now(),
        })
    }

    pub fn with_sweep_parameter(mut self, name: &str) -> Self {
        self.sweep_parameter = Some(name.to_string());
        self
    }

    pub fn push_point(&mut self, value: impl Serialize, result: AggregateResult) -> Result<(), SimulatorError> {
        self.points.push(SweepPoint {
            value: serde_json::to_value(value)?,
            result,
        });
        Ok(())
    }

    pub fn insert_derived(&mut self, key: &str, value: impl Serialize) -> Result<(), SimulatorError> {
        self.derived.insert(key.to_string(), serde_json::to_value(value)?);
        Ok(())
    }

    /// Saves to `simulator/results/<scenario>/data/results.json`
    pub fn save(&mut self) -> Result<PathBuf, SimulatorError> {
        let dir = PathBuf::from(results_dir(&self.scenario)).join("data");
        self.save_to_directory(&dir)
    }

    pub fn save_to_directory(&mut self, dir: &Path) -> Result<PathBuf, SimulatorError> {
        self.elapsed_seconds = self.started.elapsed().as_secs_f64();
        fs::create_dir_all(dir)?;
        let path = dir.join("results.json");
        fs::write(&path, serde_json::to_string_pretty(self)?)?;
        logging::log("SIMULATOR", &format!("Saved results to {}", path.display()));
        Ok(path)
    }
}

/// Results directory of a scenario, relative to the workspace root
pub fn results_dir(scenario: &str) -> String {
    format!("simulator/results/{}", scenario)
}
