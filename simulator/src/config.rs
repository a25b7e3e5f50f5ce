//! Configuration loader and validator for the simulator.
//! Every scenario reads `simulator/src/scenarios/<scenario>/config.toml`.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use sysinfo::{CpuRefreshKind, RefreshKind, System};
use thiserror::Error;
use toymc::Experiment;

// ------------------------------------------------------------------------------------------------
// Error Types and Validation
// ------------------------------------------------------------------------------------------------

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileReadError(#[from] std::io::Error),
    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Shared validation: every scenario has an `[experiment]` table plus its own parameters
pub trait ValidateConfig {
    fn experiment(&self) -> &ExperimentConfig;
    fn validate_scenario_specific(&self) -> Result<(), ConfigError>;

    fn validate(&self) -> Result<(), ConfigError> {
        self.experiment().validate()?;
        self.validate_scenario_specific()?;
        Ok(())
    }
}

/// Path of a scenario's configuration file, relative to the workspace root
pub fn config_path(scenario: &str) -> String {
    format!("simulator/src/scenarios/{}/config.toml", scenario)
}

/// Reads, parses and validates a scenario configuration
pub fn load_config<C>(path: impl AsRef<Path>) -> Result<C, ConfigError>
where
    C: DeserializeOwned + ValidateConfig,
{
    let config_str = fs::read_to_string(path)?;
    parse_config(&config_str)
}

pub fn parse_config<C>(config_str: &str) -> Result<C, ConfigError>
where
    C: DeserializeOwned + ValidateConfig,
{
    let config: C = toml::from_str(config_str)?;
    config.validate()?;
    Ok(config)
}

fn invalid(message: impl Into<String>) -> ConfigError {
    ConfigError::ValidationError(message.into())
}

// ------------------------------------------------------------------------------------------------
// Experiment
// ------------------------------------------------------------------------------------------------

/// The `[experiment]` table
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ExperimentConfig {
    /// Trials per configuration (per sweep point for sweeps)
    pub trials: u64,
    /// Drawn at run time when absent
    #[serde(default)]
    pub seed: Option<u64>,
    /// Worker tasks for parallel fan-out, defaults to the number of logical CPUs
    #[serde(default)]
    pub workers: Option<usize>,
}

impl ExperimentConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.trials == 0 {
            return Err(invalid("Number of trials must be positive"));
        }
        if self.workers == Some(0) {
            return Err(invalid("Number of workers must be positive"));
        }
        Ok(())
    }

    pub fn to_experiment(&self) -> Experiment {
        let experiment = Experiment::new(self.trials).with_workers(self.workers.unwrap_or_else(available_workers));
        match self.seed {
            Some(seed) => experiment.with_seed(seed),
            None => experiment,
        }
    }
}

/// Number of logical CPUs, at least one
pub fn available_workers() -> usize {
    let system = System::new_with_specifics(RefreshKind::new().with_cpu(CpuRefreshKind::everything()));
    system.cpus().len().max(1)
}

// ------------------------------------------------------------------------------------------------
// Scenario Configuration Structs
// ------------------------------------------------------------------------------------------------

macro_rules! impl_load {
    ($config:ty) => {
        impl $config {
            pub fn load() -> Result<Self, ConfigError> {
                load_config(config_path(<$config>::SCENARIO))
            }
        }
    };
}

/// Airplane boarding, swept over the number of passengers
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AirplaneBoardingConfig {
    pub experiment: ExperimentConfig,
    pub sweep: PassengerSweep,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PassengerSweep {
    pub passengers: Vec<usize>,
}

impl AirplaneBoardingConfig {
    pub const SCENARIO: &'static str = "airplane_boarding";
}

impl ValidateConfig for AirplaneBoardingConfig {
    fn experiment(&self) -> &ExperimentConfig {
        &self.experiment
    }

    fn validate_scenario_specific(&self) -> Result<(), ConfigError> {
        if self.sweep.passengers.is_empty() {
            return Err(invalid("Passenger sweep must not be empty"));
        }
        if let Some(n) = self.sweep.passengers.iter().find(|&&n| n < 2) {
            return Err(invalid(format!("A plane needs at least 2 passengers, got {}", n)));
        }
        Ok(())
    }
}

impl_load!(AirplaneBoardingConfig);

/// Walk between two vertices of the cube
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AntsOnCubeConfig {
    pub experiment: ExperimentConfig,
    pub walk: CubeWalk,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CubeWalk {
    pub start_vertex: usize,
    pub end_vertex: usize,
    #[serde(default)]
    pub max_steps: Option<u64>,
}

impl AntsOnCubeConfig {
    pub const SCENARIO: &'static str = "ants_on_cube";
}

impl ValidateConfig for AntsOnCubeConfig {
    fn experiment(&self) -> &ExperimentConfig {
        &self.experiment
    }

    fn validate_scenario_specific(&self) -> Result<(), ConfigError> {
        let vertices = toymc::types::constants::CUBE_VERTICES;
        if self.walk.start_vertex >= vertices || self.walk.end_vertex >= vertices {
            return Err(invalid(format!("Cube vertices must lie in 0..{}", vertices)));
        }
        if self.walk.max_steps == Some(0) {
            return Err(invalid("Step bound must be positive"));
        }
        Ok(())
    }
}

impl_load!(AntsOnCubeConfig);

/// Players tossing a coin in turn
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CoinFlipGameConfig {
    pub experiment: ExperimentConfig,
    pub game: CoinGame,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CoinGame {
    pub players: usize,
}

impl CoinFlipGameConfig {
    pub const SCENARIO: &'static str = "coin_flip_game";
}

impl ValidateConfig for CoinFlipGameConfig {
    fn experiment(&self) -> &ExperimentConfig {
        &self.experiment
    }

    fn validate_scenario_specific(&self) -> Result<(), ConfigError> {
        if self.game.players == 0 {
            return Err(invalid("Number of players must be positive"));
        }
        Ok(())
    }
}

impl_load!(CoinFlipGameConfig);

/// Dots dropped on the edges of a shape, swept over the number of edges
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DotsOnEdgesConfig {
    pub experiment: ExperimentConfig,
    pub sweep: EdgeSweep,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct EdgeSweep {
    pub dots: usize,
    pub edges: Vec<usize>,
}

impl DotsOnEdgesConfig {
    pub const SCENARIO: &'static str = "dots_on_edges";
}

impl ValidateConfig for DotsOnEdgesConfig {
    fn experiment(&self) -> &ExperimentConfig {
        &self.experiment
    }

    fn validate_scenario_specific(&self) -> Result<(), ConfigError> {
        if self.sweep.dots == 0 {
            return Err(invalid("Number of dots must be positive"));
        }
        if self.sweep.edges.is_empty() || self.sweep.edges.contains(&0) {
            return Err(invalid("Edge sweep must be non-empty and every shape needs an edge"));
        }
        Ok(())
    }
}

impl_load!(DotsOnEdgesConfig);

/// Ant walking to the walls of a square box
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct BoxWalkConfig {
    pub experiment: ExperimentConfig,
    pub walk: SquareWalk,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SquareWalk {
    /// Distance from the centre to each wall, in steps
    pub half_side: i64,
}

impl BoxWalkConfig {
    pub const SCENARIO: &'static str = "box_walk";
}

impl ValidateConfig for BoxWalkConfig {
    fn experiment(&self) -> &ExperimentConfig {
        &self.experiment
    }

    fn validate_scenario_specific(&self) -> Result<(), ConfigError> {
        if self.walk.half_side < 1 {
            return Err(invalid("Box half side must be at least one step"));
        }
        Ok(())
    }
}

impl_load!(BoxWalkConfig);

/// Ant walking to a diagonal line, swept over the step bound
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DiagonalWalkConfig {
    pub experiment: ExperimentConfig,
    pub sweep: StepBoundSweep,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct StepBoundSweep {
    /// The line `x + y = intercept`, in steps
    pub intercept: i64,
    pub max_steps: Vec<u64>,
}

impl DiagonalWalkConfig {
    pub const SCENARIO: &'static str = "diagonal_walk";
}

impl ValidateConfig for DiagonalWalkConfig {
    fn experiment(&self) -> &ExperimentConfig {
        &self.experiment
    }

    fn validate_scenario_specific(&self) -> Result<(), ConfigError> {
        if self.sweep.intercept == 0 {
            return Err(invalid("The origin must not lie on the line"));
        }
        if self.sweep.max_steps.is_empty() || self.sweep.max_steps.contains(&0) {
            return Err(invalid("Step bound sweep must be non-empty and positive"));
        }
        Ok(())
    }
}

impl_load!(DiagonalWalkConfig);

/// Ant walking out of an elliptic barrier
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct EllipseWalkConfig {
    pub experiment: ExperimentConfig,
    pub walk: EllipticBarrier,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct EllipticBarrier {
    pub center: (f64, f64),
    pub semi_axes: (f64, f64),
}

impl EllipseWalkConfig {
    pub const SCENARIO: &'static str = "ellipse_walk";
}

impl ValidateConfig for EllipseWalkConfig {
    fn experiment(&self) -> &ExperimentConfig {
        &self.experiment
    }

    fn validate_scenario_specific(&self) -> Result<(), ConfigError> {
        let (a, b) = self.walk.semi_axes;
        if !(a > 0.0 && b > 0.0) {
            return Err(invalid("Ellipse semi-axes must be positive"));
        }
        Ok(())
    }
}

impl_load!(EllipseWalkConfig);

/// German tank problem, swept over the hypothesised number of tanks
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TankProblemConfig {
    pub experiment: ExperimentConfig,
    pub tanks: TankSweep,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TankSweep {
    pub serials: Vec<u64>,
    /// Largest hypothesis in the sweep; the sweep starts at the smallest possible count
    pub max_total_tanks: u64,
}

impl TankSweep {
    /// Largest observed serial. Serials are numbered from 1, so this is also the
    /// smallest number of tanks that includes every observed serial.
    pub fn max_serial(&self) -> u64 {
        self.serials.iter().max().copied().unwrap_or(0)
    }

    pub fn min_total_tanks(&self) -> u64 {
        self.max_serial()
    }
}

impl TankProblemConfig {
    pub const SCENARIO: &'static str = "tank_problem";
}

impl ValidateConfig for TankProblemConfig {
    fn experiment(&self) -> &ExperimentConfig {
        &self.experiment
    }

    fn validate_scenario_specific(&self) -> Result<(), ConfigError> {
        if self.tanks.serials.is_empty() {
            return Err(invalid("At least one captured serial is needed"));
        }
        if self.tanks.serials.contains(&0) {
            return Err(invalid("Serial numbers start at 1"));
        }
        if self.tanks.max_total_tanks < self.tanks.min_total_tanks() {
            return Err(invalid(format!(
                "Tank sweep must reach at least {} tanks",
                self.tanks.min_total_tanks()
            )));
        }
        Ok(())
    }
}

impl_load!(TankProblemConfig);

/// Tosses until a run of heads
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ThreeHeadsConfig {
    pub experiment: ExperimentConfig,
    pub run: HeadRunConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct HeadRunConfig {
    pub run_length: u32,
    #[serde(default)]
    pub max_steps: Option<u64>,
}

impl ThreeHeadsConfig {
    pub const SCENARIO: &'static str = "three_heads";
}

impl ValidateConfig for ThreeHeadsConfig {
    fn experiment(&self) -> &ExperimentConfig {
        &self.experiment
    }

    fn validate_scenario_specific(&self) -> Result<(), ConfigError> {
        if self.run.run_length == 0 {
            return Err(invalid("Run length must be positive"));
        }
        if self.run.max_steps == Some(0) {
            return Err(invalid("Step bound must be positive"));
        }
        Ok(())
    }
}

impl_load!(ThreeHeadsConfig);

/// Word chains generated from a corpus. `experiment.trials` is the number of sentences.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AustenMarkovConfig {
    pub experiment: ExperimentConfig,
    pub corpus: CorpusConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CorpusConfig {
    /// UTF-8 text file, relative to the workspace root
    pub path: String,
    pub start_word: String,
    pub words: usize,
}

impl AustenMarkovConfig {
    pub const SCENARIO: &'static str = "austen_markov";
}

impl ValidateConfig for AustenMarkovConfig {
    fn experiment(&self) -> &ExperimentConfig {
        &self.experiment
    }

    fn validate_scenario_specific(&self) -> Result<(), ConfigError> {
        if self.corpus.path.is_empty() {
            return Err(invalid("Corpus path must be set"));
        }
        if self.corpus.words == 0 {
            return Err(invalid("Sentence length must be positive"));
        }
        Ok(())
    }
}

impl_load!(AustenMarkovConfig);

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario_file(scenario: &str) -> String {
        format!("{}/src/scenarios/{}/config.toml", env!("CARGO_MANIFEST_DIR"), scenario)
    }

    #[test]
    fn test_bundled_configs_are_valid() {
        load_config::<AirplaneBoardingConfig>(scenario_file(AirplaneBoardingConfig::SCENARIO)).unwrap();
        load_config::<AntsOnCubeConfig>(scenario_file(AntsOnCubeConfig::SCENARIO)).unwrap();
        load_config::<CoinFlipGameConfig>(scenario_file(CoinFlipGameConfig::SCENARIO)).unwrap();
        load_config::<DotsOnEdgesConfig>(scenario_file(DotsOnEdgesConfig::SCENARIO)).unwrap();
        load_config::<BoxWalkConfig>(scenario_file(BoxWalkConfig::SCENARIO)).unwrap();
        load_config::<DiagonalWalkConfig>(scenario_file(DiagonalWalkConfig::SCENARIO)).unwrap();
        load_config::<EllipseWalkConfig>(scenario_file(EllipseWalkConfig::SCENARIO)).unwrap();
        load_config::<TankProblemConfig>(scenario_file(TankProblemConfig::SCENARIO)).unwrap();
        load_config::<ThreeHeadsConfig>(scenario_file(ThreeHeadsConfig::SCENARIO)).unwrap();
        load_config::<AustenMarkovConfig>(scenario_file(AustenMarkovConfig::SCENARIO)).unwrap();
    }

    #[test]
    fn test_experiment_defaults() {
        let config: CoinFlipGameConfig = parse_config("[experiment]\ntrials = 10\n\n[game]\nplayers = 3\n").unwrap();
        assert_eq!(config.experiment.seed, None);
        let experiment = config.experiment.to_experiment();
        assert_eq!(experiment.trials, 10);
        assert!(experiment.workers >= 1);
    }

    #[test]
    fn test_rejects_invalid_values() {
        let zero_trials = parse_config::<CoinFlipGameConfig>("[experiment]\ntrials = 0\n\n[game]\nplayers = 3\n");
        assert!(matches!(zero_trials, Err(ConfigError::ValidationError(_))));

        let one_passenger = parse_config::<AirplaneBoardingConfig>(
            "[experiment]\ntrials = 10\n\n[sweep]\npassengers = [1, 10]\n",
        );
        assert!(matches!(one_passenger, Err(ConfigError::ValidationError(_))));

        let no_edges =
            parse_config::<DotsOnEdgesConfig>("[experiment]\ntrials = 10\n\n[sweep]\ndots = 3\nedges = [0]\n");
        assert!(matches!(no_edges, Err(ConfigError::ValidationError(_))));

        let short_sweep = parse_config::<TankProblemConfig>(
            "[experiment]\ntrials = 10\n\n[tanks]\nserials = [60, 19]\nmax_total_tanks = 50\n",
        );
        assert!(matches!(short_sweep, Err(ConfigError::ValidationError(_))));

        let zero_serial = parse_config::<TankProblemConfig>(
            "[experiment]\ntrials = 10\n\n[tanks]\nserials = [0, 19]\nmax_total_tanks = 50\n",
        );
        assert!(matches!(zero_serial, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_tank_sweep_starts_at_largest_serial() {
        let config = parse_config::<TankProblemConfig>(
            "[experiment]\ntrials = 10\n\n[tanks]\nserials = [60, 19, 40, 42]\nmax_total_tanks = 60\n",
        )
        .unwrap();
        assert_eq!(config.tanks.max_serial(), 60);
        assert_eq!(config.tanks.min_total_tanks(), 60);
    }

    #[test]
    fn test_parse_error() {
        assert!(matches!(
            parse_config::<BoxWalkConfig>("[experiment]\ntrials = \"many\"\n"),
            Err(ConfigError::ParseError(_))
        ));
    }
}
