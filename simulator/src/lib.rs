pub mod config;
pub mod error;
pub mod interface;
pub mod scenarios;
pub mod simulation_registry;
pub mod simulation_results;

pub use config::ConfigError;
pub use error::SimulatorError;
pub use interface::SimulationType;
pub use simulation_results::SimulationResults;
