use thiserror::Error;
use toymc::corpus::CorpusError;
use toymc::TrialError;

use crate::config::ConfigError;

/// Everything that can stop a simulator run
#[derive(Error, Debug)]
pub enum SimulatorError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Trial failed: {0}")]
    Trial(#[from] TrialError),
    #[error("Corpus failed: {0}")]
    Corpus(#[from] CorpusError),
    #[error("Failed to write results: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to serialize results: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("{context}: {source}")]
    SweepFailed {
        context: String,
        #[source]
        source: Box<SimulatorError>,
    },
    #[error("Unknown simulation: {0}")]
    UnknownSimulation(String),
}
