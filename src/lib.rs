pub mod types;
pub mod randomness;
pub mod trial;
pub mod trials;
pub mod corpus;
pub mod aggregate;
pub mod analytical;
pub mod experiment;
pub mod utils;

pub use types::{TrialError, TrialOutcome};
pub use randomness::{RandomSource, RandomnessError};
pub use trial::{step_until, Trial};
pub use aggregate::{AggregateResult, Summary};
pub use experiment::{run_experiment, run_experiment_parallel, Experiment};
