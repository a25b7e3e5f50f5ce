//! The simulation kinds.
//!
//! Every kind is a small discrete-time Markov chain: a validated configuration, a
//! trial-local state, and a transition that consumes one draw from the trial's
//! `RandomSource`.

pub mod airplane_boarding;
pub mod transition_table;
pub mod vertex_walk;
pub mod coin_race;
pub mod dot_placement;
pub mod lattice_walk;
pub mod tank_capture;
pub mod head_run;
pub mod word_chain;

pub use airplane_boarding::AirplaneBoarding;
pub use transition_table::TransitionTable;
pub use vertex_walk::VertexWalk;
pub use coin_race::CoinRace;
pub use dot_placement::DotPlacement;
pub use lattice_walk::{Boundary, LatticeWalk};
pub use tank_capture::TankCapture;
pub use head_run::HeadRun;
pub use word_chain::WordChain;

use crate::types::TrialError;

/// Rejects a zero step bound; `None` means unbounded
pub(crate) fn validate_step_bound(max_steps: Option<u64>) -> Result<(), TrialError> {
    match max_steps {
        Some(0) => Err(TrialError::invalid("Step bound must be positive")),
        _ => Ok(()),
    }
}
