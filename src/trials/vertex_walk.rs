use crate::randomness::RandomSource;
use crate::trial::{step_until, Trial};
use crate::types::{TrialError, TrialOutcome};

use super::transition_table::TransitionTable;
use super::validate_step_bound;

/// Random walk over the states of a transition table until the first arrival at `target`.
///
/// The outcome is the number of transitions taken. At least one transition is always
/// taken, so `start == target` measures the return time.
#[derive(Debug, Clone, PartialEq)]
pub struct VertexWalk {
    table: TransitionTable,
    start: usize,
    target: usize,
    max_steps: Option<u64>,
}

impl VertexWalk {
    /// Every state the walk can visit before arriving at `target` must still be able to
    /// reach `target`, otherwise the walk could be trapped forever.
    pub fn new(table: TransitionTable, start: usize, target: usize, max_steps: Option<u64>) -> Result<Self, TrialError> {
        let states = table.states();
        if start >= states || target >= states {
            return Err(TrialError::invalid(format!(
                "Start {} and target {} must lie in 0..{}",
                start, target, states
            )));
        }
        validate_step_bound(max_steps)?;

        let visited = table.reachable_from(start, Some(target));
        if !visited[target] {
            return Err(TrialError::invalid(format!(
                "Target {} is not reachable from start {}",
                target, start
            )));
        }
        let leads_to_target = table.can_reach(target);
        if let Some(trap) = (0..states).find(|&s| visited[s] && !leads_to_target[s]) {
            return Err(TrialError::invalid(format!(
                "State {} is reachable from {} but cannot reach target {}",
                trap, start, target
            )));
        }

        Ok(Self {
            table,
            start,
            target,
            max_steps,
        })
    }

    /// Ant on a cube walking from a vertex to the opposite vertex
    pub fn cube_opposite_corner() -> Result<Self, TrialError> {
        Self::new(TransitionTable::cube(), 0, 7, None)
    }

    pub fn table(&self) -> &TransitionTable {
        &self.table
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn target(&self) -> usize {
        self.target
    }
}

impl Trial for VertexWalk {
    type Outcome = TrialOutcome<u64>;

    fn name(&self) -> &'static str {
        "vertex_walk"
    }

    fn run_trial(&self, rng: &mut RandomSource) -> Result<TrialOutcome<u64>, TrialError> {
        let mut current = self.start;
        step_until(self.max_steps, &mut current, |vertex| {
            *vertex = self.table.next_state(*vertex, rng)?;
            Ok(*vertex == self.target)
        })
    }
}
