use std::collections::{BTreeMap, VecDeque};

use serde::{Deserialize, Serialize};

use crate::randomness::{RandomSource, PROBABILITY_TOLERANCE};
use crate::types::constants::CUBE_VERTICES;
use crate::types::TrialError;

/// Outgoing transitions of one state. Only non-zero probabilities are stored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
struct Row {
    targets: Vec<usize>,
    probabilities: Vec<f64>,
}

/// Row-normalized transition probabilities over a finite set of states.
///
/// Each row either sums to 1 or is entirely zero (a state with no observed outgoing
/// transition). Drawing the next state from an all-zero row is a randomness error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitionTable {
    rows: Vec<Row>,
}

impl TransitionTable {
    /// Builds a table from a dense square matrix, `matrix[from][to]`
    pub fn from_matrix(matrix: &[Vec<f64>]) -> Result<Self, TrialError> {
        if matrix.is_empty() {
            return Err(TrialError::invalid("Transition matrix has no states"));
        }
        let n = matrix.len();
        let mut rows = Vec::with_capacity(n);
        for (from, values) in matrix.iter().enumerate() {
            if values.len() != n {
                return Err(TrialError::invalid(format!(
                    "Transition matrix row {} has {} entries, expected {}",
                    from,
                    values.len(),
                    n
                )));
            }
            let mut row = Row::default();
            for (to, &p) in values.iter().enumerate() {
                if !p.is_finite() || p < 0.0 {
                    return Err(TrialError::invalid(format!(
                        "Transition probability [{}][{}] = {} is not a probability",
                        from, to, p
                    )));
                }
                if p > 0.0 {
                    row.targets.push(to);
                    row.probabilities.push(p);
                }
            }
            let sum: f64 = row.probabilities.iter().sum();
            if !row.targets.is_empty() && (sum - 1.0).abs() > PROBABILITY_TOLERANCE {
                return Err(TrialError::invalid(format!(
                    "Transition matrix row {} sums to {}",
                    from, sum
                )));
            }
            rows.push(row);
        }
        Ok(Self { rows })
    }

    /// Builds a table that moves uniformly to one of each state's neighbours
    pub fn from_adjacency(adjacency: &[Vec<bool>]) -> Result<Self, TrialError> {
        let matrix: Vec<Vec<f64>> = adjacency
            .iter()
            .map(|neighbours| {
                let degree = neighbours.iter().filter(|&&adjacent| adjacent).count();
                neighbours
                    .iter()
                    .map(|&adjacent| if adjacent { 1.0 / degree as f64 } else { 0.0 })
                    .collect()
            })
            .collect();
        Self::from_matrix(&matrix)
    }

    /// Builds the empirical table of an observed state sequence.
    ///
    /// Counts every consecutive pair and normalizes each row by its total. States
    /// that never have a successor in the sequence keep an all-zero row.
    pub fn from_sequence(sequence: &[usize], states: usize) -> Result<Self, TrialError> {
        if states == 0 {
            return Err(TrialError::invalid("Transition table needs at least one state"));
        }
        if let Some(&state) = sequence.iter().find(|&&s| s >= states) {
            return Err(TrialError::invalid(format!(
                "State {} is outside 0..{}",
                state, states
            )));
        }

        let mut counts: Vec<BTreeMap<usize, u64>> = vec![BTreeMap::new(); states];
        for pair in sequence.windows(2) {
            *counts[pair[0]].entry(pair[1]).or_insert(0) += 1;
        }

        let rows = counts
            .into_iter()
            .map(|successors| {
                let total: u64 = successors.values().sum();
                let mut row = Row::default();
                for (target, count) in successors {
                    row.targets.push(target);
                    row.probabilities.push(count as f64 / total as f64);
                }
                row
            })
            .collect();
        Ok(Self { rows })
    }

    /// The cube graph: vertex `v` is adjacent to the vertices differing from it in one bit,
    /// so vertex 0 and vertex 7 are opposite corners.
    pub fn cube() -> Self {
        let rows = (0..CUBE_VERTICES)
            .map(|vertex| {
                let mut targets: Vec<usize> = (0..3).map(|bit| vertex ^ (1 << bit)).collect();
                targets.sort_unstable();
                Row {
                    probabilities: vec![1.0 / 3.0; targets.len()],
                    targets,
                }
            })
            .collect();
        Self { rows }
    }

    pub fn states(&self) -> usize {
        self.rows.len()
    }

    /// Probability of moving from `from` to `to` in one step
    pub fn probability(&self, from: usize, to: usize) -> f64 {
        self.rows
            .get(from)
            .and_then(|row| {
                row.targets
                    .iter()
                    .position(|&t| t == to)
                    .map(|i| row.probabilities[i])
            })
            .unwrap_or(0.0)
    }

    /// States reachable from `state` in one step
    pub fn successors(&self, state: usize) -> &[usize] {
        self.rows.get(state).map(|row| row.targets.as_slice()).unwrap_or(&[])
    }

    /// True when the state has no outgoing transition
    pub fn is_dead_end(&self, state: usize) -> bool {
        self.successors(state).is_empty()
    }

    /// Draws the state following `state`
    pub fn next_state(&self, state: usize, rng: &mut RandomSource) -> Result<usize, TrialError> {
        let row = self.rows.get(state).ok_or_else(|| {
            TrialError::invalid(format!("State {} is outside 0..{}", state, self.rows.len()))
        })?;
        let choice = rng.weighted_index(&row.probabilities)?;
        Ok(row.targets[choice])
    }

    /// States reachable from `start` in one or more steps. Traversal does not continue
    /// past `stop`.
    pub(crate) fn reachable_from(&self, start: usize, stop: Option<usize>) -> Vec<bool> {
        let mut seen = vec![false; self.states()];
        let mut queue: VecDeque<usize> = VecDeque::new();
        queue.push_back(start);
        while let Some(state) = queue.pop_front() {
            for &next in self.successors(state) {
                if !seen[next] {
                    seen[next] = true;
                    if Some(next) != stop {
                        queue.push_back(next);
                    }
                }
            }
        }
        seen
    }

    /// States from which `target` can be reached in zero or more steps
    pub(crate) fn can_reach(&self, target: usize) -> Vec<bool> {
        let mut predecessors: Vec<Vec<usize>> = vec![Vec::new(); self.states()];
        for (from, row) in self.rows.iter().enumerate() {
            for &to in &row.targets {
                predecessors[to].push(from);
            }
        }
        let mut seen = vec![false; self.states()];
        seen[target] = true;
        let mut queue = VecDeque::from([target]);
        while let Some(state) = queue.pop_front() {
            for &previous in &predecessors[state] {
                if !seen[previous] {
                    seen[previous] = true;
                    queue.push_back(previous);
                }
            }
        }
        seen
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cube_is_three_regular() {
        let cube = TransitionTable::cube();
        assert_eq!(cube.states(), 8);
        for vertex in 0..8 {
            assert_eq!(cube.successors(vertex).len(), 3);
            for &next in cube.successors(vertex) {
                assert_eq!((vertex ^ next).count_ones(), 1);
                assert!((cube.probability(vertex, next) - 1.0 / 3.0).abs() < 1e-12);
            }
        }
        assert_eq!(cube.probability(0, 7), 0.0);
    }

    #[test]
    fn test_from_matrix_validation() {
        assert!(TransitionTable::from_matrix(&[]).is_err());
        assert!(TransitionTable::from_matrix(&[vec![0.5, 0.5], vec![1.0]]).is_err());
        assert!(TransitionTable::from_matrix(&[vec![0.5, 0.4], vec![1.0, 0.0]]).is_err());
        assert!(TransitionTable::from_matrix(&[vec![1.5, -0.5], vec![1.0, 0.0]]).is_err());

        let table = TransitionTable::from_matrix(&[vec![0.0, 1.0], vec![0.0, 0.0]]).unwrap();
        assert!(table.is_dead_end(1));
        assert_eq!(table.successors(0), &[1]);
    }

    #[test]
    fn test_from_sequence_row_normalized() {
        // a b a c a b
        let table = TransitionTable::from_sequence(&[0, 1, 0, 2, 0, 1], 4).unwrap();
        assert!((table.probability(0, 1) - 2.0 / 3.0).abs() < 1e-12);
        assert!((table.probability(0, 2) - 1.0 / 3.0).abs() < 1e-12);
        assert_eq!(table.probability(1, 0), 1.0);
        assert_eq!(table.probability(2, 0), 1.0);
        // state 3 never appears, state row stays empty
        assert!(table.is_dead_end(3));

        assert!(TransitionTable::from_sequence(&[0, 5], 3).is_err());
        assert!(TransitionTable::from_sequence(&[], 0).is_err());
    }

    #[test]
    fn test_next_state_from_dead_end_fails() {
        let table = TransitionTable::from_sequence(&[0, 1], 2).unwrap();
        let mut rng = RandomSource::from_seed(1);
        assert_eq!(table.next_state(0, &mut rng).unwrap(), 1);
        assert!(matches!(table.next_state(1, &mut rng), Err(TrialError::Randomness(_))));
    }

    #[test]
    fn test_reachability() {
        // 0 -> 1 -> 2 (absorbing dead end), 3 isolated
        let table = TransitionTable::from_matrix(&[
            vec![0.0, 1.0, 0.0, 0.0],
            vec![0.5, 0.0, 0.5, 0.0],
            vec![0.0, 0.0, 0.0, 0.0],
            vec![0.0, 0.0, 0.0, 1.0],
        ])
        .unwrap();
        assert_eq!(table.reachable_from(0, None), vec![true, true, true, false]);
        assert_eq!(table.reachable_from(0, Some(1)), vec![false, true, false, false]);
        assert_eq!(table.can_reach(2), vec![true, true, true, false]);
    }
}
