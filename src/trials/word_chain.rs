use std::sync::Arc;

use crate::randomness::RandomSource;
use crate::trial::Trial;
use crate::types::TrialError;

use super::transition_table::TransitionTable;

/// Generates a sequence of `words` state indices from a transition table, starting at
/// `start`. Reaching a state without outgoing transitions before the sequence is
/// complete is a randomness error.
#[derive(Debug, Clone)]
pub struct WordChain {
    table: Arc<TransitionTable>,
    start: usize,
    words: usize,
}

impl WordChain {
    pub fn new(table: Arc<TransitionTable>, start: usize, words: usize) -> Result<Self, TrialError> {
        if words == 0 {
            return Err(TrialError::invalid("A word chain needs at least one word"));
        }
        if start >= table.states() {
            return Err(TrialError::invalid(format!(
                "Start word {} is outside the {} known words",
                start,
                table.states()
            )));
        }
        Ok(Self { table, start, words })
    }

    pub fn words(&self) -> usize {
        self.words
    }
}

impl Trial for WordChain {
    type Outcome = Vec<usize>;

    fn name(&self) -> &'static str {
        "word_chain"
    }

    fn run_trial(&self, rng: &mut RandomSource) -> Result<Vec<usize>, TrialError> {
        let mut sequence = Vec::with_capacity(self.words);
        let mut current = self.start;
        sequence.push(current);
        while sequence.len() < self.words {
            current = self.table.next_state(current, rng)?;
            sequence.push(current);
        }
        Ok(sequence)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_follows_observed_transitions() {
        // 0 -> 1 -> 2 -> 0 deterministically
        let table = Arc::new(TransitionTable::from_sequence(&[0, 1, 2, 0], 3).unwrap());
        let chain = WordChain::new(table, 1, 7).unwrap();
        let sequence = chain.run_trial(&mut RandomSource::from_seed(0)).unwrap();
        assert_eq!(sequence, vec![1, 2, 0, 1, 2, 0, 1]);
    }

    #[test]
    fn test_dead_end_is_an_error() {
        let table = Arc::new(TransitionTable::from_sequence(&[0, 1], 2).unwrap());
        let chain = WordChain::new(table.clone(), 0, 3).unwrap();
        assert!(matches!(
            chain.run_trial(&mut RandomSource::from_seed(0)),
            Err(TrialError::Randomness(_))
        ));

        // A single word never needs a transition
        let chain = WordChain::new(table, 1, 1).unwrap();
        assert_eq!(chain.run_trial(&mut RandomSource::from_seed(0)).unwrap(), vec![1]);
    }

    #[test]
    fn test_rejects_invalid_configuration() {
        let table = Arc::new(TransitionTable::from_sequence(&[0, 1], 2).unwrap());
        assert!(WordChain::new(table.clone(), 0, 0).is_err());
        assert!(WordChain::new(table, 2, 5).is_err());
    }
}
