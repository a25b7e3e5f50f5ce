//! Randomness service used by every trial.
//!
//! A `RandomSource` wraps a seeded ChaCha8 generator. Experiments derive one source per
//! trial from the experiment seed and the trial index (`for_trial`), so a trial sees the
//! same stream whether it runs on the main thread or on any worker.

use rand::seq::{index, SliceRandom};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Uniform, WeightedIndex};
use thiserror::Error;

/// Allowed distance of a probability vector's sum from 1
pub const PROBABILITY_TOLERANCE: f64 = 1e-8;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum RandomnessError {
    #[error("Cannot choose from an empty range")]
    EmptyRange,
    #[error("Invalid distribution: {0}")]
    InvalidDistribution(String),
    #[error("Probabilities sum to {sum}, expected 1")]
    NotNormalized { sum: f64 },
    #[error("Cannot sample {amount} distinct items from {length}")]
    SampleTooLarge { amount: usize, length: usize },
}

// ------------------------------------------------------------------------------------------------
// Random Source
// ------------------------------------------------------------------------------------------------

/// Handle to one independent random stream
#[derive(Debug, Clone)]
pub struct RandomSource {
    rng: ChaCha8Rng,
}

impl RandomSource {
    /// Creates a source on stream 0 of `seed`
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Creates the source of trial `trial_index` of an experiment seeded with `seed`.
    ///
    /// Each trial index selects its own ChaCha stream, so trials never share draws.
    pub fn for_trial(seed: u64, trial_index: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        rng.set_stream(trial_index);
        Self { rng }
    }

    /// Creates a source seeded from the thread-local generator
    pub fn from_entropy() -> Self {
        Self::from_seed(draw_seed())
    }

    /// Uniform choice of an index in `0..n`
    pub fn uniform_index(&mut self, n: usize) -> Result<usize, RandomnessError> {
        if n == 0 {
            return Err(RandomnessError::EmptyRange);
        }
        Ok(Uniform::from(0..n).sample(&mut self.rng))
    }

    /// Fair coin toss, `true` is heads
    pub fn coin_flip(&mut self) -> bool {
        self.rng.gen_bool(0.5)
    }

    /// Categorical draw from a probability vector.
    ///
    /// The vector must be non-empty, finite, non-negative and sum to 1 within
    /// `PROBABILITY_TOLERANCE`.
    pub fn weighted_index(&mut self, probabilities: &[f64]) -> Result<usize, RandomnessError> {
        if probabilities.is_empty() {
            return Err(RandomnessError::NotNormalized { sum: 0.0 });
        }
        if let Some(p) = probabilities.iter().find(|p| !p.is_finite() || **p < 0.0) {
            return Err(RandomnessError::InvalidDistribution(format!(
                "probability {} is negative or not finite",
                p
            )));
        }
        let sum: f64 = probabilities.iter().sum();
        if (sum - 1.0).abs() > PROBABILITY_TOLERANCE {
            return Err(RandomnessError::NotNormalized { sum });
        }
        let distribution = WeightedIndex::new(probabilities)
            .map_err(|e| RandomnessError::InvalidDistribution(e.to_string()))?;
        Ok(distribution.sample(&mut self.rng))
    }

    /// Draws `amount` distinct indices from `0..length`
    pub fn sample_without_replacement(&mut self, length: usize, amount: usize) -> Result<Vec<usize>, RandomnessError> {
        if amount > length {
            return Err(RandomnessError::SampleTooLarge { amount, length });
        }
        Ok(index::sample(&mut self.rng, length, amount).into_vec())
    }

    /// Uniformly random ordering of `0..n`
    pub fn permutation(&mut self, n: usize) -> Vec<usize> {
        let mut order: Vec<usize> = (0..n).collect();
        order.shuffle(&mut self.rng);
        order
    }
}

/// Draws a fresh experiment seed
pub fn draw_seed() -> u64 {
    rand::thread_rng().gen()
}

// ------------------------------------------------------------------------------------------------
// Tests
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_stream() {
        let mut a = RandomSource::for_trial(7, 3);
        let mut b = RandomSource::for_trial(7, 3);
        let draws_a: Vec<usize> = (0..32).map(|_| a.uniform_index(1000).unwrap()).collect();
        let draws_b: Vec<usize> = (0..32).map(|_| b.uniform_index(1000).unwrap()).collect();
        assert_eq!(draws_a, draws_b);
    }

    #[test]
    fn test_trial_streams_differ() {
        let mut a = RandomSource::for_trial(7, 0);
        let mut b = RandomSource::for_trial(7, 1);
        let draws_a: Vec<usize> = (0..32).map(|_| a.uniform_index(1 << 20).unwrap()).collect();
        let draws_b: Vec<usize> = (0..32).map(|_| b.uniform_index(1 << 20).unwrap()).collect();
        assert_ne!(draws_a, draws_b);
    }

    #[test]
    fn test_uniform_index_empty_range() {
        let mut source = RandomSource::from_seed(1);
        assert_eq!(source.uniform_index(0), Err(RandomnessError::EmptyRange));
    }

    #[test]
    fn test_weighted_index_rejects_unnormalized() {
        let mut source = RandomSource::from_seed(1);
        assert!(matches!(
            source.weighted_index(&[0.5, 0.4]),
            Err(RandomnessError::NotNormalized { .. })
        ));
        assert!(matches!(
            source.weighted_index(&[0.0, 0.0]),
            Err(RandomnessError::NotNormalized { .. })
        ));
        assert!(matches!(
            source.weighted_index(&[1.5, -0.5]),
            Err(RandomnessError::InvalidDistribution(_))
        ));
        assert!(matches!(source.weighted_index(&[]), Err(RandomnessError::NotNormalized { .. })));
    }

    #[test]
    fn test_weighted_index_never_picks_zero_weight() {
        let mut source = RandomSource::from_seed(2);
        for _ in 0..1000 {
            let choice = source.weighted_index(&[0.0, 0.25, 0.0, 0.75]).unwrap();
            assert!(choice == 1 || choice == 3);
        }
    }

    #[test]
    fn test_sample_without_replacement_distinct() {
        let mut source = RandomSource::from_seed(3);
        let mut sample = source.sample_without_replacement(20, 20).unwrap();
        sample.sort_unstable();
        assert_eq!(sample, (0..20).collect::<Vec<_>>());

        assert_eq!(
            source.sample_without_replacement(3, 4),
            Err(RandomnessError::SampleTooLarge { amount: 4, length: 3 })
        );
    }

    #[test]
    fn test_permutation_contains_every_index() {
        let mut source = RandomSource::from_seed(4);
        let mut order = source.permutation(50);
        order.sort_unstable();
        assert_eq!(order, (0..50).collect::<Vec<_>>());
    }
}
