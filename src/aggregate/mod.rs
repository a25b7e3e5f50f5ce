//! Reductions of trial outcomes into summary statistics.
//!
//! Every reduction is a pure function of the multiset of outcomes: sums are taken over
//! integers and histograms are ordered maps, so permuting the outcomes never changes
//! the result.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::{TrialError, TrialOutcome};

// ------------------------------------------------------------------------------------------------
// Histogram
// ------------------------------------------------------------------------------------------------

/// Counts per observed value
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Histogram {
    bins: BTreeMap<u64, u64>,
}

impl Histogram {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, value: u64) {
        *self.bins.entry(value).or_insert(0) += 1;
    }

    pub fn count(&self, value: u64) -> u64 {
        self.bins.get(&value).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u64 {
        self.bins.values().sum()
    }

    /// `(value, count)` pairs in increasing value order
    pub fn bins(&self) -> impl Iterator<Item = (u64, u64)> + '_ {
        self.bins.iter().map(|(&v, &c)| (v, c))
    }

    /// `(value, fraction of all records)` pairs in increasing value order
    pub fn density(&self) -> Vec<(u64, f64)> {
        let total = self.total();
        if total == 0 {
            return Vec::new();
        }
        self.bins
            .iter()
            .map(|(&v, &c)| (v, c as f64 / total as f64))
            .collect()
    }
}

// ------------------------------------------------------------------------------------------------
// Step Statistics
// ------------------------------------------------------------------------------------------------

/// Summary of step-count outcomes, keeping censored trials apart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepStatistics {
    pub trials: u64,
    pub completed: u64,
    pub censored: u64,
    /// Mean over completed trials only
    pub mean: Option<f64>,
    /// Standard error of `mean`
    pub std_error: Option<f64>,
    /// Mean counting every censored trial at its bound. This is a lower bound of the true
    /// mean and keeps growing with the bound when the true mean is infinite.
    pub truncated_mean: Option<f64>,
    pub min: Option<u64>,
    pub max: Option<u64>,
    pub histogram: Histogram,
}

impl StepStatistics {
    pub fn from_outcomes(outcomes: &[TrialOutcome<u64>]) -> Self {
        let mut histogram = Histogram::new();
        let mut censored = 0u64;
        let mut censored_steps: u128 = 0;
        for outcome in outcomes {
            match *outcome {
                TrialOutcome::Completed(steps) => histogram.record(steps),
                TrialOutcome::Censored { steps } => {
                    censored += 1;
                    censored_steps += steps as u128;
                }
            }
        }

        let completed = histogram.total();
        let sum: u128 = histogram.bins().map(|(v, c)| v as u128 * c as u128).sum();
        let sum_squares: u128 = histogram.bins().map(|(v, c)| (v as u128) * (v as u128) * c as u128).sum();

        let mean = (completed > 0).then(|| sum as f64 / completed as f64);
        let std_error = mean.filter(|_| completed > 1).map(|m| {
            let n = completed as f64;
            let variance = ((sum_squares as f64) - n * m * m) / (n - 1.0);
            (variance.max(0.0) / n).sqrt()
        });
        let trials = outcomes.len() as u64;
        let truncated_mean = (trials > 0).then(|| (sum + censored_steps) as f64 / trials as f64);
        let min = histogram.bins().next().map(|(v, _)| v);
        let max = histogram.bins().last().map(|(v, _)| v);

        Self {
            trials,
            completed,
            censored,
            mean,
            std_error,
            truncated_mean,
            min,
            max,
            histogram,
        }
    }

    /// Fraction of trials that hit their step bound
    pub fn censored_fraction(&self) -> f64 {
        if self.trials == 0 {
            0.0
        } else {
            self.censored as f64 / self.trials as f64
        }
    }
}

// ------------------------------------------------------------------------------------------------
// Proportions
// ------------------------------------------------------------------------------------------------

/// Empirical probability of a boolean outcome
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProportionEstimate {
    pub trials: u64,
    pub successes: u64,
    pub probability: f64,
    /// Poisson error on the success count, `sqrt(successes) / trials`
    pub error: f64,
}

impl ProportionEstimate {
    pub fn from_outcomes(outcomes: &[bool]) -> Self {
        let successes = outcomes.iter().filter(|&&o| o).count() as u64;
        Self::from_counts(successes, outcomes.len() as u64)
    }

    pub fn from_counts(successes: u64, trials: u64) -> Self {
        let (probability, error) = if trials == 0 {
            (0.0, 0.0)
        } else {
            (successes as f64 / trials as f64, (successes as f64).sqrt() / trials as f64)
        };
        Self {
            trials,
            successes,
            probability,
            error,
        }
    }
}

/// Empirical distribution over a fixed number of categories
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoricalEstimate {
    pub trials: u64,
    pub counts: Vec<u64>,
    pub probabilities: Vec<f64>,
    pub errors: Vec<f64>,
}

impl CategoricalEstimate {
    pub fn from_outcomes(outcomes: &[usize], categories: usize) -> Result<Self, TrialError> {
        let mut counts = vec![0u64; categories];
        for &outcome in outcomes {
            let slot = counts.get_mut(outcome).ok_or_else(|| {
                TrialError::invalid(format!(
                    "Outcome {} outside {} categories",
                    outcome, categories
                ))
            })?;
            *slot += 1;
        }
        let trials = outcomes.len() as u64;
        let (probabilities, errors) = counts
            .iter()
            .map(|&c| {
                let estimate = ProportionEstimate::from_counts(c, trials);
                (estimate.probability, estimate.error)
            })
            .unzip();
        Ok(Self {
            trials,
            counts,
            probabilities,
            errors,
        })
    }
}

// ------------------------------------------------------------------------------------------------
// Mass Function
// ------------------------------------------------------------------------------------------------

/// Normalized probability mass function over an ordered support
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MassFunction {
    pub support: Vec<u64>,
    pub pmf: Vec<f64>,
    pub cmf: Vec<f64>,
}

impl MassFunction {
    /// Normalizes non-negative weights over `support`, which must be increasing
    pub fn from_weights(support: Vec<u64>, weights: &[f64]) -> Result<Self, TrialError> {
        if support.is_empty() || support.len() != weights.len() {
            return Err(TrialError::invalid(format!(
                "Mass function needs one weight per support point, got {} points and {} weights",
                support.len(),
                weights.len()
            )));
        }
        if support.windows(2).any(|w| w[0] >= w[1]) {
            return Err(TrialError::invalid("Mass function support must be increasing"));
        }
        if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(TrialError::invalid("Mass function weights must be non-negative"));
        }
        let total: f64 = weights.iter().sum();
        if total <= 0.0 {
            return Err(TrialError::invalid("Mass function weights are all zero"));
        }

        let pmf: Vec<f64> = weights.iter().map(|w| w / total).collect();
        let cmf = pmf
            .iter()
            .scan(0.0, |acc, p| {
                *acc += p;
                Some(*acc)
            })
            .collect();
        Ok(Self { support, pmf, cmf })
    }

    pub fn expectation(&self) -> f64 {
        self.support.iter().zip(&self.pmf).map(|(&n, p)| n as f64 * p).sum()
    }

    /// Support point whose cumulative mass is closest to one half
    pub fn median(&self) -> u64 {
        let mut best = 0;
        for (i, c) in self.cmf.iter().enumerate() {
            if (c - 0.5).abs() < (self.cmf[best] - 0.5).abs() {
                best = i;
            }
        }
        self.support[best]
    }
}

// ------------------------------------------------------------------------------------------------
// Aggregate Result
// ------------------------------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Summary {
    Steps(StepStatistics),
    Proportion(ProportionEstimate),
    Categorical(CategoricalEstimate),
}

/// A statistic of a set of trial outcomes next to its analytical reference
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateResult {
    pub summary: Summary,
    /// Reference value(s); one per category for categorical summaries
    pub reference: Vec<f64>,
}

impl AggregateResult {
    pub fn steps(outcomes: &[TrialOutcome<u64>], reference: Option<f64>) -> Self {
        Self {
            summary: Summary::Steps(StepStatistics::from_outcomes(outcomes)),
            reference: reference.into_iter().collect(),
        }
    }

    pub fn proportion(outcomes: &[bool], reference: f64) -> Self {
        Self {
            summary: Summary::Proportion(ProportionEstimate::from_outcomes(outcomes)),
            reference: vec![reference],
        }
    }

    pub fn categorical(outcomes: &[usize], reference: Vec<f64>) -> Result<Self, TrialError> {
        Ok(Self {
            summary: Summary::Categorical(CategoricalEstimate::from_outcomes(outcomes, reference.len())?),
            reference,
        })
    }

    /// `(estimate, error)` pairs, one per reference value
    pub fn estimates(&self) -> Vec<(f64, f64)> {
        match &self.summary {
            Summary::Steps(s) => s.mean.map(|m| (m, s.std_error.unwrap_or(0.0))).into_iter().collect(),
            Summary::Proportion(p) => vec![(p.probability, p.error)],
            Summary::Categorical(c) => c.probabilities.iter().copied().zip(c.errors.iter().copied()).collect(),
        }
    }

    /// Largest distance between an estimate and its reference, in units of the estimate's
    /// error. `None` without references or when an error is zero.
    pub fn deviation_in_errors(&self) -> Option<f64> {
        let estimates = self.estimates();
        if self.reference.is_empty() || estimates.len() != self.reference.len() {
            return None;
        }
        estimates
            .iter()
            .zip(&self.reference)
            .map(|(&(estimate, error), reference)| {
                (error > 0.0).then(|| (estimate - reference).abs() / error)
            })
            .try_fold(0.0f64, |acc, d| d.map(|d| acc.max(d)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_statistics_excludes_censored_from_mean() {
        let outcomes = vec![
            TrialOutcome::Completed(2),
            TrialOutcome::Completed(4),
            TrialOutcome::Censored { steps: 100 },
            TrialOutcome::Completed(6),
        ];
        let stats = StepStatistics::from_outcomes(&outcomes);
        assert_eq!(stats.trials, 4);
        assert_eq!(stats.completed, 3);
        assert_eq!(stats.censored, 1);
        assert_eq!(stats.mean, Some(4.0));
        assert_eq!(stats.truncated_mean, Some(28.0));
        assert_eq!(stats.min, Some(2));
        assert_eq!(stats.max, Some(6));
        // sample variance 4, three samples
        assert!((stats.std_error.unwrap() - (4.0f64 / 3.0).sqrt()).abs() < 1e-12);
        assert_eq!(stats.censored_fraction(), 0.25);
    }

    #[test]
    fn test_step_statistics_all_censored() {
        let stats = StepStatistics::from_outcomes(&[TrialOutcome::Censored { steps: 5 }]);
        assert_eq!(stats.mean, None);
        assert_eq!(stats.std_error, None);
        assert_eq!(stats.truncated_mean, Some(5.0));
        assert_eq!((stats.min, stats.max), (None, None));
        assert!(stats.histogram.density().is_empty());
    }

    #[test]
    fn test_reduction_ignores_order() {
        let mut outcomes: Vec<TrialOutcome<u64>> = (1..=50)
            .map(|i| if i % 7 == 0 { TrialOutcome::Censored { steps: 60 } } else { TrialOutcome::Completed(i) })
            .collect();
        let forward = AggregateResult::steps(&outcomes, Some(25.0));
        outcomes.reverse();
        outcomes.swap(3, 17);
        let shuffled = AggregateResult::steps(&outcomes, Some(25.0));
        assert_eq!(forward, shuffled);
        // Re-running the reduction yields the same result
        assert_eq!(shuffled, AggregateResult::steps(&outcomes, Some(25.0)));
    }

    #[test]
    fn test_proportion_estimate() {
        let estimate = ProportionEstimate::from_outcomes(&[true, false, true, true]);
        assert_eq!(estimate.successes, 3);
        assert_eq!(estimate.probability, 0.75);
        assert!((estimate.error - 3f64.sqrt() / 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_categorical_estimate() {
        let estimate = CategoricalEstimate::from_outcomes(&[0, 1, 0, 2, 0, 1], 3).unwrap();
        assert_eq!(estimate.counts, vec![3, 2, 1]);
        assert!((estimate.probabilities.iter().sum::<f64>() - 1.0).abs() < 1e-12);
        assert!(CategoricalEstimate::from_outcomes(&[3], 3).is_err());
    }

    #[test]
    fn test_mass_function() {
        let mass = MassFunction::from_weights(vec![10, 11, 12, 13], &[1.0, 2.0, 3.0, 4.0]).unwrap();
        assert!((mass.pmf[3] - 0.4).abs() < 1e-12);
        assert!((mass.cmf[3] - 1.0).abs() < 1e-12);
        assert!((mass.expectation() - 12.0).abs() < 1e-12);
        // cmf = 0.1, 0.3, 0.6, 1.0
        assert_eq!(mass.median(), 12);

        assert!(MassFunction::from_weights(vec![1, 2], &[1.0]).is_err());
        assert!(MassFunction::from_weights(vec![2, 1], &[1.0, 1.0]).is_err());
        assert!(MassFunction::from_weights(vec![1, 2], &[0.0, 0.0]).is_err());
    }

    #[test]
    fn test_deviation_in_errors() {
        let result = AggregateResult::proportion(&[true, false, true, false], 0.5);
        assert_eq!(result.deviation_in_errors(), Some(0.0));

        let none_right = AggregateResult::proportion(&[false, false], 0.5);
        assert_eq!(none_right.deviation_in_errors(), None);
    }
}
