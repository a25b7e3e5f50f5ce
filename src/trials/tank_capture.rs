use std::collections::BTreeSet;

use crate::randomness::RandomSource;
use crate::trial::Trial;
use crate::types::TrialError;

/// German tank problem, one hypothesis for the number of tanks produced.
///
/// Serial numbers run `1..=total_tanks`. A trial captures as many distinct tanks as
/// there are observed serials and reports whether none of them exceeds the largest
/// observed serial. The match frequency over a sweep of `total_tanks` is proportional
/// to the likelihood of each hypothesis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TankCapture {
    serials: Vec<u64>,
    max_serial: u64,
    total_tanks: u64,
}

impl TankCapture {
    /// The tank carrying the largest observed serial must exist, so `total_tanks`
    /// has to be at least that serial.
    pub fn new(serials: &[u64], total_tanks: u64) -> Result<Self, TrialError> {
        let max_serial = *serials
            .iter()
            .max()
            .ok_or_else(|| TrialError::invalid("At least one captured serial is needed"))?;
        let distinct: BTreeSet<u64> = serials.iter().copied().collect();
        if distinct.len() != serials.len() {
            return Err(TrialError::invalid("Captured serials must be distinct"));
        }
        if distinct.contains(&0) {
            return Err(TrialError::invalid("Serial numbers start at 1"));
        }
        if total_tanks < max_serial {
            return Err(TrialError::invalid(format!(
                "{} tanks cannot include serial {}",
                total_tanks, max_serial
            )));
        }
        if usize::try_from(total_tanks).is_err() {
            return Err(TrialError::invalid(format!("{} tanks is too many to sample", total_tanks)));
        }
        Ok(Self {
            serials: serials.to_vec(),
            max_serial,
            total_tanks,
        })
    }

    pub fn serials(&self) -> &[u64] {
        &self.serials
    }

    pub fn max_serial(&self) -> u64 {
        self.max_serial
    }

    pub fn total_tanks(&self) -> u64 {
        self.total_tanks
    }
}

impl Trial for TankCapture {
    type Outcome = bool;

    fn name(&self) -> &'static str {
        "tank_capture"
    }

    fn run_trial(&self, rng: &mut RandomSource) -> Result<bool, TrialError> {
        let captured = rng.sample_without_replacement(self.total_tanks as usize, self.serials.len())?;
        Ok(captured.iter().map(|&index| index as u64 + 1).all(|serial| serial <= self.max_serial))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_invalid_observations() {
        assert!(TankCapture::new(&[], 100).is_err());
        assert!(TankCapture::new(&[3, 3], 100).is_err());
        assert!(TankCapture::new(&[0, 19], 100).is_err());
        assert!(TankCapture::new(&[60, 19], 59).is_err());
        assert!(TankCapture::new(&[60, 19], 60).is_ok());
    }

    #[test]
    fn test_smallest_hypothesis_always_matches() {
        // With exactly max_serial tanks every capture is at most max_serial
        let capture = TankCapture::new(&[60, 19, 40, 42], 60).unwrap();
        for i in 0..100 {
            assert!(capture.run_trial(&mut RandomSource::for_trial(4, i)).unwrap());
        }
    }

    #[test]
    fn test_one_more_tank_can_miss() {
        // 61 tanks, 4 captures: the match probability is C(60, 4) / C(61, 4) = 57 / 61
        let capture = TankCapture::new(&[60, 19, 40, 42], 61).unwrap();
        let misses = (0..2_000)
            .filter(|&i| !capture.run_trial(&mut RandomSource::for_trial(8, i)).unwrap())
            .count();
        assert!(misses > 0);
        assert!((misses as f64 / 2_000.0 - 4.0 / 61.0).abs() < 0.02);
    }
}
