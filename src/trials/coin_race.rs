use crate::randomness::RandomSource;
use crate::trial::{step_until, Trial};
use crate::types::{TrialError, TrialOutcome};

/// Players take turns tossing a fair coin; whoever tosses heads first wins.
///
/// The outcome is the 0-based index of the winner, player 0 tossing first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoinRace {
    players: usize,
}

impl CoinRace {
    pub fn new(players: usize) -> Result<Self, TrialError> {
        if players == 0 {
            return Err(TrialError::invalid("Coin race needs at least one player"));
        }
        Ok(Self { players })
    }

    pub fn players(&self) -> usize {
        self.players
    }
}

impl Trial for CoinRace {
    type Outcome = usize;

    fn name(&self) -> &'static str {
        "coin_race"
    }

    fn run_trial(&self, rng: &mut RandomSource) -> Result<usize, TrialError> {
        match step_until(None, &mut (), |_| Ok(rng.coin_flip()))? {
            TrialOutcome::Completed(tosses) => Ok(((tosses - 1) % self.players as u64) as usize),
            TrialOutcome::Censored { steps } => Err(TrialError::invalid(format!(
                "Unbounded coin race censored after {} tosses",
                steps
            ))),
        }
    }
}
