//! Closed-form reference values the simulated estimates are compared against.

use crate::types::constants::LAST_PASSENGER_PROBABILITY;

/// Probability that the last passenger to board sits in their ticketed seat.
/// Independent of the number of passengers.
pub fn last_passenger_probability() -> f64 {
    LAST_PASSENGER_PROBABILITY
}

/// Win probability of each player, in tossing order, when players toss a fair coin in
/// turn and the first heads wins
pub fn coin_race_win_probabilities(players: usize) -> Vec<f64> {
    if players == 0 {
        return Vec::new();
    }
    let norm = 1.0 - 0.5f64.powi(players as i32);
    (0..players).map(|i| 0.5f64.powi(i as i32 + 1) / norm).collect()
}

/// Probability that `dots` dots placed independently on `edges` edges all share one edge
pub fn same_edge_probability(dots: usize, edges: usize) -> f64 {
    if dots == 0 || edges == 0 {
        return 0.0;
    }
    (edges as f64).recip().powf((dots - 1) as f64)
}

/// Expected tosses of a fair coin until `run_length` heads in a row
pub fn expected_tosses_for_run(run_length: u32) -> f64 {
    2f64.powi(run_length as i32 + 1) - 2.0
}

/// Posterior mean of the number of tanks given `captured` serials with largest serial
/// `max_serial`, serials numbered from 1. The posterior has no finite mean for two or
/// fewer captures.
pub fn tank_bayesian_expectation(max_serial: u64, captured: usize) -> Option<f64> {
    if captured <= 2 {
        return None;
    }
    let k = captured as f64;
    Some((max_serial as f64 - 1.0) * (k - 1.0) / (k - 2.0))
}

/// Probability that `captured` distinct serials drawn from `1..=total_tanks` are all at most
/// `max_serial`, `C(max_serial, k) / C(total_tanks, k)`
pub fn tank_match_probability(max_serial: u64, captured: usize, total_tanks: u64) -> f64 {
    let k = captured as u64;
    if k > total_tanks || k > max_serial {
        return 0.0;
    }
    if max_serial >= total_tanks {
        return 1.0;
    }
    (0..k)
        .map(|i| (max_serial - i) as f64 / (total_tanks - i) as f64)
        .product()
}

/// Stirling approximation of the Bayesian posterior mass at `total_tanks`,
/// `(k-1) m^(k-1) N^-k`
pub fn tank_stirling_pmf(max_serial: u64, captured: usize, total_tanks: u64) -> f64 {
    if total_tanks == 0 || captured == 0 {
        return 0.0;
    }
    let k = captured as f64;
    let m = max_serial as f64;
    let n = total_tanks as f64;
    (k - 1.0) * m.powf(k - 1.0) * n.powf(-k)
}
