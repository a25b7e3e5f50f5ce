use std::path::PathBuf;
use toymc::aggregate::Summary;
use toymc::trials::CoinRace;
use toymc::{analytical, AggregateResult};

use super::utils::{describe, run_trials, setup_logging};
use crate::config::CoinFlipGameConfig;
use crate::error::SimulatorError;
use crate::simulation_results::SimulationResults;

/// Win probability of each player when players toss a coin in turn until the first heads
pub async fn run_coin_flip_game() -> Result<PathBuf, SimulatorError> {
    let scenario = CoinFlipGameConfig::SCENARIO;
    setup_logging(scenario);
    let config = CoinFlipGameConfig::load()?;
    let experiment = config.experiment.to_experiment();
    let seed = experiment.resolved_seed();
    let mut results = SimulationResults::new(scenario, &experiment, seed, &config.game)?;

    let players = config.game.players;
    let outcomes = run_trials(&experiment, seed, CoinRace::new(players)?).await?;
    let result = AggregateResult::categorical(&outcomes, analytical::coin_race_win_probabilities(players))?;

    if let Summary::Categorical(estimate) = &result.summary {
        for (player, (p, e)) in estimate.probabilities.iter().zip(&estimate.errors).enumerate() {
            println!(
                "{}",
                describe(&format!("Player {}", player + 1), *p, *e, result.reference.get(player).copied())
            );
        }
    }
    results.push_point(serde_json::Value::Null, result)?;
    results.save()
}
