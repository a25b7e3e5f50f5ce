//! Central registry of the simulator's scenarios.
//! Maps each simulation type to its display name and run function.

use std::collections::HashMap;
use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::error::SimulatorError;
use crate::interface::SimulationType;
use crate::scenarios::{
    airplane_boarding::run_airplane_boarding, ants_on_cube::run_ants_on_cube, austen_markov::run_austen_markov,
    box_walk::run_box_walk, coin_flip_game::run_coin_flip_game, diagonal_walk::run_diagonal_walk,
    dots_on_edges::run_dots_on_edges, ellipse_walk::run_ellipse_walk, run_all::run_all,
    tank_problem::run_tank_problem, three_heads::run_three_heads, utils::run_simulation_with_plotting,
};
use crate::simulation_results::results_dir;

type RunFuture = Pin<Box<dyn Future<Output = Result<(), SimulatorError>>>>;

/// Configuration for a simulation type
pub struct SimulationConfig {
    pub name: &'static str,
    pub run_fn: Box<dyn Fn() -> RunFuture + Send + Sync>,
    /// Where results land, `None` for the scenario that runs all others
    pub results_dir: Option<String>,
}

/// Registry that holds all simulation configurations
pub struct SimulationRegistry {
    simulations: HashMap<SimulationType, SimulationConfig>,
}

macro_rules! scenario {
    ($simulations:ident, $kind:expr, $name:expr, $run:path) => {
        $simulations.insert(
            $kind,
            SimulationConfig {
                name: $name,
                run_fn: Box::new(|| -> RunFuture { Box::pin(run_simulation_with_plotting($run, $name)) }),
                results_dir: Some(results_dir($kind.as_str())),
            },
        );
    };
}

impl SimulationRegistry {
    pub fn new() -> Self {
        let mut simulations = HashMap::new();

        scenario!(simulations, SimulationType::AirplaneBoarding, "Airplane Boarding", run_airplane_boarding);
        scenario!(simulations, SimulationType::AntsOnCube, "Ants on a Cube", run_ants_on_cube);
        scenario!(simulations, SimulationType::CoinFlipGame, "Coin Flip Game", run_coin_flip_game);
        scenario!(simulations, SimulationType::DotsOnEdges, "Dots on Edges", run_dots_on_edges);
        scenario!(simulations, SimulationType::BoxWalk, "Box Walk", run_box_walk);
        scenario!(simulations, SimulationType::DiagonalWalk, "Diagonal Walk", run_diagonal_walk);
        scenario!(simulations, SimulationType::EllipseWalk, "Ellipse Walk", run_ellipse_walk);
        scenario!(simulations, SimulationType::TankProblem, "German Tank Problem", run_tank_problem);
        scenario!(simulations, SimulationType::ThreeHeads, "Three Heads", run_three_heads);
        scenario!(simulations, SimulationType::AustenMarkov, "Austen Markov Chain", run_austen_markov);

        simulations.insert(
            SimulationType::All,
            SimulationConfig {
                name: "All Scenarios",
                run_fn: Box::new(|| -> RunFuture { Box::pin(run_all()) }),
                results_dir: None,
            },
        );

        Self { simulations }
    }

    pub fn get(&self, simulation_type: &SimulationType) -> Option<&SimulationConfig> {
        self.simulations.get(simulation_type)
    }

    pub fn get_results_dir(&self, simulation_type: &SimulationType) -> Option<PathBuf> {
        self.simulations
            .get(simulation_type)
            .and_then(|config| config.results_dir.as_ref().map(PathBuf::from))
    }
}

impl Default for SimulationRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// Global registry instance
lazy_static::lazy_static! {
    static ref REGISTRY: Arc<Mutex<SimulationRegistry>> = Arc::new(Mutex::new(SimulationRegistry::new()));
}

/// Get a reference to the global registry
pub fn get_registry() -> Arc<Mutex<SimulationRegistry>> {
    REGISTRY.clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_every_simulation_is_registered() {
        let registry = get_registry();
        let registry = registry.lock().await;
        for simulation in SimulationType::ALL {
            let config = registry.get(&simulation).unwrap();
            assert!(!config.name.is_empty());
        }
        assert_eq!(
            registry.get_results_dir(&SimulationType::BoxWalk),
            Some(PathBuf::from("simulator/results/box_walk"))
        );
        assert_eq!(registry.get_results_dir(&SimulationType::All), None);
    }
}
