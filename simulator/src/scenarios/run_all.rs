use std::time::Instant;
use toymc::utils::logging;

use super::utils::run_simulation_with_plotting;
use crate::error::SimulatorError;

/// Runs every scenario in turn, plotting after each one
pub async fn run_all() -> Result<(), SimulatorError> {
    let start_time = Instant::now();

    logging::log("SIMULATOR", "=== Starting All Scenarios ===");

    run_simulation_with_plotting(super::airplane_boarding::run_airplane_boarding, "Airplane Boarding").await?;
    run_simulation_with_plotting(super::ants_on_cube::run_ants_on_cube, "Ants on a Cube").await?;
    run_simulation_with_plotting(super::coin_flip_game::run_coin_flip_game, "Coin Flip Game").await?;
    run_simulation_with_plotting(super::dots_on_edges::run_dots_on_edges, "Dots on Edges").await?;
    run_simulation_with_plotting(super::box_walk::run_box_walk, "Box Walk").await?;
    run_simulation_with_plotting(super::diagonal_walk::run_diagonal_walk, "Diagonal Walk").await?;
    run_simulation_with_plotting(super::ellipse_walk::run_ellipse_walk, "Ellipse Walk").await?;
    run_simulation_with_plotting(super::tank_problem::run_tank_problem, "German Tank Problem").await?;
    run_simulation_with_plotting(super::three_heads::run_three_heads, "Three Heads").await?;
    run_simulation_with_plotting(super::austen_markov::run_austen_markov, "Austen Markov Chain").await?;

    let total_time = start_time.elapsed();
    logging::log("SIMULATOR", "=== All Scenarios Completed Successfully ===");
    logging::log("SIMULATOR", &format!("Total execution time: {:.2?}", total_time));

    println!("All scenarios completed successfully!");
    println!("Total execution time: {:.2?}", total_time);

    Ok(())
}
