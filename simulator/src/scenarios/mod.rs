pub mod airplane_boarding;
pub mod ants_on_cube;
pub mod austen_markov;
pub mod box_walk;
pub mod coin_flip_game;
pub mod diagonal_walk;
pub mod dots_on_edges;
pub mod ellipse_walk;
pub mod tank_problem;
pub mod three_heads;
pub mod run_all;
pub mod sweep_runner;
pub mod utils;
