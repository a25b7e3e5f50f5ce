use std::env;
use std::process;
use simulator::interface::{usage, SimulationType};
use simulator::simulation_registry::get_registry;

// ------------------------------------------------------------------------------------------------
// Main
// ------------------------------------------------------------------------------------------------

/// Runs the scenario named by the first command-line argument
#[tokio::main]
async fn main() {
    let Some(simulation_type) = env::args().nth(1).as_deref().and_then(SimulationType::from_input) else {
        eprint!("{}", usage());
        process::exit(2);
    };

    let registry = get_registry();
    let registry = registry.lock().await;
    let Some(config) = registry.get(&simulation_type) else {
        eprintln!("Unknown simulation: {}", simulation_type.as_str());
        process::exit(2);
    };

    println!("=== {} ===", config.name);
    if let Err(e) = (config.run_fn)().await {
        eprintln!("{} failed: {}", config.name, e);
        process::exit(1);
    }
    println!("{} completed successfully!", config.name);
    if let Some(dir) = registry.get_results_dir(&simulation_type) {
        println!("Results written to {}", dir.display());
    }
}
