/// The scenarios the simulator can run, selected by name or number on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimulationType {
    AirplaneBoarding,
    AntsOnCube,
    CoinFlipGame,
    DotsOnEdges,
    BoxWalk,
    DiagonalWalk,
    EllipseWalk,
    TankProblem,
    ThreeHeads,
    AustenMarkov,
    All,
}

impl SimulationType {
    pub const ALL: [SimulationType; 11] = [
        SimulationType::AirplaneBoarding,
        SimulationType::AntsOnCube,
        SimulationType::CoinFlipGame,
        SimulationType::DotsOnEdges,
        SimulationType::BoxWalk,
        SimulationType::DiagonalWalk,
        SimulationType::EllipseWalk,
        SimulationType::TankProblem,
        SimulationType::ThreeHeads,
        SimulationType::AustenMarkov,
        SimulationType::All,
    ];

    pub fn from_input(input: &str) -> Option<Self> {
        match input.trim() {
            "1" | "airplane_boarding" => Some(SimulationType::AirplaneBoarding),
            "2" | "ants_on_cube" => Some(SimulationType::AntsOnCube),
            "3" | "coin_flip_game" => Some(SimulationType::CoinFlipGame),
            "4" | "dots_on_edges" => Some(SimulationType::DotsOnEdges),
            "5" | "box_walk" => Some(SimulationType::BoxWalk),
            "6" | "diagonal_walk" => Some(SimulationType::DiagonalWalk),
            "7" | "ellipse_walk" => Some(SimulationType::EllipseWalk),
            "8" | "tank_problem" => Some(SimulationType::TankProblem),
            "9" | "three_heads" => Some(SimulationType::ThreeHeads),
            "10" | "austen_markov" => Some(SimulationType::AustenMarkov),
            "11" | "all" => Some(SimulationType::All),
            _ => None,
        }
    }

    /// Command-line name, also the scenario's config and results directory name
    pub fn as_str(&self) -> &'static str {
        match self {
            SimulationType::AirplaneBoarding => "airplane_boarding",
            SimulationType::AntsOnCube => "ants_on_cube",
            SimulationType::CoinFlipGame => "coin_flip_game",
            SimulationType::DotsOnEdges => "dots_on_edges",
            SimulationType::BoxWalk => "box_walk",
            SimulationType::DiagonalWalk => "diagonal_walk",
            SimulationType::EllipseWalk => "ellipse_walk",
            SimulationType::TankProblem => "tank_problem",
            SimulationType::ThreeHeads => "three_heads",
            SimulationType::AustenMarkov => "austen_markov",
            SimulationType::All => "all",
        }
    }
}

pub fn usage() -> String {
    let mut text = String::from("Usage: simulator <scenario>\n\nAvailable scenarios:\n");
    for (i, simulation) in SimulationType::ALL.iter().enumerate() {
        text.push_str(&format!("  {:>2}. {}\n", i + 1, simulation.as_str()));
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_input_accepts_names_and_numbers() {
        for (i, simulation) in SimulationType::ALL.iter().enumerate() {
            assert_eq!(SimulationType::from_input(simulation.as_str()), Some(*simulation));
            assert_eq!(SimulationType::from_input(&(i + 1).to_string()), Some(*simulation));
        }
        assert_eq!(SimulationType::from_input(" box_walk\n"), Some(SimulationType::BoxWalk));
        assert_eq!(SimulationType::from_input("0"), None);
        assert_eq!(SimulationType::from_input("simple"), None);
    }
}
