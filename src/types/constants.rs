// Analytical reference values of the puzzles

/// Expected number of edges an ant walks between opposite vertices of a cube
pub const CUBE_OPPOSITE_VERTEX_STEPS: f64 = 10.0;

/// Expected exit time (steps) from a 40 cm box walked at 10 cm per step
pub const SQUARE_BOX_EXIT_STEPS: f64 = 4.5;

/// Expected exit time (steps) through the elliptic barrier
pub const ELLIPSE_EXIT_STEPS: f64 = 14.0;

/// Expected tosses of a fair coin until three heads in a row
pub const THREE_HEADS_TOSSES: f64 = 14.0;

/// Bayesian expectation of produced tanks for the serials in `TANK_EXAMPLE_SERIALS`,
/// rounded to the nearest tank
pub const TANK_EXAMPLE_EXPECTATION: f64 = 89.0;

/// Probability that the last passenger gets their own seat
pub const LAST_PASSENGER_PROBABILITY: f64 = 0.5;

// Default puzzle parameters

/// Half side of the 40 cm box in 10 cm steps
pub const SQUARE_BOX_HALF_SIDE: i64 = 2;

/// The food line x + y = 10 cm, in 10 cm steps
pub const DIAGONAL_INTERCEPT: i64 = 1;

/// Centre of the elliptic barrier ((2.5 cm, 2.5 cm) in 10 cm steps)
pub const ELLIPSE_CENTER: (f64, f64) = (0.25, 0.25);

/// Semi-axes of the elliptic barrier ((30 cm, 40 cm) in 10 cm steps)
pub const ELLIPSE_SEMI_AXES: (f64, f64) = (3.0, 4.0);

/// Captured serial numbers of the classic German tank example
pub const TANK_EXAMPLE_SERIALS: [u64; 4] = [60, 19, 40, 42];

/// Number of vertices of a cube
pub const CUBE_VERTICES: usize = 8;

/// Sentence length of the generated word chain
pub const DEFAULT_SENTENCE_WORDS: usize = 100;
