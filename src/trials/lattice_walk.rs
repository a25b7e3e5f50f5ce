use serde::{Deserialize, Serialize};

use crate::randomness::RandomSource;
use crate::trial::{step_until, Trial};
use crate::types::constants::{DIAGONAL_INTERCEPT, ELLIPSE_CENTER, ELLIPSE_SEMI_AXES, SQUARE_BOX_HALF_SIDE};
use crate::types::{TrialError, TrialOutcome};

use super::validate_step_bound;

// ------------------------------------------------------------------------------------------------
// Boundaries
// ------------------------------------------------------------------------------------------------

/// Where the food is. The walk stops on the first lattice point that reaches the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Boundary {
    /// Walls of a square centred on the origin at `|x| = half_side` and `|y| = half_side`
    Square { half_side: i64 },
    /// The line `x + y = intercept`
    Diagonal { intercept: i64 },
    /// Everything outside the ellipse with the given centre and semi-axes
    Ellipse { center: (f64, f64), semi_axes: (f64, f64) },
}

impl Boundary {
    pub fn is_reached(&self, x: i64, y: i64) -> bool {
        match *self {
            Boundary::Square { half_side } => x.abs() >= half_side || y.abs() >= half_side,
            Boundary::Diagonal { intercept } => x + y == intercept,
            Boundary::Ellipse { center, semi_axes } => {
                let dx = (x as f64 - center.0) / semi_axes.0;
                let dy = (y as f64 - center.1) / semi_axes.1;
                dx * dx + dy * dy >= 1.0
            }
        }
    }

    /// False for boundaries the walk can wander away from indefinitely
    pub fn is_bounded(&self) -> bool {
        !matches!(self, Boundary::Diagonal { .. })
    }

    fn validate(&self) -> Result<(), TrialError> {
        match *self {
            Boundary::Square { half_side } if half_side < 1 => {
                return Err(TrialError::invalid(format!(
                    "Square half side must be positive, got {}",
                    half_side
                )));
            }
            Boundary::Ellipse { center, semi_axes } => {
                let values = [center.0, center.1, semi_axes.0, semi_axes.1];
                if values.iter().any(|v| !v.is_finite()) || semi_axes.0 <= 0.0 || semi_axes.1 <= 0.0 {
                    return Err(TrialError::invalid(format!(
                        "Ellipse needs a finite centre and positive semi-axes, got {:?} {:?}",
                        center, semi_axes
                    )));
                }
            }
            _ => {}
        }
        if self.is_reached(0, 0) {
            return Err(TrialError::invalid(format!(
                "The origin already lies on the boundary {:?}",
                self
            )));
        }
        Ok(())
    }
}

// ------------------------------------------------------------------------------------------------
// Lattice Walk
// ------------------------------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Position {
    x: i64,
    y: i64,
}

/// An ant walking the square lattice from the origin, one unit step per second in a
/// uniformly chosen cardinal direction, until it reaches the boundary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatticeWalk {
    boundary: Boundary,
    max_steps: Option<u64>,
}

impl LatticeWalk {
    /// Unbounded boundaries require a step bound.
    pub fn new(boundary: Boundary, max_steps: Option<u64>) -> Result<Self, TrialError> {
        boundary.validate()?;
        validate_step_bound(max_steps)?;
        if !boundary.is_bounded() && max_steps.is_none() {
            return Err(TrialError::invalid(format!(
                "Boundary {:?} can be escaped indefinitely and needs a step bound",
                boundary
            )));
        }
        Ok(Self { boundary, max_steps })
    }

    /// Food on the walls of a 40 cm box
    pub fn square_box() -> Result<Self, TrialError> {
        Self::new(Boundary::Square { half_side: SQUARE_BOX_HALF_SIDE }, None)
    }

    /// Food on the line through (10 cm, 0) and (0, 10 cm)
    pub fn diagonal_line(max_steps: u64) -> Result<Self, TrialError> {
        Self::new(Boundary::Diagonal { intercept: DIAGONAL_INTERCEPT }, Some(max_steps))
    }

    /// Food outside the elliptic barrier
    pub fn ellipse() -> Result<Self, TrialError> {
        Self::new(
            Boundary::Ellipse {
                center: ELLIPSE_CENTER,
                semi_axes: ELLIPSE_SEMI_AXES,
            },
            None,
        )
    }

    pub fn boundary(&self) -> Boundary {
        self.boundary
    }

    pub fn max_steps(&self) -> Option<u64> {
        self.max_steps
    }
}

impl Trial for LatticeWalk {
    type Outcome = TrialOutcome<u64>;

    fn name(&self) -> &'static str {
        "lattice_walk"
    }

    fn run_trial(&self, rng: &mut RandomSource) -> Result<TrialOutcome<u64>, TrialError> {
        let mut position = Position::default();
        step_until(self.max_steps, &mut position, |p| {
            match rng.uniform_index(4)? {
                0 => p.x += 1,
                1 => p.y += 1,
                2 => p.x -= 1,
                _ => p.y -= 1,
            }
            Ok(self.boundary.is_reached(p.x, p.y))
        })
    }
}
