use crate::randomness::RandomSource;
use crate::trial::Trial;
use crate::types::TrialError;

/// Dots dropped independently on the edges of a shape. The outcome is whether all
/// dots landed on the same edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DotPlacement {
    dots: usize,
    edges: usize,
}

impl DotPlacement {
    pub fn new(dots: usize, edges: usize) -> Result<Self, TrialError> {
        if dots == 0 {
            return Err(TrialError::invalid("Dot placement needs at least one dot"));
        }
        if edges == 0 {
            return Err(TrialError::invalid("Dot placement needs at least one edge"));
        }
        Ok(Self { dots, edges })
    }

    pub fn dots(&self) -> usize {
        self.dots
    }

    pub fn edges(&self) -> usize {
        self.edges
    }
}

impl Trial for DotPlacement {
    type Outcome = bool;

    fn name(&self) -> &'static str {
        "dot_placement"
    }

    fn run_trial(&self, rng: &mut RandomSource) -> Result<bool, TrialError> {
        let spots = (0..self.dots)
            .map(|_| rng.uniform_index(self.edges))
            .collect::<Result<Vec<usize>, _>>()?;
        Ok(spots.iter().all(|&edge| edge == spots[0]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_degenerate_shapes() {
        assert!(matches!(DotPlacement::new(3, 0), Err(TrialError::InvalidConfiguration(_))));
        assert!(matches!(DotPlacement::new(0, 4), Err(TrialError::InvalidConfiguration(_))));
    }

    #[test]
    fn test_single_edge_or_single_dot_always_matches() {
        let one_edge = DotPlacement::new(5, 1).unwrap();
        let one_dot = DotPlacement::new(1, 10).unwrap();
        for i in 0..100 {
            assert!(one_edge.run_trial(&mut RandomSource::for_trial(1, i)).unwrap());
            assert!(one_dot.run_trial(&mut RandomSource::for_trial(1, i)).unwrap());
        }
    }
}
