//! Crossover operators
//!
//! This module provides single-point crossover for rocket genomes.

use rand::Rng;

use crate::error::GenomeError;
use crate::genome::staged::RocketGenome;

/// Single-point crossover
///
/// Produces one child whose genes come from the first parent before the split
/// point and from the second parent from the split point onward. The split is
/// drawn from `[1, len - 1]` so each parent contributes at least one gene.
#[derive(Clone, Copy, Debug, Default)]
pub struct SinglePointCrossover;

impl SinglePointCrossover {
    /// Create a new single-point crossover
    pub fn new() -> Self {
        Self
    }

    /// Cross two parents at a random split point
    pub fn crossover<R: Rng>(
        &self,
        parent1: &RocketGenome,
        parent2: &RocketGenome,
        rng: &mut R,
    ) -> Result<RocketGenome, GenomeError> {
        check_dimensions(parent1, parent2)?;
        let len = parent1.len();
        if len < 2 {
            return Err(GenomeError::TooShortToSplit(len));
        }
        let split = rng.gen_range(1..len);
        self.crossover_at(parent1, parent2, split)
    }

    /// Cross two parents at a given split point
    pub fn crossover_at(
        &self,
        parent1: &RocketGenome,
        parent2: &RocketGenome,
        split: usize,
    ) -> Result<RocketGenome, GenomeError> {
        check_dimensions(parent1, parent2)?;
        let len = parent1.len();
        if split == 0 || split >= len {
            return Err(GenomeError::SplitOutOfRange { split, len });
        }

        let mut genes = Vec::with_capacity(len);
        genes.extend_from_slice(&parent1.genes()[..split]);
        genes.extend_from_slice(&parent2.genes()[split..]);
        RocketGenome::new(genes)
    }
}

fn check_dimensions(parent1: &RocketGenome, parent2: &RocketGenome) -> Result<(), GenomeError> {
    if parent1.len() != parent2.len() {
        return Err(GenomeError::DimensionMismatch {
            expected: parent1.len(),
            actual: parent2.len(),
        });
    }
    Ok(())
}
