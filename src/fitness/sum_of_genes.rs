//! Sum-of-genes fitness
//!
//! Baseline strategy with no physical meaning, used to validate the search
//! loop: a rocket scores the plain sum of its genes.

use crate::error::FitnessError;
use crate::fitness::traits::Fitness;
use crate::genome::staged::RocketGenome;

/// Fitness equal to the sum of all genes
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SumOfGenes;

impl SumOfGenes {
    /// Create the strategy
    pub fn new() -> Self {
        Self
    }
}

impl Fitness for SumOfGenes {
    fn evaluate(&self, genome: &RocketGenome) -> Result<f64, FitnessError> {
        Ok(genome.genes().iter().map(|&g| g as f64).sum())
    }

    fn name(&self) -> &'static str {
        "sum-of-genes"
    }
}
