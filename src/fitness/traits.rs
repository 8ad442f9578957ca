//! Fitness traits
//!
//! This module defines the fitness evaluation trait used by every strategy.

use crate::error::FitnessError;
use crate::genome::staged::RocketGenome;

/// Fitness evaluation trait
///
/// Defines how to score a rocket genome. Higher is better. Implementations
/// must be pure functions of the genome so that evaluation can run on any
/// thread.
pub trait Fitness: Send + Sync {
    /// Evaluate fitness (higher = better)
    fn evaluate(&self, genome: &RocketGenome) -> Result<f64, FitnessError>;

    /// Short name used in logs
    fn name(&self) -> &'static str;
}
