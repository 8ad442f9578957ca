//! Mutation operators
//!
//! This module provides point mutation for rocket genomes and the
//! per-candidate gate that decides whether mutation happens at all.

use std::sync::Arc;

use rand::Rng;
use rand_distr::{Distribution, Uniform};

use crate::engine::catalog::EngineCatalog;
use crate::genome::staged::{GeneKind, RocketGenome};

/// What a point mutation changed
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PointMutationRecord {
    /// Gene position that was replaced
    pub position: usize,
    /// Kind of gene at that position
    pub kind: GeneKind,
    /// Value before mutation
    pub old_value: u32,
    /// Value after mutation
    pub new_value: u32,
}

/// Point mutation
///
/// Replaces one uniformly chosen gene. Fuel positions get a random fuel size
/// and engine positions get a random registered engine id. The new value may
/// equal the old one.
#[derive(Clone, Debug)]
pub struct PointMutation {
    catalog: Arc<EngineCatalog>,
}

impl PointMutation {
    /// Create a point mutation drawing engines from `catalog`
    pub fn new(catalog: Arc<EngineCatalog>) -> Self {
        Self { catalog }
    }

    /// Replace one random gene in place
    pub fn mutate<R: Rng>(&self, genome: &mut RocketGenome, rng: &mut R) -> PointMutationRecord {
        let position = rng.gen_range(0..genome.len());
        let kind = GeneKind::at(position);
        let new_value = match kind {
            GeneKind::Engine => self.catalog.random_engine_id(rng),
            GeneKind::Fuel => EngineCatalog::random_fuel_size(rng),
        };
        let old_value = genome[position];
        genome.set_gene(position, new_value);

        PointMutationRecord {
            position,
            kind,
            old_value,
            new_value,
        }
    }
}

/// Chance of mutating a candidate, expressed as `threshold / ratio`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MutationGate {
    /// Denominator; draws are uniform in `[0, ratio)`
    pub ratio: u32,
    /// Draws below this value trigger a mutation
    pub threshold: u32,
}

impl MutationGate {
    /// Create a gate; `ratio` must be positive
    pub fn new(ratio: u32, threshold: u32) -> Self {
        Self { ratio, threshold }
    }

    /// Mutation probability as a fraction
    pub fn probability(&self) -> f64 {
        if self.ratio == 0 {
            return 0.0;
        }
        (self.threshold.min(self.ratio) as f64) / self.ratio as f64
    }

    /// Draw once and report whether this candidate mutates
    pub fn should_mutate<R: Rng>(&self, rng: &mut R) -> bool {
        if self.ratio == 0 {
            return false;
        }
        Uniform::new(0, self.ratio).sample(rng) < self.threshold
    }
}
