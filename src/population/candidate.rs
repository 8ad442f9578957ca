//! Candidate rocket
//!
//! This module provides the Candidate type that wraps a rocket genome with
//! its cached fitness.

use std::cmp::Ordering;

use rand::Rng;
use serde::Serialize;

use crate::error::FitnessError;
use crate::fitness::model::FitnessModel;
use crate::genome::staged::RocketGenome;
use crate::operators::mutation::{PointMutation, PointMutationRecord};

/// A rocket in the population
///
/// The cached fitness is always derived from the current genes. Constructors
/// evaluate immediately; `mutate` clears the cache until `evaluate` is called
/// again. Candidates serialize for export but are never read back; rebuild
/// them from a genome with [`Candidate::new`] so the fitness is recomputed.
#[derive(Clone, Debug, Serialize)]
pub struct Candidate {
    genome: RocketGenome,
    /// None while the genes have changed since the last evaluation
    fitness: Option<f64>,
    /// Generation when this candidate was bred
    pub birth_generation: usize,
}

impl Candidate {
    /// Create a candidate and evaluate it
    pub fn new(genome: RocketGenome, model: &FitnessModel) -> Result<Self, FitnessError> {
        let fitness = model.score(&genome)?;
        Ok(Self {
            genome,
            fitness: Some(fitness),
            birth_generation: 0,
        })
    }

    /// Create an all-zero candidate and evaluate it
    pub fn zeroed(stage_count: usize, model: &FitnessModel) -> Result<Self, FitnessError> {
        Self::new(RocketGenome::zeros(stage_count), model)
    }

    /// Create a candidate with a known fitness
    pub fn with_fitness(genome: RocketGenome, fitness: f64) -> Self {
        Self {
            genome,
            fitness: Some(fitness),
            birth_generation: 0,
        }
    }

    /// Set the birth generation
    pub fn born_in(mut self, generation: usize) -> Self {
        self.birth_generation = generation;
        self
    }

    /// Recompute and cache fitness from the current genes
    pub fn evaluate(&mut self, model: &FitnessModel) -> Result<f64, FitnessError> {
        let fitness = model.score(&self.genome)?;
        self.fitness = Some(fitness);
        Ok(fitness)
    }

    /// Replace one random gene
    ///
    /// The cached fitness is cleared; call `evaluate` before the candidate is
    /// sorted or summarized.
    pub fn mutate<R: Rng>(&mut self, operator: &PointMutation, rng: &mut R) -> PointMutationRecord {
        let record = operator.mutate(&mut self.genome, rng);
        self.fitness = None;
        record
    }

    /// Check if the cached fitness matches the current genes
    pub fn is_evaluated(&self) -> bool {
        self.fitness.is_some()
    }

    /// Cached fitness, None if stale
    pub fn fitness(&self) -> Option<f64> {
        self.fitness
    }

    /// Get a reference to the genome
    pub fn genome(&self) -> &RocketGenome {
        &self.genome
    }

    /// Take the genome out of this candidate
    pub fn into_genome(self) -> RocketGenome {
        self.genome
    }
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.genome == other.genome && self.fitness == other.fitness
    }
}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self.fitness, other.fitness) {
            (Some(f1), Some(f2)) => f1.partial_cmp(&f2),
            (Some(_), None) => Some(Ordering::Greater),
            (None, Some(_)) => Some(Ordering::Less),
            (None, None) => Some(Ordering::Equal),
        }
    }
}
