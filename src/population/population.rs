//! Population type
//!
//! This module provides the Population container type. After
//! `sort_ascending_by_fitness` the least fit candidate is at index 0 and the
//! fittest is last; the selection and summary methods rely on that order.

use rand::Rng;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::engine::catalog::EngineCatalog;
use crate::error::{EvoResult, EvolutionError, FitnessError};
use crate::fitness::model::FitnessModel;
use crate::genome::staged::RocketGenome;
use crate::population::candidate::Candidate;

/// A population of candidate rockets
#[derive(Clone, Debug, Default)]
pub struct Population {
    candidates: Vec<Candidate>,
}

impl Population {
    /// Create an empty population
    pub fn new() -> Self {
        Self {
            candidates: Vec::new(),
        }
    }

    /// Create a population from a vector of candidates
    pub fn from_candidates(candidates: Vec<Candidate>) -> Self {
        Self { candidates }
    }

    /// Create a random population of evaluated candidates
    pub fn random<R: Rng>(
        size: usize,
        stage_count: usize,
        catalog: &EngineCatalog,
        model: &FitnessModel,
        rng: &mut R,
    ) -> Result<Self, FitnessError> {
        let genomes = (0..size)
            .map(|_| RocketGenome::random(stage_count, catalog, rng))
            .collect();
        Self::evaluate_genomes(genomes, model, 0)
    }

    /// Get the population size
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    /// Check if the population is empty
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Get a candidate by index
    pub fn get(&self, index: usize) -> Option<&Candidate> {
        self.candidates.get(index)
    }

    /// Get an iterator over the candidates
    pub fn iter(&self) -> impl Iterator<Item = &Candidate> {
        self.candidates.iter()
    }

    /// Get a mutable iterator over the candidates
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Candidate> {
        self.candidates.iter_mut()
    }

    /// Get the underlying slice of candidates
    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    /// Take the candidates out of this population
    pub fn into_candidates(self) -> Vec<Candidate> {
        self.candidates
    }

    /// Stable sort, least fit first
    ///
    /// Stale candidates sort below every evaluated one.
    pub fn sort_ascending_by_fitness(&mut self) {
        self.candidates.sort_by(|a, b| {
            let fa = a.fitness().unwrap_or(f64::NEG_INFINITY);
            let fb = b.fitness().unwrap_or(f64::NEG_INFINITY);
            fa.total_cmp(&fb)
        });
    }

    /// Check that adjacent fitness values never decrease
    pub fn is_sorted_ascending(&self) -> bool {
        self.candidates.windows(2).all(|pair| {
            let fa = pair[0].fitness().unwrap_or(f64::NEG_INFINITY);
            let fb = pair[1].fitness().unwrap_or(f64::NEG_INFINITY);
            fa <= fb
        })
    }

    /// The `n` fittest candidates of a sorted population
    ///
    /// Returns the whole population when `n` exceeds its size.
    pub fn fittest_slice(&self, n: usize) -> &[Candidate] {
        let start = self.candidates.len().saturating_sub(n);
        &self.candidates[start..]
    }

    /// The fittest candidate of a sorted population
    pub fn best(&self) -> Option<&Candidate> {
        self.candidates.last()
    }

    /// The least fit candidate of a sorted population
    pub fn worst(&self) -> Option<&Candidate> {
        self.candidates.first()
    }

    fn fitness_at(&self, index: usize) -> EvoResult<f64> {
        let candidate = self
            .candidates
            .get(index)
            .ok_or(EvolutionError::EmptyPopulation)?;
        candidate
            .fitness()
            .ok_or(EvolutionError::Unevaluated { index })
    }

    /// Mean fitness
    pub fn average_fitness(&self) -> EvoResult<f64> {
        if self.candidates.is_empty() {
            return Err(EvolutionError::EmptyPopulation);
        }
        let mut total = 0.0;
        for index in 0..self.candidates.len() {
            total += self.fitness_at(index)?;
        }
        Ok(total / self.candidates.len() as f64)
    }

    /// Fitness of the last candidate of a sorted population
    pub fn max_fitness(&self) -> EvoResult<f64> {
        let last = self
            .candidates
            .len()
            .checked_sub(1)
            .ok_or(EvolutionError::EmptyPopulation)?;
        self.fitness_at(last)
    }

    /// Fitness of the first candidate of a sorted population
    pub fn min_fitness(&self) -> EvoResult<f64> {
        self.fitness_at(0)
    }

    /// Re-evaluate every stale candidate
    pub fn evaluate(&mut self, model: &FitnessModel) -> Result<(), FitnessError> {
        for candidate in &mut self.candidates {
            if !candidate.is_evaluated() {
                candidate.evaluate(model)?;
            }
        }
        Ok(())
    }

    /// Average pairwise Hamming distance between genomes
    pub fn diversity(&self) -> f64 {
        if self.len() < 2 {
            return 0.0;
        }

        let mut total_distance = 0usize;
        let mut count = 0usize;

        for i in 0..self.len() {
            for j in (i + 1)..self.len() {
                total_distance += self.candidates[i]
                    .genome()
                    .hamming_distance(self.candidates[j].genome());
                count += 1;
            }
        }

        total_distance as f64 / count as f64
    }
}

/// Parallel evaluation support (requires `parallel` feature)
#[cfg(feature = "parallel")]
impl Population {
    /// Evaluate freshly bred genomes into a population (parallel)
    pub fn evaluate_genomes(
        genomes: Vec<RocketGenome>,
        model: &FitnessModel,
        generation: usize,
    ) -> Result<Self, FitnessError> {
        let candidates = genomes
            .into_par_iter()
            .map(|genome| Candidate::new(genome, model).map(|c| c.born_in(generation)))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { candidates })
    }
}

/// Sequential fallback for genome evaluation (when `parallel` feature is disabled)
#[cfg(not(feature = "parallel"))]
impl Population {
    /// Evaluate freshly bred genomes into a population (sequential fallback)
    pub fn evaluate_genomes(
        genomes: Vec<RocketGenome>,
        model: &FitnessModel,
        generation: usize,
    ) -> Result<Self, FitnessError> {
        let candidates = genomes
            .into_iter()
            .map(|genome| Candidate::new(genome, model).map(|c| c.born_in(generation)))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { candidates })
    }
}

impl std::ops::Index<usize> for Population {
    type Output = Candidate;

    fn index(&self, index: usize) -> &Self::Output {
        &self.candidates[index]
    }
}

impl IntoIterator for Population {
    type Item = Candidate;
    type IntoIter = std::vec::IntoIter<Candidate>;

    fn into_iter(self) -> Self::IntoIter {
        self.candidates.into_iter()
    }
}

impl FromIterator<Candidate> for Population {
    fn from_iter<I: IntoIterator<Item = Candidate>>(iter: I) -> Self {
        Self::from_candidates(iter.into_iter().collect())
    }
}
