//! Run configuration
//!
//! This module provides the options that shape a single optimization run.

use serde::{Deserialize, Serialize};

use crate::error::{EvoResult, EvolutionError};
use crate::fitness::model::FitnessKind;
use crate::genome::staged::DEFAULT_STAGE_COUNT;
use crate::operators::mutation::MutationGate;

/// Configuration for one optimization run
///
/// `mutation_threshold / mutation_ratio` is the chance that a candidate
/// mutates in a given generation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Number of candidates in every generation
    pub population_size: usize,
    /// The run stops once the generation counter exceeds this
    pub max_generations: usize,
    /// Size of the breeding pool
    pub num_fittest: usize,
    /// Mutation probability denominator
    pub mutation_ratio: u32,
    /// Mutation probability numerator
    pub mutation_threshold: u32,
    /// Stages per rocket
    pub stage_count: usize,
    /// Fitness strategy
    pub fitness: FitnessKind,
    /// Random seed; None draws one from the operating system
    pub seed: Option<u64>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            population_size: 50,
            max_generations: 400,
            num_fittest: 50,
            mutation_ratio: 100,
            mutation_threshold: 5,
            stage_count: DEFAULT_STAGE_COUNT,
            fitness: FitnessKind::DeltaV,
            seed: None,
        }
    }
}

impl RunConfig {
    /// Create a configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the population size
    pub fn with_population_size(mut self, size: usize) -> Self {
        self.population_size = size;
        self
    }

    /// Set the generation limit
    pub fn with_max_generations(mut self, max: usize) -> Self {
        self.max_generations = max;
        self
    }

    /// Set the breeding pool size
    pub fn with_num_fittest(mut self, num_fittest: usize) -> Self {
        self.num_fittest = num_fittest;
        self
    }

    /// Set the breeding pool size as a percentage of the population
    ///
    /// The percentage is resolved against the population size set so far, so
    /// call this after [`RunConfig::with_population_size`].
    pub fn with_num_fittest_percent(mut self, percent: usize) -> Self {
        self.num_fittest = self.num_fittest_for_percent(percent);
        self
    }

    /// Set the mutation chance as `threshold / ratio`
    pub fn with_mutation(mut self, ratio: u32, threshold: u32) -> Self {
        self.mutation_ratio = ratio;
        self.mutation_threshold = threshold;
        self
    }

    /// Set the number of stages per rocket
    pub fn with_stage_count(mut self, stage_count: usize) -> Self {
        self.stage_count = stage_count;
        self
    }

    /// Set the fitness strategy
    pub fn with_fitness(mut self, fitness: FitnessKind) -> Self {
        self.fitness = fitness;
        self
    }

    /// Set the random seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Breeding pool size for a percentage of the population
    ///
    /// Floored, at least 1, and capped at the whole population.
    pub fn num_fittest_for_percent(&self, percent: usize) -> usize {
        let scaled = self.population_size.saturating_mul(percent.min(100)) / 100;
        scaled.clamp(1, self.population_size.max(1))
    }

    /// Mutation gate for this configuration
    pub fn mutation_gate(&self) -> MutationGate {
        MutationGate::new(self.mutation_ratio, self.mutation_threshold)
    }

    /// Semi-unique identifier for a run
    pub fn label(&self) -> String {
        format!(
            "pop-{}_fit-{}_gen-{}_mut-{}-{}",
            self.population_size,
            self.num_fittest,
            self.max_generations,
            self.mutation_ratio,
            self.mutation_threshold
        )
    }

    /// Check every field against its domain
    pub fn validate(&self) -> EvoResult<()> {
        if self.population_size == 0 {
            return Err(EvolutionError::Configuration(
                "population_size must be greater than 0".to_string(),
            ));
        }
        if self.num_fittest == 0 || self.num_fittest > self.population_size {
            return Err(EvolutionError::Configuration(format!(
                "num_fittest must be in [1, {}], got {}",
                self.population_size, self.num_fittest
            )));
        }
        if self.mutation_ratio == 0 {
            return Err(EvolutionError::Configuration(
                "mutation_ratio must be greater than 0".to_string(),
            ));
        }
        if self.mutation_threshold > self.mutation_ratio {
            return Err(EvolutionError::Configuration(format!(
                "mutation_threshold must be in [0, {}], got {}",
                self.mutation_ratio, self.mutation_threshold
            )));
        }
        if self.stage_count == 0 {
            return Err(EvolutionError::Configuration(
                "stage_count must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Parse and validate a configuration from JSON
    ///
    /// Missing fields take their default values.
    pub fn from_json_str(json: &str) -> EvoResult<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| EvolutionError::Configuration(format!("malformed JSON: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json_string(&self) -> EvoResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| EvolutionError::Configuration(format!("serialization failed: {}", e)))
    }
}
