//! Diagnostics and statistics
//!
//! This module provides the per-generation fitness history of a run and the
//! report produced when a run terminates.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::EvoResult;
use crate::genome::staged::RocketGenome;
use crate::population::population::Population;

/// Serde encoding for fitness values that may be non-finite
///
/// JSON has no infinities, so a penalized fitness would otherwise be written
/// as `null` and fail to read back. Non-finite values are written as the
/// strings `"inf"`, `"-inf"` and `"nan"`; finite values stay plain numbers.
mod fitness_value {
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum FitnessRepr {
        Number(f64),
        Text(String),
    }

    pub fn serialize<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if value.is_nan() {
            serializer.serialize_str("nan")
        } else if value.is_infinite() {
            serializer.serialize_str(if *value > 0.0 { "inf" } else { "-inf" })
        } else {
            serializer.serialize_f64(*value)
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        match FitnessRepr::deserialize(deserializer)? {
            FitnessRepr::Number(value) => Ok(value),
            FitnessRepr::Text(text) => match text.as_str() {
                "inf" => Ok(f64::INFINITY),
                "-inf" => Ok(f64::NEG_INFINITY),
                "nan" => Ok(f64::NAN),
                other => Err(serde::de::Error::custom(format!(
                    "invalid fitness value: {other}"
                ))),
            },
        }
    }
}

/// Summary statistics for a single generation
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GenerationSummary {
    /// Generation number, starting at 1 for the first bred generation
    pub generation: usize,
    /// Mean fitness
    #[serde(with = "fitness_value")]
    pub average: f64,
    /// Fitness of the fittest candidate
    #[serde(with = "fitness_value")]
    pub max: f64,
    /// Fitness of the least fit candidate
    #[serde(with = "fitness_value")]
    pub min: f64,
}

impl GenerationSummary {
    /// Summarize a population sorted ascending by fitness
    pub fn from_population(population: &Population, generation: usize) -> EvoResult<Self> {
        Ok(Self {
            generation,
            average: population.average_fitness()?,
            max: population.max_fitness()?,
            min: population.min_fitness()?,
        })
    }

    /// The `(average, max, min)` triple
    pub fn as_triple(&self) -> (f64, f64, f64) {
        (self.average, self.max, self.min)
    }
}

/// Append-only record of generation summaries
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FitnessHistory {
    generations: Vec<GenerationSummary>,
}

impl FitnessHistory {
    /// Create an empty history
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a generation's summary
    pub fn record(&mut self, summary: GenerationSummary) {
        self.generations.push(summary);
    }

    pub(crate) fn clear(&mut self) {
        self.generations.clear();
    }

    /// Number of recorded generations
    pub fn len(&self) -> usize {
        self.generations.len()
    }

    /// Check if nothing has been recorded
    pub fn is_empty(&self) -> bool {
        self.generations.is_empty()
    }

    /// Get a generation's summary by position
    pub fn get(&self, index: usize) -> Option<&GenerationSummary> {
        self.generations.get(index)
    }

    /// The most recent summary
    pub fn last(&self) -> Option<&GenerationSummary> {
        self.generations.last()
    }

    /// Iterate over summaries in recording order
    pub fn iter(&self) -> impl Iterator<Item = &GenerationSummary> {
        self.generations.iter()
    }

    /// All summaries as `(average, max, min)` triples
    pub fn triples(&self) -> Vec<(f64, f64, f64)> {
        self.generations.iter().map(|g| g.as_triple()).collect()
    }

    /// Get the history of mean fitness values
    pub fn averages(&self) -> Vec<f64> {
        self.generations.iter().map(|g| g.average).collect()
    }

    /// Get the history of max fitness values
    pub fn maxima(&self) -> Vec<f64> {
        self.generations.iter().map(|g| g.max).collect()
    }

    /// Get the history of min fitness values
    pub fn minima(&self) -> Vec<f64> {
        self.generations.iter().map(|g| g.min).collect()
    }

    /// Highest max fitness seen in any generation
    pub fn best_fitness(&self) -> Option<f64> {
        self.generations
            .iter()
            .map(|g| g.max)
            .max_by(|a, b| a.total_cmp(b))
    }

    /// Generations recorded since the max fitness last improved
    pub fn generations_since_improvement(&self) -> usize {
        let mut best = f64::NEG_INFINITY;
        let mut since = 0;
        for summary in &self.generations {
            if summary.max > best {
                best = summary.max;
                since = 0;
            } else {
                since += 1;
            }
        }
        since
    }
}

impl<'a> IntoIterator for &'a FitnessHistory {
    type Item = &'a GenerationSummary;
    type IntoIter = std::slice::Iter<'a, GenerationSummary>;

    fn into_iter(self) -> Self::IntoIter {
        self.generations.iter()
    }
}

/// Outcome of a completed run
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RunReport {
    /// Genome of the fittest candidate in the final population
    pub best_genome: RocketGenome,
    /// Fitness of that candidate
    #[serde(with = "fitness_value")]
    pub best_fitness: f64,
    /// Number of generations completed
    pub generations: usize,
    /// Total fitness evaluations
    pub evaluations: usize,
    /// Generations since the best fitness last improved
    pub stalled_generations: usize,
    /// Average pairwise Hamming distance in the final population
    pub final_diversity: f64,
    /// Total runtime in milliseconds
    pub total_runtime_ms: f64,
    /// Reason for termination
    pub termination_reason: String,
}

impl RunReport {
    /// Set the total runtime
    pub fn with_runtime(mut self, duration: Duration) -> Self {
        self.total_runtime_ms = duration.as_secs_f64() * 1000.0;
        self
    }

    /// Get a summary of the run
    pub fn summary(&self) -> String {
        format!(
            "Run Summary:\n\
             - Generations: {}\n\
             - Evaluations: {}\n\
             - Best fitness: {:.6}\n\
             - Best genes: {:?}\n\
             - Stalled for: {} generations\n\
             - Final diversity: {:.3}\n\
             - Runtime: {:.2}ms\n\
             - Termination: {}",
            self.generations,
            self.evaluations,
            self.best_fitness,
            self.best_genome.genes(),
            self.stalled_generations,
            self.final_diversity,
            self.total_runtime_ms,
            self.termination_reason
        )
    }
}

pub mod prelude {
    pub use super::{FitnessHistory, GenerationSummary, RunReport};
}
