//! Staged rocket genome
//!
//! A rocket with `S` stages is encoded as `2 × S` integers. For stage `i`,
//! counted from the bottom (first-burning) stage, `genes[2i]` is the fuel tank
//! size and `genes[2i + 1]` is the engine id.

use std::ops::Index;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::engine::catalog::EngineCatalog;
use crate::error::{EngineId, GenomeError};

/// Number of stages in a randomly generated rocket unless configured otherwise
pub const DEFAULT_STAGE_COUNT: usize = 3;

/// Kind of value stored at a gene position
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GeneKind {
    /// Fuel tank size (even positions)
    Fuel,
    /// Engine id (odd positions)
    Engine,
}

impl GeneKind {
    /// Kind of the gene at `position`
    pub fn at(position: usize) -> Self {
        if position % 2 == 0 {
            Self::Fuel
        } else {
            Self::Engine
        }
    }
}

/// One decoded stage
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Stage {
    /// Fuel tank size
    pub fuel_size: u32,
    /// Engine id
    pub engine_id: EngineId,
}

/// Gene sequence of a multi-stage rocket
///
/// Serialized as a flat array of genes. Deserialization goes through
/// [`RocketGenome::new`], so empty and odd-length arrays are rejected.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<u32>", into = "Vec<u32>")]
pub struct RocketGenome {
    genes: Vec<u32>,
}

impl RocketGenome {
    /// Create a genome from raw genes
    ///
    /// The length must be a positive multiple of two.
    pub fn new(genes: Vec<u32>) -> Result<Self, GenomeError> {
        if genes.is_empty() || genes.len() % 2 != 0 {
            return Err(GenomeError::OddLength(genes.len()));
        }
        Ok(Self { genes })
    }

    /// All-zero genome with the given number of stages
    pub fn zeros(stage_count: usize) -> Self {
        Self {
            genes: vec![0; 2 * stage_count.max(1)],
        }
    }

    /// Random genome: each stage gets a random fuel size and engine
    pub fn random<R: Rng>(stage_count: usize, catalog: &EngineCatalog, rng: &mut R) -> Self {
        let mut genes = Vec::with_capacity(2 * stage_count);
        for _ in 0..stage_count.max(1) {
            genes.push(EngineCatalog::random_fuel_size(rng));
            genes.push(catalog.random_engine_id(rng));
        }
        Self { genes }
    }

    /// Build a genome from decoded stages, bottom stage first
    pub fn from_stages<I: IntoIterator<Item = Stage>>(stages: I) -> Result<Self, GenomeError> {
        let genes = stages
            .into_iter()
            .flat_map(|s| [s.fuel_size, s.engine_id])
            .collect();
        Self::new(genes)
    }

    /// Number of genes
    pub fn len(&self) -> usize {
        self.genes.len()
    }

    /// Always false for a constructed genome
    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    /// Number of stages
    pub fn stage_count(&self) -> usize {
        self.genes.len() / 2
    }

    /// Raw genes
    pub fn genes(&self) -> &[u32] {
        &self.genes
    }

    /// Take the raw genes out of this genome
    pub fn into_genes(self) -> Vec<u32> {
        self.genes
    }

    /// Stage `index`, counted from the bottom
    pub fn stage(&self, index: usize) -> Option<Stage> {
        let fuel_size = *self.genes.get(2 * index)?;
        let engine_id = *self.genes.get(2 * index + 1)?;
        Some(Stage {
            fuel_size,
            engine_id,
        })
    }

    /// Iterate over the stages, bottom stage first
    pub fn stages(&self) -> impl Iterator<Item = Stage> + '_ {
        self.genes.chunks_exact(2).map(|pair| Stage {
            fuel_size: pair[0],
            engine_id: pair[1],
        })
    }

    /// Overwrite one gene; callers must re-evaluate any cached fitness
    pub(crate) fn set_gene(&mut self, position: usize, value: u32) {
        self.genes[position] = value;
    }

    /// Number of positions at which two genomes differ
    pub fn hamming_distance(&self, other: &Self) -> usize {
        self.genes
            .iter()
            .zip(other.genes.iter())
            .filter(|(a, b)| a != b)
            .count()
            + self.genes.len().abs_diff(other.genes.len())
    }
}

impl TryFrom<Vec<u32>> for RocketGenome {
    type Error = GenomeError;

    fn try_from(genes: Vec<u32>) -> Result<Self, Self::Error> {
        Self::new(genes)
    }
}

impl From<RocketGenome> for Vec<u32> {
    fn from(genome: RocketGenome) -> Self {
        genome.genes
    }
}

impl Index<usize> for RocketGenome {
    type Output = u32;

    fn index(&self, index: usize) -> &Self::Output {
        &self.genes[index]
    }
}
