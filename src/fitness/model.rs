//! Fitness model selection
//!
//! The run configuration names a fitness strategy; `FitnessModel` is the
//! resolved strategy that candidates evaluate against. It also applies the
//! penalty policy: invalid staging is scored as the worst possible fitness
//! instead of aborting the run, while unknown engines stay fatal.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::engine::catalog::EngineCatalog;
use crate::error::FitnessError;
use crate::fitness::delta_v::DeltaVFitness;
use crate::fitness::sum_of_genes::SumOfGenes;
use crate::fitness::traits::Fitness;
use crate::genome::staged::RocketGenome;

/// Fitness assigned to a rocket whose staging makes delta-v undefined
pub const INVALID_STAGING_PENALTY: f64 = f64::NEG_INFINITY;

/// Configurable choice of fitness strategy
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FitnessKind {
    /// Sum of all genes
    SumOfGenes,
    /// Summed stage delta-v
    #[default]
    DeltaV,
}

/// Resolved fitness strategy
#[derive(Clone, Debug)]
pub enum FitnessModel {
    /// Sum of all genes
    SumOfGenes(SumOfGenes),
    /// Summed stage delta-v
    DeltaV(DeltaVFitness),
}

impl FitnessModel {
    /// Resolve a configured strategy against a catalog
    pub fn from_kind(kind: FitnessKind, catalog: Arc<EngineCatalog>) -> Self {
        match kind {
            FitnessKind::SumOfGenes => Self::SumOfGenes(SumOfGenes::new()),
            FitnessKind::DeltaV => Self::DeltaV(DeltaVFitness::new(catalog)),
        }
    }

    /// The strategy this model was resolved from
    pub fn kind(&self) -> FitnessKind {
        match self {
            Self::SumOfGenes(_) => FitnessKind::SumOfGenes,
            Self::DeltaV(_) => FitnessKind::DeltaV,
        }
    }

    /// Score a genome, absorbing invalid staging into the penalty fitness
    pub fn score(&self, genome: &RocketGenome) -> Result<f64, FitnessError> {
        match self.evaluate(genome) {
            Err(FitnessError::InvalidStaging {
                stage,
                full_mass,
                dry_mass,
            }) => {
                tracing::trace!(
                    stage,
                    full_mass,
                    dry_mass,
                    genes = ?genome.genes(),
                    "Penalizing invalid staging"
                );
                Ok(INVALID_STAGING_PENALTY)
            }
            other => other,
        }
    }
}

impl Fitness for FitnessModel {
    fn evaluate(&self, genome: &RocketGenome) -> Result<f64, FitnessError> {
        match self {
            Self::SumOfGenes(f) => f.evaluate(genome),
            Self::DeltaV(f) => f.evaluate(genome),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Self::SumOfGenes(f) => f.name(),
            Self::DeltaV(f) => f.name(),
        }
    }
}
