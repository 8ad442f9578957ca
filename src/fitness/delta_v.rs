//! Delta-v fitness
//!
//! Scores a rocket by the total velocity change its stages can impart,
//! summing the rocket equation over stages that burn bottom-up. Upper stages
//! are dead weight while a lower stage burns.
//!
//! For stage `k` of `S`:
//!
//! ```text
//! full_mass(k) = Σ_{j=k..S-1} (engine_mass(j) + fuel_size(j) * FULL_RATIO)
//! dry_mass(k)  = full_mass(k) - fuel_size(k) * (FULL_RATIO - DRY_RATIO)
//! delta_v(k)   = G * isp_vac(k) * ln(full_mass(k) / dry_mass(k))
//! ```

use std::sync::Arc;

use crate::engine::catalog::{EngineCatalog, EngineSpec};
use crate::error::FitnessError;
use crate::fitness::traits::Fitness;
use crate::genome::staged::RocketGenome;

/// Standard gravity in m/s²
pub const STANDARD_GRAVITY: f64 = 9.81;

/// Mass of a full tank per unit of fuel size
pub const FUEL_TANK_FULL_RATIO: f64 = 1.125;

/// Mass of an empty tank per unit of fuel size
pub const FUEL_TANK_DRY_RATIO: f64 = 0.125;

/// Masses of one stage during its burn
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StageMasses {
    /// Mass at ignition, including every stage above
    pub full_mass: f64,
    /// Mass at burnout, including every stage above
    pub dry_mass: f64,
}

/// Fitness equal to the summed delta-v of all stages
#[derive(Clone, Debug)]
pub struct DeltaVFitness {
    catalog: Arc<EngineCatalog>,
    gravity: f64,
    full_ratio: f64,
    dry_ratio: f64,
}

impl DeltaVFitness {
    /// Create a delta-v model with the standard tank and gravity constants
    pub fn new(catalog: Arc<EngineCatalog>) -> Self {
        Self {
            catalog,
            gravity: STANDARD_GRAVITY,
            full_ratio: FUEL_TANK_FULL_RATIO,
            dry_ratio: FUEL_TANK_DRY_RATIO,
        }
    }

    /// Override the tank mass ratios
    pub fn with_tank_ratios(mut self, full_ratio: f64, dry_ratio: f64) -> Self {
        self.full_ratio = full_ratio;
        self.dry_ratio = dry_ratio;
        self
    }

    /// The catalog used for engine lookups
    pub fn catalog(&self) -> &Arc<EngineCatalog> {
        &self.catalog
    }

    fn engines<'a>(&'a self, genome: &RocketGenome) -> Result<Vec<&'a EngineSpec>, FitnessError> {
        genome
            .stages()
            .map(|stage| self.catalog.lookup(stage.engine_id))
            .collect()
    }

    /// Ignition and burnout masses for every stage, bottom stage first
    pub fn stage_masses(&self, genome: &RocketGenome) -> Result<Vec<StageMasses>, FitnessError> {
        let engines = self.engines(genome)?;
        let fuel: Vec<f64> = genome.stages().map(|s| s.fuel_size as f64).collect();

        let mut masses = vec![
            StageMasses {
                full_mass: 0.0,
                dry_mass: 0.0
            };
            engines.len()
        ];

        // Accumulate from the top stage down so each stage carries the ones above it
        let mut above = 0.0;
        for k in (0..engines.len()).rev() {
            let full_mass = above + engines[k].mass + fuel[k] * self.full_ratio;
            let dry_mass = full_mass - fuel[k] * (self.full_ratio - self.dry_ratio);
            masses[k] = StageMasses {
                full_mass,
                dry_mass,
            };
            above = full_mass;
        }

        Ok(masses)
    }

    /// Delta-v of every stage, bottom stage first
    pub fn stage_delta_vs(&self, genome: &RocketGenome) -> Result<Vec<f64>, FitnessError> {
        let engines = self.engines(genome)?;
        let masses = self.stage_masses(genome)?;

        engines
            .iter()
            .zip(masses.iter())
            .enumerate()
            .map(|(stage, (engine, m))| {
                if m.dry_mass <= 0.0 || m.full_mass <= m.dry_mass {
                    return Err(FitnessError::InvalidStaging {
                        stage,
                        full_mass: m.full_mass,
                        dry_mass: m.dry_mass,
                    });
                }
                Ok(self.gravity * engine.isp_vac * (m.full_mass / m.dry_mass).ln())
            })
            .collect()
    }
}

impl Fitness for DeltaVFitness {
    fn evaluate(&self, genome: &RocketGenome) -> Result<f64, FitnessError> {
        Ok(self.stage_delta_vs(genome)?.iter().sum())
    }

    fn name(&self) -> &'static str {
        "delta-v"
    }
}
