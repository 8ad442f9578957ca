//! Engine specifications and lookup
//!
//! The catalog is injected reference data: it is built once, validated, and
//! then shared read-only between the fitness model and the mutation operator.

use std::collections::BTreeMap;

use rand::Rng;
use rand_distr::{Distribution, Uniform};
use serde::{Deserialize, Serialize};

use crate::error::{CatalogError, EngineId, FitnessError};

/// Smallest fuel tank size a random draw can produce
pub const MIN_FUEL_SIZE: u32 = 1;

/// Largest fuel tank size a random draw can produce
pub const MAX_FUEL_SIZE: u32 = 2000;

/// Performance parameters of a single engine type
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EngineSpec {
    /// Display name
    pub name: String,
    /// Engine mass
    pub mass: f64,
    /// Thrust
    pub thrust: f64,
    /// Fuel consumed per unit time at full thrust
    pub fuel_flow: f64,
    /// Specific impulse at sea level
    pub isp_atm: f64,
    /// Specific impulse in vacuum
    pub isp_vac: f64,
}

impl EngineSpec {
    /// Create a new engine specification
    pub fn new(
        name: impl Into<String>,
        mass: f64,
        thrust: f64,
        fuel_flow: f64,
        isp_atm: f64,
        isp_vac: f64,
    ) -> Self {
        Self {
            name: name.into(),
            mass,
            thrust,
            fuel_flow,
            isp_atm,
            isp_vac,
        }
    }

    /// First parameter that cannot describe a real engine, if any
    ///
    /// Mass and vacuum specific impulse feed the rocket equation and must be
    /// positive. The remaining parameters must be finite and non-negative.
    pub fn invalid_field(&self) -> Option<&'static str> {
        let positive = |v: f64| v.is_finite() && v > 0.0;
        let non_negative = |v: f64| v.is_finite() && v >= 0.0;

        if !positive(self.mass) {
            Some("mass")
        } else if !positive(self.isp_vac) {
            Some("isp_vac")
        } else if !non_negative(self.thrust) {
            Some("thrust")
        } else if !non_negative(self.fuel_flow) {
            Some("fuel_flow")
        } else if !non_negative(self.isp_atm) {
            Some("isp_atm")
        } else {
            None
        }
    }
}

/// Read-only mapping from engine id to engine specification
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EngineCatalog {
    engines: BTreeMap<EngineId, EngineSpec>,
    /// Registered ids in ascending order, used for uniform draws
    #[serde(skip)]
    ids: Vec<EngineId>,
}

impl EngineCatalog {
    /// Build a catalog from `(id, spec)` entries
    ///
    /// Ids must be positive and unique, every spec must pass
    /// [`EngineSpec::invalid_field`], and at least one engine is required so
    /// that random engine draws always have a valid target.
    pub fn new<I>(entries: I) -> Result<Self, CatalogError>
    where
        I: IntoIterator<Item = (EngineId, EngineSpec)>,
    {
        let mut engines = BTreeMap::new();
        for (id, spec) in entries {
            if id == 0 {
                return Err(CatalogError::ZeroId);
            }
            if let Some(field) = spec.invalid_field() {
                return Err(CatalogError::InvalidSpec { id, field });
            }
            if engines.insert(id, spec).is_some() {
                return Err(CatalogError::DuplicateId(id));
            }
        }
        if engines.is_empty() {
            return Err(CatalogError::Empty);
        }
        let ids = engines.keys().copied().collect();
        Ok(Self { engines, ids })
    }

    /// The five reference engines
    pub fn standard() -> Self {
        let engines: BTreeMap<EngineId, EngineSpec> = [
            (1, EngineSpec::new("LV-T30", 1.25, 215.0, 0.0685, 320.0, 370.0)),
            (2, EngineSpec::new("LV-909", 0.5, 50.0, 0.0170, 300.0, 390.0)),
            (3, EngineSpec::new("Poodle", 2.5, 220.0, 0.0831, 270.0, 390.0)),
            (4, EngineSpec::new("Mainsail", 6.0, 1500.0, 0.5461, 280.0, 330.0)),
            (5, EngineSpec::new("Atomic", 2.25, 60.0, 0.0278, 220.0, 800.0)),
        ]
        .into_iter()
        .collect();
        let ids = engines.keys().copied().collect();
        Self { engines, ids }
    }

    /// Parse a catalog from a JSON object keyed by engine id
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let engines: BTreeMap<EngineId, EngineSpec> = serde_json::from_str(json)?;
        Self::new(engines)
    }

    /// Look up an engine by id
    pub fn lookup(&self, id: EngineId) -> Result<&EngineSpec, FitnessError> {
        self.engines.get(&id).ok_or(FitnessError::UnknownEngine(id))
    }

    /// Check whether an id is registered
    pub fn contains(&self, id: EngineId) -> bool {
        self.engines.contains_key(&id)
    }

    /// Number of registered engines
    pub fn len(&self) -> usize {
        self.engines.len()
    }

    /// Always false for a constructed catalog
    pub fn is_empty(&self) -> bool {
        self.engines.is_empty()
    }

    /// Registered ids in ascending order
    pub fn ids(&self) -> &[EngineId] {
        &self.ids
    }

    /// Iterate over `(id, spec)` pairs in id order
    pub fn iter(&self) -> impl Iterator<Item = (EngineId, &EngineSpec)> {
        self.engines.iter().map(|(id, spec)| (*id, spec))
    }

    /// Draw a registered engine id, each with equal probability
    pub fn random_engine_id<R: Rng>(&self, rng: &mut R) -> EngineId {
        self.ids[rng.gen_range(0..self.ids.len())]
    }

    /// Draw a fuel tank size uniformly from `[MIN_FUEL_SIZE, MAX_FUEL_SIZE]`
    pub fn random_fuel_size<R: Rng>(rng: &mut R) -> u32 {
        Uniform::new_inclusive(MIN_FUEL_SIZE, MAX_FUEL_SIZE).sample(rng)
    }
}

impl Default for EngineCatalog {
    fn default() -> Self {
        Self::standard()
    }
}
