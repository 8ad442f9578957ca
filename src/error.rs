//! Error types for rocket-evo
//!
//! This module defines all error types used throughout the library.

use thiserror::Error;

/// Identifier of an engine in the catalog
pub type EngineId = u32;

/// Error type for gene sequence structure
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GenomeError {
    /// Gene sequences must hold a (fuel, engine) pair per stage
    #[error("Gene sequence length {0} is not a positive multiple of 2")]
    OddLength(usize),

    /// Dimension mismatch between two genomes
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Crossover needs at least two genes to place a split point
    #[error("Gene sequence of length {0} is too short to split")]
    TooShortToSplit(usize),

    /// Split point must leave at least one gene from each parent
    #[error("Split point {split} leaves an empty side of a genome of length {len}")]
    SplitOutOfRange { split: usize, len: usize },
}

/// Error type for fitness evaluation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FitnessError {
    /// A gene references an engine id the catalog does not know
    #[error("Unknown engine id: {0}")]
    UnknownEngine(EngineId),

    /// The mass ratio of a stage leaves the rocket equation undefined
    #[error("Invalid staging at stage {stage}: full mass {full_mass}, dry mass {dry_mass}")]
    InvalidStaging {
        stage: usize,
        full_mass: f64,
        dry_mass: f64,
    },
}

/// Error type for engine catalog construction
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog has no engines to draw from
    #[error("Engine catalog is empty")]
    Empty,

    /// Engine ids are positive integers
    #[error("Engine id 0 is reserved")]
    ZeroId,

    /// The same id was registered twice
    #[error("Duplicate engine id: {0}")]
    DuplicateId(EngineId),

    /// An engine parameter is out of range
    #[error("Engine {id} has an invalid {field}")]
    InvalidSpec { id: EngineId, field: &'static str },

    /// Catalog data could not be parsed
    #[error("Malformed catalog data: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Top-level error type for evolution runs
#[derive(Debug, Error)]
pub enum EvolutionError {
    /// Genome error
    #[error("Genome error: {0}")]
    Genome(#[from] GenomeError),

    /// Fitness evaluation failed
    #[error("Fitness evaluation failed: {0}")]
    Fitness(#[from] FitnessError),

    /// Catalog error
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// Empty population
    #[error("Empty population")]
    EmptyPopulation,

    /// A candidate's fitness was read after its genes changed
    #[error("Candidate at index {index} has not been evaluated")]
    Unevaluated { index: usize },

    /// The engine was stepped before a population was seeded
    #[error("Genetic engine has not been initialized")]
    NotInitialized,

    /// The engine was stepped after its termination criterion fired
    #[error("Genetic engine has already terminated after {generation} generations")]
    Terminated { generation: usize },
}

/// Result type alias for evolution operations
pub type EvoResult<T> = Result<T, EvolutionError>;
