//! Genetic operators
//!
//! This module provides the breeding pool selection, single-point crossover,
//! and point mutation operators.

pub mod crossover;
pub mod mutation;
pub mod selection;

pub mod prelude {
    pub use super::crossover::*;
    pub use super::mutation::*;
    pub use super::selection::*;
}
