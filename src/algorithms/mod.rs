//! Evolutionary algorithms
//!
//! This module contains the generation loop that drives a run.

pub mod generational;

pub mod prelude {
    pub use super::generational::*;
}
