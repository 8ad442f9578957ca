//! Population management
//!
//! This module provides the Candidate and Population types.

pub mod candidate;
#[allow(clippy::module_inception)]
pub mod population;

pub mod prelude {
    pub use super::candidate::*;
    pub use super::population::*;
}
