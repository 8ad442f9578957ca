//! Rocket genome
//!
//! This module provides the staged gene encoding shared by every candidate.

pub mod staged;

pub mod prelude {
    pub use super::staged::*;
}
