//! Engine catalog
//!
//! This module provides the read-only table of engine performance data that
//! rocket genomes reference by id.

pub mod catalog;

pub mod prelude {
    pub use super::catalog::*;
}
