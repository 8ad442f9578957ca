//! Fitness evaluation
//!
//! This module provides the fitness abstraction and the rocket fitness strategies.

pub mod delta_v;
pub mod model;
pub mod sum_of_genes;
pub mod traits;

pub mod prelude {
    pub use super::delta_v::*;
    pub use super::model::*;
    pub use super::sum_of_genes::*;
    pub use super::traits::*;
}
