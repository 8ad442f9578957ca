//! Selection operators
//!
//! This module provides parent selection from a breeding pool.

use rand::Rng;

use crate::population::candidate::Candidate;

/// Uniform selection from a breeding pool
///
/// Every member of the pool is equally likely to be picked, and the two
/// parents of a pair are drawn independently, so a candidate may be paired
/// with itself.
#[derive(Clone, Copy, Debug, Default)]
pub struct UniformPoolSelection;

impl UniformPoolSelection {
    /// Create a new uniform pool selection
    pub fn new() -> Self {
        Self
    }

    /// Select the index of one pool member, None if the pool is empty
    pub fn select<R: Rng>(&self, pool: &[Candidate], rng: &mut R) -> Option<usize> {
        if pool.is_empty() {
            return None;
        }
        Some(rng.gen_range(0..pool.len()))
    }

    /// Select two parents independently
    pub fn select_pair<'a, R: Rng>(
        &self,
        pool: &'a [Candidate],
        rng: &mut R,
    ) -> Option<(&'a Candidate, &'a Candidate)> {
        let first = self.select(pool, rng)?;
        let second = self.select(pool, rng)?;
        Some((&pool[first], &pool[second]))
    }
}
