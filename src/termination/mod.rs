//! Termination criteria
//!
//! A run ends when its generation counter passes the configured maximum.

/// Terminate once the generation counter exceeds a maximum
///
/// The check runs after the counter is incremented, so a run with maximum
/// `n` completes `n + 1` generations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MaxGenerations(pub usize);

impl MaxGenerations {
    /// Create a new max generations criterion
    pub fn new(max: usize) -> Self {
        Self(max)
    }

    /// Check if evolution should terminate after `generation` completed cycles
    pub fn should_terminate(&self, generation: usize) -> bool {
        generation > self.0
    }

    /// Number of generations a run performs before terminating
    pub fn total_generations(&self) -> usize {
        self.0 + 1
    }

    /// Get a description of why termination occurred
    pub fn reason(&self) -> &'static str {
        "Maximum generations exceeded"
    }
}

pub mod prelude {
    pub use super::MaxGenerations;
}
