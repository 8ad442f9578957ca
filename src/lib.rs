//! # rocket-evo
//!
//! A genetic algorithm that searches for multi-stage rocket designs.
//!
//! A rocket is encoded as a `(fuel_size, engine_id)` pair per stage. Each
//! generation the fittest candidates form a breeding pool, single-point
//! crossover refills the population, a few candidates take a point mutation,
//! and everything is re-scored by total delta-v from the rocket equation.
//!
//! ## Core Concepts
//!
//! - **Engine catalog**: read-only table of engine mass and specific impulse, shared by every run
//! - **Fitness strategies**: sum-of-genes for smoke tests, delta-v for real searches
//! - **Explicit re-evaluation**: a mutated candidate has no fitness until it is evaluated again
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use rocket_evo::prelude::*;
//!
//! let config = RunConfig::new()
//!     .with_population_size(50)
//!     .with_num_fittest(10)
//!     .with_max_generations(400)
//!     .with_seed(42);
//!
//! let mut controller = RunController::with_standard_catalog(config)?;
//! let report = controller.run()?;
//! println!("{}", report.summary());
//! # Ok::<(), rocket_evo::error::EvolutionError>(())
//! ```

pub mod algorithms;
pub mod config;
pub mod controller;
pub mod diagnostics;
pub mod engine;
pub mod error;
pub mod fitness;
pub mod genome;
pub mod operators;
pub mod population;
pub mod termination;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::algorithms::prelude::*;
    pub use crate::config::RunConfig;
    pub use crate::controller::{RunController, PROGRESS_INTERVAL};
    pub use crate::diagnostics::prelude::*;
    pub use crate::engine::prelude::*;
    pub use crate::error::*;
    pub use crate::fitness::prelude::*;
    pub use crate::genome::prelude::*;
    pub use crate::operators::prelude::*;
    pub use crate::population::prelude::*;
    pub use crate::termination::prelude::*;
}
