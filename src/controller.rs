//! Run orchestration
//!
//! This module provides the controller that owns a run configuration, drives
//! a genetic engine to termination, and keeps the resulting history and
//! report around for inspection.

use std::sync::Arc;
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, instrument, warn};

use crate::algorithms::generational::{EngineState, GeneticEngine};
use crate::config::RunConfig;
use crate::diagnostics::{FitnessHistory, RunReport};
use crate::engine::catalog::EngineCatalog;
use crate::error::{EvoResult, EvolutionError};
use crate::fitness::traits::Fitness;
use crate::population::candidate::Candidate;

/// Generations between progress log lines
pub const PROGRESS_INTERVAL: usize = 200;

/// Drives optimization runs for one configuration at a time
#[derive(Debug)]
pub struct RunController {
    config: RunConfig,
    catalog: Arc<EngineCatalog>,
    engine: GeneticEngine,
    rng: StdRng,
    report: Option<RunReport>,
}

impl RunController {
    /// Create a controller; the configuration is validated here
    pub fn new(config: RunConfig, catalog: Arc<EngineCatalog>) -> EvoResult<Self> {
        let engine = GeneticEngine::new(config.clone(), catalog.clone())?;
        Ok(Self {
            rng: rng_for(&config),
            config,
            catalog,
            engine,
            report: None,
        })
    }

    /// Create a controller over the standard engine catalog
    pub fn with_standard_catalog(config: RunConfig) -> EvoResult<Self> {
        Self::new(config, Arc::new(EngineCatalog::standard()))
    }

    /// Run to termination and return the report
    ///
    /// A controller that has already run is reset first.
    #[instrument(level = "info", skip(self), fields(label = %self.config.label()))]
    pub fn run(&mut self) -> EvoResult<&RunReport> {
        if self.engine.state() != EngineState::Uninitialized {
            warn!(
                generation = self.engine.generation(),
                "controller reused without reset, discarding previous run"
            );
            self.reset();
        }

        info!(
            population_size = self.config.population_size,
            max_generations = self.config.max_generations,
            num_fittest = self.config.num_fittest,
            mutation_ratio = self.config.mutation_ratio,
            mutation_threshold = self.config.mutation_threshold,
            mutation_probability = self.config.mutation_gate().probability(),
            stage_count = self.config.stage_count,
            fitness = self.engine.model().name(),
            seed = ?self.config.seed,
            "starting run"
        );

        let start = Instant::now();
        self.engine.initialize(&mut self.rng)?;

        while !self.engine.is_terminated() {
            let summary = self.engine.step(&mut self.rng)?;
            if summary.generation % PROGRESS_INTERVAL == 0 {
                self.log_progress(summary.generation, summary.max, start.elapsed());
            }
        }

        let population = self.engine.population();
        let best = population.best().ok_or(EvolutionError::EmptyPopulation)?;
        let best_fitness = best.fitness().ok_or(EvolutionError::Unevaluated {
            index: population.len() - 1,
        })?;

        let report = RunReport {
            best_genome: best.genome().clone(),
            best_fitness,
            generations: self.engine.generation(),
            evaluations: self.engine.evaluations(),
            stalled_generations: self.engine.history().generations_since_improvement(),
            final_diversity: population.diversity(),
            total_runtime_ms: 0.0,
            termination_reason: self.engine.termination().reason().to_string(),
        }
        .with_runtime(start.elapsed());

        info!(
            generations = report.generations,
            evaluations = report.evaluations,
            best_fitness = report.best_fitness,
            stalled_generations = report.stalled_generations,
            runtime_ms = report.total_runtime_ms,
            "run complete"
        );

        Ok(&*self.report.insert(report))
    }

    fn log_progress(&self, generation: usize, best_fitness: f64, elapsed: Duration) {
        let total = self.engine.termination().total_generations();
        let remaining = total.saturating_sub(generation);
        let per_generation = elapsed.as_secs_f64() / generation as f64;

        info!(
            generation,
            total,
            best_fitness,
            stalled_generations = self.engine.history().generations_since_improvement(),
            diversity = self.engine.population().diversity(),
            elapsed_s = elapsed.as_secs_f64(),
            remaining_s = per_generation * remaining as f64,
            "progress"
        );
    }

    /// Clear run state so the controller can run again
    ///
    /// A seeded configuration restarts its random stream, so the next run
    /// repeats the previous one.
    pub fn reset(&mut self) {
        self.engine.reset();
        self.report = None;
        self.rng = rng_for(&self.config);
    }

    /// Validate and switch to a new configuration
    ///
    /// On error the current configuration and run state are kept.
    pub fn reconfigure(&mut self, config: RunConfig) -> EvoResult<()> {
        let engine = GeneticEngine::new(config.clone(), self.catalog.clone())?;
        self.engine = engine;
        self.config = config;
        self.reset();
        Ok(())
    }

    /// Run each configuration in turn and collect `(label, history)` pairs
    pub fn sweep<I>(&mut self, configs: I) -> EvoResult<Vec<(String, FitnessHistory)>>
    where
        I: IntoIterator<Item = RunConfig>,
    {
        let mut results = Vec::new();
        for config in configs {
            self.reconfigure(config)?;
            self.run()?;
            results.push((self.config.label(), self.engine.history().clone()));
        }
        Ok(results)
    }

    /// Per-generation summaries of the current run
    pub fn history(&self) -> &FitnessHistory {
        self.engine.history()
    }

    /// Report of the last completed run
    pub fn report(&self) -> Option<&RunReport> {
        self.report.as_ref()
    }

    /// Fittest candidate of the final population
    pub fn best(&self) -> Option<&Candidate> {
        self.engine.best()
    }

    /// The active configuration
    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// The engine catalog shared by every run
    pub fn catalog(&self) -> &Arc<EngineCatalog> {
        &self.catalog
    }

    /// The underlying genetic engine
    pub fn engine(&self) -> &GeneticEngine {
        &self.engine
    }
}

fn rng_for(config: &RunConfig) -> StdRng {
    match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}
