//! Generational genetic algorithm
//!
//! This module implements the generation loop: truncation to a breeding pool,
//! single-point recombination into a fully replaced population, gated point
//! mutation, and re-sorting.

use std::sync::Arc;

use rand::Rng;
use tracing::{debug, instrument};

use crate::config::RunConfig;
use crate::diagnostics::{FitnessHistory, GenerationSummary};
use crate::engine::catalog::EngineCatalog;
use crate::error::{EvoResult, EvolutionError};
use crate::fitness::model::FitnessModel;
use crate::operators::crossover::SinglePointCrossover;
use crate::operators::mutation::{MutationGate, PointMutation};
use crate::operators::selection::UniformPoolSelection;
use crate::population::candidate::Candidate;
use crate::population::population::Population;
use crate::termination::MaxGenerations;

/// Lifecycle of a genetic engine
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EngineState {
    /// No population yet
    Uninitialized,
    /// Population seeded, generations may be stepped
    Seeded,
    /// The termination criterion has fired
    Terminated,
}

/// Generational genetic algorithm over rocket genomes
///
/// The population is kept sorted ascending by fitness between steps, so the
/// breeding pool is always its tail.
#[derive(Debug)]
pub struct GeneticEngine {
    config: RunConfig,
    catalog: Arc<EngineCatalog>,
    model: FitnessModel,
    selection: UniformPoolSelection,
    crossover: SinglePointCrossover,
    mutation: PointMutation,
    gate: MutationGate,
    termination: MaxGenerations,
    population: Population,
    history: FitnessHistory,
    generation: usize,
    evaluations: usize,
    mutations: usize,
    state: EngineState,
}

impl GeneticEngine {
    /// Create an engine using the fitness strategy named by `config`
    pub fn new(config: RunConfig, catalog: Arc<EngineCatalog>) -> EvoResult<Self> {
        let model = FitnessModel::from_kind(config.fitness, catalog.clone());
        Self::with_model(config, catalog, model)
    }

    /// Create an engine with an explicit fitness model
    ///
    /// The model wins over `config.fitness`: the stored configuration is
    /// updated to name the model's strategy.
    pub fn with_model(
        mut config: RunConfig,
        catalog: Arc<EngineCatalog>,
        model: FitnessModel,
    ) -> EvoResult<Self> {
        config.validate()?;
        config.fitness = model.kind();

        Ok(Self {
            selection: UniformPoolSelection::new(),
            crossover: SinglePointCrossover::new(),
            mutation: PointMutation::new(catalog.clone()),
            gate: config.mutation_gate(),
            termination: MaxGenerations::new(config.max_generations),
            population: Population::new(),
            history: FitnessHistory::new(),
            generation: 0,
            evaluations: 0,
            mutations: 0,
            state: EngineState::Uninitialized,
            config,
            catalog,
            model,
        })
    }

    /// Seed a random, evaluated, sorted population
    ///
    /// Any previous run state is discarded.
    #[instrument(level = "debug", skip(self, rng), fields(population_size = self.config.population_size))]
    pub fn initialize<R: Rng>(&mut self, rng: &mut R) -> EvoResult<()> {
        let mut population = Population::random(
            self.config.population_size,
            self.config.stage_count,
            &self.catalog,
            &self.model,
            rng,
        )?;
        population.sort_ascending_by_fitness();

        self.population = population;
        self.history = FitnessHistory::new();
        self.generation = 0;
        self.evaluations = self.config.population_size;
        self.mutations = 0;
        self.state = EngineState::Seeded;

        debug!(
            best = self.population.max_fitness()?,
            worst = self.population.min_fitness()?,
            "population seeded"
        );
        Ok(())
    }

    /// Run one generation and return its summary
    pub fn step<R: Rng>(&mut self, rng: &mut R) -> EvoResult<GenerationSummary> {
        match self.state {
            EngineState::Uninitialized => return Err(EvolutionError::NotInitialized),
            EngineState::Terminated => {
                return Err(EvolutionError::Terminated {
                    generation: self.generation,
                })
            }
            EngineState::Seeded => {}
        }

        let next_generation = self.generation + 1;
        let pool = self.population.fittest_slice(self.config.num_fittest);

        let mut offspring = Vec::with_capacity(self.config.population_size);
        for _ in 0..self.config.population_size {
            let (parent1, parent2) = self
                .selection
                .select_pair(pool, rng)
                .ok_or(EvolutionError::EmptyPopulation)?;
            offspring.push(
                self.crossover
                    .crossover(parent1.genome(), parent2.genome(), rng)?,
            );
        }

        let mut next = Population::evaluate_genomes(offspring, &self.model, next_generation)?;
        self.evaluations += next.len();

        let mut mutated = 0;
        for candidate in next.iter_mut() {
            if self.gate.should_mutate(rng) {
                candidate.mutate(&self.mutation, rng);
                candidate.evaluate(&self.model)?;
                mutated += 1;
            }
        }
        self.evaluations += mutated;
        self.mutations += mutated;

        next.sort_ascending_by_fitness();
        self.population = next;
        self.generation = next_generation;

        let summary = GenerationSummary::from_population(&self.population, self.generation)?;
        self.history.record(summary);

        debug!(
            generation = summary.generation,
            average = summary.average,
            max = summary.max,
            min = summary.min,
            mutated,
            diversity = self.population.diversity(),
            "generation complete"
        );

        if self.termination.should_terminate(self.generation) {
            self.state = EngineState::Terminated;
        }
        Ok(summary)
    }

    /// Step until the termination criterion fires
    ///
    /// Seeds the population first if needed.
    pub fn run<R: Rng>(&mut self, rng: &mut R) -> EvoResult<&FitnessHistory> {
        if self.state == EngineState::Uninitialized {
            self.initialize(rng)?;
        }
        while !self.is_terminated() {
            self.step(rng)?;
        }
        Ok(&self.history)
    }

    /// Discard the population and history
    pub fn reset(&mut self) {
        self.population = Population::new();
        self.history.clear();
        self.generation = 0;
        self.evaluations = 0;
        self.mutations = 0;
        self.state = EngineState::Uninitialized;
    }

    /// Current lifecycle state
    pub fn state(&self) -> EngineState {
        self.state
    }

    /// Check if the termination criterion has fired
    pub fn is_terminated(&self) -> bool {
        self.state == EngineState::Terminated
    }

    /// Completed generation cycles
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Fitness evaluations performed, including the seeded population
    pub fn evaluations(&self) -> usize {
        self.evaluations
    }

    /// Candidates mutated so far
    pub fn mutations(&self) -> usize {
        self.mutations
    }

    /// The current population, sorted ascending by fitness
    pub fn population(&self) -> &Population {
        &self.population
    }

    /// The fittest candidate of the current population
    pub fn best(&self) -> Option<&Candidate> {
        self.population.best()
    }

    /// Per-generation summaries recorded so far
    pub fn history(&self) -> &FitnessHistory {
        &self.history
    }

    /// The configuration driving this engine
    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// The fitness model in use
    pub fn model(&self) -> &FitnessModel {
        &self.model
    }

    /// The termination criterion in use
    pub fn termination(&self) -> &MaxGenerations {
        &self.termination
    }
}
