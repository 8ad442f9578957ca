//! Property-based tests for rocket-evo
//!
//! Uses proptest to verify invariants and properties of the library.

use std::sync::Arc;

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rocket_evo::prelude::*;

fn catalog() -> Arc<EngineCatalog> {
    Arc::new(EngineCatalog::standard())
}

/// Genes for a rocket with 1 to 5 stages drawing from the standard catalog
fn rocket_genes() -> impl Strategy<Value = Vec<u32>> {
    prop::collection::vec((0u32..=MAX_FUEL_SIZE, 1u32..=5), 1..=5)
        .prop_map(|stages| stages.into_iter().flat_map(|(f, e)| [f, e]).collect())
}

/// Two gene sequences of the same length
fn parent_pair() -> impl Strategy<Value = (Vec<u32>, Vec<u32>)> {
    (1usize..=5).prop_flat_map(|stages| {
        (
            prop::collection::vec(0u32..10_000, 2 * stages),
            prop::collection::vec(0u32..10_000, 2 * stages),
        )
    })
}

proptest! {
    // ==================== Genome Properties ====================

    #[test]
    fn random_genome_genes_within_ranges(stages in 1usize..8, seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let catalog = catalog();
        let genome = RocketGenome::random(stages, &catalog, &mut rng);

        prop_assert_eq!(genome.len(), 2 * stages);
        for stage in genome.stages() {
            prop_assert!((MIN_FUEL_SIZE..=MAX_FUEL_SIZE).contains(&stage.fuel_size));
            prop_assert!(catalog.contains(stage.engine_id));
        }
    }

    #[test]
    fn odd_length_rejected(genes in prop::collection::vec(any::<u32>(), 0..20)) {
        let result = RocketGenome::new(genes.clone());
        prop_assert_eq!(result.is_ok(), !genes.is_empty() && genes.len() % 2 == 0);
    }

    // ==================== Fitness Properties ====================

    #[test]
    fn evaluate_is_deterministic(genes in rocket_genes()) {
        let genome = RocketGenome::new(genes).unwrap();
        let model = FitnessModel::from_kind(FitnessKind::DeltaV, catalog());

        let first = model.score(&genome).unwrap();
        let second = model.score(&genome).unwrap();
        prop_assert_eq!(first.to_bits(), second.to_bits());
    }

    #[test]
    fn sum_of_genes_matches_sum(genes in rocket_genes()) {
        let expected: f64 = genes.iter().map(|g| *g as f64).sum();
        let genome = RocketGenome::new(genes).unwrap();
        let model = FitnessModel::from_kind(FitnessKind::SumOfGenes, catalog());

        prop_assert_eq!(model.score(&genome).unwrap(), expected);
    }

    #[test]
    fn degenerate_staging_never_escapes(genes in rocket_genes()) {
        let genome = RocketGenome::new(genes).unwrap();
        let model = FitnessModel::from_kind(FitnessKind::DeltaV, catalog());

        let fitness = model.score(&genome);
        prop_assert!(fitness.is_ok());

        let has_empty_tank = genome.stages().any(|s| s.fuel_size == 0);
        if has_empty_tank {
            prop_assert_eq!(fitness.unwrap(), INVALID_STAGING_PENALTY);
        } else {
            prop_assert!(fitness.unwrap() > 0.0);
        }
    }

    #[test]
    fn unknown_engine_is_an_error(genes in rocket_genes(), stage in 0usize..5, bad in 6u32..100) {
        let mut genes = genes;
        let position = 2 * (stage % (genes.len() / 2)) + 1;
        genes[position] = bad;
        let genome = RocketGenome::new(genes).unwrap();
        let model = FitnessModel::from_kind(FitnessKind::DeltaV, catalog());

        prop_assert_eq!(model.score(&genome), Err(FitnessError::UnknownEngine(bad)));
    }

    // ==================== Operator Properties ====================

    #[test]
    fn crossover_concatenates_parents((g1, g2) in parent_pair(), split_seed in any::<usize>()) {
        let len = g1.len();
        let split = 1 + split_seed % (len - 1).max(1);
        prop_assume!(split < len);

        let p1 = RocketGenome::new(g1.clone()).unwrap();
        let p2 = RocketGenome::new(g2.clone()).unwrap();
        let child = SinglePointCrossover::new().crossover_at(&p1, &p2, split).unwrap();

        prop_assert_eq!(child.len(), len);
        prop_assert_eq!(&child.genes()[..split], &g1[..split]);
        prop_assert_eq!(&child.genes()[split..], &g2[split..]);
    }

    #[test]
    fn random_crossover_preserves_length((g1, g2) in parent_pair(), seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let p1 = RocketGenome::new(g1).unwrap();
        let p2 = RocketGenome::new(g2).unwrap();

        let child = SinglePointCrossover::new().crossover(&p1, &p2, &mut rng).unwrap();
        prop_assert_eq!(child.len(), p1.len());
        prop_assert_eq!(child[0], p1[0]);
        prop_assert_eq!(child[child.len() - 1], p2[p2.len() - 1]);
    }

    #[test]
    fn mutation_changes_one_position_within_range(genes in rocket_genes(), seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let catalog = catalog();
        let original = RocketGenome::new(genes).unwrap();
        let mut mutated = original.clone();

        let record = PointMutation::new(catalog.clone()).mutate(&mut mutated, &mut rng);

        prop_assert!(mutated.hamming_distance(&original) <= 1);
        for i in 0..original.len() {
            if i != record.position {
                prop_assert_eq!(mutated[i], original[i]);
            }
        }
        match GeneKind::at(record.position) {
            GeneKind::Fuel => {
                prop_assert!((MIN_FUEL_SIZE..=MAX_FUEL_SIZE).contains(&record.new_value));
            }
            GeneKind::Engine => {
                prop_assert!(catalog.contains(record.new_value));
            }
        }
    }

    // ==================== Population Properties ====================

    #[test]
    fn sort_is_ascending(fitnesses in prop::collection::vec(-1e6..1e6f64, 1..50)) {
        let mut population: Population = fitnesses
            .iter()
            .map(|f| Candidate::with_fitness(RocketGenome::zeros(1), *f))
            .collect();
        population.sort_ascending_by_fitness();

        prop_assert!(population.is_sorted_ascending());
        let max = fitnesses.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let min = fitnesses.iter().cloned().fold(f64::INFINITY, f64::min);
        prop_assert_eq!(population.max_fitness().unwrap(), max);
        prop_assert_eq!(population.min_fitness().unwrap(), min);
    }

    #[test]
    fn average_between_extremes(fitnesses in prop::collection::vec(-1e6..1e6f64, 1..50)) {
        let mut population: Population = fitnesses
            .iter()
            .map(|f| Candidate::with_fitness(RocketGenome::zeros(1), *f))
            .collect();
        population.sort_ascending_by_fitness();

        let average = population.average_fitness().unwrap();
        prop_assert!(average >= population.min_fitness().unwrap() - 1e-6);
        prop_assert!(average <= population.max_fitness().unwrap() + 1e-6);
    }

    #[test]
    fn fittest_slice_holds_the_top(
        fitnesses in prop::collection::vec(-1e3..1e3f64, 1..30),
        n in 1usize..30
    ) {
        let mut population: Population = fitnesses
            .iter()
            .map(|f| Candidate::with_fitness(RocketGenome::zeros(1), *f))
            .collect();
        population.sort_ascending_by_fitness();

        let pool = population.fittest_slice(n);
        prop_assert_eq!(pool.len(), n.min(population.len()));

        let pool_min = pool[0].fitness().unwrap();
        let outside = population.len() - pool.len();
        for candidate in population.iter().take(outside) {
            prop_assert!(candidate.fitness().unwrap() <= pool_min);
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    // ==================== Run Properties ====================

    #[test]
    fn run_records_max_plus_one_generations(
        population_size in 2usize..12,
        max_generations in 0usize..8,
        seed in any::<u64>()
    ) {
        let config = RunConfig::new()
            .with_population_size(population_size)
            .with_num_fittest_percent(50)
            .with_max_generations(max_generations)
            .with_seed(seed);
        let mut controller = RunController::with_standard_catalog(config).unwrap();
        let report = controller.run().unwrap();

        prop_assert_eq!(report.generations, max_generations + 1);
        prop_assert_eq!(controller.history().len(), max_generations + 1);
        prop_assert!(controller.engine().population().is_sorted_ascending());
        prop_assert_eq!(controller.engine().population().len(), population_size);
    }

    #[test]
    fn seeded_runs_are_reproducible(seed in any::<u64>()) {
        let config = RunConfig::new()
            .with_population_size(8)
            .with_num_fittest(4)
            .with_max_generations(4)
            .with_seed(seed);

        let mut first = RunController::with_standard_catalog(config.clone()).unwrap();
        let mut second = RunController::with_standard_catalog(config).unwrap();
        first.run().unwrap();
        second.run().unwrap();

        prop_assert_eq!(first.history(), second.history());
    }
}
