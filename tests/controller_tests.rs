//! Integration tests for running optimizations through the controller

use std::sync::Arc;

use rocket_evo::prelude::*;

fn small_config() -> RunConfig {
    RunConfig::new()
        .with_population_size(10)
        .with_max_generations(5)
        .with_num_fittest(5)
        .with_mutation(100, 5)
        .with_seed(42)
}

#[test]
fn run_performs_max_generations_plus_one() {
    let mut controller = RunController::with_standard_catalog(small_config()).unwrap();
    let report = controller.run().unwrap();

    assert_eq!(report.generations, 6);
    assert_eq!(report.termination_reason, "Maximum generations exceeded");
    assert_eq!(controller.history().len(), 6);

    let generations: Vec<usize> = controller.history().iter().map(|s| s.generation).collect();
    assert_eq!(generations, vec![1, 2, 3, 4, 5, 6]);
}

#[test]
fn history_matches_final_population() {
    let mut controller = RunController::with_standard_catalog(small_config()).unwrap();
    controller.run().unwrap();

    let last = controller.history().last().copied().unwrap();
    let population = controller.engine().population();
    assert_eq!(last.max, population.max_fitness().unwrap());
    assert_eq!(last.min, population.min_fitness().unwrap());
    assert_eq!(last.average, population.average_fitness().unwrap());

    for summary in controller.history() {
        assert!(summary.min <= summary.average);
        assert!(summary.average <= summary.max);
    }
}

#[test]
fn report_describes_best_candidate() {
    let mut controller = RunController::with_standard_catalog(small_config()).unwrap();
    let report = controller.run().unwrap().clone();

    let best = controller.best().unwrap();
    assert_eq!(best.genome(), &report.best_genome);
    assert_eq!(best.fitness(), Some(report.best_fitness));
    assert_eq!(report.best_genome.stage_count(), 3);
    assert!(report.evaluations >= 10 * 7);
    assert!(report.summary().contains("Generations: 6"));
}

#[test]
fn report_tracks_convergence() {
    let mut controller = RunController::with_standard_catalog(small_config()).unwrap();
    let report = controller.run().unwrap().clone();

    let history = controller.history();
    assert_eq!(
        report.stalled_generations,
        history.generations_since_improvement()
    );
    assert!(report.stalled_generations < history.len());

    let population = controller.engine().population();
    assert_eq!(report.final_diversity, population.diversity());
    assert!(report.final_diversity >= 0.0);
    assert!(report.final_diversity <= report.best_genome.len() as f64);
}

#[test]
fn sum_of_genes_fitness_is_selectable() {
    let config = small_config().with_fitness(FitnessKind::SumOfGenes);
    let mut controller = RunController::with_standard_catalog(config).unwrap();
    controller.run().unwrap();

    let best = controller.best().unwrap();
    let expected: f64 = best.genome().genes().iter().map(|g| *g as f64).sum();
    assert_eq!(best.fitness(), Some(expected));
}

#[test]
fn reset_clears_run_state() {
    let mut controller = RunController::with_standard_catalog(small_config()).unwrap();
    controller.run().unwrap();
    controller.reset();

    assert!(controller.history().is_empty());
    assert!(controller.report().is_none());
    assert!(controller.best().is_none());
}

#[test]
fn seeded_rerun_after_reset_repeats() {
    let mut controller = RunController::with_standard_catalog(small_config()).unwrap();
    controller.run().unwrap();
    let first = controller.history().clone();

    controller.reset();
    controller.run().unwrap();
    assert_eq!(controller.history(), &first);
}

#[test]
fn rerun_without_reset_starts_fresh() {
    let mut controller = RunController::with_standard_catalog(small_config()).unwrap();
    controller.run().unwrap();
    controller.run().unwrap();

    assert_eq!(controller.history().len(), 6);
}

#[test]
fn reconfigure_switches_config() {
    let mut controller = RunController::with_standard_catalog(small_config()).unwrap();
    controller.run().unwrap();

    let next = small_config().with_max_generations(2).with_population_size(6);
    controller.reconfigure(next.clone()).unwrap();
    assert_eq!(controller.config(), &next);
    assert!(controller.history().is_empty());

    controller.run().unwrap();
    assert_eq!(controller.history().len(), 3);
    assert_eq!(controller.engine().population().len(), 6);
}

#[test]
fn invalid_config_fails_before_running() {
    let cases = vec![
        small_config().with_population_size(0),
        small_config().with_num_fittest(0),
        small_config().with_num_fittest(11),
        small_config().with_mutation(0, 0),
        small_config().with_mutation(5, 6),
        small_config().with_stage_count(0),
    ];

    for config in cases {
        assert!(matches!(
            RunController::with_standard_catalog(config),
            Err(EvolutionError::Configuration(_))
        ));
    }
}

#[test]
fn sweep_over_breeding_pool_sizes() {
    let base = small_config().with_max_generations(3);
    let configs: Vec<RunConfig> = [20, 50, 100]
        .iter()
        .map(|pct| base.clone().with_num_fittest_percent(*pct))
        .collect();

    let mut controller = RunController::with_standard_catalog(base).unwrap();
    let results = controller.sweep(configs).unwrap();

    let labels: Vec<&str> = results.iter().map(|(label, _)| label.as_str()).collect();
    assert_eq!(
        labels,
        vec![
            "pop-10_fit-2_gen-3_mut-100-5",
            "pop-10_fit-5_gen-3_mut-100-5",
            "pop-10_fit-10_gen-3_mut-100-5",
        ]
    );
    assert!(results.iter().all(|(_, history)| history.len() == 4));
}

#[test]
fn custom_catalog_restricts_engines() {
    let catalog = EngineCatalog::from_json_str(
        r#"{
            "7": {"name": "Sounder", "mass": 0.1, "thrust": 2.0, "fuel_flow": 0.001, "isp_atm": 200.0, "isp_vac": 300.0},
            "9": {"name": "Lifter", "mass": 3.0, "thrust": 900.0, "fuel_flow": 0.3, "isp_atm": 290.0, "isp_vac": 320.0}
        }"#,
    )
    .unwrap();
    let mut controller = RunController::new(small_config(), Arc::new(catalog)).unwrap();
    controller.run().unwrap();

    for candidate in controller.engine().population().iter() {
        for stage in candidate.genome().stages() {
            assert!(stage.engine_id == 7 || stage.engine_id == 9);
        }
    }
}

#[test]
fn delta_v_search_improves_on_random_rockets() {
    let config = RunConfig::new()
        .with_population_size(40)
        .with_num_fittest(8)
        .with_max_generations(60)
        .with_seed(7);
    let mut controller = RunController::with_standard_catalog(config).unwrap();
    controller.run().unwrap();

    let history = controller.history();
    let first = history.get(0).map(|s| s.max).unwrap();
    let last = history.last().map(|s| s.max).unwrap();
    assert!(last >= first, "best delta-v fell from {} to {}", first, last);
    assert!(history.best_fitness().unwrap() > 0.0);
}

#[test]
fn history_serializes_to_json() {
    let mut controller = RunController::with_standard_catalog(small_config()).unwrap();
    controller.run().unwrap();

    let json = serde_json::to_string(controller.history()).unwrap();
    let restored: FitnessHistory = serde_json::from_str(&json).unwrap();
    assert_eq!(restored.len(), 6);
    for (a, b) in restored.iter().zip(controller.history()) {
        assert_eq!(a.generation, b.generation);
        assert!((a.max - b.max).abs() < 1e-9 * b.max.abs().max(1.0));
    }
}

#[test]
fn penalized_fitness_survives_json_export() {
    let mut controller = RunController::with_standard_catalog(small_config()).unwrap();
    controller.run().unwrap();

    let mut history = controller.history().clone();
    history.record(GenerationSummary {
        generation: history.len() + 1,
        average: INVALID_STAGING_PENALTY,
        max: INVALID_STAGING_PENALTY,
        min: INVALID_STAGING_PENALTY,
    });
    let json = serde_json::to_string(&history).unwrap();
    let restored: FitnessHistory = serde_json::from_str(&json).unwrap();
    assert_eq!(restored.len(), 7);
    assert_eq!(
        restored.last().map(|s| s.as_triple()),
        Some((INVALID_STAGING_PENALTY, INVALID_STAGING_PENALTY, INVALID_STAGING_PENALTY))
    );

    let mut report = controller.report().cloned().unwrap();
    report.best_fitness = INVALID_STAGING_PENALTY;
    let json = serde_json::to_string(&report).unwrap();
    let restored: RunReport = serde_json::from_str(&json).unwrap();
    assert_eq!(restored.best_fitness, INVALID_STAGING_PENALTY);
    assert_eq!(restored.best_genome, report.best_genome);
}
