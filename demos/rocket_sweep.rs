//! Breeding Pool Sweep
//!
//! This example runs the rocket search once for every breeding pool size
//! from 5% to 100% of the population and compares the best designs.
//!
//! Run start, progress, and completion lines are logged at INFO level.

use rocket_evo::prelude::*;
use tracing::Level;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    println!("=== Rocket Design Sweep ===\n");

    let base = RunConfig::new()
        .with_population_size(50)
        .with_max_generations(400)
        .with_mutation(100, 5)
        .with_seed(42);

    let configs: Vec<RunConfig> = (1..=20)
        .map(|step| base.clone().with_num_fittest_percent(step * 5))
        .collect();

    let catalog = EngineCatalog::standard();
    let mut controller = RunController::with_standard_catalog(base)?;
    let results = controller.sweep(configs)?;

    println!("\n{:<36} {:>12} {:>12}", "run", "final max", "final avg");
    for (label, history) in &results {
        if let Some(last) = history.last() {
            println!("{:<36} {:>12.2} {:>12.2}", label, last.max, last.average);
        }
    }

    // The controller still holds the final run of the sweep
    if let Some(report) = controller.report() {
        println!("\n{}", report.summary());
        println!("\nBest rocket (bottom stage first):");
        for (i, stage) in report.best_genome.stages().enumerate() {
            let engine = catalog.lookup(stage.engine_id)?;
            println!(
                "  stage {}: {:<10} fuel {:>5}",
                i, engine.name, stage.fuel_size
            );
        }
    }

    Ok(())
}
