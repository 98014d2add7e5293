use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use lanka_plate_rs::catalog::{InMemoryCatalog, load_foods};
use lanka_plate_rs::config::DEFAULT_CATALOG_PATH;
use lanka_plate_rs::planner::PlateGenerator;
use lanka_plate_rs::sweep::{SweepConfig, parse_targets, print_summary, run_sweep, write_csv};

#[derive(Parser, Debug)]
#[command(name = "sweep")]
#[command(about = "Randomized property sweep for the plate generator")]
struct Args {
    /// Plates generated per combination
    #[arg(long, default_value = "200")]
    iters: usize,

    /// Random seed for reproducibility
    #[arg(long, default_value = "123")]
    seed: u64,

    /// Calorie targets to evaluate (comma-separated)
    #[arg(long, default_value = "1000,1800,2500,4000")]
    targets: String,

    /// Path to the food catalog
    #[arg(long, default_value = DEFAULT_CATALOG_PATH)]
    catalog: PathBuf,

    /// Output CSV file for per-combination results
    #[arg(long, default_value = "sweep_results.csv")]
    csv: PathBuf,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let foods = match load_foods(&args.catalog) {
        Ok(foods) => foods,
        Err(e) => {
            eprintln!("Error loading catalog {:?}: {}", args.catalog, e);
            std::process::exit(1);
        }
    };
    println!("Loaded {} foods from {:?}", foods.len(), args.catalog);

    let targets = parse_targets(&args.targets);
    if targets.is_empty() {
        eprintln!("Error: no valid calorie targets provided");
        std::process::exit(1);
    }
    println!("Testing targets: {:?}", targets);

    let catalog = Arc::new(InMemoryCatalog::new(foods));
    let config = SweepConfig {
        iterations: args.iters,
        seed: args.seed,
        targets,
    };

    let generator = PlateGenerator::new(catalog.clone());
    let results = run_sweep(&config, &generator, catalog.all_foods());

    print_summary(&results.combos);

    if let Err(e) = write_csv(&results.combos, &args.csv) {
        eprintln!("Error writing CSV: {}", e);
    } else {
        println!("Wrote results to {:?}", args.csv);
    }

    let failed = results.failed_combos().count();
    if failed > 0 {
        eprintln!("{} of {} combinations violated a property", failed, results.combos.len());
        std::process::exit(1);
    }
    println!("All properties held.");
}
