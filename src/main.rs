use std::path::Path;
use std::sync::Arc;

use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use lanka_plate_rs::catalog::{CatalogQuery, InMemoryCatalog, load_catalog};
use lanka_plate_rs::cli::{Cli, Command};
use lanka_plate_rs::config::Config;
use lanka_plate_rs::error::{PlateError, Result};
use lanka_plate_rs::interface::{
    display_food_list, display_plate, fuzzy_find, prompt_calories, prompt_goal, prompt_yes_no,
};
use lanka_plate_rs::models::{FoodItem, Goal, PlateRequest};
use lanka_plate_rs::pairing::{LlmPairing, OpenAiCompatibleClient};
use lanka_plate_rs::planner::PlateGenerator;
use lanka_plate_rs::server::run_server;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env()?;
    let catalog_path = cli
        .catalog
        .clone()
        .unwrap_or_else(|| config.catalog_path.clone());

    match cli.command.unwrap_or_default() {
        Command::Serve { bind, port } => {
            let generator = build_generator(&config, &catalog_path, true)?;
            let bind = bind.unwrap_or_else(|| config.bind.clone());
            let port = port.unwrap_or(config.port);
            run_server(generator, &bind, port).await
        }
        Command::Generate {
            goal,
            calories,
            language,
            busy_life,
            seed,
            no_ai,
        } => {
            let generator = build_generator(&config, &catalog_path, !no_ai)?;
            cmd_generate(&generator, goal, calories, &language, busy_life, seed).await
        }
        Command::Foods {
            goal,
            busy_life,
            search,
        } => cmd_foods(&catalog_path, goal.as_deref(), busy_life, search.as_deref()),
    }
}

/// Load the catalog and attach AI pairing when an API key is configured.
fn build_generator(config: &Config, catalog_path: &Path, use_ai: bool) -> Result<PlateGenerator> {
    let catalog = load_catalog(catalog_path)?;
    info!(
        "Loaded {} foods from {}",
        catalog.all_foods().len(),
        catalog_path.display()
    );

    let generator = PlateGenerator::new(Arc::new(catalog));
    match (&config.completion, use_ai) {
        (Some(settings), true) => {
            let client = OpenAiCompatibleClient::new(settings)
                .map_err(|e| PlateError::Config(format!("Cannot build completion client: {e}")))?;
            info!("AI pairing enabled with model {}", client.model());
            Ok(generator.with_pairing(Arc::new(LlmPairing::new(Arc::new(client)))))
        }
        _ => Ok(generator),
    }
}

/// Generate plates until the user declines another.
async fn cmd_generate(
    generator: &PlateGenerator,
    goal: Option<String>,
    calories: Option<u32>,
    language: &str,
    busy_life: bool,
    seed: Option<u64>,
) -> Result<()> {
    let interactive = goal.is_none() || calories.is_none();

    let goal = match goal {
        Some(g) => g.parse::<Goal>().map_err(PlateError::InvalidInput)?,
        None => prompt_goal()?,
    };
    let calories = match calories {
        Some(0) => {
            return Err(PlateError::InvalidInput(
                "Calories must be greater than zero".to_string(),
            ));
        }
        Some(c) => c,
        None => prompt_calories()?,
    };

    let request = PlateRequest::new(goal, calories).busy_life(busy_life);
    let mut rng = match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    };

    loop {
        let plate = generator.generate(&request, &mut rng).await?;
        display_plate(&plate, language);

        if !interactive || !prompt_yes_no("Generate another plate?", false)? {
            break;
        }
    }

    Ok(())
}

/// List eligible foods, optionally filtered by goal, busy life and name.
fn cmd_foods(
    catalog_path: &Path,
    goal: Option<&str>,
    busy_life: bool,
    search: Option<&str>,
) -> Result<()> {
    let catalog: InMemoryCatalog = load_catalog(catalog_path)?;

    let query = match goal {
        Some(g) => CatalogQuery::for_goal(g.parse().map_err(PlateError::InvalidInput)?, busy_life),
        None => CatalogQuery {
            busy_life_only: busy_life,
            ..CatalogQuery::eligible_only()
        },
    };
    let foods: Vec<&FoodItem> = catalog.filter(&query);

    match search {
        Some(term) => {
            let found = fuzzy_find(&foods, term);
            if found.is_empty() {
                println!("No matching food found for '{}'", term);
            }
            for food in found.iter().take(5) {
                debug!("{}", food.debug_string());
            }
            display_food_list(&found, &format!("Matches for '{term}'"));
        }
        None => {
            let title = match goal {
                Some(g) => format!("Eligible foods for {g}"),
                None => "Eligible foods".to_string(),
            };
            display_food_list(&foods, &title);
        }
    }

    Ok(())
}
