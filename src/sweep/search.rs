use std::collections::HashMap;

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::models::{FoodItem, Goal, PlateRequest};
use crate::planner::PlateGenerator;
use crate::sweep::evaluation::{ComboResult, evaluate_combo};

/// Configuration for a property sweep.
#[derive(Debug, Clone)]
pub struct SweepConfig {
    pub iterations: usize,
    pub seed: u64,
    pub targets: Vec<u32>,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            iterations: 200,
            seed: 123,
            targets: vec![1000, 1800, 2500, 4000],
        }
    }
}

/// Results from a sweep, one entry per goal × target × busy-life combination.
pub struct SweepResults {
    pub combos: Vec<ComboResult>,
}

impl SweepResults {
    pub fn all_passed(&self) -> bool {
        self.combos.iter().all(ComboResult::all_passed)
    }

    pub fn failed_combos(&self) -> impl Iterator<Item = &ComboResult> {
        self.combos.iter().filter(|c| !c.all_passed())
    }
}

/// Run the rule-based generator over every combination with a single seeded RNG.
pub fn run_sweep(config: &SweepConfig, generator: &PlateGenerator, foods: &[FoodItem]) -> SweepResults {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let index: HashMap<&str, &FoodItem> = foods.iter().map(|f| (f.id.as_str(), f)).collect();
    let mut combos = Vec::new();

    println!(
        "Running {} iterations for {} combinations...",
        config.iterations,
        Goal::ALL.len() * config.targets.len() * 2
    );

    for goal in Goal::ALL {
        for &target in &config.targets {
            for busy_life in [false, true] {
                let request = PlateRequest::new(goal, target).busy_life(busy_life);
                let result = evaluate_combo(generator, &index, request, config.iterations, &mut rng);
                if !result.all_passed() {
                    println!(
                        "  FAIL {} {} kcal busy={} ({} errors)",
                        goal, target, busy_life, result.errors
                    );
                }
                combos.push(result);
            }
        }
    }

    SweepResults { combos }
}

/// Parse a comma-separated list of calorie targets, skipping junk and zeros.
pub fn parse_targets(s: &str) -> Vec<u32> {
    s.split(',')
        .filter_map(|part| part.trim().parse().ok())
        .filter(|&t: &u32| t > 0)
        .collect()
}
