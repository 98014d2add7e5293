use std::collections::HashMap;

use rand::RngCore;

use crate::catalog::matches_goal;
use crate::models::{FoodItem, Nutrition, Plate, PlateRequest, PlateSource};
use crate::planner::PlateGenerator;
use crate::planner::constants::{MAX_PLATE_ITEMS, MAX_PORTION_GRAMS, MIN_PLATE_ITEMS, MIN_PORTION_GRAMS};

/// A property every generated plate must satisfy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Property {
    /// Total calories equal the target exactly.
    ExactCalories,
    /// Total nutrition equals the sum of the items.
    AggregateConsistency,
    /// Every portion lies within the gram bounds.
    PortionBounds,
    /// Between the minimum and maximum number of items.
    ItemCount,
    /// Rule-path plates only use foods that suit the goal.
    GoalFilter,
    /// Busy-life rule-path plates only use quick-prep foods.
    BusyLife,
}

impl Property {
    pub const ALL: [Property; 6] = [
        Property::ExactCalories,
        Property::AggregateConsistency,
        Property::PortionBounds,
        Property::ItemCount,
        Property::GoalFilter,
        Property::BusyLife,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Property::ExactCalories => "exact_calories",
            Property::AggregateConsistency => "aggregate",
            Property::PortionBounds => "portions",
            Property::ItemCount => "item_count",
            Property::GoalFilter => "goal_filter",
            Property::BusyLife => "busy_life",
        }
    }
}

/// Macro sums may drift by one rounding step per item.
const MACRO_TOLERANCE_PER_ITEM: f64 = 0.051;

/// Return every property `plate` violates for `request`.
pub fn check_plate(
    plate: &Plate,
    request: &PlateRequest,
    foods: &HashMap<&str, &FoodItem>,
) -> Vec<Property> {
    let mut failed = Vec::new();
    let total = &plate.total_nutrition;

    if total.calories != request.target_calories as f64 {
        failed.push(Property::ExactCalories);
    }

    let tolerance = MACRO_TOLERANCE_PER_ITEM * plate.len() as f64;
    let sum = |f: fn(&Nutrition) -> f64| -> f64 {
        plate.items.iter().map(|i| f(&i.nutrition)).sum()
    };
    let consistent = sum(|n| n.calories) == total.calories
        && (sum(|n| n.protein) - total.protein).abs() <= tolerance
        && (sum(|n| n.carbs) - total.carbs).abs() <= tolerance
        && (sum(|n| n.fat) - total.fat).abs() <= tolerance
        && (sum(|n| n.fiber) - total.fiber).abs() <= tolerance;
    if !consistent {
        failed.push(Property::AggregateConsistency);
    }

    if plate
        .items
        .iter()
        .any(|i| !(MIN_PORTION_GRAMS..=MAX_PORTION_GRAMS).contains(&i.portion_grams))
    {
        failed.push(Property::PortionBounds);
    }

    if !(MIN_PLATE_ITEMS..=MAX_PLATE_ITEMS).contains(&plate.len()) {
        failed.push(Property::ItemCount);
    }

    // The fallback path deliberately drops goal and busy-life filters.
    if plate.source == PlateSource::Rules {
        let plate_foods: Vec<Option<&FoodItem>> = plate
            .items
            .iter()
            .map(|i| foods.get(i.food_id.as_str()).copied())
            .collect();

        if plate_foods
            .iter()
            .any(|f| f.is_none_or(|food| !matches_goal(request.goal, food)))
        {
            failed.push(Property::GoalFilter);
        }

        if request.busy_life_only
            && plate_foods
                .iter()
                .any(|f| f.is_none_or(|food| !food.is_quick_prep()))
        {
            failed.push(Property::BusyLife);
        }
    }

    failed
}

/// Outcome of many runs of one goal / target / busy-life combination.
#[derive(Debug, Clone)]
pub struct ComboResult {
    pub request: PlateRequest,
    pub runs: usize,
    pub errors: usize,
    pub fallbacks: usize,
    pub failures: HashMap<Property, usize>,
    pub avg_items: f64,
}

impl ComboResult {
    pub fn failure_count(&self, property: Property) -> usize {
        self.failures.get(&property).copied().unwrap_or(0)
    }

    /// Share of runs that satisfied `property`, in percent.
    pub fn pass_rate(&self, property: Property) -> f64 {
        if self.runs == 0 {
            return 100.0;
        }
        100.0 * (self.runs - self.failure_count(property)) as f64 / self.runs as f64
    }

    pub fn all_passed(&self) -> bool {
        self.errors == 0 && self.failures.values().all(|&count| count == 0)
    }
}

/// Generate `iterations` rule-based plates for `request` and tally violations.
pub fn evaluate_combo(
    generator: &PlateGenerator,
    foods: &HashMap<&str, &FoodItem>,
    request: PlateRequest,
    iterations: usize,
    rng: &mut dyn RngCore,
) -> ComboResult {
    let mut result = ComboResult {
        request,
        runs: 0,
        errors: 0,
        fallbacks: 0,
        failures: HashMap::new(),
        avg_items: 0.0,
    };
    let mut total_items = 0usize;

    for _ in 0..iterations {
        result.runs += 1;
        let plate = match generator.generate_rule_based(&request, rng) {
            Ok(plate) => plate,
            Err(_) => {
                result.errors += 1;
                continue;
            }
        };

        if plate.source == PlateSource::Fallback {
            result.fallbacks += 1;
        }
        total_items += plate.len();

        for property in check_plate(&plate, &request, foods) {
            *result.failures.entry(property).or_insert(0) += 1;
        }
    }

    let generated = result.runs - result.errors;
    if generated > 0 {
        result.avg_items = total_items as f64 / generated as f64;
    }

    result
}
