use std::collections::HashSet;

use rand::RngCore;
use rand::seq::SliceRandom;
use tracing::debug;

use crate::catalog::{CatalogQuery, FoodCatalog, Pool};
use crate::error::{PlateError, Result};
use crate::models::{FoodItem, PlateItem, PlateRequest, PlateSource};
use crate::planner::constants::*;

/// Grams of `food` that deliver `role_calories`, never below the minimum
/// portion. The upper bound is applied by the scaler.
pub fn portion_for(food: &FoodItem, role_calories: f64) -> u32 {
    let per_100g = food.nutrition.calories;
    if per_100g <= 0.0 {
        return DEFAULT_PORTION_GRAMS;
    }
    let grams = (100.0 * role_calories / per_100g).round();
    if !grams.is_finite() {
        return DEFAULT_PORTION_GRAMS;
    }
    // `as` saturates at u32::MAX
    grams.max(MIN_PORTION_GRAMS as f64) as u32
}

/// A plate item for `grams` of `food`.
pub fn plate_item(food: &FoodItem, grams: u32) -> PlateItem {
    PlateItem {
        food_id: food.id.clone(),
        name: food.name.clone(),
        portion_grams: grams,
        nutrition: food.nutrition.for_portion(grams),
    }
}

/// Items chosen by the composer and the path that chose them.
#[derive(Debug, Clone)]
pub struct Composition {
    pub items: Vec<PlateItem>,
    pub source: PlateSource,
}

/// Random per-pool samples drawn for one request.
#[derive(Debug, Clone, Default)]
pub struct RoleSamples {
    pub staples: Vec<FoodItem>,
    pub legumes: Vec<FoodItem>,
    pub vegetables: Vec<FoodItem>,
    pub dishes: Vec<FoodItem>,
}

impl RoleSamples {
    pub fn draw(catalog: &dyn FoodCatalog, request: &PlateRequest, rng: &mut dyn RngCore) -> Self {
        let base = CatalogQuery::for_goal(request.goal, request.busy_life_only);
        let mut sample = |pool: Pool, limit: usize| {
            catalog.sample_random(&base.in_pool(pool), limit, &mut *rng)
        };

        let samples = Self {
            staples: sample(Pool::Staple, STAPLE_SAMPLE),
            legumes: sample(Pool::Legume, LEGUME_SAMPLE),
            vegetables: sample(Pool::Vegetable, VEGETABLE_SAMPLE),
            dishes: sample(Pool::Dish, DISH_SAMPLE),
        };

        debug!(
            "Sampled {} staples, {} legumes, {} vegetables, {} dishes for {}",
            samples.staples.len(),
            samples.legumes.len(),
            samples.vegetables.len(),
            samples.dishes.len(),
            request.goal
        );

        samples
    }

    /// Every sampled food once, in pool order.
    pub fn combined(&self) -> Vec<&FoodItem> {
        let mut seen = HashSet::new();
        self.staples
            .iter()
            .chain(&self.legumes)
            .chain(&self.vegetables)
            .chain(&self.dishes)
            .filter(|f| seen.insert(f.id.as_str()))
            .collect()
    }
}

/// Accumulates role picks, never using a food twice.
struct PlateBuilder {
    target: f64,
    items: Vec<PlateItem>,
    used: HashSet<String>,
}

impl PlateBuilder {
    fn new(target_calories: u32) -> Self {
        Self {
            target: target_calories as f64,
            items: Vec::new(),
            used: HashSet::new(),
        }
    }

    fn is_unused(&self, food: &FoodItem) -> bool {
        !self.used.contains(&food.id)
    }

    fn add(&mut self, food: &FoodItem, role_calories: f64) {
        let grams = portion_for(food, role_calories);
        debug!(
            "Picked {} for {:.0} kcal -> {}g",
            food.name.en, role_calories, grams
        );
        self.used.insert(food.id.clone());
        self.items.push(plate_item(food, grams));
    }

    /// Pick one unused candidate at random and allocate `share` of the target.
    fn pick<'a, I>(&mut self, candidates: I, share: f64, rng: &mut dyn RngCore) -> bool
    where
        I: IntoIterator<Item = &'a FoodItem>,
    {
        let unused: Vec<&FoodItem> = candidates
            .into_iter()
            .filter(|f| self.is_unused(f))
            .collect();
        match unused.choose(rng) {
            Some(food) => {
                self.add(food, self.target * share);
                true
            }
            None => false,
        }
    }

    fn len(&self) -> usize {
        self.items.len()
    }
}

/// Rule-based composition: staple, protein, vegetable, a fourth item and an
/// optional condiment, topped up to the minimum plate size.
///
/// When the filtered samples hold fewer than the minimum number of foods the
/// goal and busy-life filters are dropped (see [`compose_fallback`]).
pub fn compose_rule_based(
    catalog: &dyn FoodCatalog,
    request: &PlateRequest,
    rng: &mut dyn RngCore,
) -> Result<Composition> {
    let samples = RoleSamples::draw(catalog, request, rng);
    let pool = samples.combined();
    if pool.len() < MIN_PLATE_ITEMS {
        debug!(
            "Only {} foods match {} (busy life: {}), using eligibility-only fallback",
            pool.len(),
            request.goal,
            request.busy_life_only
        );
        return compose_fallback(catalog, request.target_calories, rng);
    }

    let mut builder = PlateBuilder::new(request.target_calories);

    // 1. Staple
    builder.pick(&samples.staples, STAPLE_SHARE, rng);

    // 2. Protein: legumes plus dhal/curry dishes
    let proteins = samples
        .legumes
        .iter()
        .chain(samples.dishes.iter().filter(|f| f.is_protein_dish()));
    builder.pick(proteins, PROTEIN_SHARE, rng);

    // 3. First vegetable
    builder.pick(&samples.vegetables, VEGETABLE_SHARE, rng);

    // 4. Second vegetable, else a meat/fish/egg dish
    if !builder.pick(&samples.vegetables, FOURTH_SHARE, rng) {
        let meats = samples
            .legumes
            .iter()
            .chain(&samples.dishes)
            .filter(|f| f.is_meat_dish());
        builder.pick(meats, FOURTH_SHARE, rng);
    }

    // 5. Optional condiment
    let condiments = samples.dishes.iter().filter(|f| f.is_condiment());
    builder.pick(condiments, CONDIMENT_SHARE, rng);

    // 6. Top up from anything sampled
    if builder.len() < MIN_PLATE_ITEMS {
        let top_up_calories = TOP_UP_MIN_CALORIES.max(TOP_UP_SHARE * builder.target);
        let mut rest: Vec<&FoodItem> = pool.into_iter().filter(|f| builder.is_unused(f)).collect();
        rest.shuffle(rng);
        for food in rest {
            if builder.len() >= MIN_PLATE_ITEMS {
                break;
            }
            builder.add(food, top_up_calories);
        }
    }

    Ok(Composition {
        items: builder.items,
        source: PlateSource::Rules,
    })
}

/// Eligibility-only sample with the target split evenly across the items.
pub fn compose_fallback(
    catalog: &dyn FoodCatalog,
    target_calories: u32,
    rng: &mut dyn RngCore,
) -> Result<Composition> {
    let foods = catalog.sample_random(&CatalogQuery::eligible_only(), FALLBACK_SAMPLE, rng);
    if foods.len() < MIN_PLATE_ITEMS {
        return Err(PlateError::CatalogInsufficient {
            found: foods.len(),
            required: MIN_PLATE_ITEMS,
        });
    }

    let share = target_calories as f64 / foods.len() as f64;
    let items = foods
        .iter()
        .map(|food| plate_item(food, portion_for(food, share)))
        .collect();

    Ok(Composition {
        items,
        source: PlateSource::Fallback,
    })
}
