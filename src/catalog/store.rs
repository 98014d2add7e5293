use std::collections::HashMap;

use rand::RngCore;
use rand::seq::SliceRandom;

use crate::catalog::query::CatalogQuery;
use crate::models::FoodItem;

/// Read-only food catalog supporting filtered random sampling.
pub trait FoodCatalog: Send + Sync {
    /// Draw up to `limit` distinct matching foods, in random order.
    fn sample_random(
        &self,
        query: &CatalogQuery,
        limit: usize,
        rng: &mut dyn RngCore,
    ) -> Vec<FoodItem>;

    /// Number of foods in the catalog, eligible or not.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Catalog held in memory, in load order.
pub struct InMemoryCatalog {
    foods: Vec<FoodItem>,
    /// Lowercase English name -> index into `foods`.
    by_name: HashMap<String, usize>,
}

impl InMemoryCatalog {
    /// Build a catalog. Later duplicates (by id) replace earlier ones in place.
    pub fn new(foods: Vec<FoodItem>) -> Self {
        let mut deduped: Vec<FoodItem> = Vec::with_capacity(foods.len());
        let mut by_id: HashMap<String, usize> = HashMap::new();
        for food in foods {
            match by_id.get(&food.id) {
                Some(&idx) => deduped[idx] = food,
                None => {
                    by_id.insert(food.id.clone(), deduped.len());
                    deduped.push(food);
                }
            }
        }

        let by_name = deduped
            .iter()
            .enumerate()
            .map(|(idx, food)| (food.key(), idx))
            .collect();

        Self {
            foods: deduped,
            by_name,
        }
    }

    /// Get a food by English name (case-insensitive).
    pub fn get_food(&self, name: &str) -> Option<&FoodItem> {
        self.by_name
            .get(&name.to_lowercase())
            .map(|&idx| &self.foods[idx])
    }

    /// All foods matching a query, in catalog order.
    pub fn filter(&self, query: &CatalogQuery) -> Vec<&FoodItem> {
        self.foods.iter().filter(|f| query.matches(f)).collect()
    }

    /// All foods.
    pub fn all_foods(&self) -> &[FoodItem] {
        &self.foods
    }
}

impl FoodCatalog for InMemoryCatalog {
    fn sample_random(
        &self,
        query: &CatalogQuery,
        limit: usize,
        rng: &mut dyn RngCore,
    ) -> Vec<FoodItem> {
        self.filter(query)
            .choose_multiple(rng, limit)
            .map(|food| (*food).clone())
            .collect()
    }

    fn len(&self) -> usize {
        self.foods.len()
    }
}
