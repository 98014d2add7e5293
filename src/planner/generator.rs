use std::sync::Arc;

use rand::RngCore;
use tracing::{debug, info, warn};

use crate::catalog::{CatalogQuery, FoodCatalog};
use crate::error::{PairingError, Result};
use crate::models::{Nutrition, Plate, PlateItem, PlateRequest, PlateSource};
use crate::pairing::PairingStrategy;
use crate::planner::composer::{compose_rule_based, plate_item};
use crate::planner::constants::{AI_POOL_SAMPLE, MIN_PLATE_ITEMS};
use crate::planner::scaler::scale_plate;
use crate::planner::templates::{plate_description, plate_name};

/// Produces plates from a catalog, optionally asking a pairing strategy first.
pub struct PlateGenerator {
    catalog: Arc<dyn FoodCatalog>,
    pairing: Option<Arc<dyn PairingStrategy>>,
}

impl PlateGenerator {
    pub fn new(catalog: Arc<dyn FoodCatalog>) -> Self {
        Self {
            catalog,
            pairing: None,
        }
    }

    pub fn with_pairing(mut self, pairing: Arc<dyn PairingStrategy>) -> Self {
        self.pairing = Some(pairing);
        self
    }

    pub fn has_pairing(&self) -> bool {
        self.pairing.is_some()
    }

    pub fn catalog(&self) -> &dyn FoodCatalog {
        self.catalog.as_ref()
    }

    /// Generate a plate scaled to exactly `request.target_calories`.
    ///
    /// The pairing strategy is tried once when configured. Any failure there
    /// is logged and the rule-based composer is used instead; only an
    /// exhausted catalog is returned as an error.
    pub async fn generate(
        &self,
        request: &PlateRequest,
        rng: &mut (dyn RngCore + Send),
    ) -> Result<Plate> {
        if let Some(pairing) = &self.pairing {
            match self.try_pairing(pairing.as_ref(), request, rng).await {
                Ok(plate) => {
                    info!(goal = %request.goal, items = plate.len(), "Generated AI-paired plate");
                    return Ok(scale_plate(plate, request.target_calories));
                }
                Err(e) => {
                    warn!(goal = %request.goal, "AI pairing failed, using rule-based composer: {e}");
                }
            }
        }

        self.generate_rule_based(request, rng)
    }

    /// Rule-based generation only. Never calls the pairing strategy.
    pub fn generate_rule_based(
        &self,
        request: &PlateRequest,
        rng: &mut dyn RngCore,
    ) -> Result<Plate> {
        let composition = compose_rule_based(self.catalog.as_ref(), request, rng)?;
        let plate = assemble(request, composition.items, composition.source);
        debug!(
            goal = %request.goal,
            source = ?plate.source,
            "Composed {} items at {} kcal before scaling",
            plate.len(),
            plate.total_nutrition.calories
        );
        Ok(scale_plate(plate, request.target_calories))
    }

    async fn try_pairing(
        &self,
        pairing: &dyn PairingStrategy,
        request: &PlateRequest,
        rng: &mut (dyn RngCore + Send),
    ) -> std::result::Result<Plate, PairingError> {
        let query = CatalogQuery::for_goal(request.goal, request.busy_life_only);
        let candidates = self.catalog.sample_random(&query, AI_POOL_SAMPLE, rng);
        if candidates.len() < MIN_PLATE_ITEMS {
            return Err(PairingError::PoolTooSmall(candidates.len()));
        }

        let selections = pairing.select_foods(&candidates, request).await?;
        let items = selections
            .iter()
            .map(|s| plate_item(&s.food, s.portion_grams))
            .collect();

        Ok(assemble(request, items, PlateSource::Ai))
    }
}

/// Wrap composed items in a plate with goal templates and a fresh total.
fn assemble(request: &PlateRequest, items: Vec<PlateItem>, source: PlateSource) -> Plate {
    let total_nutrition = Nutrition::total(items.iter().map(|i| &i.nutrition));
    Plate {
        goal: request.goal,
        name: plate_name(request.goal),
        description: plate_description(request.goal, request.target_calories, source),
        items,
        total_nutrition,
        target_calories: request.target_calories,
        is_busy_life_friendly: request.busy_life_only && source != PlateSource::Fallback,
        source,
    }
}
