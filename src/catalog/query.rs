use crate::models::{FoodCategory, FoodItem, Goal, Role};
use crate::planner::constants::{
    DIABETES_MAX_GI, WEIGHT_GAIN_MIN_CALORIES, WEIGHT_LOSS_MAX_CALORIES,
};

/// Per-category pool the composer samples from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pool {
    /// Rice and other starchy bases.
    Staple,
    /// Legumes, pulses and plain proteins.
    Legume,
    Vegetable,
    /// Everything else: curries, sambols, meat dishes.
    Dish,
}

impl Pool {
    pub const ALL: [Pool; 4] = [Pool::Staple, Pool::Legume, Pool::Vegetable, Pool::Dish];

    /// Explicit role wins; untagged foods are placed by category.
    pub fn contains(self, food: &FoodItem) -> bool {
        match food.role {
            Some(role) => matches!(
                (self, role),
                (Pool::Staple, Role::Staple)
                    | (Pool::Legume, Role::Protein)
                    | (Pool::Vegetable, Role::Vegetable)
                    | (Pool::Dish, Role::Condiment)
            ),
            None => match (&food.category, self) {
                (FoodCategory::Rice, Pool::Staple) => true,
                (FoodCategory::Grains | FoodCategory::Proteins, Pool::Legume) => true,
                (FoodCategory::Vegetables, Pool::Vegetable) => true,
                (FoodCategory::Other | FoodCategory::Dish(_), Pool::Dish) => true,
                _ => false,
            },
        }
    }
}

/// Goal-specific nutrition predicate.
pub fn matches_goal(goal: Goal, food: &FoodItem) -> bool {
    let n = &food.nutrition;
    match goal {
        Goal::Diabetes => match n.glycemic_index {
            None => true,
            Some(gi) => gi == 0.0 || gi <= DIABETES_MAX_GI,
        },
        Goal::WeightLoss => n.calories <= WEIGHT_LOSS_MAX_CALORIES,
        Goal::WeightGain => n.calories >= WEIGHT_GAIN_MIN_CALORIES,
        Goal::GeneralHealth => true,
    }
}

/// A catalog filter. Eligibility (`isCommon && isAffordable`) is always applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CatalogQuery {
    pub goal: Option<Goal>,
    pub busy_life_only: bool,
    pub pool: Option<Pool>,
}

impl CatalogQuery {
    /// Goal and busy-life filtered, any pool.
    pub fn for_goal(goal: Goal, busy_life_only: bool) -> Self {
        Self {
            goal: Some(goal),
            busy_life_only,
            pool: None,
        }
    }

    /// Eligibility only: ignores goal and busy-life filters.
    pub fn eligible_only() -> Self {
        Self::default()
    }

    pub fn in_pool(self, pool: Pool) -> Self {
        Self {
            pool: Some(pool),
            ..self
        }
    }

    pub fn matches(&self, food: &FoodItem) -> bool {
        food.is_eligible()
            && self.goal.is_none_or(|goal| matches_goal(goal, food))
            && (!self.busy_life_only || food.is_quick_prep())
            && self.pool.is_none_or(|pool| pool.contains(food))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LocalizedText, Nutrition, PrepMethod};

    fn food(name: &str, category: &str, calories: f64, gi: Option<f64>) -> FoodItem {
        FoodItem {
            id: name.to_lowercase(),
            name: LocalizedText::new(name),
            category: FoodCategory::from(category.to_string()),
            nutrition: Nutrition {
                calories,
                glycemic_index: gi,
                ..Default::default()
            },
            preparation_methods: vec![PrepMethod::Curried],
            is_common: true,
            is_affordable: true,
            role: None,
        }
    }

    #[test]
    fn test_diabetes_predicate() {
        assert!(matches_goal(Goal::Diabetes, &food("Red Rice", "rice", 130.0, Some(55.0))));
        assert!(matches_goal(Goal::Diabetes, &food("Gotukola", "vegetables", 30.0, None)));
        assert!(matches_goal(Goal::Diabetes, &food("Tea", "other", 1.0, Some(0.0))));
        assert!(!matches_goal(Goal::Diabetes, &food("White Rice", "rice", 130.0, Some(73.0))));
    }

    #[test]
    fn test_weight_predicates() {
        let light = food("Cucumber", "vegetables", 15.0, None);
        let dense = food("Coconut", "other", 354.0, None);
        assert!(matches_goal(Goal::WeightLoss, &light));
        assert!(!matches_goal(Goal::WeightLoss, &dense));
        assert!(!matches_goal(Goal::WeightGain, &light));
        assert!(matches_goal(Goal::WeightGain, &dense));
        assert!(matches_goal(Goal::GeneralHealth, &dense));
    }

    #[test]
    fn test_eligibility_always_applies() {
        let mut rare = food("Kithul Flour", "grains", 350.0, None);
        rare.is_affordable = false;
        assert!(!CatalogQuery::eligible_only().matches(&rare));
        assert!(!CatalogQuery::for_goal(Goal::GeneralHealth, false).matches(&rare));
    }

    #[test]
    fn test_busy_life_requires_quick_prep() {
        let mut dhal = food("Dhal Curry", "other", 120.0, None);
        let query = CatalogQuery::for_goal(Goal::GeneralHealth, true);
        assert!(!query.matches(&dhal));
        dhal.preparation_methods.push(PrepMethod::Boiled);
        assert!(query.matches(&dhal));
    }

    #[test]
    fn test_pool_membership_prefers_explicit_role() {
        let mut kiribath = food("Kiribath", "other", 180.0, None);
        assert!(Pool::Dish.contains(&kiribath));
        assert!(!Pool::Staple.contains(&kiribath));

        kiribath.role = Some(Role::Staple);
        assert!(Pool::Staple.contains(&kiribath));
        assert!(!Pool::Dish.contains(&kiribath));

        assert!(Pool::Legume.contains(&food("Mung Beans", "grains", 105.0, None)));
        assert!(Pool::Legume.contains(&food("Eggs", "proteins", 155.0, None)));
    }
}
