use std::fmt::Write;

use crate::models::{FoodItem, PlateRequest};
use crate::planner::templates::goal_label;

/// Render the food-pairing prompt for a candidate pool.
pub fn render_prompt(candidates: &[FoodItem], request: &PlateRequest) -> String {
    let goal = goal_label(request.goal).en;
    let busy_hint = if request.busy_life_only {
        " The person has a busy life, so every food must be quick to prepare."
    } else {
        ""
    };

    let mut prompt = format!(
        "You are a Sri Lankan nutritionist. Build one {goal} rice-and-curry plate \
         totalling about {target} kcal.{busy_hint}\n\n\
         Choose ONLY from these foods, listed as \"name\" (category, kcal per 100g):\n",
        target = request.target_calories,
    );

    for food in candidates {
        // Writing to a String cannot fail.
        let _ = writeln!(
            prompt,
            "\"{}\" ({}, {:.0})",
            food.name.en, food.category, food.nutrition.calories
        );
    }

    let _ = write!(
        prompt,
        "\nPick exactly 4 or 5 foods: one rice or other staple, one protein or dhal, \
         one or two vegetables, and optionally one sambol or mallung. \
         Choose gram portions so the combined calories come close to {target} kcal.\n\
         Reply with only a JSON array and no other text, for example:\n\
         [{{\"name\": \"<food name from the list>\", \"portionGrams\": 150}}]\n",
        target = request.target_calories,
    );

    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FoodCategory, Goal, LocalizedText, Nutrition};

    fn food(name: &str, category: FoodCategory, calories: f64) -> FoodItem {
        FoodItem {
            id: name.to_lowercase(),
            name: LocalizedText::new(name),
            category,
            nutrition: Nutrition {
                calories,
                ..Default::default()
            },
            preparation_methods: Vec::new(),
            is_common: true,
            is_affordable: true,
            role: None,
        }
    }

    #[test]
    fn test_prompt_lists_candidates_and_target() {
        let foods = vec![
            food("Red Rice", FoodCategory::Rice, 130.0),
            food("Pol Sambol", FoodCategory::Dish("sambol".to_string()), 210.4),
        ];
        let request = PlateRequest::new(Goal::Diabetes, 1800);
        let prompt = render_prompt(&foods, &request);

        assert!(prompt.contains("\"Red Rice\" (rice, 130)"));
        assert!(prompt.contains("\"Pol Sambol\" (sambol, 210)"));
        assert!(prompt.contains("Diabetes-Friendly"));
        assert!(prompt.contains("1800 kcal"));
        assert!(prompt.contains("\"portionGrams\""));
        assert!(!prompt.contains("busy life"));
    }

    #[test]
    fn test_prompt_mentions_busy_life() {
        let request = PlateRequest::new(Goal::WeightLoss, 1500).busy_life(true);
        let prompt = render_prompt(&[], &request);
        assert!(prompt.contains("busy life"));
    }
}
