use tracing::debug;

use crate::models::Plate;
use crate::planner::constants::{MAX_PORTION_GRAMS, MIN_PORTION_GRAMS};

/// Round and clamp a gram figure into the allowed portion range.
pub fn clamp_portion(grams: f64) -> u32 {
    if !grams.is_finite() {
        return MIN_PORTION_GRAMS;
    }
    grams
        .round()
        .clamp(MIN_PORTION_GRAMS as f64, MAX_PORTION_GRAMS as f64) as u32
}

/// Rescale a composed plate so its total calories equal `target_calories`.
///
/// Every item is scaled by the same factor, clamped to the portion range,
/// and its nutrition recomputed from the effective (post-clamp) factor.
/// The rounding residual is then absorbed by the first item, so the first
/// item's calories may drift from what its grams imply.
///
/// Plates with no items or a non-positive total are returned unchanged.
pub fn scale_plate(mut plate: Plate, target_calories: u32) -> Plate {
    let current_total = plate.total_nutrition.calories;
    if current_total <= 0.0 || plate.items.is_empty() {
        return plate;
    }

    let target = target_calories as f64;
    let scale_factor = target / current_total;

    for item in &mut plate.items {
        let old_grams = item.portion_grams;
        if old_grams == 0 {
            continue;
        }
        let new_grams = clamp_portion(old_grams as f64 * scale_factor);
        let item_scale = new_grams as f64 / old_grams as f64;

        item.nutrition = item.nutrition.scaled(item_scale);
        item.portion_grams = new_grams;
    }

    plate.recompute_total();

    let diff = target - plate.total_nutrition.calories.round();
    if let Some(first) = plate.items.first_mut() {
        first.nutrition.calories = (first.nutrition.calories + diff).max(0.0);
    }
    plate.total_nutrition.calories = target;

    debug!(
        "Scaled plate by {:.3} ({} -> {} kcal, residual {})",
        scale_factor, current_total, target_calories, diff
    );

    plate
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        Goal, LocalizedText, Nutrition, Plate, PlateItem, PlateSource,
    };

    fn item(name: &str, grams: u32, calories: f64, protein: f64) -> PlateItem {
        PlateItem {
            food_id: name.to_lowercase(),
            name: LocalizedText::new(name),
            portion_grams: grams,
            nutrition: Nutrition {
                calories,
                protein,
                carbs: calories / 8.0,
                fat: 1.3,
                fiber: 2.1,
                glycemic_index: None,
            },
        }
    }

    fn plate(items: Vec<PlateItem>) -> Plate {
        let mut plate = Plate {
            goal: Goal::GeneralHealth,
            name: LocalizedText::new("Test"),
            description: LocalizedText::new("Test plate"),
            items,
            total_nutrition: Nutrition::default(),
            target_calories: 0,
            is_busy_life_friendly: false,
            source: PlateSource::Rules,
        };
        plate.recompute_total();
        plate
    }

    #[test]
    fn test_clamp_portion() {
        assert_eq!(clamp_portion(4.2), MIN_PORTION_GRAMS);
        assert_eq!(clamp_portion(123.5), 124);
        assert_eq!(clamp_portion(9000.0), MAX_PORTION_GRAMS);
        assert_eq!(clamp_portion(f64::NAN), MIN_PORTION_GRAMS);
    }

    #[test]
    fn test_scale_hits_exact_target() {
        let p = plate(vec![
            item("Red Rice", 200, 260.0, 5.4),
            item("Dhal Curry", 150, 177.0, 9.0),
            item("Gotukola Mallung", 80, 58.0, 2.1),
            item("Beans Curry", 100, 71.0, 2.0),
        ]);

        let scaled = scale_plate(p, 1800);
        assert_eq!(scaled.total_nutrition.calories, 1800.0);

        let sum: f64 = scaled.items.iter().map(|i| i.nutrition.calories).sum();
        assert_eq!(sum, 1800.0);
    }

    #[test]
    fn test_scale_respects_portion_bounds() {
        // Tiny portion that would scale far past the ceiling.
        let p = plate(vec![
            item("Coconut Sambol", 10, 35.0, 0.4),
            item("Cucumber", 400, 60.0, 2.6),
            item("Rice", 100, 130.0, 2.7),
            item("Dhal", 100, 116.0, 9.0),
        ]);

        let scaled = scale_plate(p, 3500);
        for i in &scaled.items {
            assert!(
                (MIN_PORTION_GRAMS..=MAX_PORTION_GRAMS).contains(&i.portion_grams),
                "{} has {}g",
                i.name.en,
                i.portion_grams
            );
        }
        assert_eq!(scaled.total_nutrition.calories, 3500.0);
    }

    #[test]
    fn test_item_nutrition_uses_effective_scale() {
        let p = plate(vec![
            item("A", 400, 400.0, 10.0),
            item("B", 100, 100.0, 10.0),
            item("C", 100, 100.0, 10.0),
            item("D", 100, 100.0, 10.0),
        ]);

        // Factor 2.0: A would be 800g but is clamped to 500g (effective 1.25).
        let scaled = scale_plate(p, 1400);
        let b = &scaled.items[1];
        assert_eq!(b.portion_grams, 200);
        assert_eq!(b.nutrition.calories, 200.0);
        assert_eq!(b.nutrition.protein, 20.0);

        let a = &scaled.items[0];
        assert_eq!(a.portion_grams, 500);
        assert_eq!(a.nutrition.protein, 12.5);
        // 500 + 200 * 3 = 1100, residual 300 goes to the first item.
        assert_eq!(a.nutrition.calories, 800.0);
    }

    #[test]
    fn test_macros_are_rounded_to_one_decimal() {
        let p = plate(vec![
            item("A", 150, 150.0, 3.3),
            item("B", 150, 150.0, 3.3),
            item("C", 150, 150.0, 3.3),
            item("D", 150, 150.0, 3.3),
        ]);
        let scaled = scale_plate(p, 1000);
        for i in &scaled.items {
            let tenths = i.nutrition.protein * 10.0;
            assert!((tenths - tenths.round()).abs() < 1e-9);
            assert_eq!(i.nutrition.calories, i.nutrition.calories.round());
        }
    }

    #[test]
    fn test_degenerate_plates_unchanged() {
        let empty = scale_plate(plate(Vec::new()), 2000);
        assert!(empty.items.is_empty());
        assert_eq!(empty.total_nutrition.calories, 0.0);

        let zero = scale_plate(plate(vec![item("Water", 250, 0.0, 0.0)]), 2000);
        assert_eq!(zero.items[0].portion_grams, 250);
        assert_eq!(zero.total_nutrition.calories, 0.0);
    }

    #[test]
    fn test_first_item_calories_never_negative() {
        let p = plate(vec![
            item("A", 10, 1.0, 0.0),
            item("B", 10, 500.0, 0.0),
            item("C", 10, 500.0, 0.0),
            item("D", 10, 500.0, 0.0),
        ]);
        // Factor < 1 but every item is already at the floor.
        let scaled = scale_plate(p, 100);
        assert_eq!(scaled.items[0].nutrition.calories, 0.0);
        assert_eq!(scaled.total_nutrition.calories, 100.0);
    }
}
