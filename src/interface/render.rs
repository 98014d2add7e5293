use crate::models::{FoodItem, Plate, PlateSource};

/// Display a generated plate as a formatted table.
pub fn display_plate(plate: &Plate, language: &str) {
    if plate.is_empty() {
        println!("No plate generated.");
        return;
    }

    println!();
    println!("=== {} ===", plate.name.resolve(language));
    println!("{}", plate.description.resolve(language));
    println!();

    // Find max food name length for alignment
    let max_name_len = plate
        .items
        .iter()
        .map(|i| i.name.resolve(language).chars().count())
        .max()
        .unwrap_or(10);

    for (i, item) in plate.items.iter().enumerate() {
        let n = &item.nutrition;
        println!(
            "{:>3}. {:<width$} {:>4}g - {:>5.0} cal | P:{:.1} C:{:.1} F:{:.1} Fb:{:.1}",
            i + 1,
            item.name.resolve(language),
            item.portion_grams,
            n.calories,
            n.protein,
            n.carbs,
            n.fat,
            n.fiber,
            width = max_name_len
        );
    }

    let total = &plate.total_nutrition;
    println!();
    println!("--- Summary ---");
    println!("Goal: {}", plate.goal);
    println!("Total calories: {:.0} (target {})", total.calories, plate.target_calories);
    println!(
        "Protein: {:.1}g  Carbs: {:.1}g  Fat: {:.1}g  Fiber: {:.1}g",
        total.protein, total.carbs, total.fat, total.fiber
    );
    println!("Source: {}", source_label(plate.source));
    if plate.is_busy_life_friendly {
        println!("Busy-life friendly: quick preparation only");
    }
    println!();
}

fn source_label(source: PlateSource) -> &'static str {
    match source {
        PlateSource::Ai => "AI pairing",
        PlateSource::Rules => "rule-based",
        PlateSource::Fallback => "fallback (goal filters relaxed)",
    }
}

/// Display a simple list of foods with their per-100g details.
pub fn display_food_list(foods: &[&FoodItem], title: &str) {
    if foods.is_empty() {
        println!("{}: (none)", title);
        return;
    }

    println!();
    println!("=== {} ({} items) ===", title, foods.len());
    println!();

    for food in foods {
        let gi = food
            .nutrition
            .glycemic_index
            .map(|gi| format!(", GI:{gi:.0}"))
            .unwrap_or_default();
        println!(
            "  {} [{}] - {} cal, P:{} C:{} F:{} Fb:{}{}",
            food.name.en,
            food.category,
            food.nutrition.calories,
            food.nutrition.protein,
            food.nutrition.carbs,
            food.nutrition.fat,
            food.nutrition.fiber,
            gi
        );
    }

    println!();
}
