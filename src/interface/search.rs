use strsim::jaro_winkler;

use crate::models::FoodItem;

/// Minimum Jaro-Winkler similarity for a fuzzy match.
pub const FUZZY_THRESHOLD: f64 = 0.7;

/// Find foods by name: an exact (case-insensitive) match on any localized
/// name wins, otherwise English names are ranked by similarity.
pub fn fuzzy_find<'a>(foods: &[&'a FoodItem], query: &str) -> Vec<&'a FoodItem> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return Vec::new();
    }

    let exact = foods.iter().find(|f| {
        f.key() == query
            || f.name.si.as_deref() == Some(query.as_str())
            || f.name.ta.as_deref() == Some(query.as_str())
    });
    if let Some(food) = exact {
        return vec![*food];
    }

    let mut candidates: Vec<(&FoodItem, f64)> = foods
        .iter()
        .map(|f| (*f, name_score(f, &query)))
        .filter(|(_, score)| *score > FUZZY_THRESHOLD)
        .collect();

    candidates.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    candidates.into_iter().map(|(f, _)| f).collect()
}

/// Best similarity of the query against the full name or any of its words.
fn name_score(food: &FoodItem, query: &str) -> f64 {
    let name = food.key();
    name.split_whitespace()
        .map(|word| jaro_winkler(word, query))
        .fold(jaro_winkler(&name, query), f64::max)
}
