use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use crate::catalog::store::InMemoryCatalog;
use crate::error::Result;
use crate::models::FoodItem;

/// Load foods from a JSON array file.
///
/// Foods with a non-positive calorie figure are kept but logged. The composer
/// gives them a default portion and they add no calories, so a plate made
/// only of such foods cannot be scaled and keeps a zero total.
pub fn load_foods<P: AsRef<Path>>(path: P) -> Result<Vec<FoodItem>> {
    let content = fs::read_to_string(path.as_ref())?;
    let foods: Vec<FoodItem> = serde_json::from_str(&content)?;

    for food in foods.iter().filter(|f| f.nutrition.calories <= 0.0) {
        warn!("Food '{}' has no calorie figure", food.name.en);
    }
    debug!("Loaded {} foods from {}", foods.len(), path.as_ref().display());

    Ok(foods)
}

/// Load a file straight into an in-memory catalog (deduplicated by id).
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<InMemoryCatalog> {
    Ok(InMemoryCatalog::new(load_foods(path)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::FoodCatalog;
    use crate::models::{FoodCategory, PrepMethod};
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_foods_camel_case() {
        let json = r#"[
            {"id": "f1", "name": {"en": "Red Rice", "si": "රතු බත්"}, "category": "rice",
             "nutrition": {"calories": 130, "protein": 2.7, "carbs": 28, "fat": 0.3, "fiber": 1.8, "glycemicIndex": 55},
             "preparationMethods": ["Boiled"], "isCommon": true, "isAffordable": true}
        ]"#;

        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let foods = load_foods(file.path()).unwrap();
        assert_eq!(foods.len(), 1);
        assert_eq!(foods[0].name.en, "Red Rice");
        assert_eq!(foods[0].category, FoodCategory::Rice);
        assert_eq!(foods[0].nutrition.glycemic_index, Some(55.0));
        assert_eq!(foods[0].preparation_methods, vec![PrepMethod::Boiled]);
        assert!(foods[0].role.is_none());
    }

    #[test]
    fn test_load_catalog_deduplicates() {
        let json = r#"[
            {"id": "a", "name": {"en": "Pol Sambol"}, "category": "other",
             "nutrition": {"calories": 200}, "isCommon": true, "isAffordable": true},
            {"id": "a", "name": {"en": "Pol Sambol"}, "category": "sambol",
             "nutrition": {"calories": 210}, "isCommon": true, "isAffordable": true, "role": "condiment"}
        ]"#;

        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let catalog = load_catalog(file.path()).unwrap();
        assert_eq!(catalog.len(), 1);
        let food = catalog.get_food("pol sambol").unwrap();
        // Last occurrence wins
        assert_eq!(food.nutrition.calories, 210.0);
        assert_eq!(food.category, FoodCategory::Dish("sambol".to_string()));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_foods("/nonexistent/foods.json").unwrap_err();
        assert!(matches!(err, crate::error::PlateError::Io(_)));
    }
}
