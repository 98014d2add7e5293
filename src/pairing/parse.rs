use std::collections::HashSet;

use serde::Deserialize;
use tracing::debug;

use crate::error::PairingError;
use crate::models::FoodItem;
use crate::pairing::Selection;
use crate::planner::constants::{
    AI_MAX_PORTION_GRAMS, AI_MIN_PORTION_GRAMS, DEFAULT_PORTION_GRAMS, MAX_PLATE_ITEMS,
    MIN_PLATE_ITEMS,
};

/// One `{name, portionGrams}` entry as the model wrote it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSelection {
    pub name: String,

    #[serde(default = "default_grams", alias = "portion_grams", alias = "grams")]
    pub portion_grams: Grams,
}

/// Models sometimes write `150`, sometimes `"150g"`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Grams {
    Number(f64),
    Text(String),
}

impl Grams {
    /// Numeric value; text uses its leading integer digits.
    pub fn value(&self) -> Option<f64> {
        match self {
            Grams::Number(n) => Some(*n),
            Grams::Text(s) => {
                let digits: String = s
                    .trim()
                    .chars()
                    .take_while(|c| c.is_ascii_digit())
                    .collect();
                digits.parse().ok()
            }
        }
    }
}

fn default_grams() -> Grams {
    Grams::Number(DEFAULT_PORTION_GRAMS as f64)
}

/// Find the first balanced `[...]` in `text`, ignoring brackets inside strings.
pub fn extract_json_array(text: &str) -> Option<&str> {
    let start = text.find('[')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, c) in text[start..].char_indices() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '[' => depth += 1,
            ']' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..=start + offset]);
                }
            }
            _ => {}
        }
    }

    None
}

/// Decode the model's raw response into selections.
pub fn parse_selections(text: &str) -> Result<Vec<RawSelection>, PairingError> {
    let array = extract_json_array(text).ok_or(PairingError::MissingArray)?;
    let entries: Vec<RawSelection> = serde_json::from_str(array)?;
    if entries.len() < MIN_PLATE_ITEMS {
        return Err(PairingError::TooFewEntries(entries.len()));
    }
    Ok(entries)
}

fn find_candidate<'a>(candidates: &'a [FoodItem], wanted: &str) -> Option<&'a FoodItem> {
    candidates.iter().find(|f| f.key() == wanted).or_else(|| {
        candidates.iter().find(|f| {
            let key = f.key();
            key.contains(wanted) || wanted.contains(key.as_str())
        })
    })
}

/// Match selections against the candidate pool and clamp their portions.
///
/// Names match exactly (case-insensitive) first, then by substring in either
/// direction. Unmatched and repeated foods are skipped; at most
/// `MAX_PLATE_ITEMS` are kept.
pub fn match_selections(
    raw: &[RawSelection],
    candidates: &[FoodItem],
) -> Result<Vec<Selection>, PairingError> {
    if raw.len() < MIN_PLATE_ITEMS {
        return Err(PairingError::TooFewEntries(raw.len()));
    }

    let mut used = HashSet::new();
    let mut selections = Vec::with_capacity(MAX_PLATE_ITEMS);

    for entry in raw {
        if selections.len() == MAX_PLATE_ITEMS {
            break;
        }
        let wanted = entry.name.trim().to_lowercase();
        if wanted.is_empty() {
            continue;
        }

        match find_candidate(candidates, &wanted) {
            Some(food) if used.insert(food.id.clone()) => {
                let grams = entry
                    .portion_grams
                    .value()
                    .filter(|g| g.is_finite())
                    .unwrap_or(DEFAULT_PORTION_GRAMS as f64)
                    .round()
                    .clamp(AI_MIN_PORTION_GRAMS as f64, AI_MAX_PORTION_GRAMS as f64)
                    as u32;
                selections.push(Selection {
                    food: food.clone(),
                    portion_grams: grams,
                });
            }
            Some(food) => debug!("Model repeated '{}', skipping", food.name.en),
            None => debug!("Model picked unknown food '{}'", entry.name),
        }
    }

    if selections.len() < MIN_PLATE_ITEMS {
        return Err(PairingError::TooFewMatches(selections.len()));
    }

    Ok(selections)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FoodCategory, LocalizedText, Nutrition};

    fn candidates() -> Vec<FoodItem> {
        ["Red Rice", "Parippu (Dhal Curry)", "Gotukola Mallung", "Beans Curry", "Pol Sambol"]
            .iter()
            .enumerate()
            .map(|(i, name)| FoodItem {
                id: format!("f{i}"),
                name: LocalizedText::new(*name),
                category: FoodCategory::Other,
                nutrition: Nutrition {
                    calories: 100.0,
                    ..Default::default()
                },
                preparation_methods: Vec::new(),
                is_common: true,
                is_affordable: true,
                role: None,
            })
            .collect()
    }

    fn raw(name: &str, grams: f64) -> RawSelection {
        RawSelection {
            name: name.to_string(),
            portion_grams: Grams::Number(grams),
        }
    }

    #[test]
    fn test_extract_array_from_prose() {
        let text = "Sure! Here is the plate:\n```json\n[{\"name\": \"Rice\"}]\n```\nEnjoy [1].";
        assert_eq!(extract_json_array(text), Some("[{\"name\": \"Rice\"}]"));
    }

    #[test]
    fn test_extract_array_ignores_brackets_in_strings() {
        let text = r#"[{"name": "Rice ]["}, {"name": "Dhal \" ]"}] trailing"#;
        assert_eq!(
            extract_json_array(text),
            Some(r#"[{"name": "Rice ]["}, {"name": "Dhal \" ]"}]"#)
        );
    }

    #[test]
    fn test_extract_array_unbalanced() {
        assert_eq!(extract_json_array("[{\"name\": \"Rice\""), None);
        assert_eq!(extract_json_array("no array here"), None);
    }

    #[test]
    fn test_parse_selections_accepts_string_grams() {
        let text = r#"[
            {"name": "Red Rice", "portionGrams": 200},
            {"name": "Dhal", "portionGrams": "150g"},
            {"name": "Gotukola Mallung", "grams": 60},
            {"name": "Pol Sambol"}
        ]"#;
        let entries = parse_selections(text).unwrap();
        assert_eq!(entries.len(), 4);
        assert_eq!(entries[1].portion_grams.value(), Some(150.0));
        assert_eq!(entries[2].portion_grams.value(), Some(60.0));
        assert_eq!(entries[3].portion_grams.value(), Some(100.0));
    }

    #[test]
    fn test_parse_selections_errors() {
        assert!(matches!(parse_selections("nothing"), Err(PairingError::MissingArray)));
        assert!(matches!(parse_selections("[1, 2, 3, 4]"), Err(PairingError::Malformed(_))));
        assert!(matches!(
            parse_selections(r#"[{"name": "Rice"}]"#),
            Err(PairingError::TooFewEntries(1))
        ));
    }

    #[test]
    fn test_match_exact_then_substring() {
        let pool = candidates();
        let entries = vec![
            raw("red rice", 200.0),
            raw("Dhal Curry", 150.0),
            raw("Gotukola", 60.0),
            raw("Beans Curry", 100.0),
        ];
        let selections = match_selections(&entries, &pool).unwrap();
        let ids: Vec<&str> = selections.iter().map(|s| s.food.id.as_str()).collect();
        assert_eq!(ids, vec!["f0", "f1", "f2", "f3"]);
    }

    #[test]
    fn test_match_clamps_portions() {
        let pool = candidates();
        let entries = vec![
            raw("Red Rice", 900.0),
            raw("Parippu (Dhal Curry)", 5.0),
            raw("Gotukola Mallung", 60.0),
            raw("Pol Sambol", 30.0),
        ];
        let selections = match_selections(&entries, &pool).unwrap();
        assert_eq!(selections[0].portion_grams, AI_MAX_PORTION_GRAMS);
        assert_eq!(selections[1].portion_grams, AI_MIN_PORTION_GRAMS);
        assert_eq!(selections[2].portion_grams, 60);
    }

    #[test]
    fn test_too_few_matches() {
        let pool = candidates();
        let entries = vec![
            raw("Red Rice", 200.0),
            raw("Pizza", 150.0),
            raw("red rice", 100.0),
            raw("Burger", 100.0),
        ];
        assert!(matches!(
            match_selections(&entries, &pool),
            Err(PairingError::TooFewMatches(1))
        ));
    }

    #[test]
    fn test_extra_entries_are_dropped() {
        let pool = candidates();
        let entries: Vec<RawSelection> = pool
            .iter()
            .map(|f| raw(&f.name.en, 100.0))
            .chain([raw("Red Rice", 50.0)])
            .collect();
        let selections = match_selections(&entries, &pool).unwrap();
        assert_eq!(selections.len(), MAX_PLATE_ITEMS);
    }
}
