use std::fmt;

use serde::{Deserialize, Serialize};

use crate::planner::constants::{CONDIMENT_PATTERNS, MEAT_PATTERNS, PROTEIN_DISH_PATTERNS};

/// Display strings keyed by locale. English is always present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocalizedText {
    pub en: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub si: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ta: Option<String>,
}

impl LocalizedText {
    pub fn new(en: impl Into<String>) -> Self {
        Self {
            en: en.into(),
            si: None,
            ta: None,
        }
    }

    /// Resolve for a locale code, falling back to English.
    pub fn resolve(&self, language: &str) -> &str {
        let localized = match language {
            "si" => self.si.as_deref(),
            "ta" => self.ta.as_deref(),
            _ => None,
        };
        localized.filter(|s| !s.is_empty()).unwrap_or(&self.en)
    }
}

/// Nutrition values. Per 100g on a `FoodItem`, absolute on a `PlateItem`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Nutrition {
    pub calories: f64,
    #[serde(default)]
    pub protein: f64,
    #[serde(default)]
    pub carbs: f64,
    #[serde(default)]
    pub fat: f64,
    #[serde(default)]
    pub fiber: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub glycemic_index: Option<f64>,
}

impl Nutrition {
    /// Multiply every value by `factor`, rounding calories to whole numbers
    /// and macros to one decimal place. The glycemic index is dropped.
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            calories: (self.calories * factor).round(),
            protein: round1(self.protein * factor),
            carbs: round1(self.carbs * factor),
            fat: round1(self.fat * factor),
            fiber: round1(self.fiber * factor),
            glycemic_index: None,
        }
    }

    /// Nutrition for `grams` of a food given its per-100g values.
    pub fn for_portion(&self, grams: u32) -> Self {
        self.scaled(grams as f64 / 100.0)
    }

    /// Elementwise sum.
    pub fn total<'a, I>(items: I) -> Self
    where
        I: IntoIterator<Item = &'a Nutrition>,
    {
        let mut sum = items.into_iter().fold(Self::default(), |acc, n| Self {
            calories: acc.calories + n.calories,
            protein: acc.protein + n.protein,
            carbs: acc.carbs + n.carbs,
            fat: acc.fat + n.fat,
            fiber: acc.fiber + n.fiber,
            glycemic_index: None,
        });
        // Drop float noise from summing one-decimal values.
        sum.protein = round1(sum.protein);
        sum.carbs = round1(sum.carbs);
        sum.fat = round1(sum.fat);
        sum.fiber = round1(sum.fiber);
        sum
    }
}

/// Round to one decimal place.
#[inline]
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Catalog category. Unknown strings are kept as free-form dish tags.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FoodCategory {
    Rice,
    Grains,
    Vegetables,
    Proteins,
    Other,
    Dish(String),
}

impl FoodCategory {
    pub fn as_str(&self) -> &str {
        match self {
            FoodCategory::Rice => "rice",
            FoodCategory::Grains => "grains",
            FoodCategory::Vegetables => "vegetables",
            FoodCategory::Proteins => "proteins",
            FoodCategory::Other => "other",
            FoodCategory::Dish(tag) => tag,
        }
    }
}

impl From<String> for FoodCategory {
    fn from(value: String) -> Self {
        match value.trim().to_lowercase().as_str() {
            "rice" => FoodCategory::Rice,
            "grains" => FoodCategory::Grains,
            "vegetables" => FoodCategory::Vegetables,
            "proteins" => FoodCategory::Proteins,
            "other" | "" => FoodCategory::Other,
            tag => FoodCategory::Dish(tag.to_string()),
        }
    }
}

impl From<FoodCategory> for String {
    fn from(value: FoodCategory) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for FoodCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Preparation method tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PrepMethod {
    Raw,
    Boiled,
    Steamed,
    Mallung,
    Brewed,
    Fresh,
    Grated,
    Juice,
    #[serde(rename = "Raw salad")]
    RawSalad,
    Fried,
    Curried,
    Tempered,
    Roasted,
    #[serde(other)]
    Other,
}

impl PrepMethod {
    /// Methods that count as quick preparation for the busy-life filter.
    pub fn is_quick(self) -> bool {
        matches!(
            self,
            PrepMethod::Raw
                | PrepMethod::Boiled
                | PrepMethod::Steamed
                | PrepMethod::Mallung
                | PrepMethod::Brewed
                | PrepMethod::Fresh
                | PrepMethod::Grated
                | PrepMethod::Juice
                | PrepMethod::RawSalad
        )
    }
}

/// Fixed meal component a food can fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Staple,
    Protein,
    Vegetable,
    Condiment,
}

/// A catalog food with nutrition per 100g.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodItem {
    pub id: String,

    pub name: LocalizedText,

    pub category: FoodCategory,

    pub nutrition: Nutrition,

    #[serde(default)]
    pub preparation_methods: Vec<PrepMethod>,

    #[serde(default)]
    pub is_common: bool,

    #[serde(default)]
    pub is_affordable: bool,

    /// Explicit role tag. When absent the role is inferred from category and name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}

impl FoodItem {
    /// English display name.
    pub fn name_en(&self) -> &str {
        &self.name.en
    }

    /// Canonical key for lookups (lowercase English name).
    pub fn key(&self) -> String {
        self.name.en.to_lowercase()
    }

    /// Only common, affordable foods are ever selectable.
    #[inline]
    pub fn is_eligible(&self) -> bool {
        self.is_common && self.is_affordable
    }

    pub fn is_quick_prep(&self) -> bool {
        self.preparation_methods.iter().any(|m| m.is_quick())
    }

    fn name_matches(&self, patterns: &[&str]) -> bool {
        let name = self.key();
        patterns.iter().any(|p| name.contains(p))
    }

    /// Legume or curry that can fill the protein role.
    pub fn is_protein_dish(&self) -> bool {
        match self.role {
            Some(role) => role == Role::Protein,
            None => self.name_matches(PROTEIN_DISH_PATTERNS),
        }
    }

    /// Meat, fish or egg dish. Name based even when a role is set.
    pub fn is_meat_dish(&self) -> bool {
        self.name_matches(MEAT_PATTERNS)
    }

    pub fn is_condiment(&self) -> bool {
        match self.role {
            Some(role) => role == Role::Condiment,
            None => {
                let category = self.category.as_str().to_lowercase();
                self.name_matches(CONDIMENT_PATTERNS)
                    || CONDIMENT_PATTERNS.iter().any(|p| category.contains(p))
            }
        }
    }

    /// Debug string for logging.
    pub fn debug_string(&self) -> String {
        format!(
            "{} [{}]: {} cal, P:{} C:{} F:{} Fb:{}",
            self.name.en,
            self.category,
            self.nutrition.calories,
            self.nutrition.protein,
            self.nutrition.carbs,
            self.nutrition.fat,
            self.nutrition.fiber
        )
    }
}

impl PartialEq for FoodItem {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for FoodItem {}
