use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::models::food::{LocalizedText, Nutrition};

/// Dietary objective that drives catalog filtering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Goal {
    Diabetes,
    WeightLoss,
    WeightGain,
    #[default]
    GeneralHealth,
}

impl Goal {
    pub const ALL: [Goal; 4] = [
        Goal::Diabetes,
        Goal::WeightLoss,
        Goal::WeightGain,
        Goal::GeneralHealth,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Goal::Diabetes => "diabetes",
            Goal::WeightLoss => "weight-loss",
            Goal::WeightGain => "weight-gain",
            Goal::GeneralHealth => "general-health",
        }
    }

    /// Lenient parse: anything unrecognized becomes general health.
    pub fn parse_or_default(value: Option<&str>) -> Self {
        value.and_then(|v| v.parse().ok()).unwrap_or_default()
    }
}

impl FromStr for Goal {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "diabetes" => Ok(Goal::Diabetes),
            "weight-loss" => Ok(Goal::WeightLoss),
            "weight-gain" => Ok(Goal::WeightGain),
            "general-health" => Ok(Goal::GeneralHealth),
            other => Err(format!("unknown goal '{other}'")),
        }
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Caller parameters for one plate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlateRequest {
    pub goal: Goal,
    pub target_calories: u32,
    pub busy_life_only: bool,
}

impl PlateRequest {
    pub fn new(goal: Goal, target_calories: u32) -> Self {
        Self {
            goal,
            target_calories,
            busy_life_only: false,
        }
    }

    pub fn busy_life(self, busy_life_only: bool) -> Self {
        Self {
            busy_life_only,
            ..self
        }
    }
}

/// Which path produced a plate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlateSource {
    Ai,
    Rules,
    Fallback,
}

/// One food on a plate with its absolute nutrition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlateItem {
    pub food_id: String,
    pub name: LocalizedText,
    pub portion_grams: u32,
    pub nutrition: Nutrition,
}

/// A generated meal.
///
/// `total_nutrition` is kept equal to the elementwise sum of the items'
/// nutrition; use [`Plate::recompute_total`] after touching items.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plate {
    pub goal: Goal,
    pub name: LocalizedText,
    pub description: LocalizedText,
    pub items: Vec<PlateItem>,
    pub total_nutrition: Nutrition,
    pub target_calories: u32,
    pub is_busy_life_friendly: bool,
    pub source: PlateSource,
}

impl Plate {
    pub fn recompute_total(&mut self) {
        self.total_nutrition = Nutrition::total(self.items.iter().map(|i| &i.nutrition));
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
