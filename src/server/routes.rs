use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::models::{Goal, Plate, PlateRequest};
use crate::planner::PlateGenerator;
use crate::planner::constants::{DEFAULT_TARGET_CALORIES, LOCALIZED_LANGUAGES};
use crate::server::error::AppError;

pub struct AppState {
    pub generator: PlateGenerator,
}

/// Raw query string for `/plates/generate`. Every value is parsed leniently.
#[derive(Debug, Default, Deserialize)]
pub struct GenerateParams {
    pub goal: Option<String>,
    pub calories: Option<String>,
    pub language: Option<String>,
    #[serde(rename = "busyLife")]
    pub busy_life: Option<String>,
}

impl GenerateParams {
    pub fn to_request(&self) -> PlateRequest {
        PlateRequest {
            goal: Goal::parse_or_default(self.goal.as_deref()),
            target_calories: parse_calories(self.calories.as_deref()),
            busy_life_only: parse_flag(self.busy_life.as_deref()),
        }
    }

    /// Requested language, only when it is one we localize.
    pub fn display_language(&self) -> Option<&str> {
        self.language
            .as_deref()
            .map(str::trim)
            .filter(|lang| LOCALIZED_LANGUAGES.contains(lang))
    }
}

/// Positive calorie count, or the default for anything else.
pub fn parse_calories(value: Option<&str>) -> u32 {
    value
        .and_then(|v| v.trim().parse::<f64>().ok())
        .filter(|c| c.is_finite() && *c >= 1.0)
        .map(|c| c.round().min(u32::MAX as f64) as u32)
        .unwrap_or(DEFAULT_TARGET_CALORIES)
}

pub fn parse_flag(value: Option<&str>) -> bool {
    value.is_some_and(|v| matches!(v.trim().to_lowercase().as_str(), "true" | "1" | "yes"))
}

/// A plate plus resolved display strings for non-English requests.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlateResponse {
    #[serde(flatten)]
    pub plate: Plate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_description: Option<String>,
}

impl PlateResponse {
    pub fn new(plate: Plate, language: Option<&str>) -> Self {
        let (display_name, display_description) = match language {
            Some(lang) => (
                Some(plate.name.resolve(lang).to_string()),
                Some(plate.description.resolve(lang).to_string()),
            ),
            None => (None, None),
        };
        Self {
            plate,
            display_name,
            display_description,
        }
    }
}

pub async fn generate_plate_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<GenerateParams>,
) -> Result<Response, AppError> {
    let request = params.to_request();
    let mut rng = StdRng::from_entropy();

    let plate = state.generator.generate(&request, &mut rng).await?;
    info!(
        goal = %request.goal,
        calories = request.target_calories,
        source = ?plate.source,
        "Served plate with {} items",
        plate.len()
    );

    let body = PlateResponse::new(plate, params.display_language());
    Ok(([(header::CACHE_CONTROL, "no-store")], Json(body)).into_response())
}

pub async fn health_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "foods": state.generator.catalog().len(),
        "ai": state.generator.has_pairing(),
    }))
}
