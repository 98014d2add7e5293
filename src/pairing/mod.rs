//! Model-driven food pairing.
//!
//! A language model is shown the filtered candidate pool and asked for 4–5
//! foods with gram portions. Its reply is parsed and matched back against
//! the pool; anything that does not survive validation is a
//! [`PairingError`], which the generator answers by falling back to the
//! rule-based composer.

mod client;
mod parse;
mod prompt;

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::error::PairingError;
use crate::models::{FoodItem, PlateRequest};
use crate::planner::constants::MIN_PLATE_ITEMS;

pub use client::{CompletionClient, OpenAiCompatibleClient};
pub use parse::{Grams, RawSelection, extract_json_array, match_selections, parse_selections};
pub use prompt::render_prompt;

/// A catalog food chosen by the pairing strategy, with a clamped portion.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub food: FoodItem,
    pub portion_grams: u32,
}

/// Chooses the foods for a plate from a candidate pool.
#[async_trait]
pub trait PairingStrategy: Send + Sync {
    async fn select_foods(
        &self,
        candidates: &[FoodItem],
        request: &PlateRequest,
    ) -> Result<Vec<Selection>, PairingError>;
}

/// Pairing backed by a text completion model.
pub struct LlmPairing {
    client: Arc<dyn CompletionClient>,
}

impl LlmPairing {
    pub fn new(client: Arc<dyn CompletionClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PairingStrategy for LlmPairing {
    async fn select_foods(
        &self,
        candidates: &[FoodItem],
        request: &PlateRequest,
    ) -> Result<Vec<Selection>, PairingError> {
        if candidates.len() < MIN_PLATE_ITEMS {
            return Err(PairingError::PoolTooSmall(candidates.len()));
        }

        let prompt = render_prompt(candidates, request);
        let reply = self.client.complete(&prompt).await?;
        debug!("Model replied with {} bytes", reply.len());

        let raw = parse_selections(&reply)?;
        match_selections(&raw, candidates)
    }
}
