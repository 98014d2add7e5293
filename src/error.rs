use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlateError {
    #[error("Not enough eligible foods: found {found}, need at least {required}")]
    CatalogInsufficient { found: usize, required: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, PlateError>;

/// Failure of the completion backend itself. Always recovered by the generator.
#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Completion service returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Completion service returned no content")]
    EmptyResponse,
}

/// Failure of the AI pairing step. Never surfaced to callers.
#[derive(Debug, Error)]
pub enum PairingError {
    #[error("Candidate pool too small: {0} items")]
    PoolTooSmall(usize),

    #[error("No JSON array found in model response")]
    MissingArray,

    #[error("Malformed selection array: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Model returned {0} entries, need at least 4")]
    TooFewEntries(usize),

    #[error("Only {0} selections matched the catalog, need at least 4")]
    TooFewMatches(usize),

    #[error(transparent)]
    Completion(#[from] CompletionError),
}
