use std::env;
use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use tracing::{info, warn};

use crate::error::{PlateError, Result};

pub const DEFAULT_CATALOG_PATH: &str = "data/sri_lankan_foods.json";
pub const DEFAULT_LLM_BASE_URL: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_LLM_MODEL: &str = "llama-3.3-70b-versatile";

/// Settings for the completion backend. Absent when no API key is set.
#[derive(Debug, Clone)]
pub struct CompletionSettings {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub bind: String,
    pub port: u16,
    pub catalog_path: PathBuf,
    pub completion: Option<CompletionSettings>,
}

impl Config {
    /// Load from process environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load using `lookup` for each variable.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let completion = match lookup("GROQ_API_KEY").filter(|k| !k.trim().is_empty()) {
            Some(api_key) => Some(CompletionSettings {
                api_key: api_key.trim().to_string(),
                base_url: try_load(&lookup, "PLATE_LLM_BASE_URL", DEFAULT_LLM_BASE_URL)?,
                model: try_load(&lookup, "PLATE_LLM_MODEL", DEFAULT_LLM_MODEL)?,
                timeout: Duration::from_secs(try_load(&lookup, "PLATE_LLM_TIMEOUT_SECS", "15")?),
            }),
            None => {
                warn!("GROQ_API_KEY not set, AI pairing disabled");
                None
            }
        };

        Ok(Self {
            bind: try_load(&lookup, "PLATE_BIND", "0.0.0.0")?,
            port: try_load(&lookup, "PLATE_PORT", "8080")?,
            catalog_path: try_load(&lookup, "PLATE_CATALOG", DEFAULT_CATALOG_PATH)?,
            completion,
        })
    }
}

fn try_load<T, F>(lookup: &F, key: &str, default: &str) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key).unwrap_or_else(|| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });

    raw.trim()
        .parse()
        .map_err(|e| PlateError::Config(format!("Invalid {key} value '{raw}': {e}")))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_api_key() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.bind, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert_eq!(config.catalog_path, PathBuf::from(DEFAULT_CATALOG_PATH));
        assert!(config.completion.is_none());
    }

    #[test]
    fn test_api_key_enables_completion() {
        let config = Config::from_lookup(lookup_from(&[
            ("GROQ_API_KEY", "gsk_test"),
            ("PLATE_LLM_TIMEOUT_SECS", "5"),
            ("PLATE_PORT", "9000"),
        ]))
        .unwrap();

        let completion = config.completion.unwrap();
        assert_eq!(completion.api_key, "gsk_test");
        assert_eq!(completion.model, DEFAULT_LLM_MODEL);
        assert_eq!(completion.timeout, Duration::from_secs(5));
        assert_eq!(config.port, 9000);
    }

    #[test]
    fn test_invalid_port_is_config_error() {
        let err = Config::from_lookup(lookup_from(&[("PLATE_PORT", "eighty")])).unwrap_err();
        assert!(matches!(err, PlateError::Config(_)));
    }
}
