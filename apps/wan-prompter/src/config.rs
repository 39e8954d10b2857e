use anyhow::{bail, Context, Result};

use crate::llm_client::{DEFAULT_API_BASE, SUPPORTED_MODELS};

const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Prompter configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_base: String,
    /// Optional: hosts may supply credentials per request instead.
    pub gemini_api_key: Option<String>,
    pub default_model: String,
    pub request_timeout_secs: u64,
    pub rust_log: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gemini_api_base: DEFAULT_API_BASE.to_string(),
            gemini_api_key: None,
            default_model: SUPPORTED_MODELS[0].to_string(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            rust_log: "info".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let default_model =
            optional_env("WAN_PROMPTER_MODEL").unwrap_or_else(|| SUPPORTED_MODELS[0].to_string());
        if !SUPPORTED_MODELS.contains(&default_model.as_str()) {
            bail!(
                "WAN_PROMPTER_MODEL '{default_model}' is not one of: {}",
                SUPPORTED_MODELS.join(", ")
            );
        }

        Ok(Config {
            gemini_api_base: optional_env("GEMINI_API_BASE")
                .map(|base| base.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            gemini_api_key: optional_env("GEMINI_API_KEY").or_else(|| optional_env("GOOGLE_API_KEY")),
            default_model,
            request_timeout_secs: optional_env("WAN_PROMPTER_TIMEOUT_SECS")
                .map(|raw| {
                    raw.parse::<u64>()
                        .context("WAN_PROMPTER_TIMEOUT_SECS must be a whole number of seconds")
                })
                .transpose()?
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

/// Reads an env var, treating unset and blank the same.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
