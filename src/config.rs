//! Process configuration, read once at cold start.

use std::env;

/// Environment variable holding the generation service base URL.
pub const BASE_URL_VAR: &str = "FASTAPI_BASE_URL";
/// Environment variable holding the model identifier.
pub const MODEL_ID_VAR: &str = "MODEL_ID";
pub const DEFAULT_MODEL_ID: &str = "us.amazon.nova-lite-v1:0";

/// Path of the inference endpoint on the generation service.
pub const GENERATE_PATH: &str = "/generate";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base URL of the generation service. `None` when unset or blank.
    pub base_url: Option<String>,
    /// Model identifier. Not sent upstream; logged for diagnostics.
    pub model_id: String,
}

impl Config {
    #[must_use]
    pub fn new(base_url: Option<&str>, model_id: impl Into<String>) -> Self {
        let base_url = base_url
            .map(|url| url.trim().trim_end_matches('/'))
            .filter(|url| !url.is_empty())
            .map(str::to_string);

        Self {
            base_url,
            model_id: model_id.into(),
        }
    }

    /// Reads configuration from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Reads configuration through `lookup`, which maps a variable name to its value.
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup(BASE_URL_VAR);
        let model_id = lookup(MODEL_ID_VAR)
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_MODEL_ID.to_string());

        Self::new(base_url.as_deref(), model_id)
    }

    /// Full URL of the generate endpoint, if a base URL is configured.
    #[must_use]
    pub fn generate_url(&self) -> Option<String> {
        self.base_url
            .as_ref()
            .map(|base| format!("{base}{GENERATE_PATH}"))
    }
}
