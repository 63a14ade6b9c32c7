use serde::{Deserialize, Serialize};

/// Sampling parameters sent with every prompt.
pub const MAX_NEW_TOKENS: u32 = 512;
pub const DO_SAMPLE: bool = true;
pub const TEMPERATURE: f64 = 0.7;
pub const TOP_P: f64 = 0.9;

/// Body of `POST /generate` on the remote generation service
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationRequest {
    pub prompt: String,
    pub max_new_tokens: u32,
    pub do_sample: bool,
    pub temperature: f64,
    pub top_p: f64,
}

impl GenerationRequest {
    /// Builds a request for `prompt` with the fixed sampling parameters.
    #[must_use]
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            max_new_tokens: MAX_NEW_TOKENS,
            do_sample: DO_SAMPLE,
            temperature: TEMPERATURE,
            top_p: TOP_P,
        }
    }
}

// Successful reply of the generation service. Extra fields such as
// `response_time` are ignored.
#[derive(Debug, Deserialize)]
pub struct GenerationResponse {
    pub generated_text: Option<String>,
}

/// Error body returned by the service on non-2xx responses.
/// FastAPI uses `detail`; custom handlers may use `error`.
#[derive(Debug, Default, Deserialize)]
pub struct GenerationErrorBody {
    pub detail: Option<serde_json::Value>,
    pub error: Option<serde_json::Value>,
}

impl GenerationErrorBody {
    /// Returns `detail`, falling back to `error`, rendered as text.
    #[must_use]
    pub fn message(&self) -> Option<String> {
        self.detail
            .as_ref()
            .or(self.error.as_ref())
            .map(|value| match value {
                serde_json::Value::String(text) => text.clone(),
                other => other.to_string(),
            })
    }
}
