//! Error types for the chat relay.
//!
//! Every failure the relay can hit is one of these variants. Each variant
//! knows the HTTP status it maps to and renders the human-readable text that
//! ends up in the `error` field of the response body.

use thiserror::Error;

/// Failures of the call to the remote generation service.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// The service answered with a non-2xx status.
    #[error("HTTP Error calling FastAPI: {status} - {reason}{}", details_suffix(.detail))]
    Status {
        status: u16,
        reason: String,
        detail: Option<String>,
    },
    /// The service could not be reached (DNS, connection refused, timeout, reset).
    #[error("Failed to reach FastAPI: {0}")]
    Unreachable(String),
    /// A 2xx body that is not valid JSON.
    #[error("Failed to decode JSON response from FastAPI")]
    Decode,
    /// A JSON body without `generated_text`. Carries the received payload.
    #[error(
        "An unexpected error occurred during FastAPI call or processing: FastAPI response missing 'generated_text' key. Full response: {0}"
    )]
    MissingGeneratedText(String),
    /// Anything else that went wrong while calling or processing.
    #[error("An unexpected error occurred during FastAPI call or processing: {0}")]
    Unexpected(String),
}

impl UpstreamError {
    /// HTTP status reported to the caller for this failure.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Status { status, .. } => *status,
            _ => 500,
        }
    }
}

#[allow(clippy::ref_option)]
fn details_suffix(detail: &Option<String>) -> String {
    detail
        .as_ref()
        .map_or_else(String::new, |detail| format!(" Details: {detail}"))
}

/// Top-level error taxonomy of a single invocation.
#[derive(Debug, Error)]
pub enum RelayError {
    /// `FASTAPI_BASE_URL` is unset or blank.
    #[error("FastAPI base URL is not configured.")]
    Configuration,
    /// The request body has no usable `message`.
    #[error("Message field is required in the request body.")]
    Validation,
    #[error(transparent)]
    Upstream(#[from] UpstreamError),
    /// Malformed event or body, or any other failure caught at the boundary.
    #[error("Internal Lambda Error: {0}")]
    Internal(String),
}

impl RelayError {
    /// HTTP status reported to the caller for this failure.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Validation => 400,
            Self::Upstream(err) => err.status_code(),
            Self::Configuration | Self::Internal(_) => 500,
        }
    }
}

impl From<anyhow::Error> for RelayError {
    fn from(error: anyhow::Error) -> Self {
        // {:#} keeps the whole context chain on one line
        Self::Internal(format!("{error:#}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_without_detail() {
        let err = UpstreamError::Status {
            status: 503,
            reason: "Service Unavailable".to_string(),
            detail: None,
        };
        assert_eq!(
            err.to_string(),
            "HTTP Error calling FastAPI: 503 - Service Unavailable"
        );
        assert_eq!(err.status_code(), 503);
    }

    #[test]
    fn test_status_error_with_detail() {
        let err = UpstreamError::Status {
            status: 422,
            reason: "Unprocessable Entity".to_string(),
            detail: Some("bad prompt".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "HTTP Error calling FastAPI: 422 - Unprocessable Entity Details: bad prompt"
        );
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(RelayError::Configuration.status_code(), 500);
        assert_eq!(RelayError::Validation.status_code(), 400);
        assert_eq!(RelayError::Internal("boom".into()).status_code(), 500);
        assert_eq!(
            RelayError::from(UpstreamError::Unreachable("refused".into())).status_code(),
            500
        );
        assert_eq!(RelayError::from(UpstreamError::Decode).status_code(), 500);
    }

    #[test]
    fn test_upstream_is_transparent() {
        let err = RelayError::from(UpstreamError::Decode);
        assert_eq!(err.to_string(), "Failed to decode JSON response from FastAPI");
    }

    #[test]
    fn test_missing_generated_text_message() {
        let err = UpstreamError::MissingGeneratedText(r#"{"foo":"bar"}"#.to_string());
        let message = err.to_string();
        assert!(message.starts_with("An unexpected error occurred"));
        assert!(message.contains("'generated_text'"));
        assert!(message.contains(r#"{"foo":"bar"}"#));
    }

    #[test]
    fn test_from_anyhow_keeps_context_chain() {
        let err = anyhow::anyhow!("expected value").context("invalid request body");
        let relay_err = RelayError::from(err);
        assert_eq!(
            relay_err.to_string(),
            "Internal Lambda Error: invalid request body: expected value"
        );
    }
}
