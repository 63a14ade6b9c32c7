use lambda_runtime::tracing::{debug, info, warn};
use reqwest::StatusCode;
use serde_json::Value;

use crate::http::{HttpClient, HttpError};
use crate::models::generation::GenerationErrorBody;
use crate::models::{GenerationRequest, GenerationResponse, UpstreamError};

/// Sends `prompt` to the generation service at `url` and returns the generated text.
///
/// Exactly one request is made; nothing is retried.
///
/// # Errors
///
/// - `UpstreamError::Status` if the service answers with a non-2xx status
/// - `UpstreamError::Unreachable` if no response could be obtained
/// - `UpstreamError::Decode` if a 2xx body is not JSON
/// - `UpstreamError::MissingGeneratedText` if the JSON has no `generated_text`
/// - `UpstreamError::Unexpected` for anything else
pub async fn generate(
    client: &dyn HttpClient,
    url: &str,
    prompt: &str,
) -> Result<String, UpstreamError> {
    let payload = serde_json::to_vec(&GenerationRequest::new(prompt))
        .map_err(|e| UpstreamError::Unexpected(e.to_string()))?;

    info!(url = %url, "Calling FastAPI");

    let response = client
        .post_json(url, payload)
        .await
        .map_err(|e| match e {
            HttpError::Transport(reason) => UpstreamError::Unreachable(reason),
            other @ (HttpError::InvalidRequest(_) | HttpError::Body(_)) => {
                UpstreamError::Unexpected(other.to_string())
            }
        })?;

    if !(200..300).contains(&response.status) {
        return Err(status_error(
            response.status,
            response.reason.as_deref(),
            &response.body,
        ));
    }

    let text = std::str::from_utf8(&response.body)
        .map_err(|e| UpstreamError::Unexpected(format!("response is not valid UTF-8: {e}")))?;
    let json: Value = serde_json::from_str(text).map_err(|e| {
        warn!(error = %e, "FastAPI returned a non-JSON body");
        UpstreamError::Decode
    })?;

    debug!(response = %json, "FastAPI response");

    extract_generated_text(json)
}

/// Pulls `generated_text` out of a decoded 2xx response.
fn extract_generated_text(json: Value) -> Result<String, UpstreamError> {
    if !json.is_object() {
        return Err(UpstreamError::Unexpected(format!(
            "FastAPI response is not a JSON object: {json}"
        )));
    }

    let response: GenerationResponse = serde_json::from_value(json.clone())
        .map_err(|e| UpstreamError::Unexpected(format!("invalid FastAPI response: {e}")))?;

    response
        .generated_text
        .ok_or_else(|| UpstreamError::MissingGeneratedText(json.to_string()))
}

/// Builds the error for a non-2xx reply, appending the service's detail when
/// the body carries one. An unparseable body leaves the status message as is.
///
/// `reason` is the phrase sent by the server; without one the standard phrase
/// for `status` is used.
fn status_error(status: u16, reason: Option<&str>, body: &[u8]) -> UpstreamError {
    let reason = reason
        .or_else(|| {
            StatusCode::from_u16(status)
                .ok()
                .and_then(|code| code.canonical_reason())
        })
        .unwrap_or("Unknown Status")
        .to_string();

    warn!(
        status,
        body = %String::from_utf8_lossy(body),
        "FastAPI returned an error status"
    );

    let detail = serde_json::from_slice::<Value>(body)
        .ok()
        .filter(Value::is_object)
        .and_then(|value| serde_json::from_value::<GenerationErrorBody>(value).ok())
        .and_then(|body| body.message());

    UpstreamError::Status {
        status,
        reason,
        detail,
    }
}
