//! Response envelope returned to API Gateway.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::chat::ResponseBody;
use super::error::RelayError;

/// CORS headers allowed on the chat endpoint
pub const ALLOW_HEADERS: &str = "Content-Type,X-Amz-Date,Authorization,X-Api-Key,X-Amz-Security-Token";
pub const ALLOW_METHODS: &str = "OPTIONS,POST";

/// Proxy-integration response: status, headers and a JSON-encoded body.
///
/// Headers are kept in a `BTreeMap` so that identical responses serialize
/// byte-for-byte identically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

/// The header set attached to every response, successful or not.
#[must_use]
pub fn default_headers() -> BTreeMap<String, String> {
    BTreeMap::from([
        ("Content-Type".to_string(), "application/json".to_string()),
        ("Access-Control-Allow-Origin".to_string(), "*".to_string()),
        ("Access-Control-Allow-Headers".to_string(), ALLOW_HEADERS.to_string()),
        ("Access-Control-Allow-Methods".to_string(), ALLOW_METHODS.to_string()),
    ])
}

impl ResponseEnvelope {
    /// Wraps `body` with the given status and the fixed header set.
    #[must_use]
    pub fn new(status_code: u16, body: &ResponseBody) -> Self {
        let body = serde_json::to_string(body).unwrap_or_else(|e| {
            serde_json::json!({
                "success": false,
                "error": format!("Internal Lambda Error: {e}"),
            })
            .to_string()
        });

        Self {
            status_code,
            headers: default_headers(),
            body,
        }
    }

    /// Builds the `success: false` envelope for `error`.
    #[must_use]
    pub fn from_error(error: &RelayError) -> Self {
        Self::new(error.status_code(), &ResponseBody::failure(error.to_string()))
    }

    /// Parses `body` back into a [`ResponseBody`].
    ///
    /// # Errors
    ///
    /// Returns an error if `body` is not a valid response body document.
    pub fn parsed_body(&self) -> Result<ResponseBody, serde_json::Error> {
        serde_json::from_str(&self.body)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::models::chat::ChatTurn;
    use serde_json::{Value, json};

    #[test]
    fn test_envelope_serializes_in_proxy_shape() {
        let envelope = ResponseEnvelope::new(
            200,
            &ResponseBody::success("hello".into(), vec![ChatTurn::user("hi")]),
        );
        let value = serde_json::to_value(&envelope).unwrap();

        assert_eq!(value["statusCode"], 200);
        assert_eq!(value["headers"]["Content-Type"], "application/json");
        assert_eq!(value["headers"]["Access-Control-Allow-Origin"], "*");
        assert_eq!(value["headers"]["Access-Control-Allow-Methods"], "OPTIONS,POST");

        let body: Value = serde_json::from_str(value["body"].as_str().unwrap()).unwrap();
        assert_eq!(
            body,
            json!({
                "success": true,
                "response": "hello",
                "conversationHistory": [{"role": "user", "content": "hi"}]
            })
        );
    }

    #[test]
    fn test_error_envelope_omits_success_fields() {
        let envelope = ResponseEnvelope::from_error(&RelayError::Validation);
        assert_eq!(envelope.status_code, 400);

        let body: Value = serde_json::from_str(&envelope.body).unwrap();
        assert_eq!(
            body,
            json!({
                "success": false,
                "error": "Message field is required in the request body."
            })
        );
    }

    #[test]
    fn test_every_envelope_carries_the_same_headers() {
        let ok = ResponseEnvelope::new(200, &ResponseBody::success(String::new(), vec![]));
        let err = ResponseEnvelope::from_error(&RelayError::Configuration);
        assert_eq!(ok.headers, err.headers);
        assert_eq!(ok.headers.len(), 4);
        assert_eq!(ok.headers["Access-Control-Allow-Headers"], ALLOW_HEADERS);
    }
}
