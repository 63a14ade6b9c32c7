use async_trait::async_trait;
use hyper::ext::ReasonPhrase;
use lambda_runtime::tracing::warn;
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use thiserror::Error;

/// Raw reply of an HTTP call: status code, reason phrase and body bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    /// Reason phrase sent by the server, when it differs from the standard one.
    pub reason: Option<String>,
    pub body: Vec<u8>,
}

/// Failures below the HTTP status level.
#[derive(Debug, Error)]
pub enum HttpError {
    /// The request could not be built, e.g. a malformed URL.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    /// The request never produced a response (DNS, refused, reset, timeout).
    #[error("{0}")]
    Transport(String),
    /// A successful response whose body could not be read.
    #[error("failed to read response body: {0}")]
    Body(String),
}

/// Trait for HTTP client operations to enable testing with mocks.
///
/// This trait abstracts HTTP operations to allow dependency injection
/// for testing purposes, preventing tests from making real network calls.
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Send a POST request with a JSON body and return the raw response.
    ///
    /// Non-2xx statuses are returned as `Ok`; only failures to obtain a
    /// response are errors.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be built or sent, or if the
    /// body of a 2xx response cannot be read.
    async fn post_json(&self, url: &str, body: Vec<u8>) -> Result<HttpResponse, HttpError>;
}

/// Production HTTP client implementation using reqwest.
///
/// A single attempt per call with reqwest's default timeouts.
#[derive(Debug, Clone, Default)]
pub struct ReqwestClient {
    client: Client,
}

impl ReqwestClient {
    #[must_use]
    pub const fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpClient for ReqwestClient {
    async fn post_json(&self, url: &str, body: Vec<u8>) -> Result<HttpResponse, HttpError> {
        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(classify)?;

        let status = response.status();
        // hyper only records the phrase when it is not the canonical one
        let reason = response
            .extensions()
            .get::<ReasonPhrase>()
            .map(|phrase| String::from_utf8_lossy(phrase.as_bytes()).into_owned());
        let body = match response.bytes().await {
            Ok(bytes) => bytes.to_vec(),
            Err(e) if status.is_success() => return Err(HttpError::Body(e.to_string())),
            Err(e) => {
                // the status is what matters on an error response
                warn!(error = %e, status = status.as_u16(), "Failed to read error response body");
                Vec::new()
            }
        };

        Ok(HttpResponse {
            status: status.as_u16(),
            reason,
            body,
        })
    }
}

fn classify(error: reqwest::Error) -> HttpError {
    if error.is_builder() {
        HttpError::InvalidRequest(error.to_string())
    } else {
        HttpError::Transport(error_chain(&error))
    }
}

// reqwest's Display omits the underlying cause ("error sending request for url"),
// so walk the source chain to surface e.g. "Connection refused".
fn error_chain(error: &(dyn std::error::Error + 'static)) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
