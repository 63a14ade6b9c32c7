use anyhow::{Context as _, bail, ensure};
use lambda_runtime::tracing::{debug, error, info, warn};
use lambda_runtime::{Diagnostic, LambdaEvent};
use serde_json::Value;

use crate::config::Config;
use crate::generation::generate;
use crate::http::{HttpClient, ReqwestClient};
use crate::models::{ChatRequest, ChatTurn, RelayError, ResponseBody, ResponseEnvelope};
use crate::utils::{CallerIdentity, caller_identity};

/// Configuration and HTTP client shared by every invocation of the process.
///
/// Built once at cold start and only borrowed afterwards.
#[derive(Debug)]
pub struct Relay<C = ReqwestClient> {
    config: Config,
    client: C,
}

impl<C: HttpClient> Relay<C> {
    #[must_use]
    pub const fn new(config: Config, client: C) -> Self {
        Self { config, client }
    }

    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Turns one API Gateway event into a response envelope.
    ///
    /// Never fails: every error is rendered as a `success: false` envelope
    /// with the matching status code.
    pub async fn handle(&self, event: Value) -> ResponseEnvelope {
        match self.process(&event).await {
            Ok(envelope) => {
                info!(status_code = envelope.status_code, "Request completed");
                envelope
            }
            Err(err) => {
                let status_code = err.status_code();
                if status_code >= 500 {
                    error!(status_code, error = %err, "Request failed");
                } else {
                    warn!(status_code, error = %err, "Request rejected");
                }
                ResponseEnvelope::from_error(&err)
            }
        }
    }

    async fn process(&self, event: &Value) -> Result<ResponseEnvelope, RelayError> {
        let url = self.config.generate_url().ok_or(RelayError::Configuration)?;

        // full event only at debug; production logs just the body size
        debug!(event = %event, "Received event");
        info!(body_size = body_size(event), "Received event");

        log_caller(event);

        let request = parse_chat_request(event)?;
        let message = request
            .message
            .filter(|message| !message.is_empty())
            .ok_or(RelayError::Validation)?;

        debug!(message = %message, "Processing message");
        info!(
            history_len = request.conversation_history.len(),
            model_id = %self.config.model_id,
            "Processing message"
        );

        let generated_text = generate(&self.client, &url, &message).await?;

        Ok(success_envelope(
            request.conversation_history,
            message,
            generated_text,
        ))
    }
}

/// Lambda event handler. Delegates to [`Relay::handle`], which logs the full
/// event at `RUST_LOG=debug/trace` and only the body size otherwise.
///
/// # Errors
///
/// Never returns an error; failures are reported inside the envelope so the
/// caller always receives a JSON body.
pub async fn function_handler<C: HttpClient>(
    relay: &Relay<C>,
    event: LambdaEvent<Value>,
) -> Result<ResponseEnvelope, Diagnostic> {
    let (payload, context) = event.into_parts();
    debug!(request_id = %context.request_id, "Invocation started");

    Ok(relay.handle(payload).await)
}

/// Parses the JSON-encoded `body` of the event into a [`ChatRequest`].
///
/// A missing, `null` or blank body is treated as `{}`.
///
/// # Errors
///
/// Returns an error if the event is not an object, if `body` is not a string,
/// or if it does not decode into a chat request object.
pub fn parse_chat_request(event: &Value) -> anyhow::Result<ChatRequest> {
    ensure!(event.is_object(), "event must be a JSON object");

    let body = match event.get("body") {
        None | Some(Value::Null) => return Ok(ChatRequest::default()),
        Some(Value::String(body)) if body.trim().is_empty() => {
            return Ok(ChatRequest::default());
        }
        Some(Value::String(body)) => body,
        Some(other) => bail!("request body must be a JSON-encoded string, got {other}"),
    };

    let value: Value = serde_json::from_str(body).context("request body is not valid JSON")?;
    ensure!(value.is_object(), "request body must be a JSON object");

    serde_json::from_value(value).context("invalid request body")
}

/// Length of the raw `body` string, without re-serializing the event.
fn body_size(event: &Value) -> usize {
    event.get("body").and_then(Value::as_str).map_or(0, str::len)
}

fn log_caller(event: &Value) {
    match caller_identity(event) {
        CallerIdentity::Anonymous => debug!("No authorizer claims on event"),
        CallerIdentity::Authenticated(Some(user)) => info!(user = %user, "Authenticated user"),
        CallerIdentity::Authenticated(None) => {
            info!("Authenticated user without email or username claim");
        }
        CallerIdentity::Malformed => warn!("Authorizer claims are malformed, ignoring"),
    }
}

/// Appends the new user turn, and the assistant turn when the model produced
/// text, to the incoming history.
fn success_envelope(
    mut history: Vec<ChatTurn>,
    message: String,
    generated_text: String,
) -> ResponseEnvelope {
    history.push(ChatTurn::user(message));
    if !generated_text.is_empty() {
        history.push(ChatTurn::assistant(generated_text.clone()));
    }

    ResponseEnvelope::new(200, &ResponseBody::success(generated_text, history))
}
