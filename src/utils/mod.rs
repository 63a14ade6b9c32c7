//! Utility functions shared across the application.

use serde_json::Value;

/// Outcome of looking up the caller's identity in authorizer claims.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallerIdentity {
    /// No `requestContext.authorizer` on the event.
    Anonymous,
    /// Claims present; the user is the `email` claim, falling back to
    /// `cognito:username`. `None` when neither claim is a string.
    Authenticated(Option<String>),
    /// An authorizer is present but its claims are not a JSON object.
    Malformed,
}

/// Extracts the caller identity from `requestContext.authorizer.claims`.
///
/// Never fails: the result is only used for logging.
///
/// # Arguments
///
/// * `event` - The raw Lambda event
#[must_use]
pub fn caller_identity(event: &Value) -> CallerIdentity {
    let Some(authorizer) = event
        .get("requestContext")
        .and_then(|ctx| ctx.get("authorizer"))
        .filter(|authorizer| !authorizer.is_null())
    else {
        return CallerIdentity::Anonymous;
    };

    let Some(claims) = authorizer.get("claims").and_then(Value::as_object) else {
        return CallerIdentity::Malformed;
    };

    let user = ["email", "cognito:username"]
        .iter()
        .filter_map(|key| claims.get(*key).and_then(Value::as_str))
        .find(|value| !value.is_empty())
        .map(str::to_string);

    CallerIdentity::Authenticated(user)
}
