//! JSON Schemas describing the public chat endpoint.

use schemars::{JsonSchema, schema_for};
use serde_json::{Value, json};

use crate::models::{ChatRequest, ResponseBody};

pub const ENDPOINT_NAME: &str = "chat";
pub const ENDPOINT_DESCRIPTION: &str = "Send a message, optionally with the previous conversation turns, to the text generation model. Returns the generated reply and the conversation history extended with the new user and assistant turns.";

/// Generates the schema of `T` without the `$schema` and `title` keys.
///
/// # Errors
///
/// Returns an error if the schema cannot be converted to JSON.
pub fn schema_of<T: JsonSchema>() -> Result<Value, serde_json::Error> {
    let mut schema = serde_json::to_value(schema_for!(T))?;
    if let Some(obj) = schema.as_object_mut() {
        obj.remove("$schema");
        obj.remove("title");
    }
    Ok(schema)
}

/// Describes the endpoint: name, description, request body and response body.
///
/// # Errors
///
/// Returns an error if one of the schemas cannot be converted to JSON.
pub fn api_schema() -> Result<Value, serde_json::Error> {
    Ok(json!({
        "name": ENDPOINT_NAME,
        "description": ENDPOINT_DESCRIPTION,
        "inputSchema": schema_of::<ChatRequest>()?,
        "outputSchema": schema_of::<ResponseBody>()?,
    }))
}
