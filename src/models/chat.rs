use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One role-tagged turn of a conversation. The role is passed through as-is,
/// and so is any other key the client attached to the turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ChatTurn {
    #[schemars(description = "Speaker of the turn, usually \"user\" or \"assistant\"")]
    pub role: String,
    #[schemars(description = "Text of the turn")]
    pub content: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ChatTurn {
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
            extra: Map::new(),
        }
    }

    #[must_use]
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: "assistant".to_string(),
            content: content.into(),
            extra: Map::new(),
        }
    }
}

/// Chat request carried in the event `body`
#[derive(Debug, Default, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    #[schemars(description = "Message to send to the model")]
    pub message: Option<String>,
    #[serde(default)]
    #[schemars(description = "Previous turns of the conversation, oldest first")]
    pub conversation_history: Vec<ChatTurn>,
}

/// JSON document placed in the envelope `body`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResponseBody {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Text generated by the model")]
    pub response: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Input history followed by the new user and assistant turns")]
    pub conversation_history: Option<Vec<ChatTurn>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Human-readable failure description")]
    pub error: Option<String>,
}

impl ResponseBody {
    #[must_use]
    pub const fn success(response: String, conversation_history: Vec<ChatTurn>) -> Self {
        Self {
            success: true,
            response: Some(response),
            conversation_history: Some(conversation_history),
            error: None,
        }
    }

    #[must_use]
    pub const fn failure(error: String) -> Self {
        Self {
            success: false,
            response: None,
            conversation_history: None,
            error: Some(error),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_turn_keeps_unknown_keys() {
        let input = json!({"role": "user", "content": "a", "timestamp": 123, "meta": {"id": "x"}});
        let turn: ChatTurn = serde_json::from_value(input.clone()).unwrap();

        assert_eq!(turn.role, "user");
        assert_eq!(turn.extra["timestamp"], 123);
        assert_eq!(serde_json::to_value(&turn).unwrap(), input);
    }

    #[test]
    fn test_new_turns_have_no_extra_keys() {
        let value = serde_json::to_value(ChatTurn::assistant("hello")).unwrap();
        assert_eq!(value, json!({"role": "assistant", "content": "hello"}));
    }
}
