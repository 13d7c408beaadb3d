//! Internal assistant chat models.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::normalize;

/// Who authored a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

/// A single turn in the assistant conversation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    pub id: String,
    pub role: ChatRole,
    pub content: String,
    /// Unix milliseconds
    pub timestamp: i64,
    #[serde(default)]
    pub is_error: bool,
}

/// A structured option the assistant offers, confirmed via its token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatOption {
    pub label: String,
    pub token: String,
}

/// Outbound assistant request: free text, or a confirmation round trip.
#[derive(Debug, Clone, PartialEq)]
pub enum AssistantRequest {
    Message(String),
    Confirm { token: String },
    Cancel { token: String },
}

impl AssistantRequest {
    /// Request body for the chat endpoint.
    pub fn payload(&self) -> Value {
        match self {
            AssistantRequest::Message(text) => serde_json::json!({ "message": text }),
            AssistantRequest::Confirm { token } => serde_json::json!({ "confirm_token": token }),
            AssistantRequest::Cancel { token } => serde_json::json!({ "cancel_token": token }),
        }
    }
}

/// Assistant reply plus any pending confirmation options.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ChatReply {
    pub reply: String,
    #[serde(default)]
    pub options: Vec<ChatOption>,
}

impl ChatReply {
    /// Build from a raw response envelope.
    pub fn from_response(response: &Value) -> Self {
        let record = normalize::record(response);
        let reply = record
            .get("reply")
            .or_else(|| record.get("message"))
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        let options = record
            .get("options")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(|item| serde_json::from_value(item.clone()).ok())
                    .collect()
            })
            .unwrap_or_default();
        Self { reply, options }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_payloads() {
        let message = AssistantRequest::Message("book a scan".into());
        assert_eq!(message.payload()["message"], "book a scan");

        let confirm = AssistantRequest::Confirm { token: "t-1".into() };
        assert_eq!(confirm.payload()["confirm_token"], "t-1");
    }

    #[test]
    fn test_reply_from_enveloped_response() {
        let response = serde_json::json!({
            "data": {
                "reply": "Confirm booking?",
                "options": [{ "label": "Yes", "token": "t-1" }]
            }
        });
        let reply = ChatReply::from_response(&response);
        assert_eq!(reply.reply, "Confirm booking?");
        assert_eq!(reply.options.len(), 1);
        assert_eq!(reply.options[0].token, "t-1");
    }

    #[test]
    fn test_reply_tolerates_bare_message() {
        let response = serde_json::json!({ "message": "Done." });
        let reply = ChatReply::from_response(&response);
        assert_eq!(reply.reply, "Done.");
        assert!(reply.options.is_empty());
    }
}
