//! Serde types for the Anthropic messages API.

use serde::{Deserialize, Serialize};

/// API version header value, pinned.
pub const ANTHROPIC_VERSION: &str = "2023-06-01";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One conversation message. Content is always a block list; the API accepts
/// that form for both roles.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: Vec<ContentBlock>,
}

impl Message {
    pub fn user_text(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: vec![ContentBlock::Text { text: text.into() }],
        }
    }

    /// Text blocks of this message joined with newlines.
    pub fn text(&self) -> String {
        let parts: Vec<&str> = self
            .content
            .iter()
            .filter_map(|block| match block {
                ContentBlock::Text { text } => Some(text.as_str()),
                _ => None,
            })
            .collect();
        parts.join("\n")
    }
}

/// Content blocks as they appear in requests and responses. `tool_use` comes
/// back from the model; `tool_result` goes up in the next user message.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    Text {
        text: String,
    },
    ToolUse {
        id: String,
        name: String,
        input: serde_json::Value,
    },
    ToolResult {
        tool_use_id: String,
        content: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        is_error: Option<bool>,
    },
}

/// A tool offered to the model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolSpec {
    pub name: String,
    pub description: String,
    pub input_schema: serde_json::Value,
}

/// Request body for POST /messages. Borrows from the caller; optional parts
/// are omitted entirely rather than sent as null.
#[derive(Debug, Serialize)]
pub(crate) struct MessagesRequest<'a> {
    pub model: &'a str,
    pub max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<&'a [ToolSpec]>,
    pub messages: &'a [Message],
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    pub input_tokens: u64,
    pub output_tokens: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MessagesResponse {
    #[serde(default)]
    pub id: String,
    pub content: Vec<ContentBlock>,
    #[serde(default)]
    pub stop_reason: Option<String>,
    #[serde(default)]
    pub usage: Usage,
}

impl MessagesResponse {
    /// All text blocks joined with newlines.
    pub fn text(&self) -> String {
        let parts: Vec<&str> = self
            .content
            .iter()
            .filter_map(|block| match block {
                ContentBlock::Text { text } => Some(text.as_str()),
                _ => None,
            })
            .collect();
        parts.join("\n")
    }
}

/// Error body shape: `{"type": "error", "error": {"type": ..., "message": ...}}`.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorEnvelope {
    pub error: ApiError,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiError {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn text_block_wire_shape() {
        let block = ContentBlock::Text {
            text: "Hello".into(),
        };
        let v = serde_json::to_value(&block).unwrap();
        assert_eq!(v, json!({"type": "text", "text": "Hello"}));
    }

    #[test]
    fn tool_use_block_parses() {
        let raw = json!({
            "type": "tool_use",
            "id": "toolu_01",
            "name": "fetch_linkedin_profile",
            "input": {"linkedin_url": "https://www.linkedin.com/in/jenhsunhuang/"}
        });
        let block: ContentBlock = serde_json::from_value(raw).unwrap();
        match block {
            ContentBlock::ToolUse { id, name, input } => {
                assert_eq!(id, "toolu_01");
                assert_eq!(name, "fetch_linkedin_profile");
                assert_eq!(
                    input["linkedin_url"],
                    "https://www.linkedin.com/in/jenhsunhuang/"
                );
            }
            other => panic!("wrong block: {other:?}"),
        }
    }

    #[test]
    fn tool_result_omits_is_error_when_none() {
        let block = ContentBlock::ToolResult {
            tool_use_id: "toolu_01".into(),
            content: "ok".into(),
            is_error: None,
        };
        let v = serde_json::to_value(&block).unwrap();
        assert_eq!(
            v,
            json!({"type": "tool_result", "tool_use_id": "toolu_01", "content": "ok"})
        );
    }

    #[test]
    fn tool_result_keeps_is_error_when_set() {
        let block = ContentBlock::ToolResult {
            tool_use_id: "toolu_01".into(),
            content: "profile not found".into(),
            is_error: Some(true),
        };
        let v = serde_json::to_value(&block).unwrap();
        assert_eq!(v["is_error"], json!(true));
    }

    #[test]
    fn request_omits_optional_fields() {
        let messages = [Message::user_text("Hi")];
        let req = MessagesRequest {
            model: "claude-sonnet-4-5-20250929",
            max_tokens: 300,
            system: None,
            temperature: None,
            tools: None,
            messages: &messages,
        };
        let v = serde_json::to_value(&req).unwrap();
        assert!(v.get("system").is_none());
        assert!(v.get("temperature").is_none());
        assert!(v.get("tools").is_none());
        assert_eq!(v["model"], "claude-sonnet-4-5-20250929");
        assert_eq!(v["messages"][0]["role"], "user");
        assert_eq!(v["messages"][0]["content"][0]["type"], "text");
    }

    #[test]
    fn request_includes_tools_when_present() {
        let messages = [Message::user_text("Hi")];
        let tools = [ToolSpec {
            name: "fetch_linkedin_profile".into(),
            description: "Fetch a profile".into(),
            input_schema: json!({"type": "object"}),
        }];
        let req = MessagesRequest {
            model: "m",
            max_tokens: 100,
            system: Some("You are a research assistant."),
            temperature: Some(0.7),
            tools: Some(&tools),
            messages: &messages,
        };
        let v = serde_json::to_value(&req).unwrap();
        assert_eq!(v["system"], "You are a research assistant.");
        assert_eq!(v["tools"][0]["name"], "fetch_linkedin_profile");
    }

    #[test]
    fn response_parses_and_joins_text() {
        let raw = json!({
            "id": "msg_01",
            "content": [
                {"type": "text", "text": "Looking that up."},
                {"type": "tool_use", "id": "toolu_01", "name": "fetch_linkedin_profile",
                 "input": {"linkedin_url": "https://linkedin.com/in/someone"}}
            ],
            "stop_reason": "tool_use",
            "usage": {"input_tokens": 420, "output_tokens": 55}
        });
        let resp: MessagesResponse = serde_json::from_value(raw).unwrap();
        assert_eq!(resp.text(), "Looking that up.");
        assert!(matches!(resp.content[1], ContentBlock::ToolUse { .. }));
        assert_eq!(resp.stop_reason.as_deref(), Some("tool_use"));
        assert_eq!(resp.usage.input_tokens, 420);
        assert_eq!(resp.usage.output_tokens, 55);
    }

    #[test]
    fn response_tolerates_missing_usage() {
        let raw = json!({
            "content": [{"type": "text", "text": "Hi"}]
        });
        let resp: MessagesResponse = serde_json::from_value(raw).unwrap();
        assert_eq!(resp.usage, Usage::default());
        assert!(resp.stop_reason.is_none());
    }

    #[test]
    fn error_envelope_parses() {
        let raw = json!({
            "type": "error",
            "error": {"type": "authentication_error", "message": "invalid x-api-key"}
        });
        let env: ErrorEnvelope = serde_json::from_value(raw).unwrap();
        assert_eq!(env.error.kind, "authentication_error");
        assert_eq!(env.error.message, "invalid x-api-key");
    }
}
