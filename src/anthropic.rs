//! Anthropic Messages API client
//!
//! Uses a long-lived reqwest::Client for connection pooling.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{error, info};

use crate::config::AppConfig;
use crate::error::AgentError;
use crate::models::ToolDefinition;

const MESSAGES_URL: &str = "https://api.anthropic.com/v1/messages";
const API_VERSION: &str = "2023-06-01";

/// Reusable Anthropic client (connection-pooled)
pub struct AnthropicClient {
    client: Client,
    api_key: String,
    model: String,
    max_tokens: u32,
    base_url: String,
}

impl AnthropicClient {
    pub fn new(api_key: String, model: String, max_tokens: u32) -> crate::Result<Self> {
        let client = Client::builder()
            .pool_idle_timeout(Duration::from_secs(90))
            .pool_max_idle_per_host(8)
            .timeout(Duration::from_secs(120))
            .build()?;

        Ok(Self {
            client,
            api_key,
            model,
            max_tokens,
            base_url: MESSAGES_URL.to_string(),
        })
    }

    pub fn from_config(config: &AppConfig) -> crate::Result<Self> {
        Self::new(
            config.anthropic_api_key.clone(),
            config.model.clone(),
            config.max_tokens,
        )
    }

    /// Send one Messages request
    pub async fn send(
        &self,
        system: &str,
        messages: &[Message],
        tools: &[ToolDefinition],
    ) -> crate::Result<MessagesResponse> {
        if self.api_key.is_empty() {
            return Err(AgentError::LlmError(
                "ANTHROPIC_API_KEY not configured".to_string(),
            ));
        }

        let request = MessagesRequest {
            model: &self.model,
            max_tokens: self.max_tokens,
            system,
            messages,
            tools,
        };

        info!(model = %self.model, messages = messages.len(), "Calling Anthropic API");

        let response = self
            .client
            .post(&self.base_url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                error!("Anthropic API request failed: {}", e);
                AgentError::LlmError(format!("Anthropic API error: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            error!(%status, "Anthropic API error response: {}", error_text);
            return Err(AgentError::LlmError(format!(
                "Anthropic API error ({}): {}",
                status, error_text
            )));
        }

        let parsed: MessagesResponse = response.json().await.map_err(|e| {
            error!("Failed to parse Anthropic response: {}", e);
            AgentError::LlmError(format!("Anthropic parse error: {}", e))
        })?;

        if let Some(usage) = &parsed.usage {
            info!(
                input_tokens = usage.input_tokens,
                output_tokens = usage.output_tokens,
                stop_reason = parsed.stop_reason.as_deref().unwrap_or("unknown"),
                "Anthropic response received"
            );
        }

        Ok(parsed)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
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
        #[serde(default)]
        is_error: bool,
    },
    /// Block types this client does not handle (thinking, images, ...)
    #[serde(other)]
    Unsupported,
}

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

    pub fn assistant_text(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: vec![ContentBlock::Text { text: text.into() }],
        }
    }
}

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: &'a [Message],
    #[serde(skip_serializing_if = "<[_]>::is_empty")]
    tools: &'a [ToolDefinition],
}

#[derive(Debug, Deserialize)]
pub struct MessagesResponse {
    pub content: Vec<ContentBlock>,
    pub stop_reason: Option<String>,
    pub usage: Option<Usage>,
}

impl MessagesResponse {
    pub fn wants_tools(&self) -> bool {
        self.stop_reason.as_deref() == Some("tool_use")
    }

    /// All text blocks joined with newlines
    pub fn text(&self) -> String {
        self.content
            .iter()
            .filter_map(|block| match block {
                ContentBlock::Text { text } => Some(text.as_str()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Content worth echoing back in the next request
    pub fn replayable_content(&self) -> Vec<ContentBlock> {
        self.content
            .iter()
            .filter(|b| !matches!(b, ContentBlock::Unsupported))
            .cloned()
            .collect()
    }
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_serialization() {
        let messages = vec![Message::user_text("What's my balance?")];
        let tools = vec![ToolDefinition {
            name: "get_balance".to_string(),
            description: "Check wallet balance".to_string(),
            input_schema: json!({"type": "object", "properties": {}}),
        }];
        let request = MessagesRequest {
            model: "claude-sonnet-4-20250514",
            max_tokens: 4096,
            system: "You are NeuraPay",
            messages: &messages,
            tools: &tools,
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["messages"][0]["content"][0]["type"], "text");
        assert_eq!(json["tools"][0]["name"], "get_balance");
    }

    #[test]
    fn test_empty_tools_are_omitted() {
        let request = MessagesRequest {
            model: "m",
            max_tokens: 16,
            system: "",
            messages: &[],
            tools: &[],
        };
        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("tools").is_none());
    }

    #[test]
    fn test_response_with_tool_use_and_unknown_block() {
        let response: MessagesResponse = serde_json::from_value(json!({
            "content": [
                {"type": "thinking", "thinking": "hmm", "signature": "x"},
                {"type": "text", "text": "Let me check."},
                {"type": "tool_use", "id": "toolu_1", "name": "get_balance", "input": {}}
            ],
            "stop_reason": "tool_use",
            "usage": {"input_tokens": 10, "output_tokens": 5}
        }))
        .unwrap();

        assert!(response.wants_tools());
        assert_eq!(response.text(), "Let me check.");
        assert_eq!(response.replayable_content().len(), 2);
        assert_eq!(response.content[0], ContentBlock::Unsupported);
    }

    #[test]
    fn test_tool_result_serialization() {
        let block = ContentBlock::ToolResult {
            tool_use_id: "toolu_1".into(),
            content: "{\"success\":true}".into(),
            is_error: false,
        };
        let json = serde_json::to_value(&block).unwrap();
        assert_eq!(json["type"], "tool_result");
        assert_eq!(json["tool_use_id"], "toolu_1");
    }
}
