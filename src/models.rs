//! Core data models for the agent

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AgentError;

//
// ================= Tool I/O =================
//

/// A single tool invocation plus the caller it runs for
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInput {
    pub tool_name: String,
    pub parameters: serde_json::Value,
    #[serde(default)]
    pub user_id: String,
    pub request_id: Uuid,
    /// JWT from the frontend login flow, forwarded to the banking API
    #[serde(default, skip_serializing)]
    pub bearer_token: Option<String>,
}

impl ToolInput {
    pub fn new(tool_name: impl Into<String>, parameters: serde_json::Value) -> Self {
        Self {
            tool_name: tool_name.into(),
            parameters,
            user_id: String::new(),
            request_id: Uuid::new_v4(),
            bearer_token: None,
        }
    }

    pub fn for_user(mut self, user_id: impl Into<String>, bearer_token: Option<String>) -> Self {
        self.user_id = user_id.into();
        self.bearer_token = bearer_token;
        self
    }

    /// Optional boolean parameter. Present but not a boolean is invalid.
    pub fn bool_param(&self, key: &str) -> crate::Result<Option<bool>> {
        self.typed_param(key, "a boolean", |v| v.as_bool())
    }

    /// Optional integer parameter. Present but not an integer is invalid.
    pub fn int_param(&self, key: &str) -> crate::Result<Option<i64>> {
        self.typed_param(key, "an integer", |v| v.as_i64())
    }

    fn typed_param<T>(
        &self,
        key: &str,
        expected: &str,
        read: impl Fn(&serde_json::Value) -> Option<T>,
    ) -> crate::Result<Option<T>> {
        match self.parameters.get(key) {
            None | Some(serde_json::Value::Null) => Ok(None),
            Some(v) => read(v).map(Some).ok_or_else(|| {
                AgentError::InvalidToolInput(format!("'{}' must be {}", key, expected))
            }),
        }
    }
}

/// Structured tool result. Failures are reported here rather than as errors
/// so the caller can always render something to the user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolOutput {
    pub success: bool,
    pub data: serde_json::Value,
    pub error: Option<String>,
}

impl ToolOutput {
    pub fn ok(data: serde_json::Value) -> Self {
        Self {
            success: true,
            data,
            error: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: serde_json::Value::Null,
            error: Some(message.into()),
        }
    }
}

/// Tool description advertised to the model and the HTTP API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub input_schema: serde_json::Value,
}
