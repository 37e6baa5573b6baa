//! Conversational interaction handler
//!
//! Sends the chat history plus the new user turn to the model along with the
//! registry's tool definitions, runs any requested tools, and feeds their
//! results back until the model answers in plain text.

use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::anthropic::{AnthropicClient, ContentBlock, Message, MessagesResponse, Role};
use crate::error::AgentError;
use crate::memory::ConversationMemory;
use crate::models::{ToolDefinition, ToolInput};
use crate::prompt::SYSTEM_PROMPT;
use crate::tools::ToolRegistry;

/// Upper bound on model round-trips that request tools
pub const MAX_TOOL_ROUNDS: usize = 8;

/// Anything that can answer a Messages API request
#[async_trait]
pub trait LanguageModel: Send + Sync {
    async fn send(
        &self,
        system: &str,
        messages: &[Message],
        tools: &[ToolDefinition],
    ) -> crate::Result<MessagesResponse>;
}

#[async_trait]
impl LanguageModel for AnthropicClient {
    async fn send(
        &self,
        system: &str,
        messages: &[Message],
        tools: &[ToolDefinition],
    ) -> crate::Result<MessagesResponse> {
        AnthropicClient::send(self, system, messages, tools).await
    }
}

/// Tool run recorded during one reply
#[derive(Debug, Clone, Serialize)]
pub struct ToolCallRecord {
    pub tool: String,
    pub success: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatReply {
    pub answer: String,
    pub tool_calls: Vec<ToolCallRecord>,
    pub context_messages: usize,
}

pub struct ChatAgent {
    llm: Arc<dyn LanguageModel>,
    registry: Arc<ToolRegistry>,
    memory: ConversationMemory,
}

impl ChatAgent {
    pub fn new(llm: Arc<dyn LanguageModel>, registry: Arc<ToolRegistry>) -> Self {
        Self {
            llm,
            registry,
            memory: ConversationMemory::new(),
        }
    }

    pub fn registry(&self) -> &Arc<ToolRegistry> {
        &self.registry
    }

    pub fn memory(&self) -> &ConversationMemory {
        &self.memory
    }

    /// Answer one user turn. History is only updated when a final answer is
    /// produced.
    pub async fn respond(
        &self,
        user_id: Uuid,
        chat_id: Uuid,
        text: &str,
        bearer_token: Option<String>,
    ) -> crate::Result<ChatReply> {
        let history = self.memory.history(user_id, chat_id).await;
        let context_messages = history.message_count();

        let mut messages = history.to_llm_messages();
        messages.push(Message::user_text(text));

        let tools = self.registry.definitions();
        let mut tool_calls = Vec::new();

        for round in 0..=MAX_TOOL_ROUNDS {
            let response = self.llm.send(SYSTEM_PROMPT, &messages, &tools).await?;

            if !response.wants_tools() {
                let answer = response.text();
                self.memory
                    .record_exchange(user_id, chat_id, text.to_string(), answer.clone())
                    .await;

                info!(
                    %user_id,
                    %chat_id,
                    rounds = round,
                    tools_used = tool_calls.len(),
                    "Chat reply ready"
                );

                return Ok(ChatReply {
                    answer,
                    tool_calls,
                    context_messages,
                });
            }

            if round == MAX_TOOL_ROUNDS {
                break;
            }

            let mut results = Vec::new();
            for block in &response.content {
                let ContentBlock::ToolUse { id, name, input } = block else {
                    continue;
                };

                let tool_input = ToolInput::new(name.clone(), input.clone())
                    .for_user(user_id.to_string(), bearer_token.clone());
                let output = self.registry.run(&tool_input).await;

                tool_calls.push(ToolCallRecord {
                    tool: name.clone(),
                    success: output.success,
                });
                results.push(ContentBlock::ToolResult {
                    tool_use_id: id.clone(),
                    content: serde_json::to_string(&output)?,
                    is_error: !output.success,
                });
            }

            if results.is_empty() {
                warn!(%chat_id, "Model stopped for tool_use without requesting a tool");
                return Err(AgentError::LlmError(
                    "model requested tools but sent no tool_use blocks".to_string(),
                ));
            }

            messages.push(Message {
                role: Role::Assistant,
                content: response.replayable_content(),
            });
            messages.push(Message {
                role: Role::User,
                content: results,
            });
        }

        warn!(%chat_id, "Tool loop limit reached");
        Err(AgentError::LlmError(format!(
            "no final answer after {} tool rounds",
            MAX_TOOL_ROUNDS
        )))
    }
}
