//! Conversation history storage
//!
//! Stores conversation turns with timestamps, bounded to the most recent
//! messages.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use uuid::Uuid;

use crate::anthropic::Message;

/// Role of a message sender
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Agent,
}

/// A single message in the conversation history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationMessage {
    pub message_id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub role: MessageRole,
    pub content: String,
}

impl ConversationMessage {
    pub fn new(role: MessageRole, content: String) -> Self {
        Self {
            message_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            role,
            content,
        }
    }

    pub fn to_llm_message(&self) -> Message {
        match self.role {
            MessageRole::User => Message::user_text(self.content.clone()),
            MessageRole::Agent => Message::assistant_text(self.content.clone()),
        }
    }
}

/// Conversation history for one chat
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationHistory {
    pub user_id: Uuid,
    pub chat_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    messages: VecDeque<ConversationMessage>,
}

impl ConversationHistory {
    pub fn new(user_id: Uuid, chat_id: Uuid) -> Self {
        Self {
            user_id,
            chat_id,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            messages: VecDeque::new(),
        }
    }

    /// Record one completed exchange
    pub fn add_exchange(&mut self, user: String, agent: String) {
        self.messages
            .push_back(ConversationMessage::new(MessageRole::User, user));
        self.messages
            .push_back(ConversationMessage::new(MessageRole::Agent, agent));
        self.updated_at = Utc::now();
    }

    pub fn messages(&self) -> impl Iterator<Item = &ConversationMessage> {
        self.messages.iter()
    }

    pub fn message_count(&self) -> usize {
        self.messages.len()
    }

    /// Drop the oldest messages until at most `keep_count` remain.
    ///
    /// Always cuts on an exchange boundary so the history still starts with
    /// a user turn.
    pub fn trim_to_recent(&mut self, keep_count: usize) {
        let keep_count = keep_count - keep_count % 2;
        while self.messages.len() > keep_count {
            self.messages.pop_front();
        }
        while matches!(self.messages.front(), Some(m) if m.role != MessageRole::User) {
            self.messages.pop_front();
        }
    }

    /// History as Messages API turns
    pub fn to_llm_messages(&self) -> Vec<Message> {
        self.messages().map(|m| m.to_llm_message()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anthropic::Role;

    fn history() -> ConversationHistory {
        ConversationHistory::new(Uuid::new_v4(), Uuid::new_v4())
    }

    #[test]
    fn test_add_exchange() {
        let mut history = history();
        history.add_exchange("What's my balance?".into(), "You have $120.".into());

        assert_eq!(history.message_count(), 2);

        let turns = history.to_llm_messages();
        assert_eq!(turns[0].role, Role::User);
        assert_eq!(turns[1].role, Role::Assistant);
    }

    #[test]
    fn test_trim_to_recent_keeps_whole_exchanges() {
        let mut history = history();
        for i in 0..10 {
            history.add_exchange(format!("Question {}", i), format!("Answer {}", i));
        }

        history.trim_to_recent(5);

        assert_eq!(history.message_count(), 4);
        let first = history.messages().next().unwrap();
        assert_eq!(first.role, MessageRole::User);
        assert_eq!(first.content, "Question 8");
    }
}
