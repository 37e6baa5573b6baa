//! Agent Memory System
//!
//! Keeps recent conversation turns per (user, chat) so follow-up questions
//! have context. In-memory only; histories are lost on restart.

pub mod store;

pub use store::{ConversationHistory, ConversationMessage, MessageRole};

use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Messages kept per chat
pub const MAX_HISTORY_MESSAGES: usize = 20;

pub struct ConversationMemory {
    histories: RwLock<HashMap<(Uuid, Uuid), ConversationHistory>>,
    max_messages: usize,
}

impl ConversationMemory {
    pub fn new() -> Self {
        Self::with_limit(MAX_HISTORY_MESSAGES)
    }

    pub fn with_limit(max_messages: usize) -> Self {
        Self {
            histories: RwLock::new(HashMap::new()),
            max_messages,
        }
    }

    /// Snapshot of a chat's history (empty if none yet)
    pub async fn history(&self, user_id: Uuid, chat_id: Uuid) -> ConversationHistory {
        let locked = self.histories.read().await;
        locked
            .get(&(user_id, chat_id))
            .cloned()
            .unwrap_or_else(|| ConversationHistory::new(user_id, chat_id))
    }

    pub async fn record_exchange(&self, user_id: Uuid, chat_id: Uuid, user: String, agent: String) {
        let mut locked = self.histories.write().await;
        let history = locked
            .entry((user_id, chat_id))
            .or_insert_with(|| ConversationHistory::new(user_id, chat_id));

        history.add_exchange(user, agent);
        history.trim_to_recent(self.max_messages);
    }
}

impl Default for ConversationMemory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_histories_are_scoped_per_chat() {
        let memory = ConversationMemory::with_limit(4);
        let user = Uuid::new_v4();
        let (chat_a, chat_b) = (Uuid::new_v4(), Uuid::new_v4());

        for i in 0..3 {
            memory
                .record_exchange(user, chat_a, format!("q{}", i), format!("a{}", i))
                .await;
        }
        memory
            .record_exchange(user, chat_b, "hello".into(), "hi".into())
            .await;

        assert_eq!(memory.history(user, chat_a).await.message_count(), 4);
        assert_eq!(memory.history(user, chat_b).await.message_count(), 2);
        assert_eq!(memory.history(Uuid::new_v4(), chat_a).await.message_count(), 0);
    }
}
