use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::ChatMessage;

#[derive(Debug)]
pub enum ChatRepositoryError {
    DatabaseError(String),
}

impl std::fmt::Display for ChatRepositoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChatRepositoryError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
        }
    }
}

impl std::error::Error for ChatRepositoryError {}

#[async_trait]
pub trait ChatRepository: Send + Sync {
    /// Persists a user turn and its assistant reply together; neither row
    /// becomes visible unless both inserts succeed.
    async fn save_exchange(
        &self,
        user_turn: &ChatMessage,
        assistant_turn: &ChatMessage,
    ) -> Result<(), ChatRepositoryError>;
    /// Full conversation for a (document, user) pair, oldest first.
    async fn history(
        &self,
        document_id: Uuid,
        user_id: Uuid,
    ) -> Result<Vec<ChatMessage>, ChatRepositoryError>;
    /// Deletes the conversation and returns the number of removed rows.
    async fn delete_history(
        &self,
        document_id: Uuid,
        user_id: Uuid,
    ) -> Result<u64, ChatRepositoryError>;
}
