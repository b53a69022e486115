use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::ChatMessage;

#[derive(Debug, Deserialize)]
pub struct ChatRequestDto {
    pub query: String,
    #[serde(rename = "userId")]
    pub user_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct ChatResponseDto {
    pub response: String,
}

#[derive(Debug, Serialize)]
pub struct ChatTurnDto {
    pub sender: String,
    pub text: String,
}

impl From<ChatMessage> for ChatTurnDto {
    fn from(message: ChatMessage) -> Self {
        Self {
            sender: message.sender.as_str().to_string(),
            text: message.message,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DeleteHistoryResponseDto {
    pub message: String,
}
