use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::entities::{ChatMessage, Sender};
use crate::infrastructure::database::schema::chats;

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = chats)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ChatModel {
    pub id: Uuid,
    pub user_id: Uuid,
    pub document_id: Uuid,
    pub sender: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl From<&ChatMessage> for ChatModel {
    fn from(message: &ChatMessage) -> Self {
        Self {
            id: message.id,
            user_id: message.user_id,
            document_id: message.document_id,
            sender: message.sender.as_str().to_string(),
            message: message.message.clone(),
            timestamp: message.timestamp,
        }
    }
}

impl TryFrom<ChatModel> for ChatMessage {
    type Error = String;

    fn try_from(model: ChatModel) -> Result<Self, Self::Error> {
        let sender = Sender::from_str(&model.sender)
            .ok_or_else(|| format!("Unknown chat sender: {}", model.sender))?;

        Ok(ChatMessage {
            id: model.id,
            user_id: model.user_id,
            document_id: model.document_id,
            sender,
            message: model.message,
            timestamp: model.timestamp,
        })
    }
}
