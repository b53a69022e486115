use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sender {
    User,
    Assistant,
}

impl Sender {
    pub fn as_str(self) -> &'static str {
        match self {
            Sender::User => "user",
            Sender::Assistant => "assistant",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "user" => Some(Sender::User),
            "assistant" => Some(Sender::Assistant),
            _ => None,
        }
    }
}

/// One turn of a conversation, ordered by timestamp within a
/// (document, user) pair and replayed into every subsequent prompt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: Uuid,
    pub user_id: Uuid,
    pub document_id: Uuid,
    pub sender: Sender,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    pub fn user(document_id: Uuid, user_id: Uuid, message: String) -> Self {
        Self::turn(document_id, user_id, Sender::User, message)
    }

    pub fn assistant(document_id: Uuid, user_id: Uuid, message: String) -> Self {
        Self::turn(document_id, user_id, Sender::Assistant, message)
    }

    fn turn(document_id: Uuid, user_id: Uuid, sender: Sender, message: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            document_id,
            sender,
            message,
            timestamp: Utc::now(),
        }
    }
}
