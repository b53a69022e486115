use std::sync::Arc;
use uuid::Uuid;

use crate::application::ports::{
    CompletionProvider, EmbeddingProvider, PromptMessage, VectorIndex,
};
use crate::domain::entities::ChatMessage;
use crate::domain::repositories::{ChatRepository, DocumentRepository};

const SYSTEM_PROMPT: &str =
    "You are a helpful financial assistant. Use only the document context provided.";

const NO_CONTEXT_PLACEHOLDER: &str = "No relevant content found in the document.";

/// Canned replies matched by prefix against the normalized query. Prefix
/// matching is intentionally loose: "history of dividends" matches "hi".
const CASUAL_REPLIES: &[(&str, &str)] = &[
    ("hi", "Hello! Ask me something about the financial report."),
    ("hello", "Hey there! What would you like to know about this report?"),
    ("hey", "Hi! I'm ready when you are."),
    (
        "thanks",
        "You're welcome! Let me know if you need help with anything in the document.",
    ),
    ("thank you", "Always happy to help!"),
    ("bye", "Goodbye! Come back anytime to explore the financials."),
];

#[derive(Debug)]
pub enum ChatServiceError {
    DocumentNotFound(Uuid),
    EmbeddingError(String),
    CompletionError(String),
    PersistenceError(String),
    IndexError(String),
}

impl std::fmt::Display for ChatServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChatServiceError::DocumentNotFound(id) => write!(f, "Document not found: {}", id),
            ChatServiceError::EmbeddingError(msg) => write!(f, "Embedding error: {}", msg),
            ChatServiceError::CompletionError(msg) => write!(f, "Completion error: {}", msg),
            ChatServiceError::PersistenceError(msg) => write!(f, "Persistence error: {}", msg),
            ChatServiceError::IndexError(msg) => write!(f, "Vector index error: {}", msg),
        }
    }
}

impl std::error::Error for ChatServiceError {}

/// Answers a free-text query against one document: canned-greeting short
/// circuit, otherwise retrieval-augmented completion replaying the prior
/// conversation. Both turns are persisted either way, user first.
pub struct ChatService {
    document_repository: Arc<dyn DocumentRepository>,
    chat_repository: Arc<dyn ChatRepository>,
    embedding_provider: Arc<dyn EmbeddingProvider>,
    completion_provider: Arc<dyn CompletionProvider>,
    vector_index: Arc<dyn VectorIndex>,
    top_k: i64,
}

impl ChatService {
    pub fn new(
        document_repository: Arc<dyn DocumentRepository>,
        chat_repository: Arc<dyn ChatRepository>,
        embedding_provider: Arc<dyn EmbeddingProvider>,
        completion_provider: Arc<dyn CompletionProvider>,
        vector_index: Arc<dyn VectorIndex>,
    ) -> Self {
        Self {
            document_repository,
            chat_repository,
            embedding_provider,
            completion_provider,
            vector_index,
            top_k: 5,
        }
    }

    pub async fn answer(
        &self,
        document_id: Uuid,
        user_id: Uuid,
        query: &str,
    ) -> Result<String, ChatServiceError> {
        self.document_repository
            .find_by_id(document_id)
            .await
            .map_err(|e| ChatServiceError::PersistenceError(e.to_string()))?
            .ok_or(ChatServiceError::DocumentNotFound(document_id))?;

        if let Some(reply) = casual_reply(query) {
            self.persist_exchange(document_id, user_id, query, reply)
                .await?;
            return Ok(reply.to_string());
        }

        let query_embedding = self
            .embedding_provider
            .embed_one(query)
            .await
            .map_err(|e| ChatServiceError::EmbeddingError(e.to_string()))?;

        let chunks = self
            .vector_index
            .query(&query_embedding, self.top_k, document_id)
            .await
            .map_err(|e| ChatServiceError::IndexError(e.to_string()))?;

        let context = if chunks.is_empty() {
            NO_CONTEXT_PLACEHOLDER.to_string()
        } else {
            chunks.join("\n\n")
        };

        let history = self
            .chat_repository
            .history(document_id, user_id)
            .await
            .map_err(|e| ChatServiceError::PersistenceError(e.to_string()))?;

        let mut messages = Vec::with_capacity(history.len() + 2);
        messages.push(PromptMessage::system(SYSTEM_PROMPT));
        for turn in &history {
            messages.push(PromptMessage::new(turn.sender.as_str(), &turn.message));
        }
        messages.push(PromptMessage::user(format!(
            "Document context:\n{}\n\n{}",
            context, query
        )));

        let reply = self
            .completion_provider
            .complete(&messages, None)
            .await
            .map_err(|e| ChatServiceError::CompletionError(e.to_string()))?;

        self.persist_exchange(document_id, user_id, query, &reply)
            .await?;

        Ok(reply)
    }

    async fn persist_exchange(
        &self,
        document_id: Uuid,
        user_id: Uuid,
        query: &str,
        reply: &str,
    ) -> Result<(), ChatServiceError> {
        let user_turn = ChatMessage::user(document_id, user_id, query.to_string());
        let assistant_turn = ChatMessage::assistant(document_id, user_id, reply.to_string());

        self.chat_repository
            .save_exchange(&user_turn, &assistant_turn)
            .await
            .map_err(|e| ChatServiceError::PersistenceError(e.to_string()))?;

        Ok(())
    }
}

fn casual_reply(query: &str) -> Option<&'static str> {
    let normalized = query.trim().to_lowercase();

    CASUAL_REPLIES
        .iter()
        .find(|(phrase, _)| normalized.starts_with(phrase))
        .map(|(_, reply)| *reply)
}
