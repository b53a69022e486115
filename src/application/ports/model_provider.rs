use async_trait::async_trait;
use pgvector::Vector;
use serde::{Deserialize, Serialize};

/// One (role, content) entry of a chat-completion request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptMessage {
    pub role: String,
    pub content: String,
}

impl PromptMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }

    pub fn new(role: &str, content: impl Into<String>) -> Self {
        Self {
            role: role.to_string(),
            content: content.into(),
        }
    }
}

#[derive(Debug)]
pub enum EmbeddingError {
    NetworkError(String),
    ApiError(String),
    EmptyResponse,
}

impl std::fmt::Display for EmbeddingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EmbeddingError::NetworkError(msg) => write!(f, "Network error: {}", msg),
            EmbeddingError::ApiError(msg) => write!(f, "API error: {}", msg),
            EmbeddingError::EmptyResponse => write!(f, "No embeddings returned"),
        }
    }
}

impl std::error::Error for EmbeddingError {}

#[derive(Debug)]
pub enum CompletionError {
    NetworkError(String),
    ApiError(String),
    EmptyResponse,
}

impl std::fmt::Display for CompletionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CompletionError::NetworkError(msg) => write!(f, "Network error: {}", msg),
            CompletionError::ApiError(msg) => write!(f, "API error: {}", msg),
            CompletionError::EmptyResponse => write!(f, "No completion returned"),
        }
    }
}

impl std::error::Error for CompletionError {}

/// Turns text into fixed-dimension vectors, one per input, preserving order.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vector>, EmbeddingError>;

    async fn embed_one(&self, text: &str) -> Result<Vector, EmbeddingError> {
        let mut vectors = self.embed(&[text.to_string()]).await?;
        if vectors.is_empty() {
            return Err(EmbeddingError::EmptyResponse);
        }
        Ok(vectors.remove(0))
    }
}

/// Chat-completion call: ordered messages in, one text completion out.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    async fn complete(
        &self,
        messages: &[PromptMessage],
        temperature: Option<f32>,
    ) -> Result<String, CompletionError>;
}
