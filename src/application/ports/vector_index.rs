use async_trait::async_trait;
use pgvector::Vector;
use uuid::Uuid;

use crate::domain::entities::DocumentChunk;

#[derive(Debug)]
pub enum VectorIndexError {
    DatabaseError(String),
}

impl std::fmt::Display for VectorIndexError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VectorIndexError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
        }
    }
}

impl std::error::Error for VectorIndexError {}

/// Persistent store of (vector, text, document) tuples with filtered
/// nearest-neighbor retrieval.
#[async_trait]
pub trait VectorIndex: Send + Sync {
    /// Idempotent bulk insert; re-inserting an existing chunk id replaces it.
    async fn upsert(&self, chunks: &[DocumentChunk]) -> Result<(), VectorIndexError>;

    /// Up to `top_k` chunk texts for the document, most similar first. An
    /// unknown document yields an empty list, never an error.
    async fn query(
        &self,
        embedding: &Vector,
        top_k: i64,
        document_id: Uuid,
    ) -> Result<Vec<String>, VectorIndexError>;
}
