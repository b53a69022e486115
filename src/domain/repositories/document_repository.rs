use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::{Document, DocumentStatus};

#[derive(Debug)]
pub enum DocumentRepositoryError {
    DatabaseError(String),
}

impl std::fmt::Display for DocumentRepositoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentRepositoryError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
        }
    }
}

impl std::error::Error for DocumentRepositoryError {}

#[async_trait]
pub trait DocumentRepository: Send + Sync {
    async fn create(&self, document: &Document) -> Result<(), DocumentRepositoryError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Document>, DocumentRepositoryError>;
    /// All documents, newest first.
    async fn list_all(&self) -> Result<Vec<Document>, DocumentRepositoryError>;
    async fn list_by_status(
        &self,
        status: DocumentStatus,
    ) -> Result<Vec<Document>, DocumentRepositoryError>;
    async fn list_by_year(&self, year: i32) -> Result<Vec<Document>, DocumentRepositoryError>;
    /// Atomic conditional status advance; returns false when the document was
    /// no longer in the `from` stage.
    async fn transition_status(
        &self,
        id: Uuid,
        from: DocumentStatus,
        to: DocumentStatus,
    ) -> Result<bool, DocumentRepositoryError>;
}
