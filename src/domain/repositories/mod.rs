pub mod chat_repository;
pub mod document_repository;
pub mod metric_repository;

pub use chat_repository::{ChatRepository, ChatRepositoryError};
pub use document_repository::{DocumentRepository, DocumentRepositoryError};
pub use metric_repository::{MetricRepository, MetricRepositoryError};
