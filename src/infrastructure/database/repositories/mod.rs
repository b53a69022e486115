pub mod pgvector_index;
pub mod postgres_chat_repository;
pub mod postgres_document_repository;
pub mod postgres_metric_repository;

pub use pgvector_index::PgVectorIndex;
pub use postgres_chat_repository::PostgresChatRepository;
pub use postgres_document_repository::PostgresDocumentRepository;
pub use postgres_metric_repository::PostgresMetricRepository;
