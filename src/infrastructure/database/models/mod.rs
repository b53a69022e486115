pub mod chat_model;
pub mod chunk_model;
pub mod document_model;
pub mod metric_model;

pub use chat_model::ChatModel;
pub use chunk_model::ChunkModel;
pub use document_model::DocumentModel;
pub use metric_model::MetricModel;
