pub mod chat_message;
pub mod document;
pub mod document_chunk;
pub mod sacco_metric;

pub use chat_message::{ChatMessage, Sender};
pub use document::{Document, DocumentStatus};
pub use document_chunk::DocumentChunk;
pub use sacco_metric::{MetricFields, SaccoMetric};
