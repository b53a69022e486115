pub mod chat_service;
pub mod chunker;
pub mod metric_extraction;

pub use chat_service::{ChatService, ChatServiceError};
pub use chunker::TokenChunker;
