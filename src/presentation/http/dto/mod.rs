pub mod chat_dto;
pub mod dashboard_dto;
pub mod document_dto;

pub use chat_dto::*;
pub use dashboard_dto::*;
pub use document_dto::*;
