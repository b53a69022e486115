use axum::{Json, http::StatusCode, response::IntoResponse, response::Response};
use serde_json::json;

use crate::application::services::ChatServiceError;
use crate::domain::repositories::{
    ChatRepositoryError, DocumentRepositoryError, MetricRepositoryError,
};

/// Error surface of the HTTP layer. Every variant maps to a status code and
/// an `{"error": msg}` body.
#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    NotFoundError(String),
    DatabaseError(String),
    UpstreamError(String),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            AppError::NotFoundError(msg) => write!(f, "Not found: {}", msg),
            AppError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
            AppError::UpstreamError(msg) => write!(f, "Upstream error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFoundError(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::DatabaseError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            AppError::UpstreamError(msg) => (StatusCode::BAD_GATEWAY, msg),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<ChatServiceError> for AppError {
    fn from(error: ChatServiceError) -> Self {
        match error {
            ChatServiceError::DocumentNotFound(id) => {
                AppError::NotFoundError(format!("Document not found: {}", id))
            }
            ChatServiceError::PersistenceError(msg) | ChatServiceError::IndexError(msg) => {
                AppError::DatabaseError(msg)
            }
            ChatServiceError::EmbeddingError(msg) | ChatServiceError::CompletionError(msg) => {
                AppError::UpstreamError(msg)
            }
        }
    }
}

impl From<DocumentRepositoryError> for AppError {
    fn from(error: DocumentRepositoryError) -> Self {
        match error {
            DocumentRepositoryError::DatabaseError(msg) => AppError::DatabaseError(msg),
        }
    }
}

impl From<ChatRepositoryError> for AppError {
    fn from(error: ChatRepositoryError) -> Self {
        match error {
            ChatRepositoryError::DatabaseError(msg) => AppError::DatabaseError(msg),
        }
    }
}

impl From<MetricRepositoryError> for AppError {
    fn from(error: MetricRepositoryError) -> Self {
        match error {
            MetricRepositoryError::DatabaseError(msg) => AppError::DatabaseError(msg),
        }
    }
}
