use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};
use std::sync::Arc;

use crate::domain::entities::Document;
use crate::domain::repositories::DocumentRepository;
use crate::presentation::http::dto::{CreateDocumentRequestDto, DocumentResponseDto};
use crate::presentation::http::errors::AppError;

pub struct DocumentHandler {
    document_repository: Arc<dyn DocumentRepository>,
}

impl DocumentHandler {
    pub fn new(document_repository: Arc<dyn DocumentRepository>) -> Self {
        Self { document_repository }
    }

    pub async fn create_document(
        State(handler): State<Arc<DocumentHandler>>,
        Json(request): Json<CreateDocumentRequestDto>,
    ) -> Result<impl IntoResponse, AppError> {
        if request.name.trim().is_empty() {
            return Err(AppError::BadRequest("Name cannot be empty".to_string()));
        }
        if request.file_url.trim().is_empty() {
            return Err(AppError::BadRequest("File URL cannot be empty".to_string()));
        }

        let document = Document::new(
            request.name,
            request.year,
            request.description,
            request.file_url,
            request.uploaded_by,
        );

        handler.document_repository.create(&document).await?;

        Ok((
            StatusCode::CREATED,
            Json(DocumentResponseDto::from(&document)),
        ))
    }

    pub async fn list_documents(
        State(handler): State<Arc<DocumentHandler>>,
    ) -> Result<impl IntoResponse, AppError> {
        let documents = handler.document_repository.list_all().await?;

        let dtos: Vec<DocumentResponseDto> =
            documents.iter().map(DocumentResponseDto::from).collect();

        Ok(Json(dtos))
    }
}
