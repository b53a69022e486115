use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::Document;

#[derive(Debug, Deserialize)]
pub struct CreateDocumentRequestDto {
    pub name: String,
    pub year: i32,
    pub description: Option<String>,
    pub file_url: String,
    pub uploaded_by: Option<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct DocumentResponseDto {
    pub id: Uuid,
    pub name: String,
    pub year: i32,
    pub description: Option<String>,
    pub file_url: String,
    pub uploaded_by: Option<Uuid>,
    pub status: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Document> for DocumentResponseDto {
    fn from(document: &Document) -> Self {
        Self {
            id: document.id(),
            name: document.name().to_string(),
            year: document.year(),
            description: document.description().map(str::to_string),
            file_url: document.file_url().to_string(),
            uploaded_by: document.uploaded_by(),
            status: document.status().as_i32(),
            created_at: document.created_at(),
            updated_at: document.updated_at(),
        }
    }
}
