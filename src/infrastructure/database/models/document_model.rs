use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::entities::{Document, DocumentStatus};
use crate::infrastructure::database::schema::documents;

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = documents)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct DocumentModel {
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

impl From<&Document> for DocumentModel {
    fn from(document: &Document) -> Self {
        Self {
            id: document.id(),
            name: document.name().to_string(),
            year: document.year(),
            description: document.description().map(|s| s.to_string()),
            file_url: document.file_url().to_string(),
            uploaded_by: document.uploaded_by(),
            status: document.status().as_i32(),
            created_at: document.created_at(),
            updated_at: document.updated_at(),
        }
    }
}

impl TryFrom<DocumentModel> for Document {
    type Error = String;

    fn try_from(model: DocumentModel) -> Result<Self, Self::Error> {
        let status = DocumentStatus::from_i32(model.status)
            .ok_or_else(|| format!("Unknown document status: {}", model.status))?;

        Ok(Document::from_parts(
            model.id,
            model.name,
            model.year,
            model.description,
            model.file_url,
            model.uploaded_by,
            status,
            model.created_at,
            model.updated_at,
        ))
    }
}
