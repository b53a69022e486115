use chrono::{DateTime, Utc};
use diesel::prelude::*;
use pgvector::Vector;
use uuid::Uuid;

use crate::domain::entities::DocumentChunk;
use crate::infrastructure::database::schema::document_chunks;

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = document_chunks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ChunkModel {
    pub id: String,
    pub document_id: Uuid,
    pub chunk_text: String,
    pub embedding: Vector,
    pub created_at: DateTime<Utc>,
}

impl From<&DocumentChunk> for ChunkModel {
    fn from(chunk: &DocumentChunk) -> Self {
        Self {
            id: chunk.id.clone(),
            document_id: chunk.document_id,
            chunk_text: chunk.chunk_text.clone(),
            embedding: chunk.embedding.clone(),
            created_at: Utc::now(),
        }
    }
}
