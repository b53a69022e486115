use async_trait::async_trait;
use diesel::prelude::*;
use diesel::upsert::excluded;
use pgvector::{Vector, VectorExpressionMethods};
use uuid::Uuid;

use crate::application::ports::vector_index::{VectorIndex, VectorIndexError};
use crate::domain::entities::DocumentChunk;
use crate::infrastructure::database::models::ChunkModel;
use crate::infrastructure::database::schema::document_chunks::dsl::*;
use crate::infrastructure::database::{DbPool, get_connection_from_pool};

/// Vector store backed by the `document_chunks` table and the pgvector
/// extension. Similarity search runs in Postgres via cosine distance.
pub struct PgVectorIndex {
    pool: DbPool,
}

impl PgVectorIndex {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VectorIndex for PgVectorIndex {
    async fn upsert(&self, chunks: &[DocumentChunk]) -> Result<(), VectorIndexError> {
        if chunks.is_empty() {
            return Ok(());
        }

        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| VectorIndexError::DatabaseError(e.to_string()))?;

        let models: Vec<ChunkModel> = chunks.iter().map(ChunkModel::from).collect();

        // Chunk ids are deterministic per document, so re-ingesting a
        // document overwrites its previous rows instead of duplicating them.
        diesel::insert_into(document_chunks)
            .values(&models)
            .on_conflict(id)
            .do_update()
            .set((
                chunk_text.eq(excluded(chunk_text)),
                embedding.eq(excluded(embedding)),
            ))
            .execute(&mut conn)
            .map_err(|e| VectorIndexError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    async fn query(
        &self,
        query_embedding: &Vector,
        top_k: i64,
        document_id_param: Uuid,
    ) -> Result<Vec<String>, VectorIndexError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| VectorIndexError::DatabaseError(e.to_string()))?;

        let texts = document_chunks
            .filter(document_id.eq(document_id_param))
            .order(embedding.cosine_distance(query_embedding.clone()))
            .limit(top_k)
            .select(chunk_text)
            .load::<String>(&mut conn)
            .map_err(|e| VectorIndexError::DatabaseError(e.to_string()))?;

        Ok(texts)
    }
}
