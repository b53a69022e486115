use pgvector::Vector;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One embedded slice of a document's extracted text, the unit of similarity
/// retrieval. Created once at ingestion, immutable thereafter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentChunk {
    pub id: String,
    pub document_id: Uuid,
    pub chunk_text: String,
    pub embedding: Vector,
}

impl DocumentChunk {
    pub fn new(document_id: Uuid, sequence_index: usize, chunk_text: String, embedding: Vector) -> Self {
        Self {
            id: Self::chunk_id(document_id, sequence_index),
            document_id,
            chunk_text,
            embedding,
        }
    }

    pub fn chunk_id(document_id: Uuid, sequence_index: usize) -> String {
        format!("{}_{}", document_id, sequence_index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunk_id_format() {
        let document_id = Uuid::new_v4();
        let chunk = DocumentChunk::new(
            document_id,
            3,
            "loan book grew by 12%".to_string(),
            Vector::from(vec![0.1, 0.2]),
        );

        assert_eq!(chunk.id, format!("{}_3", document_id));
        assert_eq!(chunk.document_id, document_id);
    }
}
