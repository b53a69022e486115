use std::sync::Arc;

use crate::application::ports::{EmbeddingProvider, FileFetcher, TextExtractor, VectorIndex};
use crate::application::services::TokenChunker;
use crate::domain::entities::{Document, DocumentChunk, DocumentStatus};
use crate::domain::repositories::DocumentRepository;

#[derive(Debug)]
pub enum IngestionError {
    FetchError(String),
    EmbeddingError(String),
    IndexError(String),
    RepositoryError(String),
}

impl std::fmt::Display for IngestionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IngestionError::FetchError(msg) => write!(f, "Fetch error: {}", msg),
            IngestionError::EmbeddingError(msg) => write!(f, "Embedding error: {}", msg),
            IngestionError::IndexError(msg) => write!(f, "Vector index error: {}", msg),
            IngestionError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
        }
    }
}

impl std::error::Error for IngestionError {}

/// Advances uploaded documents to the embedded stage: fetch the PDF, extract
/// and chunk the text, embed every chunk in one batched call, upsert the
/// chunk records, then claim the status transition.
///
/// Failures are contained per document; a document that fails stays at
/// Uploaded and is retried on every subsequent run.
pub struct IngestionJob {
    document_repository: Arc<dyn DocumentRepository>,
    file_fetcher: Arc<dyn FileFetcher>,
    text_extractor: Arc<dyn TextExtractor>,
    embedding_provider: Arc<dyn EmbeddingProvider>,
    vector_index: Arc<dyn VectorIndex>,
    chunker: TokenChunker,
}

impl IngestionJob {
    pub fn new(
        document_repository: Arc<dyn DocumentRepository>,
        file_fetcher: Arc<dyn FileFetcher>,
        text_extractor: Arc<dyn TextExtractor>,
        embedding_provider: Arc<dyn EmbeddingProvider>,
        vector_index: Arc<dyn VectorIndex>,
    ) -> Self {
        Self {
            document_repository,
            file_fetcher,
            text_extractor,
            embedding_provider,
            vector_index,
            chunker: TokenChunker::default(),
        }
    }

    pub async fn run_once(&self) {
        let documents = match self
            .document_repository
            .list_by_status(DocumentStatus::Uploaded)
            .await
        {
            Ok(documents) => documents,
            Err(e) => {
                tracing::error!("Ingestion run could not list uploaded documents: {}", e);
                return;
            }
        };

        if documents.is_empty() {
            tracing::debug!("No new documents to embed");
            return;
        }

        for document in &documents {
            match self.process_document(document).await {
                Ok(true) => {
                    tracing::info!("Embedded document {} ({})", document.id(), document.name());
                }
                Ok(false) => {
                    tracing::info!(
                        "No text extracted for document {} ({}), leaving it for retry",
                        document.id(),
                        document.name()
                    );
                }
                Err(e) => {
                    tracing::warn!(
                        "Failed to embed document {} ({}): {}",
                        document.id(),
                        document.name(),
                        e
                    );
                }
            }
        }
    }

    /// Returns Ok(false) when the document produced no chunks; its status is
    /// left untouched either way except on full success.
    async fn process_document(&self, document: &Document) -> Result<bool, IngestionError> {
        let bytes = self
            .file_fetcher
            .fetch(document.file_url())
            .await
            .map_err(|e| IngestionError::FetchError(e.to_string()))?;

        // An unparseable container degrades to empty text, which falls into
        // the zero-chunk skip below.
        let text = match self.text_extractor.extract(&bytes) {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!("Extraction failed for document {}: {}", document.id(), e);
                String::new()
            }
        };

        let chunk_texts = self.chunker.chunk(&text);
        if chunk_texts.is_empty() {
            return Ok(false);
        }

        let embeddings = self
            .embedding_provider
            .embed(&chunk_texts)
            .await
            .map_err(|e| IngestionError::EmbeddingError(e.to_string()))?;

        let chunks: Vec<DocumentChunk> = chunk_texts
            .into_iter()
            .zip(embeddings)
            .enumerate()
            .map(|(index, (chunk_text, embedding))| {
                DocumentChunk::new(document.id(), index, chunk_text, embedding)
            })
            .collect();

        self.vector_index
            .upsert(&chunks)
            .await
            .map_err(|e| IngestionError::IndexError(e.to_string()))?;

        let claimed = self
            .document_repository
            .transition_status(document.id(), DocumentStatus::Uploaded, DocumentStatus::Embedded)
            .await
            .map_err(|e| IngestionError::RepositoryError(e.to_string()))?;

        if !claimed {
            tracing::warn!(
                "Document {} was already advanced by a concurrent run",
                document.id()
            );
        }

        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::application::test_support::{
        InMemoryDocumentRepository, InMemoryVectorIndex, StubEmbeddingProvider, StubFileFetcher,
        Utf8TextExtractor,
    };

    fn job_with(
        documents: Arc<InMemoryDocumentRepository>,
        fetcher: Arc<StubFileFetcher>,
        index: Arc<InMemoryVectorIndex>,
    ) -> IngestionJob {
        IngestionJob::new(
            documents,
            fetcher,
            Arc::new(Utf8TextExtractor),
            Arc::new(StubEmbeddingProvider::default()),
            index,
        )
    }

    fn uploaded_document(url: &str) -> Document {
        Document::new(
            "FY23 Report".to_string(),
            2023,
            None,
            url.to_string(),
            None,
        )
    }

    fn long_text(tokens: usize) -> String {
        (0..tokens).map(|i| format!("t{}", i)).collect::<Vec<_>>().join(" ")
    }

    #[tokio::test]
    async fn test_valid_document_is_embedded_with_one_record_per_chunk() {
        let documents = Arc::new(InMemoryDocumentRepository::default());
        let fetcher = Arc::new(StubFileFetcher::default());
        let index = Arc::new(InMemoryVectorIndex::default());

        let doc = uploaded_document("https://storage.example.com/fy23.pdf");
        documents.seed(doc.clone());
        // 500 tokens with 300/50 windows: starts at 0 and 250, two chunks.
        fetcher.serve(doc.file_url(), long_text(500).into_bytes());

        job_with(documents.clone(), fetcher, index.clone())
            .run_once()
            .await;

        let stored = index.stored_chunks();
        assert_eq!(stored.len(), 2);
        assert_eq!(stored[0].id, format!("{}_0", doc.id()));
        assert_eq!(stored[1].id, format!("{}_1", doc.id()));
        assert!(stored.iter().all(|c| c.document_id == doc.id()));

        let refreshed = documents.find_by_id(doc.id()).await.unwrap().unwrap();
        assert_eq!(refreshed.status(), DocumentStatus::Embedded);
    }

    #[tokio::test]
    async fn test_unparseable_document_is_skipped_without_state_change() {
        let documents = Arc::new(InMemoryDocumentRepository::default());
        let fetcher = Arc::new(StubFileFetcher::default());
        let index = Arc::new(InMemoryVectorIndex::default());

        let doc = uploaded_document("https://storage.example.com/scanned.pdf");
        documents.seed(doc.clone());
        fetcher.serve(doc.file_url(), vec![0xff, 0xfe, 0xff]);

        job_with(documents.clone(), fetcher, index.clone())
            .run_once()
            .await;

        assert!(index.stored_chunks().is_empty());
        let refreshed = documents.find_by_id(doc.id()).await.unwrap().unwrap();
        assert_eq!(refreshed.status(), DocumentStatus::Uploaded);
    }

    #[tokio::test]
    async fn test_empty_text_document_stays_uploaded() {
        let documents = Arc::new(InMemoryDocumentRepository::default());
        let fetcher = Arc::new(StubFileFetcher::default());
        let index = Arc::new(InMemoryVectorIndex::default());

        let doc = uploaded_document("https://storage.example.com/empty.pdf");
        documents.seed(doc.clone());
        fetcher.serve(doc.file_url(), Vec::new());

        job_with(documents.clone(), fetcher, index.clone())
            .run_once()
            .await;

        assert!(index.stored_chunks().is_empty());
        let refreshed = documents.find_by_id(doc.id()).await.unwrap().unwrap();
        assert_eq!(refreshed.status(), DocumentStatus::Uploaded);
    }

    #[tokio::test]
    async fn test_one_failing_document_does_not_abort_the_batch() {
        let documents = Arc::new(InMemoryDocumentRepository::default());
        let fetcher = Arc::new(StubFileFetcher::default());
        let index = Arc::new(InMemoryVectorIndex::default());

        // First document's file is missing from storage, second is fine.
        let broken = uploaded_document("https://storage.example.com/missing.pdf");
        let healthy = uploaded_document("https://storage.example.com/fy23.pdf");
        documents.seed(broken.clone());
        documents.seed(healthy.clone());
        fetcher.serve(healthy.file_url(), long_text(40).into_bytes());

        job_with(documents.clone(), fetcher, index.clone())
            .run_once()
            .await;

        let broken_after = documents.find_by_id(broken.id()).await.unwrap().unwrap();
        assert_eq!(broken_after.status(), DocumentStatus::Uploaded);

        let healthy_after = documents.find_by_id(healthy.id()).await.unwrap().unwrap();
        assert_eq!(healthy_after.status(), DocumentStatus::Embedded);
        assert_eq!(index.stored_chunks().len(), 1);
    }

    #[tokio::test]
    async fn test_reingestion_replaces_chunks_instead_of_duplicating() {
        let documents = Arc::new(InMemoryDocumentRepository::default());
        let fetcher = Arc::new(StubFileFetcher::default());
        let index = Arc::new(InMemoryVectorIndex::default());

        let doc = uploaded_document("https://storage.example.com/fy23.pdf");
        documents.seed(doc.clone());
        fetcher.serve(doc.file_url(), long_text(40).into_bytes());

        let job = job_with(documents.clone(), fetcher, index.clone());
        job.run_once().await;
        // Roll the status back to simulate a crash after the index write.
        documents
            .transition_status(doc.id(), DocumentStatus::Embedded, DocumentStatus::Uploaded)
            .await
            .unwrap();
        job.run_once().await;

        assert_eq!(index.stored_chunks().len(), 1);
    }
}
