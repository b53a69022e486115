use std::sync::Arc;

use crate::application::ports::{
    CompletionProvider, EmbeddingProvider, PromptMessage, VectorIndex,
};
use crate::application::services::metric_extraction::{
    EXTRACTOR_SYSTEM_PROMPT, METRICS_RETRIEVAL_QUERY, build_extraction_prompt,
    parse_metrics_response,
};
use crate::domain::entities::{Document, DocumentStatus, SaccoMetric};
use crate::domain::repositories::{DocumentRepository, MetricRepository};

#[derive(Debug)]
pub enum MetricsJobError {
    EmbeddingError(String),
    CompletionError(String),
    IndexError(String),
    RepositoryError(String),
}

impl std::fmt::Display for MetricsJobError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MetricsJobError::EmbeddingError(msg) => write!(f, "Embedding error: {}", msg),
            MetricsJobError::CompletionError(msg) => write!(f, "Completion error: {}", msg),
            MetricsJobError::IndexError(msg) => write!(f, "Vector index error: {}", msg),
            MetricsJobError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
        }
    }
}

impl std::error::Error for MetricsJobError {}

/// Derives the structured dashboard metrics for embedded documents: retrieve
/// the most relevant chunks, ask the model for the eight figures at zero
/// temperature, persist the record, then claim Embedded→MetricsExtracted.
///
/// A document that already has a metric row for its year is skipped, so the
/// job is idempotent even when runs overlap.
pub struct MetricsExtractionJob {
    document_repository: Arc<dyn DocumentRepository>,
    metric_repository: Arc<dyn MetricRepository>,
    embedding_provider: Arc<dyn EmbeddingProvider>,
    completion_provider: Arc<dyn CompletionProvider>,
    vector_index: Arc<dyn VectorIndex>,
    top_k: i64,
}

impl MetricsExtractionJob {
    pub fn new(
        document_repository: Arc<dyn DocumentRepository>,
        metric_repository: Arc<dyn MetricRepository>,
        embedding_provider: Arc<dyn EmbeddingProvider>,
        completion_provider: Arc<dyn CompletionProvider>,
        vector_index: Arc<dyn VectorIndex>,
    ) -> Self {
        Self {
            document_repository,
            metric_repository,
            embedding_provider,
            completion_provider,
            vector_index,
            top_k: 5,
        }
    }

    pub async fn run_once(&self) {
        let documents = match self
            .document_repository
            .list_by_status(DocumentStatus::Embedded)
            .await
        {
            Ok(documents) => documents,
            Err(e) => {
                tracing::error!("Metrics run could not list embedded documents: {}", e);
                return;
            }
        };

        if documents.is_empty() {
            tracing::debug!("No embedded documents to process");
            return;
        }

        for document in &documents {
            if let Err(e) = self.process_document(document).await {
                tracing::warn!(
                    "Failed to extract metrics for document {} ({}): {}",
                    document.id(),
                    document.name(),
                    e
                );
            }
        }
    }

    async fn process_document(&self, document: &Document) -> Result<(), MetricsJobError> {
        let existing = self
            .metric_repository
            .find_by_document_and_year(document.id(), document.year())
            .await
            .map_err(|e| MetricsJobError::RepositoryError(e.to_string()))?;

        if existing.is_some() {
            // A crash between the metric insert and the status transition
            // leaves the row present with the document still Embedded; finish
            // the transition here instead of stranding the document.
            let claimed = self
                .document_repository
                .transition_status(
                    document.id(),
                    DocumentStatus::Embedded,
                    DocumentStatus::MetricsExtracted,
                )
                .await
                .map_err(|e| MetricsJobError::RepositoryError(e.to_string()))?;

            if claimed {
                tracing::info!(
                    "Advanced document {} ({}) whose metrics were already recorded",
                    document.id(),
                    document.name()
                );
            } else {
                tracing::info!(
                    "Skipping document {} ({}), metrics already recorded",
                    document.id(),
                    document.name()
                );
            }
            return Ok(());
        }

        let query_embedding = self
            .embedding_provider
            .embed_one(METRICS_RETRIEVAL_QUERY)
            .await
            .map_err(|e| MetricsJobError::EmbeddingError(e.to_string()))?;

        let chunks = self
            .vector_index
            .query(&query_embedding, self.top_k, document.id())
            .await
            .map_err(|e| MetricsJobError::IndexError(e.to_string()))?;

        if chunks.is_empty() {
            tracing::info!("No chunks found for document {}", document.id());
            return Ok(());
        }

        let messages = [
            PromptMessage::system(EXTRACTOR_SYSTEM_PROMPT),
            PromptMessage::user(build_extraction_prompt(&chunks)),
        ];

        // Zero temperature: extraction should be deterministic, not creative.
        let response = self
            .completion_provider
            .complete(&messages, Some(0.0))
            .await
            .map_err(|e| MetricsJobError::CompletionError(e.to_string()))?;

        let fields = parse_metrics_response(&response);
        let metric = SaccoMetric::new(document.id(), document.year(), fields);

        self.metric_repository
            .insert(&metric)
            .await
            .map_err(|e| MetricsJobError::RepositoryError(e.to_string()))?;

        self.document_repository
            .transition_status(
                document.id(),
                DocumentStatus::Embedded,
                DocumentStatus::MetricsExtracted,
            )
            .await
            .map_err(|e| MetricsJobError::RepositoryError(e.to_string()))?;

        tracing::info!(
            "Metrics saved for document {} ({})",
            document.id(),
            document.name()
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pgvector::Vector;
    use std::sync::atomic::Ordering;

    use crate::application::test_support::{
        InMemoryDocumentRepository, InMemoryMetricRepository, InMemoryVectorIndex,
        ScriptedCompletionProvider, StubEmbeddingProvider,
    };
    use crate::domain::entities::{DocumentChunk, MetricFields};

    fn embedded_document() -> Document {
        let mut doc = Document::new(
            "FY23 Report".to_string(),
            2023,
            None,
            "https://storage.example.com/fy23.pdf".to_string(),
            None,
        );
        doc.transition(DocumentStatus::Uploaded, DocumentStatus::Embedded);
        doc
    }

    async fn index_with_chunks(document: &Document) -> Arc<InMemoryVectorIndex> {
        let index = Arc::new(InMemoryVectorIndex::default());
        let chunks = vec![
            DocumentChunk::new(
                document.id(),
                0,
                "Membership grew to 220,650.".to_string(),
                Vector::from(vec![1.0, 1.0]),
            ),
            DocumentChunk::new(
                document.id(),
                1,
                "Revenue reached 30.2 billion.".to_string(),
                Vector::from(vec![2.0, 1.0]),
            ),
        ];
        index.upsert(&chunks).await.unwrap();
        index
    }

    fn job_with(
        documents: Arc<InMemoryDocumentRepository>,
        metrics: Arc<InMemoryMetricRepository>,
        completions: Arc<ScriptedCompletionProvider>,
        index: Arc<InMemoryVectorIndex>,
    ) -> MetricsExtractionJob {
        MetricsExtractionJob::new(
            documents,
            metrics,
            Arc::new(StubEmbeddingProvider::default()),
            completions,
            index,
        )
    }

    #[tokio::test]
    async fn test_metrics_are_extracted_and_status_advances() {
        let documents = Arc::new(InMemoryDocumentRepository::default());
        let metrics = Arc::new(InMemoryMetricRepository::default());
        let doc = embedded_document();
        documents.seed(doc.clone());
        let index = index_with_chunks(&doc).await;
        let completions = Arc::new(ScriptedCompletionProvider::with_replies(vec![
            r#"{"membership_count": 100, "loan_book_value": 50.24, "asset_base": 120.5,
                "deposits": 80.1, "dividend_rate": 12.0, "interest_rebate": 8.5,
                "revenue": 30.2, "portfolio_at_risk": 4.1}"#
                .to_string(),
        ]));

        job_with(documents.clone(), metrics.clone(), completions, index)
            .run_once()
            .await;

        let rows = metrics.rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].document_id, doc.id());
        assert_eq!(rows[0].year, 2023);
        assert_eq!(rows[0].fields.membership_count, 100);
        assert_eq!(rows[0].fields.revenue, 30.2);

        let refreshed = documents.find_by_id(doc.id()).await.unwrap().unwrap();
        assert_eq!(refreshed.status(), DocumentStatus::MetricsExtracted);
    }

    #[tokio::test]
    async fn test_second_run_is_a_no_op() {
        let documents = Arc::new(InMemoryDocumentRepository::default());
        let metrics = Arc::new(InMemoryMetricRepository::default());
        let doc = embedded_document();
        documents.seed(doc.clone());
        let index = index_with_chunks(&doc).await;
        let completions = Arc::new(ScriptedCompletionProvider::with_replies(vec![
            r#"{"membership_count": 100}"#.to_string(),
        ]));

        let job = job_with(documents.clone(), metrics.clone(), completions.clone(), index);
        job.run_once().await;
        // Put the document back in the Embedded stage so the idempotence
        // guard, not the status filter, is what protects the second run.
        documents
            .transition_status(
                doc.id(),
                DocumentStatus::MetricsExtracted,
                DocumentStatus::Embedded,
            )
            .await
            .unwrap();
        job.run_once().await;

        assert_eq!(metrics.rows().len(), 1);
        assert_eq!(completions.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_existing_metric_row_still_advances_status() {
        let documents = Arc::new(InMemoryDocumentRepository::default());
        let metrics = Arc::new(InMemoryMetricRepository::default());
        let doc = embedded_document();
        documents.seed(doc.clone());
        // The metric row is already present but the document never advanced,
        // as after a crash between the insert and the transition.
        metrics
            .insert(&SaccoMetric::new(doc.id(), doc.year(), MetricFields::default()))
            .await
            .unwrap();
        let index = index_with_chunks(&doc).await;
        let completions = Arc::new(ScriptedCompletionProvider::default());

        job_with(documents.clone(), metrics.clone(), completions.clone(), index)
            .run_once()
            .await;

        assert_eq!(metrics.rows().len(), 1);
        assert_eq!(completions.calls.load(Ordering::SeqCst), 0);
        let refreshed = documents.find_by_id(doc.id()).await.unwrap().unwrap();
        assert_eq!(refreshed.status(), DocumentStatus::MetricsExtracted);
    }

    #[tokio::test]
    async fn test_unparseable_response_records_zero_metrics() {
        let documents = Arc::new(InMemoryDocumentRepository::default());
        let metrics = Arc::new(InMemoryMetricRepository::default());
        let doc = embedded_document();
        documents.seed(doc.clone());
        let index = index_with_chunks(&doc).await;
        let completions = Arc::new(ScriptedCompletionProvider::with_replies(vec![
            "I could not find reliable figures in the snippets.".to_string(),
        ]));

        job_with(documents.clone(), metrics.clone(), completions, index)
            .run_once()
            .await;

        let rows = metrics.rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].fields.membership_count, 0);
        assert_eq!(rows[0].fields.loan_book_value, 0.0);

        let refreshed = documents.find_by_id(doc.id()).await.unwrap().unwrap();
        assert_eq!(refreshed.status(), DocumentStatus::MetricsExtracted);
    }

    #[tokio::test]
    async fn test_document_without_chunks_keeps_its_status() {
        let documents = Arc::new(InMemoryDocumentRepository::default());
        let metrics = Arc::new(InMemoryMetricRepository::default());
        let doc = embedded_document();
        documents.seed(doc.clone());
        let index = Arc::new(InMemoryVectorIndex::default());
        let completions = Arc::new(ScriptedCompletionProvider::default());

        job_with(documents.clone(), metrics.clone(), completions.clone(), index)
            .run_once()
            .await;

        assert!(metrics.rows().is_empty());
        assert_eq!(completions.calls.load(Ordering::SeqCst), 0);
        let refreshed = documents.find_by_id(doc.id()).await.unwrap().unwrap();
        assert_eq!(refreshed.status(), DocumentStatus::Embedded);
    }

    #[tokio::test]
    async fn test_retrieval_is_scoped_to_the_document() {
        let documents = Arc::new(InMemoryDocumentRepository::default());
        let metrics = Arc::new(InMemoryMetricRepository::default());
        let doc = embedded_document();
        documents.seed(doc.clone());

        // Only a different document has chunks in the index.
        let other = embedded_document();
        let index = index_with_chunks(&other).await;
        let completions = Arc::new(ScriptedCompletionProvider::default());

        MetricsExtractionJob::new(
            documents.clone(),
            metrics.clone(),
            Arc::new(StubEmbeddingProvider::default()),
            completions.clone(),
            index,
        )
        .run_once()
        .await;

        assert!(metrics.rows().is_empty());
        assert_eq!(completions.calls.load(Ordering::SeqCst), 0);
    }
}
