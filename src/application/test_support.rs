//! In-memory fakes for the repository and port seams, used by service and
//! job tests.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use pgvector::Vector;
use uuid::Uuid;

use crate::application::ports::{
    CompletionError, CompletionProvider, EmbeddingError, EmbeddingProvider, ExtractionError,
    FetchError, FileFetcher, PromptMessage, TextExtractor, VectorIndex, VectorIndexError,
};
use crate::domain::entities::{ChatMessage, Document, DocumentChunk, DocumentStatus, SaccoMetric};
use crate::domain::repositories::chat_repository::{ChatRepository, ChatRepositoryError};
use crate::domain::repositories::document_repository::{
    DocumentRepository, DocumentRepositoryError,
};
use crate::domain::repositories::metric_repository::{MetricRepository, MetricRepositoryError};

#[derive(Default)]
pub struct InMemoryDocumentRepository {
    documents: Mutex<Vec<Document>>,
}

impl InMemoryDocumentRepository {
    pub fn seed(&self, document: Document) {
        self.documents.lock().unwrap().push(document);
    }
}

#[async_trait]
impl DocumentRepository for InMemoryDocumentRepository {
    async fn create(&self, document: &Document) -> Result<(), DocumentRepositoryError> {
        self.documents.lock().unwrap().push(document.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Document>, DocumentRepositoryError> {
        Ok(self
            .documents
            .lock()
            .unwrap()
            .iter()
            .find(|d| d.id() == id)
            .cloned())
    }

    async fn list_all(&self) -> Result<Vec<Document>, DocumentRepositoryError> {
        let mut docs = self.documents.lock().unwrap().clone();
        docs.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        Ok(docs)
    }

    async fn list_by_status(
        &self,
        status: DocumentStatus,
    ) -> Result<Vec<Document>, DocumentRepositoryError> {
        Ok(self
            .documents
            .lock()
            .unwrap()
            .iter()
            .filter(|d| d.status() == status)
            .cloned()
            .collect())
    }

    async fn list_by_year(&self, year: i32) -> Result<Vec<Document>, DocumentRepositoryError> {
        Ok(self
            .documents
            .lock()
            .unwrap()
            .iter()
            .filter(|d| d.year() == year)
            .cloned()
            .collect())
    }

    async fn transition_status(
        &self,
        id: Uuid,
        from: DocumentStatus,
        to: DocumentStatus,
    ) -> Result<bool, DocumentRepositoryError> {
        let mut documents = self.documents.lock().unwrap();
        match documents.iter_mut().find(|d| d.id() == id) {
            Some(document) => Ok(document.transition(from, to)),
            None => Ok(false),
        }
    }
}

#[derive(Default)]
pub struct InMemoryMetricRepository {
    metrics: Mutex<Vec<SaccoMetric>>,
}

impl InMemoryMetricRepository {
    pub fn rows(&self) -> Vec<SaccoMetric> {
        self.metrics.lock().unwrap().clone()
    }
}

#[async_trait]
impl MetricRepository for InMemoryMetricRepository {
    async fn insert(&self, metric: &SaccoMetric) -> Result<(), MetricRepositoryError> {
        let mut metrics = self.metrics.lock().unwrap();
        if metrics
            .iter()
            .any(|m| m.document_id == metric.document_id && m.year == metric.year)
        {
            return Err(MetricRepositoryError::DatabaseError(
                "unique constraint violation on (document_id, year)".to_string(),
            ));
        }
        metrics.push(metric.clone());
        Ok(())
    }

    async fn find_by_document_and_year(
        &self,
        document_id: Uuid,
        year: i32,
    ) -> Result<Option<SaccoMetric>, MetricRepositoryError> {
        Ok(self
            .metrics
            .lock()
            .unwrap()
            .iter()
            .find(|m| m.document_id == document_id && m.year == year)
            .cloned())
    }

    async fn find_by_document(
        &self,
        document_id: Uuid,
    ) -> Result<Option<SaccoMetric>, MetricRepositoryError> {
        Ok(self
            .metrics
            .lock()
            .unwrap()
            .iter()
            .find(|m| m.document_id == document_id)
            .cloned())
    }

    async fn list_by_year(&self, year: i32) -> Result<Vec<SaccoMetric>, MetricRepositoryError> {
        Ok(self
            .metrics
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.year == year)
            .cloned()
            .collect())
    }

    async fn distinct_years(&self) -> Result<Vec<i32>, MetricRepositoryError> {
        let mut years: Vec<i32> = self.metrics.lock().unwrap().iter().map(|m| m.year).collect();
        years.sort_unstable_by(|a, b| b.cmp(a));
        years.dedup();
        Ok(years)
    }
}

#[derive(Default)]
pub struct InMemoryChatRepository {
    messages: Mutex<Vec<ChatMessage>>,
    fail_exchange_saves: AtomicBool,
}

impl InMemoryChatRepository {
    /// Makes every subsequent `save_exchange` fail without writing, for
    /// persistence-failure tests.
    pub fn fail_exchange_saves(&self) {
        self.fail_exchange_saves.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl ChatRepository for InMemoryChatRepository {
    async fn save_exchange(
        &self,
        user_turn: &ChatMessage,
        assistant_turn: &ChatMessage,
    ) -> Result<(), ChatRepositoryError> {
        if self.fail_exchange_saves.load(Ordering::SeqCst) {
            return Err(ChatRepositoryError::DatabaseError(
                "connection lost".to_string(),
            ));
        }

        let mut messages = self.messages.lock().unwrap();
        messages.push(user_turn.clone());
        messages.push(assistant_turn.clone());
        Ok(())
    }

    async fn history(
        &self,
        document_id: Uuid,
        user_id: Uuid,
    ) -> Result<Vec<ChatMessage>, ChatRepositoryError> {
        let mut history: Vec<ChatMessage> = self
            .messages
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.document_id == document_id && m.user_id == user_id)
            .cloned()
            .collect();
        history.sort_by_key(|m| m.timestamp);
        Ok(history)
    }

    async fn delete_history(
        &self,
        document_id: Uuid,
        user_id: Uuid,
    ) -> Result<u64, ChatRepositoryError> {
        let mut messages = self.messages.lock().unwrap();
        let before = messages.len();
        messages.retain(|m| !(m.document_id == document_id && m.user_id == user_id));
        Ok((before - messages.len()) as u64)
    }
}

#[derive(Default)]
pub struct InMemoryVectorIndex {
    chunks: Mutex<Vec<DocumentChunk>>,
}

impl InMemoryVectorIndex {
    pub fn stored_chunks(&self) -> Vec<DocumentChunk> {
        self.chunks.lock().unwrap().clone()
    }
}

#[async_trait]
impl VectorIndex for InMemoryVectorIndex {
    async fn upsert(&self, new_chunks: &[DocumentChunk]) -> Result<(), VectorIndexError> {
        let mut chunks = self.chunks.lock().unwrap();
        for chunk in new_chunks {
            chunks.retain(|existing| existing.id != chunk.id);
            chunks.push(chunk.clone());
        }
        Ok(())
    }

    async fn query(
        &self,
        embedding: &Vector,
        top_k: i64,
        document_id: Uuid,
    ) -> Result<Vec<String>, VectorIndexError> {
        let mut matches: Vec<(f32, String)> = self
            .chunks
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.document_id == document_id)
            .map(|c| (squared_distance(embedding, &c.embedding), c.chunk_text.clone()))
            .collect();
        matches.sort_by(|a, b| a.0.total_cmp(&b.0));
        matches.truncate(top_k as usize);
        Ok(matches.into_iter().map(|(_, text)| text).collect())
    }
}

fn squared_distance(a: &Vector, b: &Vector) -> f32 {
    a.as_slice()
        .iter()
        .zip(b.as_slice())
        .map(|(x, y)| (x - y) * (x - y))
        .sum()
}

/// Deterministic embeddings: one small vector per input, derived from the
/// text length, plus a call counter for "no model call" assertions.
#[derive(Default)]
pub struct StubEmbeddingProvider {
    pub calls: AtomicUsize,
}

#[async_trait]
impl EmbeddingProvider for StubEmbeddingProvider {
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vector>, EmbeddingError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(texts
            .iter()
            .map(|t| Vector::from(vec![t.len() as f32, 1.0]))
            .collect())
    }
}

/// Replays a fixed queue of completion results and records every prompt it
/// was given.
#[derive(Default)]
pub struct ScriptedCompletionProvider {
    replies: Mutex<VecDeque<Result<String, CompletionError>>>,
    prompts: Mutex<Vec<Vec<PromptMessage>>>,
    pub calls: AtomicUsize,
}

impl ScriptedCompletionProvider {
    pub fn with_replies(replies: Vec<String>) -> Self {
        Self::with_results(replies.into_iter().map(Ok).collect())
    }

    pub fn with_results(results: Vec<Result<String, CompletionError>>) -> Self {
        Self {
            replies: Mutex::new(results.into()),
            prompts: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn recorded_prompts(&self) -> Vec<Vec<PromptMessage>> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionProvider for ScriptedCompletionProvider {
    async fn complete(
        &self,
        messages: &[PromptMessage],
        _temperature: Option<f32>,
    ) -> Result<String, CompletionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(messages.to_vec());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Ok("stub reply".to_string()))
    }
}

/// Serves canned payloads by URL; unknown URLs behave like a 404.
#[derive(Default)]
pub struct StubFileFetcher {
    files: Mutex<HashMap<String, Vec<u8>>>,
}

impl StubFileFetcher {
    pub fn serve(&self, url: &str, payload: Vec<u8>) {
        self.files.lock().unwrap().insert(url.to_string(), payload);
    }
}

#[async_trait]
impl FileFetcher for StubFileFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        self.files
            .lock()
            .unwrap()
            .get(url)
            .cloned()
            .ok_or(FetchError::HttpStatus(404))
    }
}

/// Treats the fetched bytes as UTF-8 plain text; invalid UTF-8 plays the
/// role of an unparseable binary document.
pub struct Utf8TextExtractor;

impl TextExtractor for Utf8TextExtractor {
    fn extract(&self, data: &[u8]) -> Result<String, ExtractionError> {
        String::from_utf8(data.to_vec())
            .map_err(|e| ExtractionError::CorruptedFile(e.to_string()))
    }
}
