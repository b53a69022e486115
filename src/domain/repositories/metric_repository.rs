use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::SaccoMetric;

#[derive(Debug)]
pub enum MetricRepositoryError {
    DatabaseError(String),
}

impl std::fmt::Display for MetricRepositoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MetricRepositoryError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
        }
    }
}

impl std::error::Error for MetricRepositoryError {}

#[async_trait]
pub trait MetricRepository: Send + Sync {
    async fn insert(&self, metric: &SaccoMetric) -> Result<(), MetricRepositoryError>;
    async fn find_by_document_and_year(
        &self,
        document_id: Uuid,
        year: i32,
    ) -> Result<Option<SaccoMetric>, MetricRepositoryError>;
    async fn find_by_document(
        &self,
        document_id: Uuid,
    ) -> Result<Option<SaccoMetric>, MetricRepositoryError>;
    async fn list_by_year(&self, year: i32) -> Result<Vec<SaccoMetric>, MetricRepositoryError>;
    /// Distinct reporting years with at least one metric row, descending.
    async fn distinct_years(&self) -> Result<Vec<i32>, MetricRepositoryError>;
}
