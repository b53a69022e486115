use async_trait::async_trait;
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::entities::SaccoMetric;
use crate::domain::repositories::metric_repository::{MetricRepository, MetricRepositoryError};
use crate::infrastructure::database::models::MetricModel;
use crate::infrastructure::database::schema::sacco_metrics::dsl::*;
use crate::infrastructure::database::{DbPool, get_connection_from_pool};

pub struct PostgresMetricRepository {
    pool: DbPool,
}

impl PostgresMetricRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MetricRepository for PostgresMetricRepository {
    async fn insert(&self, metric: &SaccoMetric) -> Result<(), MetricRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| MetricRepositoryError::DatabaseError(e.to_string()))?;

        let model = MetricModel::from(metric);

        diesel::insert_into(sacco_metrics)
            .values(&model)
            .execute(&mut conn)
            .map_err(|e| MetricRepositoryError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    async fn find_by_document_and_year(
        &self,
        document_id_param: Uuid,
        year_param: i32,
    ) -> Result<Option<SaccoMetric>, MetricRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| MetricRepositoryError::DatabaseError(e.to_string()))?;

        let result = sacco_metrics
            .filter(document_id.eq(document_id_param))
            .filter(year.eq(year_param))
            .first::<MetricModel>(&mut conn)
            .optional()
            .map_err(|e| MetricRepositoryError::DatabaseError(e.to_string()))?;

        Ok(result.map(SaccoMetric::from))
    }

    async fn find_by_document(
        &self,
        document_id_param: Uuid,
    ) -> Result<Option<SaccoMetric>, MetricRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| MetricRepositoryError::DatabaseError(e.to_string()))?;

        let result = sacco_metrics
            .filter(document_id.eq(document_id_param))
            .first::<MetricModel>(&mut conn)
            .optional()
            .map_err(|e| MetricRepositoryError::DatabaseError(e.to_string()))?;

        Ok(result.map(SaccoMetric::from))
    }

    async fn list_by_year(&self, year_param: i32) -> Result<Vec<SaccoMetric>, MetricRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| MetricRepositoryError::DatabaseError(e.to_string()))?;

        let models = sacco_metrics
            .filter(year.eq(year_param))
            .load::<MetricModel>(&mut conn)
            .map_err(|e| MetricRepositoryError::DatabaseError(e.to_string()))?;

        Ok(models.into_iter().map(SaccoMetric::from).collect())
    }

    async fn distinct_years(&self) -> Result<Vec<i32>, MetricRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| MetricRepositoryError::DatabaseError(e.to_string()))?;

        sacco_metrics
            .select(year)
            .distinct()
            .order(year.desc())
            .load::<i32>(&mut conn)
            .map_err(|e| MetricRepositoryError::DatabaseError(e.to_string()))
    }
}
