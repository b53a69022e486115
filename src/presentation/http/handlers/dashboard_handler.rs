use axum::{
    Json,
    extract::{Query, State},
    response::IntoResponse,
};
use std::sync::Arc;

use crate::domain::entities::MetricFields;
use crate::domain::repositories::{DocumentRepository, MetricRepository};
use crate::presentation::http::dto::{DocumentSummaryDto, MetricsDto, MetricsQueryDto, YearQueryDto};
use crate::presentation::http::errors::AppError;

pub struct DashboardHandler {
    document_repository: Arc<dyn DocumentRepository>,
    metric_repository: Arc<dyn MetricRepository>,
}

impl DashboardHandler {
    pub fn new(
        document_repository: Arc<dyn DocumentRepository>,
        metric_repository: Arc<dyn MetricRepository>,
    ) -> Self {
        Self {
            document_repository,
            metric_repository,
        }
    }

    pub async fn get_years(
        State(handler): State<Arc<DashboardHandler>>,
    ) -> Result<impl IntoResponse, AppError> {
        let years = handler.metric_repository.distinct_years().await?;

        Ok(Json(years))
    }

    pub async fn get_documents_for_year(
        State(handler): State<Arc<DashboardHandler>>,
        Query(params): Query<YearQueryDto>,
    ) -> Result<impl IntoResponse, AppError> {
        let documents = handler.document_repository.list_by_year(params.year).await?;

        let summaries: Vec<DocumentSummaryDto> =
            documents.iter().map(DocumentSummaryDto::from).collect();

        Ok(Json(summaries))
    }

    pub async fn get_metrics(
        State(handler): State<Arc<DashboardHandler>>,
        Query(params): Query<MetricsQueryDto>,
    ) -> Result<impl IntoResponse, AppError> {
        if let Some(document_id) = params.document_id {
            let metric = handler
                .metric_repository
                .find_by_document(document_id)
                .await?
                .ok_or_else(|| {
                    AppError::NotFoundError(format!("No metrics for document: {}", document_id))
                })?;

            return Ok(Json(MetricsDto::from(metric.fields)));
        }

        let year = params.year.ok_or_else(|| {
            AppError::BadRequest("Either year or document_id is required".to_string())
        })?;

        let metrics = handler.metric_repository.list_by_year(year).await?;

        Ok(Json(MetricsDto::from(average_fields(&metrics))))
    }
}

/// Field-wise mean across the year's rows; a year with no rows averages to
/// all zeros rather than erroring.
fn average_fields(metrics: &[crate::domain::entities::SaccoMetric]) -> MetricFields {
    if metrics.is_empty() {
        return MetricFields::default();
    }

    let count = metrics.len() as f64;
    let mut sums = MetricFields::default();
    let mut membership_sum = 0i64;

    for metric in metrics {
        membership_sum += metric.fields.membership_count as i64;
        sums.loan_book_value += metric.fields.loan_book_value;
        sums.asset_base += metric.fields.asset_base;
        sums.deposits += metric.fields.deposits;
        sums.dividend_rate += metric.fields.dividend_rate;
        sums.interest_rebate += metric.fields.interest_rebate;
        sums.revenue += metric.fields.revenue;
        sums.portfolio_at_risk += metric.fields.portfolio_at_risk;
    }

    MetricFields {
        membership_count: (membership_sum as f64 / count) as i32,
        loan_book_value: sums.loan_book_value / count,
        asset_base: sums.asset_base / count,
        deposits: sums.deposits / count,
        dividend_rate: sums.dividend_rate / count,
        interest_rebate: sums.interest_rebate / count,
        revenue: sums.revenue / count,
        portfolio_at_risk: sums.portfolio_at_risk / count,
    }
}
