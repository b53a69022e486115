use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::{Document, MetricFields};

#[derive(Debug, Deserialize)]
pub struct MetricsQueryDto {
    pub year: Option<i32>,
    pub document_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct YearQueryDto {
    pub year: i32,
}

#[derive(Debug, Serialize)]
pub struct DocumentSummaryDto {
    pub id: Uuid,
    pub name: String,
}

impl From<&Document> for DocumentSummaryDto {
    fn from(document: &Document) -> Self {
        Self {
            id: document.id(),
            name: document.name().to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsDto {
    pub membership_count: i32,
    pub loan_book_value: f64,
    pub asset_base: f64,
    pub deposits: f64,
    pub dividend_rate: f64,
    pub interest_rebate: f64,
    pub revenue: f64,
    pub portfolio_at_risk: f64,
}

impl From<MetricFields> for MetricsDto {
    fn from(fields: MetricFields) -> Self {
        Self {
            membership_count: fields.membership_count,
            loan_book_value: fields.loan_book_value,
            asset_base: fields.asset_base,
            deposits: fields.deposits,
            dividend_rate: fields.dividend_rate,
            interest_rebate: fields.interest_rebate,
            revenue: fields.revenue,
            portfolio_at_risk: fields.portfolio_at_risk,
        }
    }
}
