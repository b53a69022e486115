use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The eight numeric figures extracted from a report. Fields that the model
/// fails to produce stay at zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricFields {
    pub membership_count: i32,
    pub loan_book_value: f64,
    pub asset_base: f64,
    pub deposits: f64,
    pub dividend_rate: f64,
    pub interest_rebate: f64,
    pub revenue: f64,
    pub portfolio_at_risk: f64,
}

/// One metric record per (document, year); written once by the metrics
/// extraction job and never updated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaccoMetric {
    pub id: Uuid,
    pub document_id: Uuid,
    pub year: i32,
    pub fields: MetricFields,
    pub created_at: DateTime<Utc>,
}

impl SaccoMetric {
    pub fn new(document_id: Uuid, year: i32, fields: MetricFields) -> Self {
        Self {
            id: Uuid::new_v4(),
            document_id,
            year,
            fields,
            created_at: Utc::now(),
        }
    }
}
