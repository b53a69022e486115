use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::entities::{MetricFields, SaccoMetric};
use crate::infrastructure::database::schema::sacco_metrics;

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = sacco_metrics)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct MetricModel {
    pub id: Uuid,
    pub document_id: Uuid,
    pub year: i32,
    pub membership_count: i32,
    pub loan_book_value: f64,
    pub asset_base: f64,
    pub deposits: f64,
    pub dividend_rate: f64,
    pub interest_rebate: f64,
    pub revenue: f64,
    pub portfolio_at_risk: f64,
    pub created_at: DateTime<Utc>,
}

impl From<&SaccoMetric> for MetricModel {
    fn from(metric: &SaccoMetric) -> Self {
        Self {
            id: metric.id,
            document_id: metric.document_id,
            year: metric.year,
            membership_count: metric.fields.membership_count,
            loan_book_value: metric.fields.loan_book_value,
            asset_base: metric.fields.asset_base,
            deposits: metric.fields.deposits,
            dividend_rate: metric.fields.dividend_rate,
            interest_rebate: metric.fields.interest_rebate,
            revenue: metric.fields.revenue,
            portfolio_at_risk: metric.fields.portfolio_at_risk,
            created_at: metric.created_at,
        }
    }
}

impl From<MetricModel> for SaccoMetric {
    fn from(model: MetricModel) -> Self {
        SaccoMetric {
            id: model.id,
            document_id: model.document_id,
            year: model.year,
            fields: MetricFields {
                membership_count: model.membership_count,
                loan_book_value: model.loan_book_value,
                asset_base: model.asset_base,
                deposits: model.deposits,
                dividend_rate: model.dividend_rate,
                interest_rebate: model.interest_rebate,
                revenue: model.revenue,
                portfolio_at_risk: model.portfolio_at_risk,
            },
            created_at: model.created_at,
        }
    }
}
