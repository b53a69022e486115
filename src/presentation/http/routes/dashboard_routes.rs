use axum::{Router, routing::get};
use std::sync::Arc;

use crate::presentation::http::handlers::DashboardHandler;

pub fn dashboard_routes(dashboard_handler: Arc<DashboardHandler>) -> Router {
    Router::new()
        .route("/dashboard/years", get(DashboardHandler::get_years))
        .route(
            "/dashboard/documents",
            get(DashboardHandler::get_documents_for_year),
        )
        .route("/dashboard/metrics", get(DashboardHandler::get_metrics))
        .with_state(dashboard_handler)
}
