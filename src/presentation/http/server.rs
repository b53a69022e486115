use axum::Router;
use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use crate::presentation::http::{
    handlers::{ChatHandler, DashboardHandler, DocumentHandler},
    routes::{chat_routes, dashboard_routes, document_routes, health_routes},
};

pub struct HttpServer {
    chat_handler: Arc<ChatHandler>,
    document_handler: Arc<DocumentHandler>,
    dashboard_handler: Arc<DashboardHandler>,
    port: u16,
}

impl HttpServer {
    pub fn new(
        chat_handler: Arc<ChatHandler>,
        document_handler: Arc<DocumentHandler>,
        dashboard_handler: Arc<DashboardHandler>,
        port: Option<u16>,
    ) -> Self {
        Self {
            chat_handler,
            document_handler,
            dashboard_handler,
            port: port.unwrap_or(3000),
        }
    }

    pub async fn run(self) -> Result<(), Box<dyn std::error::Error>> {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        let app = Router::new()
            .merge(health_routes())
            .merge(chat_routes(self.chat_handler))
            .merge(document_routes(self.document_handler))
            .merge(dashboard_routes(self.dashboard_handler))
            .layer(cors)
            .layer(RequestBodyLimitLayer::new(2 * 1024 * 1024))
            .layer(TraceLayer::new_for_http());

        let addr = SocketAddr::from(([0, 0, 0, 0], self.port));

        let listener = TcpListener::bind(addr).await?;
        tracing::info!("Listening on {}", addr);
        axum::serve(listener, app).await?;

        Ok(())
    }
}
