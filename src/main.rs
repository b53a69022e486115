mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::env;

use infrastructure::container::AppContainer;
use presentation::http::server::HttpServer;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    env_logger::init();

    let container = AppContainer::new().await?;

    container.job_scheduler.spawn();

    let port = env::var("PORT").ok().and_then(|value| value.parse().ok());

    let server = HttpServer::new(
        container.chat_handler.clone(),
        container.document_handler.clone(),
        container.dashboard_handler.clone(),
        port,
    );

    server.run().await
}
