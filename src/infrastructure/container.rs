use std::sync::Arc;

use crate::{
    application::{
        jobs::{IngestionJob, JobScheduler, MetricsExtractionJob, SchedulerConfig},
        ports::{
            CompletionProvider, EmbeddingProvider, FileFetcher, TextExtractor, VectorIndex,
        },
        services::ChatService,
    },
    domain::repositories::{ChatRepository, DocumentRepository, MetricRepository},
    infrastructure::{
        database::{
            create_connection_pool, get_connection_from_pool,
            repositories::{
                PgVectorIndex, PostgresChatRepository, PostgresDocumentRepository,
                PostgresMetricRepository,
            },
            run_migrations,
        },
        external_services::{HttpFileFetcher, OpenAiClient, PdfTextExtractor},
    },
    presentation::http::handlers::{ChatHandler, DashboardHandler, DocumentHandler},
};

pub struct AppContainer {
    // Repositories
    pub document_repository: Arc<dyn DocumentRepository>,
    pub metric_repository: Arc<dyn MetricRepository>,
    pub chat_repository: Arc<dyn ChatRepository>,

    // External services
    pub embedding_provider: Arc<dyn EmbeddingProvider>,
    pub completion_provider: Arc<dyn CompletionProvider>,
    pub file_fetcher: Arc<dyn FileFetcher>,
    pub text_extractor: Arc<dyn TextExtractor>,
    pub vector_index: Arc<dyn VectorIndex>,

    // Application services and jobs
    pub chat_service: Arc<ChatService>,
    pub job_scheduler: JobScheduler,

    // HTTP handlers
    pub chat_handler: Arc<ChatHandler>,
    pub document_handler: Arc<DocumentHandler>,
    pub dashboard_handler: Arc<DashboardHandler>,
}

impl AppContainer {
    pub async fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let db_pool = create_connection_pool()?;
        let mut conn = get_connection_from_pool(&db_pool)
            .map_err(|e| format!("Failed to create database connection: {}", e))?;
        run_migrations(&mut conn).map_err(|e| format!("Failed to run migrations: {}", e))?;
        drop(conn);

        let document_repository: Arc<dyn DocumentRepository> =
            Arc::new(PostgresDocumentRepository::new(db_pool.clone()));
        let metric_repository: Arc<dyn MetricRepository> =
            Arc::new(PostgresMetricRepository::new(db_pool.clone()));
        let chat_repository: Arc<dyn ChatRepository> =
            Arc::new(PostgresChatRepository::new(db_pool.clone()));
        let vector_index: Arc<dyn VectorIndex> = Arc::new(PgVectorIndex::new(db_pool));

        let openai_client = Arc::new(OpenAiClient::from_env()?);
        let embedding_provider: Arc<dyn EmbeddingProvider> = openai_client.clone();
        let completion_provider: Arc<dyn CompletionProvider> = openai_client;

        let file_fetcher: Arc<dyn FileFetcher> = Arc::new(HttpFileFetcher::new()?);
        let text_extractor: Arc<dyn TextExtractor> = Arc::new(PdfTextExtractor::new());

        let chat_service = Arc::new(ChatService::new(
            document_repository.clone(),
            chat_repository.clone(),
            embedding_provider.clone(),
            completion_provider.clone(),
            vector_index.clone(),
        ));

        let ingestion_job = Arc::new(IngestionJob::new(
            document_repository.clone(),
            file_fetcher.clone(),
            text_extractor.clone(),
            embedding_provider.clone(),
            vector_index.clone(),
        ));

        let metrics_job = Arc::new(MetricsExtractionJob::new(
            document_repository.clone(),
            metric_repository.clone(),
            embedding_provider.clone(),
            completion_provider.clone(),
            vector_index.clone(),
        ));

        let job_scheduler =
            JobScheduler::new(ingestion_job, metrics_job, SchedulerConfig::default());

        let chat_handler = Arc::new(ChatHandler::new(
            chat_service.clone(),
            chat_repository.clone(),
        ));
        let document_handler = Arc::new(DocumentHandler::new(document_repository.clone()));
        let dashboard_handler = Arc::new(DashboardHandler::new(
            document_repository.clone(),
            metric_repository.clone(),
        ));

        Ok(Self {
            document_repository,
            metric_repository,
            chat_repository,
            embedding_provider,
            completion_provider,
            file_fetcher,
            text_extractor,
            vector_index,
            chat_service,
            job_scheduler,
            chat_handler,
            document_handler,
            dashboard_handler,
        })
    }
}
