pub mod ingestion_job;
pub mod metrics_job;
pub mod scheduler;

pub use ingestion_job::IngestionJob;
pub use metrics_job::MetricsExtractionJob;
pub use scheduler::{JobScheduler, SchedulerConfig};
