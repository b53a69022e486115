use std::env;
use std::sync::Arc;
use std::time::Duration;

use crate::application::jobs::{IngestionJob, MetricsExtractionJob};

#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    pub ingestion_interval: Duration,
    pub metrics_interval: Duration,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            ingestion_interval: Duration::from_secs(env_secs("EMBED_JOB_INTERVAL_SECS", 300)),
            metrics_interval: Duration::from_secs(env_secs("METRICS_JOB_INTERVAL_SECS", 600)),
        }
    }
}

fn env_secs(key: &str, default: u64) -> u64 {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Runs the two pipeline jobs on independent fixed-interval timers inside
/// detached background tasks. The tasks are never joined or cancelled; they
/// live until process termination. A run that outlasts its interval delays
/// the next tick rather than stacking a concurrent run of the same job.
pub struct JobScheduler {
    ingestion_job: Arc<IngestionJob>,
    metrics_job: Arc<MetricsExtractionJob>,
    config: SchedulerConfig,
}

impl JobScheduler {
    pub fn new(
        ingestion_job: Arc<IngestionJob>,
        metrics_job: Arc<MetricsExtractionJob>,
        config: SchedulerConfig,
    ) -> Self {
        Self {
            ingestion_job,
            metrics_job,
            config,
        }
    }

    pub fn spawn(self) {
        let ingestion_job = self.ingestion_job;
        let ingestion_interval = self.config.ingestion_interval;
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(ingestion_interval);
            loop {
                ticker.tick().await;
                ingestion_job.run_once().await;
            }
        });
        tracing::info!(
            "Embedding job scheduled every {}s",
            ingestion_interval.as_secs()
        );

        let metrics_job = self.metrics_job;
        let metrics_interval = self.config.metrics_interval;
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(metrics_interval);
            loop {
                ticker.tick().await;
                metrics_job.run_once().await;
            }
        });
        tracing::info!(
            "Metrics extraction job scheduled every {}s",
            metrics_interval.as_secs()
        );
    }
}
