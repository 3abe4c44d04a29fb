use std::sync::Arc;

use prometheus::{Encoder, TextEncoder};
use thiserror::Error;
use tracing::debug;

use super::tasks::TasksGauge;
use crate::druid::{QueryError, TaskSource};
use crate::models::TaskCountRecord;

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error(transparent)]
    Query(#[from] QueryError),
    #[error("failed to encode metrics: {0}")]
    Encode(#[from] prometheus::Error),
}

/// Turns a live task count query into a text exposition body.
///
/// Shared by all concurrent scrapes; nothing is kept between them. There is no
/// `prometheus::Registry`: collectors gather synchronously and cannot fail, while
/// the samples here come from a fallible async query, so the family is built
/// against the startup descriptor and encoded directly.
#[derive(Clone)]
pub struct Publisher {
    source: Arc<dyn TaskSource>,
    gauge: TasksGauge,
}

impl Publisher {
    pub fn new(source: Arc<dyn TaskSource>) -> prometheus::Result<Self> {
        Ok(Self {
            source,
            gauge: TasksGauge::new()?,
        })
    }

    pub fn source(&self) -> &dyn TaskSource {
        self.source.as_ref()
    }

    /// Queries the source and renders the result.
    pub async fn scrape(&self) -> Result<Vec<u8>, ScrapeError> {
        let records = self.source.task_counts().await?;
        debug!(
            event_name = "scrape.collected",
            event_domain = "scrape",
            sample_count = records.len(),
            "collected task counts"
        );
        self.render(&records)
    }

    /// Encodes one gauge sample per record in the Prometheus text format.
    pub fn render(&self, records: &[TaskCountRecord]) -> Result<Vec<u8>, ScrapeError> {
        let families: Vec<_> = self.gauge.family(records).into_iter().collect();
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&families, &mut buffer)?;
        Ok(buffer)
    }
}
