use crate::ports::MetricSink;
use holeflux_domain::{DomainError, MetricGroup};
use std::sync::Arc;
use tracing::debug;

pub struct PublishMetricsUseCase {
    sink: Arc<dyn MetricSink>,
}

impl PublishMetricsUseCase {
    pub fn new(sink: Arc<dyn MetricSink>) -> Self {
        Self { sink }
    }

    /// Writes `groups` and returns how many were written.
    pub async fn execute(&self, groups: &[MetricGroup]) -> Result<usize, DomainError> {
        if groups.is_empty() {
            debug!("No metric groups to publish");
            return Ok(0);
        }

        self.sink.write(groups).await?;
        debug!(groups = groups.len(), "Metric groups published");
        Ok(groups.len())
    }

    pub async fn prepare(&self) -> Result<(), DomainError> {
        self.sink.prepare().await
    }
}
