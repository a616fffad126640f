use async_trait::async_trait;
use holeflux_domain::{DomainError, MetricGroup};

#[async_trait]
pub trait MetricSink: Send + Sync {
    /// Writes all groups. A failure of any part fails the whole call.
    async fn write(&self, groups: &[MetricGroup]) -> Result<(), DomainError>;

    /// One-off preparation before the first write (database creation, health
    /// probe). Adapters without such a step keep the default.
    async fn prepare(&self) -> Result<(), DomainError> {
        Ok(())
    }
}
