use async_trait::async_trait;
use holeflux_domain::{ApplianceSummary, DomainError, QueryBatch, Session, UpstreamStats, Window};

/// Read side of the monitored appliance.
///
/// Every fetch takes the session explicitly; `None` means the appliance runs
/// without a password. Implementations return [`DomainError::Auth`] when the
/// session is missing or rejected and [`DomainError::Transport`] for network
/// failures and responses of unexpected shape.
#[async_trait]
pub trait ApplianceClient: Send + Sync {
    /// Host identity used as the `hostname` tag.
    fn host(&self) -> &str;

    /// Opens a session. `Ok(None)` when no credential is configured.
    async fn authenticate(&self) -> Result<Option<Session>, DomainError>;

    async fn fetch_summary(&self, session: Option<&Session>)
        -> Result<ApplianceSummary, DomainError>;

    async fn fetch_upstreams(
        &self,
        session: Option<&Session>,
    ) -> Result<Vec<UpstreamStats>, DomainError>;

    /// Query log entries inside `window`. An empty batch is a valid answer.
    async fn fetch_queries(
        &self,
        session: Option<&Session>,
        window: &Window,
    ) -> Result<QueryBatch, DomainError>;
}
