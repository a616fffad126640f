use crate::ports::ApplianceClient;
use crate::services::{raw_log_groups, totals_groups, AggregationEngine, AggregationStats};
use chrono::{DateTime, FixedOffset, Local};
use holeflux_domain::{CollectionMode, DomainError, MetricGroup, SessionState, StatusTable, Window};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Calls `$call` on the appliance with the current session, re-authenticating
/// and retrying once if the appliance rejects it.
macro_rules! with_reauth {
    ($self:ident, $state:ident, $call:ident($($arg:expr),*)) => {{
        let first = $self.appliance.$call($state.session() $(, $arg)*).await;
        match first {
            Err(e) if e.is_auth() => {
                warn!(error = %e, "Appliance rejected session, re-authenticating");
                $self.reauthenticate($state).await?;
                $self.appliance.$call($state.session() $(, $arg)*).await
            }
            other => other,
        }
    }};
}

/// Output of one collection pass, ready for publishing.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectedMetrics {
    pub groups: Vec<MetricGroup>,
    pub stats: AggregationStats,
}

/// Collects one window from the appliance and turns it into metric groups
/// according to the configured [`CollectionMode`].
pub struct CollectMetricsUseCase {
    appliance: Arc<dyn ApplianceClient>,
    engine: AggregationEngine,
    mode: CollectionMode,
}

impl CollectMetricsUseCase {
    pub fn new(
        appliance: Arc<dyn ApplianceClient>,
        table: Arc<StatusTable>,
        mode: CollectionMode,
    ) -> Self {
        Self {
            appliance,
            engine: AggregationEngine::new(table),
            mode,
        }
    }

    pub fn mode(&self) -> CollectionMode {
        self.mode
    }

    pub async fn execute(
        &self,
        session: &mut SessionState,
        window: &Window,
    ) -> Result<CollectedMetrics, DomainError> {
        self.ensure_session(session).await?;

        let timestamp = local_time(window);
        let host = self.appliance.host();

        match self.mode {
            CollectionMode::Totals => {
                let summary = with_reauth!(self, session, fetch_summary())?;
                let upstreams = with_reauth!(self, session, fetch_upstreams())?;

                Ok(CollectedMetrics {
                    groups: totals_groups(&summary, &upstreams, timestamp, host),
                    stats: AggregationStats::default(),
                })
            }
            CollectionMode::Live => {
                let batch = with_reauth!(self, session, fetch_queries(window))?;
                let summary = with_reauth!(self, session, fetch_summary())?;

                let aggregation = self.engine.aggregate(&batch, &summary, timestamp, host);
                debug!(
                    records = aggregation.stats.records,
                    groups = aggregation.groups.len(),
                    "Query window aggregated"
                );

                Ok(CollectedMetrics {
                    groups: aggregation.groups,
                    stats: aggregation.stats,
                })
            }
            CollectionMode::Raw => {
                let batch = with_reauth!(self, session, fetch_queries(window))?;

                Ok(CollectedMetrics {
                    groups: raw_log_groups(&batch, self.engine.table(), host),
                    stats: AggregationStats {
                        records: batch.len(),
                        malformed: batch.malformed,
                        unknown_status: 0,
                    },
                })
            }
        }
    }

    async fn ensure_session(&self, session: &mut SessionState) -> Result<(), DomainError> {
        if session.is_established() {
            return Ok(());
        }

        *session = self.appliance.authenticate().await?.into();
        if let SessionState::Active(_) = session {
            info!(host = self.appliance.host(), "Authenticated with appliance");
        }
        Ok(())
    }

    async fn reauthenticate(&self, session: &mut SessionState) -> Result<(), DomainError> {
        session.invalidate();
        self.ensure_session(session).await
    }
}

fn local_time(window: &Window) -> DateTime<FixedOffset> {
    window.end_time().with_timezone(&Local).fixed_offset()
}
