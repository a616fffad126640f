use crate::schedule::{backoff_for, WakeSchedule};
use holeflux_application::use_cases::{CollectMetricsUseCase, PublishMetricsUseCase};
use holeflux_domain::{DomainError, SessionState, Window};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Result of one collect → aggregate → publish pass.
#[derive(Debug, Clone, PartialEq)]
pub enum CycleOutcome {
    Published { groups: usize },
    CollectFailed(DomainError),
    PublishFailed(DomainError),
}

impl CycleOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, CycleOutcome::Published { .. })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JobStats {
    pub cycles: u64,
    pub successes: u64,
    pub collect_failures: u64,
    pub publish_failures: u64,
}

#[derive(Default)]
struct StatsCounters {
    cycles: AtomicU64,
    successes: AtomicU64,
    collect_failures: AtomicU64,
    publish_failures: AtomicU64,
}

impl StatsCounters {
    fn record(&self, outcome: &CycleOutcome) {
        self.cycles.fetch_add(1, Ordering::Relaxed);
        let counter = match outcome {
            CycleOutcome::Published { .. } => &self.successes,
            CycleOutcome::CollectFailed(_) => &self.collect_failures,
            CycleOutcome::PublishFailed(_) => &self.publish_failures,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    fn snapshot(&self) -> JobStats {
        JobStats {
            cycles: self.cycles.load(Ordering::Relaxed),
            successes: self.successes.load(Ordering::Relaxed),
            collect_failures: self.collect_failures.load(Ordering::Relaxed),
            publish_failures: self.publish_failures.load(Ordering::Relaxed),
        }
    }
}

pub struct MetricsCollectionJob {
    collect: Arc<CollectMetricsUseCase>,
    publish: Arc<PublishMetricsUseCase>,
    interval: Duration,
    stats: StatsCounters,
    shutdown: CancellationToken,
}

impl MetricsCollectionJob {
    pub fn new(
        collect: Arc<CollectMetricsUseCase>,
        publish: Arc<PublishMetricsUseCase>,
        interval_secs: u64,
    ) -> Self {
        Self {
            collect,
            publish,
            interval: Duration::from_secs(interval_secs),
            stats: StatsCounters::default(),
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    pub fn stats(&self) -> JobStats {
        self.stats.snapshot()
    }

    /// Readies the sink; a failure is logged and does not stop the job.
    pub async fn prepare(&self) {
        if let Err(e) = self.publish.prepare().await {
            warn!(error = %e, "Sink preparation failed, continuing");
        }
    }

    /// Runs a single cycle with a fresh session.
    pub async fn run_once(&self) -> CycleOutcome {
        let mut session = SessionState::default();
        self.run_cycle(&mut session).await
    }

    pub async fn start(self: Arc<Self>) {
        info!(
            interval_secs = self.interval.as_secs(),
            mode = %self.collect.mode(),
            "Starting metrics collection job"
        );

        self.prepare().await;

        let mut session = SessionState::default();
        let mut schedule = WakeSchedule::starting_at(Instant::now());

        loop {
            if self.shutdown.is_cancelled() {
                info!("MetricsCollectionJob: shutting down");
                break;
            }

            let outcome = self.run_cycle(&mut session).await;
            let sleep = if outcome.is_success() {
                self.interval
            } else {
                backoff_for(self.interval)
            };
            let wake = schedule.advance(sleep, Instant::now());
            debug!(
                sleep_ms = wake.saturating_duration_since(Instant::now()).as_millis() as u64,
                "Cycle finished"
            );

            tokio::select! {
                _ = self.shutdown.cancelled() => {
                    info!("MetricsCollectionJob: shutting down");
                    break;
                }
                _ = tokio::time::sleep_until(wake) => {}
            }
        }
    }

    async fn run_cycle(&self, session: &mut SessionState) -> CycleOutcome {
        let outcome = self.collect_and_publish(session).await;
        self.stats.record(&outcome);

        match &outcome {
            CycleOutcome::Published { groups } => {
                debug!(groups, "Cycle succeeded");
            }
            CycleOutcome::CollectFailed(e) => {
                warn!(
                    stage = "collect",
                    kind = e.kind(),
                    error = %e,
                    next_sleep_secs = backoff_for(self.interval).as_secs(),
                    "Cycle failed"
                );
            }
            CycleOutcome::PublishFailed(e) => {
                warn!(
                    stage = "publish",
                    kind = e.kind(),
                    error = %e,
                    next_sleep_secs = backoff_for(self.interval).as_secs(),
                    "Cycle failed"
                );
            }
        }
        outcome
    }

    async fn collect_and_publish(&self, session: &mut SessionState) -> CycleOutcome {
        let window = match Window::ending_now(self.interval.as_secs()) {
            Ok(window) => window,
            Err(e) => return CycleOutcome::CollectFailed(e),
        };

        let collected = match self.collect.execute(session, &window).await {
            Ok(collected) => collected,
            Err(e) => return CycleOutcome::CollectFailed(e),
        };

        if collected.stats.malformed > 0 || collected.stats.unknown_status > 0 {
            warn!(
                malformed = collected.stats.malformed,
                unknown_status = collected.stats.unknown_status,
                "Query log contained unusable entries"
            );
        }

        match self.publish.execute(&collected.groups).await {
            Ok(groups) => {
                info!(
                    window_start = window.start,
                    window_end = window.end,
                    records = collected.stats.records,
                    malformed = collected.stats.malformed,
                    groups,
                    next_sleep_secs = self.interval.as_secs(),
                    "Metrics published"
                );
                CycleOutcome::Published { groups }
            }
            Err(e) => CycleOutcome::PublishFailed(e),
        }
    }
}
