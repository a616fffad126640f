#![allow(dead_code)]

use async_trait::async_trait;
use holeflux_application::ports::{ApplianceClient, MetricSink};
use holeflux_application::use_cases::{CollectMetricsUseCase, PublishMetricsUseCase};
use holeflux_domain::{
    ApplianceSummary, CollectionMode, DomainError, MetricGroup, QueryBatch, Session,
    StatusTable, UpstreamStats, Window,
};
use holeflux_jobs::MetricsCollectionJob;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;

/// Appliance that takes `latency` per query fetch and records when each
/// fetch started.
pub struct TimedAppliance {
    latency: Arc<RwLock<Duration>>,
    fail: Arc<RwLock<bool>>,
    fetch_times: Arc<RwLock<Vec<Instant>>>,
}

impl TimedAppliance {
    pub fn new(latency: Duration) -> Self {
        Self {
            latency: Arc::new(RwLock::new(latency)),
            fail: Arc::new(RwLock::new(false)),
            fetch_times: Arc::new(RwLock::new(Vec::new())),
        }
    }

    pub async fn set_should_fail(&self, fail: bool) {
        *self.fail.write().await = fail;
    }

    pub async fn set_latency(&self, latency: Duration) {
        *self.latency.write().await = latency;
    }

    pub async fn fetch_times(&self) -> Vec<Instant> {
        self.fetch_times.read().await.clone()
    }

    /// Gaps between consecutive fetches, in whole seconds.
    pub async fn gaps_secs(&self) -> Vec<u64> {
        self.fetch_times()
            .await
            .windows(2)
            .map(|w| w[1].duration_since(w[0]).as_secs())
            .collect()
    }
}

#[async_trait]
impl ApplianceClient for TimedAppliance {
    fn host(&self) -> &str {
        "pi.hole"
    }

    async fn authenticate(&self) -> Result<Option<Session>, DomainError> {
        Ok(None)
    }

    async fn fetch_summary(
        &self,
        _session: Option<&Session>,
    ) -> Result<ApplianceSummary, DomainError> {
        Ok(ApplianceSummary::default())
    }

    async fn fetch_upstreams(
        &self,
        _session: Option<&Session>,
    ) -> Result<Vec<UpstreamStats>, DomainError> {
        Ok(Vec::new())
    }

    async fn fetch_queries(
        &self,
        _session: Option<&Session>,
        _window: &Window,
    ) -> Result<QueryBatch, DomainError> {
        self.fetch_times.write().await.push(Instant::now());
        let latency = *self.latency.read().await;
        tokio::time::sleep(latency).await;
        if *self.fail.read().await {
            return Err(DomainError::Transport("connection refused".to_string()));
        }
        Ok(QueryBatch::default())
    }
}

pub struct RecordingSink {
    fail: Arc<RwLock<bool>>,
    fail_prepare: bool,
    writes: Arc<AtomicU64>,
    prepares: Arc<AtomicU64>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self {
            fail: Arc::new(RwLock::new(false)),
            fail_prepare: false,
            writes: Arc::new(AtomicU64::new(0)),
            prepares: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn with_failing_prepare(mut self) -> Self {
        self.fail_prepare = true;
        self
    }

    pub async fn set_should_fail(&self, fail: bool) {
        *self.fail.write().await = fail;
    }

    pub fn writes(&self) -> u64 {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn prepares(&self) -> u64 {
        self.prepares.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MetricSink for RecordingSink {
    async fn write(&self, _groups: &[MetricGroup]) -> Result<(), DomainError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        if *self.fail.read().await {
            return Err(DomainError::Write("HTTP 503".to_string()));
        }
        Ok(())
    }

    async fn prepare(&self) -> Result<(), DomainError> {
        self.prepares.fetch_add(1, Ordering::SeqCst);
        if self.fail_prepare {
            return Err(DomainError::Write("health check failed".to_string()));
        }
        Ok(())
    }
}

pub fn make_job(
    appliance: Arc<TimedAppliance>,
    sink: Arc<RecordingSink>,
    interval_secs: u64,
) -> MetricsCollectionJob {
    let collect = Arc::new(CollectMetricsUseCase::new(
        appliance,
        Arc::new(StatusTable::default()),
        CollectionMode::Live,
    ));
    let publish = Arc::new(PublishMetricsUseCase::new(sink));
    MetricsCollectionJob::new(collect, publish, interval_secs)
}
