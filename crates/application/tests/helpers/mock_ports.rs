#![allow(dead_code)]

use async_trait::async_trait;
use holeflux_application::ports::{ApplianceClient, MetricSink};
use holeflux_domain::{
    ApplianceSummary, DomainError, MetricGroup, QueryBatch, Session, UpstreamStats, Window,
};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

pub struct MockApplianceClient {
    host: String,
    password: bool,
    summary: Arc<RwLock<ApplianceSummary>>,
    upstreams: Arc<RwLock<Vec<UpstreamStats>>>,
    batch: Arc<RwLock<QueryBatch>>,
    fail_auth: Arc<RwLock<bool>>,
    fail_summary: Arc<RwLock<bool>>,
    fail_queries: Arc<RwLock<bool>>,
    session_rejections: Arc<AtomicU64>,
    auth_calls: Arc<AtomicU64>,
    summary_calls: Arc<AtomicU64>,
    query_calls: Arc<AtomicU64>,
    last_window: Arc<RwLock<Option<Window>>>,
    last_session: Arc<RwLock<Option<Session>>>,
}

impl MockApplianceClient {
    pub fn new() -> Self {
        Self {
            host: "pi.hole".to_string(),
            password: true,
            summary: Arc::new(RwLock::new(ApplianceSummary::default())),
            upstreams: Arc::new(RwLock::new(Vec::new())),
            batch: Arc::new(RwLock::new(QueryBatch::default())),
            fail_auth: Arc::new(RwLock::new(false)),
            fail_summary: Arc::new(RwLock::new(false)),
            fail_queries: Arc::new(RwLock::new(false)),
            session_rejections: Arc::new(AtomicU64::new(0)),
            auth_calls: Arc::new(AtomicU64::new(0)),
            summary_calls: Arc::new(AtomicU64::new(0)),
            query_calls: Arc::new(AtomicU64::new(0)),
            last_window: Arc::new(RwLock::new(None)),
            last_session: Arc::new(RwLock::new(None)),
        }
    }

    pub fn without_password(mut self) -> Self {
        self.password = false;
        self
    }

    pub async fn set_summary(&self, summary: ApplianceSummary) {
        *self.summary.write().await = summary;
    }

    pub async fn set_upstreams(&self, upstreams: Vec<UpstreamStats>) {
        *self.upstreams.write().await = upstreams;
    }

    pub async fn set_batch(&self, batch: QueryBatch) {
        *self.batch.write().await = batch;
    }

    pub async fn set_fail_auth(&self, fail: bool) {
        *self.fail_auth.write().await = fail;
    }

    pub async fn set_fail_summary(&self, fail: bool) {
        *self.fail_summary.write().await = fail;
    }

    pub async fn set_fail_queries(&self, fail: bool) {
        *self.fail_queries.write().await = fail;
    }

    /// The next `n` fetches answer with an auth error.
    pub fn reject_sessions(&self, n: u64) {
        self.session_rejections.store(n, Ordering::SeqCst);
    }

    pub fn auth_calls(&self) -> u64 {
        self.auth_calls.load(Ordering::SeqCst)
    }

    pub fn summary_calls(&self) -> u64 {
        self.summary_calls.load(Ordering::SeqCst)
    }

    pub fn query_calls(&self) -> u64 {
        self.query_calls.load(Ordering::SeqCst)
    }

    pub async fn last_window(&self) -> Option<Window> {
        *self.last_window.read().await
    }

    pub async fn last_session(&self) -> Option<Session> {
        self.last_session.read().await.clone()
    }

    async fn check_session(&self, session: Option<&Session>) -> Result<(), DomainError> {
        *self.last_session.write().await = session.cloned();

        let remaining = self.session_rejections.load(Ordering::SeqCst);
        if remaining > 0 {
            self.session_rejections.store(remaining - 1, Ordering::SeqCst);
            return Err(DomainError::Auth("session expired".to_string()));
        }
        if self.password && session.is_none() {
            return Err(DomainError::Auth("no session".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl ApplianceClient for MockApplianceClient {
    fn host(&self) -> &str {
        &self.host
    }

    async fn authenticate(&self) -> Result<Option<Session>, DomainError> {
        let n = self.auth_calls.fetch_add(1, Ordering::SeqCst) + 1;
        if *self.fail_auth.read().await {
            return Err(DomainError::Auth("wrong password".to_string()));
        }
        if !self.password {
            return Ok(None);
        }
        Ok(Some(Session {
            sid: format!("sid-{}", n),
            csrf: None,
        }))
    }

    async fn fetch_summary(
        &self,
        session: Option<&Session>,
    ) -> Result<ApplianceSummary, DomainError> {
        self.summary_calls.fetch_add(1, Ordering::SeqCst);
        self.check_session(session).await?;
        if *self.fail_summary.read().await {
            return Err(DomainError::Transport("summary unavailable".to_string()));
        }
        Ok(self.summary.read().await.clone())
    }

    async fn fetch_upstreams(
        &self,
        session: Option<&Session>,
    ) -> Result<Vec<UpstreamStats>, DomainError> {
        self.check_session(session).await?;
        Ok(self.upstreams.read().await.clone())
    }

    async fn fetch_queries(
        &self,
        session: Option<&Session>,
        window: &Window,
    ) -> Result<QueryBatch, DomainError> {
        self.query_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_window.write().await = Some(*window);
        self.check_session(session).await?;
        if *self.fail_queries.read().await {
            return Err(DomainError::Transport("connection refused".to_string()));
        }
        Ok(self.batch.read().await.clone())
    }
}

pub struct MockMetricSink {
    written: Arc<RwLock<Vec<MetricGroup>>>,
    write_calls: Arc<AtomicU64>,
    should_fail: Arc<RwLock<bool>>,
}

impl MockMetricSink {
    pub fn new() -> Self {
        Self {
            written: Arc::new(RwLock::new(Vec::new())),
            write_calls: Arc::new(AtomicU64::new(0)),
            should_fail: Arc::new(RwLock::new(false)),
        }
    }

    pub async fn set_should_fail(&self, fail: bool) {
        *self.should_fail.write().await = fail;
    }

    pub fn write_calls(&self) -> u64 {
        self.write_calls.load(Ordering::SeqCst)
    }

    pub async fn written(&self) -> Vec<MetricGroup> {
        self.written.read().await.clone()
    }
}

#[async_trait]
impl MetricSink for MockMetricSink {
    async fn write(&self, groups: &[MetricGroup]) -> Result<(), DomainError> {
        self.write_calls.fetch_add(1, Ordering::SeqCst);
        if *self.should_fail.read().await {
            return Err(DomainError::Write("sink unavailable".to_string()));
        }
        self.written.write().await.extend_from_slice(groups);
        Ok(())
    }
}
