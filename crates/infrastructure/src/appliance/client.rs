//! HTTP client for the Pi-hole v6 REST API.

use super::dto::{
    AuthRequest, AuthResponse, BlockingDto, QueriesPageDto, QueryDto, SummaryDto, UpstreamsDto,
};
use async_trait::async_trait;
use holeflux_application::ports::ApplianceClient;
use holeflux_domain::config::ApplianceConfig;
use holeflux_domain::{
    ApplianceSummary, DomainError, QueryBatch, Session, StatusTable, UpstreamStats, Window,
};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

const SID_HEADER: &str = "X-FTL-SID";
const CSRF_HEADER: &str = "X-FTL-CSRF";

pub struct PiholeApiClient {
    http: reqwest::Client,
    base_url: String,
    host: String,
    password: Option<String>,
    max_queries: u32,
    table: Arc<StatusTable>,
}

impl PiholeApiClient {
    pub fn new(
        base_url: impl Into<String>,
        password: Option<String>,
        timeout: Duration,
        table: Arc<StatusTable>,
    ) -> Result<Self, DomainError> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let host = host_identity(&base_url);

        let http = reqwest::Client::builder()
            .use_rustls_tls()
            .timeout(timeout)
            .build()
            .map_err(|e| DomainError::Transport(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url,
            host,
            password: password.filter(|p| !p.is_empty()),
            max_queries: 100_000,
            table,
        })
    }

    pub fn from_config(
        config: &ApplianceConfig,
        table: Arc<StatusTable>,
    ) -> Result<Self, DomainError> {
        let base_url = config
            .base_url()
            .ok_or_else(|| DomainError::Transport("appliance url is not configured".to_string()))?;

        Ok(Self::new(
            base_url,
            config.password.clone(),
            Duration::from_secs(config.timeout_secs),
            table,
        )?
        .with_max_queries(config.max_queries))
    }

    pub fn with_max_queries(mut self, max_queries: u32) -> Self {
        self.max_queries = max_queries;
        self
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/api/{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        session: Option<&Session>,
        params: &[(&str, String)],
    ) -> Result<T, DomainError> {
        let url = self.endpoint(path);
        let mut request = self.http.get(&url).query(params);

        if let Some(session) = session {
            request = request
                .query(&[("sid", session.sid.as_str())])
                .header(SID_HEADER, session.sid.as_str());
            if let Some(csrf) = &session.csrf {
                request = request.header(CSRF_HEADER, csrf.as_str());
            }
        }

        let response = request
            .send()
            .await
            .map_err(|e| transport_error(&url, e))?;

        match response.status() {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                return Err(DomainError::Auth(format!(
                    "{} returned HTTP {}",
                    url,
                    response.status().as_u16()
                )));
            }
            status if !status.is_success() => {
                return Err(DomainError::Transport(format!(
                    "{} returned HTTP {}",
                    url,
                    status.as_u16()
                )));
            }
            _ => {}
        }

        response
            .json::<T>()
            .await
            .map_err(|e| DomainError::Transport(format!("unexpected response from {}: {}", url, e)))
    }

    async fn fetch_blocking(&self, session: Option<&Session>) -> Option<bool> {
        match self
            .get_json::<BlockingDto>("dns/blocking", session, &[])
            .await
        {
            Ok(blocking) => blocking.enabled(),
            Err(e) => {
                debug!(error = %e, "Blocking state unavailable");
                None
            }
        }
    }
}

#[async_trait]
impl ApplianceClient for PiholeApiClient {
    fn host(&self) -> &str {
        &self.host
    }

    async fn authenticate(&self) -> Result<Option<Session>, DomainError> {
        let Some(password) = self.password.as_deref() else {
            return Ok(None);
        };

        let url = self.endpoint("auth");
        let response = self
            .http
            .post(&url)
            .json(&AuthRequest { password })
            .send()
            .await
            .map_err(|e| transport_error(&url, e))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(DomainError::Auth(format!(
                "appliance rejected password (HTTP {})",
                status.as_u16()
            )));
        }
        if !status.is_success() {
            return Err(DomainError::Transport(format!(
                "{} returned HTTP {}",
                url,
                status.as_u16()
            )));
        }

        let body: AuthResponse = response
            .json()
            .await
            .map_err(|e| DomainError::Transport(format!("unexpected response from {}: {}", url, e)))?;

        let session = body.session.unwrap_or_default();
        match session.sid {
            Some(sid) if session.valid && !sid.is_empty() => Ok(Some(Session {
                sid,
                csrf: session.csrf.filter(|c| !c.is_empty()),
            })),
            _ => Err(DomainError::Auth(
                session
                    .message
                    .unwrap_or_else(|| "session not valid".to_string()),
            )),
        }
    }

    async fn fetch_summary(
        &self,
        session: Option<&Session>,
    ) -> Result<ApplianceSummary, DomainError> {
        let summary: SummaryDto = self.get_json("stats/summary", session, &[]).await?;
        let blocking = self.fetch_blocking(session).await;
        Ok(summary.into_summary(blocking))
    }

    async fn fetch_upstreams(
        &self,
        session: Option<&Session>,
    ) -> Result<Vec<UpstreamStats>, DomainError> {
        let upstreams: UpstreamsDto = self.get_json("stats/upstreams", session, &[]).await?;
        Ok(upstreams
            .upstreams
            .into_iter()
            .filter_map(|u| u.into_stats())
            .collect())
    }

    async fn fetch_queries(
        &self,
        session: Option<&Session>,
        window: &Window,
    ) -> Result<QueryBatch, DomainError> {
        let params = [
            ("from", window.start.to_string()),
            ("until", window.end.to_string()),
            ("length", self.max_queries.to_string()),
        ];
        let page: QueriesPageDto = self.get_json("queries", session, &params).await?;

        let returned = page.queries.len() as u64;
        if let Some(filtered) = page.records_filtered.filter(|f| *f > returned) {
            warn!(
                matching = filtered,
                returned,
                max_queries = self.max_queries,
                "Query log truncated, window is undercounted"
            );
        }

        let mut batch = QueryBatch::new(Vec::with_capacity(page.queries.len()));
        for entry in page.queries {
            let decoded = serde_json::from_value::<QueryDto>(entry)
                .map_err(|e| DomainError::MalformedRecord(e.to_string()))
                .and_then(|dto| dto.into_record(&self.table));

            match decoded {
                Ok(record) => batch.records.push(record),
                Err(e) => {
                    debug!(error = %e, "Skipping query log entry");
                    batch.malformed += 1;
                }
            }
        }

        if batch.malformed > 0 {
            warn!(
                malformed = batch.malformed,
                records = batch.len(),
                "Query log contained undecodable entries"
            );
        }
        Ok(batch)
    }
}

fn transport_error(url: &str, e: reqwest::Error) -> DomainError {
    if e.is_timeout() {
        DomainError::Transport(format!("timeout contacting {}", url))
    } else {
        DomainError::Transport(format!("request to {} failed: {}", url, e))
    }
}

/// Host part of the base URL, used as the `hostname` tag.
fn host_identity(base_url: &str) -> String {
    let without_scheme = base_url
        .split_once("://")
        .map(|(_, rest)| rest)
        .unwrap_or(base_url);
    without_scheme
        .split('/')
        .next()
        .unwrap_or(without_scheme)
        .to_string()
}
