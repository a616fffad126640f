//! InfluxDB sink speaking either the v2 (`/api/v2/write`) or the v1
//! (`/write`) HTTP API.

use super::line_protocol::encode_group;
use async_trait::async_trait;
use holeflux_application::ports::MetricSink;
use holeflux_domain::config::{SinkApi, SinkConfig};
use holeflux_domain::{DomainError, MetricGroup};
use std::time::Duration;
use tracing::{debug, info, warn};

const MAX_ERROR_BODY: usize = 256;

enum Target {
    V2 {
        org: String,
        bucket: String,
        token: Option<String>,
    },
    V1 {
        database: String,
        username: Option<String>,
        password: Option<String>,
    },
}

pub struct InfluxSink {
    http: reqwest::Client,
    base_url: String,
    target: Target,
    batch_size: usize,
}

impl InfluxSink {
    pub fn from_config(config: &SinkConfig) -> Result<Self, DomainError> {
        let base_url = config
            .base_url()
            .ok_or_else(|| DomainError::Write("sink url is not configured".to_string()))?;

        let target = match config.api {
            SinkApi::V2 => Target::V2 {
                org: required(&config.org, "org")?,
                bucket: required(&config.bucket, "bucket")?,
                token: config.token.clone(),
            },
            SinkApi::V1 => Target::V1 {
                database: required(&config.database, "database")?,
                username: config.username.clone(),
                password: config.password.clone(),
            },
        };

        let http = reqwest::Client::builder()
            .use_rustls_tls()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| DomainError::Write(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url,
            target,
            batch_size: config.batch_size.max(1),
        })
    }

    fn write_request(&self, body: String) -> reqwest::RequestBuilder {
        let request = match &self.target {
            Target::V2 { org, bucket, token } => {
                let request = self
                    .http
                    .post(format!("{}/api/v2/write", self.base_url))
                    .query(&[
                        ("org", org.as_str()),
                        ("bucket", bucket.as_str()),
                        ("precision", "ns"),
                    ]);
                match token {
                    Some(token) => request.header("Authorization", format!("Token {}", token)),
                    None => request,
                }
            }
            Target::V1 {
                database,
                username,
                password,
            } => self
                .http
                .post(format!("{}/write", self.base_url))
                .query(&[("db", database.as_str()), ("precision", "ns")])
                .query(&v1_credentials(username, password)),
        };

        request
            .header("Content-Type", "text/plain; charset=utf-8")
            .body(body)
    }

    async fn send_batch(&self, lines: &[String]) -> Result<(), DomainError> {
        let response = self
            .write_request(lines.join("\n"))
            .send()
            .await
            .map_err(|e| DomainError::Write(format!("request to {} failed: {}", self.base_url, e)))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(DomainError::Write(format!(
            "HTTP {}: {}",
            status.as_u16(),
            truncate(&body, MAX_ERROR_BODY)
        )))
    }
}

#[async_trait]
impl MetricSink for InfluxSink {
    async fn write(&self, groups: &[MetricGroup]) -> Result<(), DomainError> {
        let lines: Vec<String> = groups.iter().filter_map(encode_group).collect();

        let skipped = groups.len() - lines.len();
        if skipped > 0 {
            warn!(skipped, "Metric groups without encodable fields dropped");
        }

        for chunk in lines.chunks(self.batch_size) {
            self.send_batch(chunk).await?;
            debug!(lines = chunk.len(), "Batch written to InfluxDB");
        }
        Ok(())
    }

    async fn prepare(&self) -> Result<(), DomainError> {
        match &self.target {
            Target::V1 {
                database,
                username,
                password,
            } => {
                let statement = format!("CREATE DATABASE \"{}\"", database.replace('"', "\\\""));
                let response = self
                    .http
                    .post(format!("{}/query", self.base_url))
                    .query(&[("q", statement.as_str())])
                    .query(&v1_credentials(username, password))
                    .send()
                    .await
                    .map_err(|e| DomainError::Write(format!("CREATE DATABASE failed: {}", e)))?;

                if !response.status().is_success() {
                    return Err(DomainError::Write(format!(
                        "CREATE DATABASE returned HTTP {}",
                        response.status().as_u16()
                    )));
                }
                info!(database = %database, "InfluxDB database ready");
            }
            Target::V2 { bucket, .. } => {
                let response = self
                    .http
                    .get(format!("{}/health", self.base_url))
                    .send()
                    .await
                    .map_err(|e| DomainError::Write(format!("health check failed: {}", e)))?;

                if !response.status().is_success() {
                    return Err(DomainError::Write(format!(
                        "health check returned HTTP {}",
                        response.status().as_u16()
                    )));
                }
                info!(bucket = %bucket, "InfluxDB reachable");
            }
        }
        Ok(())
    }
}

fn required(value: &Option<String>, name: &str) -> Result<String, DomainError> {
    value
        .as_deref()
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .ok_or_else(|| DomainError::Write(format!("sink {} is not configured", name)))
}

fn v1_credentials<'a>(
    username: &'a Option<String>,
    password: &'a Option<String>,
) -> Vec<(&'static str, &'a str)> {
    let mut params = Vec::with_capacity(2);
    if let Some(u) = username.as_deref() {
        params.push(("u", u));
    }
    if let Some(p) = password.as_deref() {
        params.push(("p", p));
    }
    params
}

fn truncate(body: &str, max: usize) -> &str {
    match body.char_indices().nth(max) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}
