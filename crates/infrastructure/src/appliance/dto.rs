//! Wire shapes of the Pi-hole v6 REST API.
//!
//! Top-level sections and the headline counters are required, so an error body
//! or a response from another API version fails to decode. Detail fields the
//! appliance may omit default to zero.

use chrono::{DateTime, TimeZone, Utc};
use holeflux_domain::{
    ApplianceSummary, DomainError, FieldValue, QueryRecord, StatusTable, UpstreamStats,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Serialize)]
pub(super) struct AuthRequest<'a> {
    pub password: &'a str,
}

#[derive(Deserialize, Default)]
pub(super) struct AuthResponse {
    #[serde(default)]
    pub session: Option<SessionDto>,
}

#[derive(Deserialize, Default)]
pub(super) struct SessionDto {
    #[serde(default)]
    pub valid: bool,
    #[serde(default)]
    pub sid: Option<String>,
    #[serde(default)]
    pub csrf: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Deserialize)]
pub(super) struct SummaryDto {
    pub queries: QueriesDto,
    pub clients: ClientsDto,
    pub gravity: GravityDto,
}

#[derive(Deserialize)]
pub(super) struct QueriesDto {
    pub total: i64,
    pub blocked: i64,
    pub percent_blocked: f64,
    #[serde(default)]
    pub unique_domains: i64,
    #[serde(default)]
    pub forwarded: i64,
    #[serde(default)]
    pub cached: i64,
    #[serde(default)]
    pub types: BTreeMap<String, i64>,
}

#[derive(Deserialize)]
pub(super) struct ClientsDto {
    #[serde(default)]
    pub total: i64,
    #[serde(default)]
    pub active: i64,
}

#[derive(Deserialize)]
pub(super) struct GravityDto {
    pub domains_being_blocked: i64,
    #[serde(default)]
    pub last_update: serde_json::Value,
}

impl SummaryDto {
    pub fn into_summary(self, blocking_enabled: Option<bool>) -> ApplianceSummary {
        ApplianceSummary {
            domains_being_blocked: self.gravity.domains_being_blocked,
            gravity_last_update: json_to_field(self.gravity.last_update),
            queries_total: self.queries.total,
            queries_blocked: self.queries.blocked,
            percent_blocked: self.queries.percent_blocked,
            unique_domains: self.queries.unique_domains,
            forwarded: self.queries.forwarded,
            cached: self.queries.cached,
            query_types: self.queries.types,
            clients_total: self.clients.total,
            clients_active: self.clients.active,
            blocking_enabled,
        }
    }
}

fn json_to_field(value: serde_json::Value) -> FieldValue {
    match value {
        serde_json::Value::Number(n) => match n.as_i64() {
            Some(i) => FieldValue::Integer(i),
            None => FieldValue::Float(n.as_f64().unwrap_or(0.0)),
        },
        serde_json::Value::Bool(b) => FieldValue::Boolean(b),
        serde_json::Value::String(s) => FieldValue::String(s),
        _ => FieldValue::Integer(0),
    }
}

#[derive(Deserialize)]
pub(super) struct BlockingDto {
    pub blocking: String,
}

impl BlockingDto {
    /// `None` for transitional states such as `failed` or `unknown`.
    pub fn enabled(&self) -> Option<bool> {
        match self.blocking.as_str() {
            "enabled" => Some(true),
            "disabled" => Some(false),
            _ => None,
        }
    }
}

#[derive(Deserialize)]
pub(super) struct UpstreamsDto {
    pub upstreams: Vec<UpstreamDto>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
pub(super) struct UpstreamDto {
    pub ip: Option<String>,
    pub name: Option<String>,
    pub port: Option<i64>,
    pub count: i64,
}

impl UpstreamDto {
    pub fn into_stats(self) -> Option<UpstreamStats> {
        let ip = self.ip.filter(|ip| !ip.is_empty())?;
        Some(UpstreamStats {
            ip,
            name: self.name,
            port: self.port.and_then(|p| u16::try_from(p).ok()),
            count: self.count,
        })
    }
}

#[derive(Deserialize)]
pub(super) struct QueriesPageDto {
    pub queries: Vec<serde_json::Value>,
    #[serde(default, rename = "recordsFiltered")]
    pub records_filtered: Option<u64>,
}

#[derive(Deserialize)]
pub(super) struct QueryDto {
    time: Option<f64>,
    #[serde(rename = "type")]
    query_type: Option<String>,
    domain: Option<String>,
    status: Option<String>,
    client: Option<ClientDto>,
    #[serde(default)]
    dnssec: Option<String>,
    #[serde(default)]
    reply: Option<ReplyDto>,
    #[serde(default)]
    upstream: Option<String>,
}

#[derive(Deserialize)]
struct ClientDto {
    ip: Option<String>,
    name: Option<String>,
}

#[derive(Deserialize)]
struct ReplyDto {
    #[serde(rename = "type")]
    reply_type: Option<String>,
    time: Option<f64>,
}

impl QueryDto {
    /// Validates the entry and maps its textual codes through `table`.
    pub fn into_record(self, table: &StatusTable) -> Result<QueryRecord, DomainError> {
        let time = self.time.ok_or_else(|| missing("time"))?;
        let query_type = self.query_type.ok_or_else(|| missing("type"))?;
        let domain = self.domain.ok_or_else(|| missing("domain"))?;
        let status = self.status.ok_or_else(|| missing("status"))?;
        let client = self
            .client
            .and_then(|c| non_empty(c.name).or_else(|| non_empty(c.ip)))
            .ok_or_else(|| missing("client"))?;
        let timestamp = epoch_to_utc(time)
            .ok_or_else(|| DomainError::MalformedRecord(format!("time out of range: {}", time)))?;

        let (reply_type, reply_time) = match self.reply {
            Some(reply) => (reply.reply_type, reply.time),
            None => (None, None),
        };

        Ok(QueryRecord {
            timestamp,
            query_type,
            domain,
            client,
            status_code: table.status_code_for(&status),
            destination: non_empty(self.upstream),
            reply_type_code: reply_type.map(|r| table.reply_code_for(&r)).unwrap_or(0),
            reply_time_ms: reply_time.unwrap_or(0.0),
            dnssec_code: self.dnssec.map(|d| table.dnssec_code_for(&d)).unwrap_or(0),
        })
    }
}

fn missing(field: &str) -> DomainError {
    DomainError::MalformedRecord(format!("missing {}", field))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn epoch_to_utc(secs: f64) -> Option<DateTime<Utc>> {
    if !secs.is_finite() {
        return None;
    }
    let whole = secs.trunc() as i64;
    let nanos = ((secs - secs.trunc()) * 1e9).round().clamp(0.0, 999_999_999.0) as u32;
    Utc.timestamp_opt(whole, nanos).single()
}
