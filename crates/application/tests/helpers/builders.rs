#![allow(dead_code)]
use chrono::{DateTime, TimeZone, Utc};
use holeflux_domain::{ApplianceSummary, FieldValue, QueryRecord};

pub struct QueryRecordBuilder {
    timestamp: DateTime<Utc>,
    query_type: String,
    domain: String,
    client: String,
    status_code: i32,
    destination: Option<String>,
    reply_type_code: i32,
    reply_time_ms: f64,
    dnssec_code: i32,
}

impl QueryRecordBuilder {
    pub fn new() -> Self {
        Self {
            timestamp: Utc.timestamp_opt(1_700_000_000, 0).unwrap(),
            query_type: "A".to_string(),
            domain: "example.com".to_string(),
            client: "192.168.1.100".to_string(),
            status_code: 2,
            destination: None,
            reply_type_code: 4,
            reply_time_ms: 12.5,
            dnssec_code: 2,
        }
    }

    pub fn timestamp(mut self, epoch_secs: i64) -> Self {
        self.timestamp = Utc.timestamp_opt(epoch_secs, 0).unwrap();
        self
    }

    pub fn query_type(mut self, query_type: &str) -> Self {
        self.query_type = query_type.to_string();
        self
    }

    pub fn domain(mut self, domain: &str) -> Self {
        self.domain = domain.to_string();
        self
    }

    pub fn client(mut self, client: &str) -> Self {
        self.client = client.to_string();
        self
    }

    pub fn status(mut self, code: i32) -> Self {
        self.status_code = code;
        self
    }

    pub fn blocked(self) -> Self {
        self.status(1)
    }

    pub fn cached(self) -> Self {
        self.status(3)
    }

    pub fn destination(mut self, destination: &str) -> Self {
        self.destination = Some(destination.to_string());
        self
    }

    pub fn build(self) -> QueryRecord {
        QueryRecord {
            timestamp: self.timestamp,
            query_type: self.query_type,
            domain: self.domain,
            client: self.client,
            status_code: self.status_code,
            destination: self.destination,
            reply_type_code: self.reply_type_code,
            reply_time_ms: self.reply_time_ms,
            dnssec_code: self.dnssec_code,
        }
    }
}

pub fn summary_with_types(types: &[(&str, i64)]) -> ApplianceSummary {
    ApplianceSummary {
        domains_being_blocked: 100,
        gravity_last_update: FieldValue::Integer(1_699_990_000),
        queries_total: 50,
        queries_blocked: 10,
        percent_blocked: 20.0,
        unique_domains: 25,
        forwarded: 30,
        cached: 10,
        query_types: types.iter().map(|(k, v)| (k.to_string(), *v)).collect(),
        clients_total: 7,
        clients_active: 4,
        blocking_enabled: Some(true),
    }
}
