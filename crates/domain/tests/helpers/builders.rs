#![allow(dead_code)]
use chrono::{DateTime, TimeZone, Utc};
use holeflux_domain::QueryRecord;

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
            reply_time_ms: 1.5,
            dnssec_code: 0,
        }
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
