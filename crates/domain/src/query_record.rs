use chrono::{DateTime, Utc};

/// One DNS lookup observed by the appliance.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryRecord {
    pub timestamp: DateTime<Utc>,
    pub query_type: String,
    pub domain: String,
    /// Client name when the appliance resolved one, otherwise its address.
    pub client: String,
    pub status_code: i32,
    /// Upstream resolver identity; `None` when answered locally.
    pub destination: Option<String>,
    pub reply_type_code: i32,
    pub reply_time_ms: f64,
    pub dnssec_code: i32,
}

impl QueryRecord {
    pub fn canonical_destination(&self) -> Option<&str> {
        self.destination
            .as_deref()
            .map(canonical_destination)
            .filter(|d| !d.is_empty())
    }
}

/// Strips the port or address suffix from an upstream identity.
///
/// The appliance encodes upstreams as `host#port` or `name|ip`; only the part
/// before the first separator identifies the destination.
pub fn canonical_destination(raw: &str) -> &str {
    match raw.find(|c| c == '#' || c == '|') {
        Some(idx) => &raw[..idx],
        None => raw,
    }
}

/// Records fetched for one window, plus the count of entries that could not be
/// decoded and were dropped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryBatch {
    pub records: Vec<QueryRecord>,
    pub malformed: u64,
}

impl QueryBatch {
    pub fn new(records: Vec<QueryRecord>) -> Self {
        Self {
            records,
            malformed: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
