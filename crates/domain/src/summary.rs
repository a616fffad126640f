use crate::metric_group::FieldValue;
use std::collections::BTreeMap;

/// Appliance-wide counters from the summary endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct ApplianceSummary {
    pub domains_being_blocked: i64,
    /// Passed through to the sink untouched.
    pub gravity_last_update: FieldValue,
    pub queries_total: i64,
    pub queries_blocked: i64,
    pub percent_blocked: f64,
    pub unique_domains: i64,
    pub forwarded: i64,
    pub cached: i64,
    pub query_types: BTreeMap<String, i64>,
    pub clients_total: i64,
    pub clients_active: i64,
    /// Whether blocking is enabled; `None` when the appliance did not say.
    pub blocking_enabled: Option<bool>,
}

impl ApplianceSummary {
    pub fn total_typed_queries(&self) -> i64 {
        self.query_types.values().sum()
    }
}

impl Default for ApplianceSummary {
    fn default() -> Self {
        Self {
            domains_being_blocked: 0,
            gravity_last_update: FieldValue::Integer(0),
            queries_total: 0,
            queries_blocked: 0,
            percent_blocked: 0.0,
            unique_domains: 0,
            forwarded: 0,
            cached: 0,
            query_types: BTreeMap::new(),
            clients_total: 0,
            clients_active: 0,
            blocking_enabled: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamStats {
    pub ip: String,
    pub name: Option<String>,
    pub port: Option<u16>,
    pub count: i64,
}

impl UpstreamStats {
    pub fn display_name(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => &self.ip,
        }
    }
}
