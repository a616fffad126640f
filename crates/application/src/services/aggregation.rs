//! Query log aggregation engine.
//!
//! Reduces one window of raw query records into the fixed set of metric groups
//! published per cycle. Pure: no I/O, no clock, no shared state.

use chrono::{DateTime, FixedOffset};
use holeflux_domain::{
    ApplianceSummary, FieldValue, Measurement, MetricGroup, QueryBatch, StatusCategory,
    StatusTable,
};
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

pub const HOSTNAME_TAG: &str = "hostname";

/// Percentage of `blocked` in `total`, with the denominator floored at one so
/// empty groups report `0.0` instead of NaN.
pub fn ads_percentage(blocked: usize, total: usize) -> f64 {
    blocked as f64 * 100.0 / total.max(1) as f64
}

pub(crate) fn host_group(
    measurement: Measurement,
    timestamp: DateTime<FixedOffset>,
    host: &str,
) -> MetricGroup {
    MetricGroup::new(measurement, timestamp).with_tag(HOSTNAME_TAG, host)
}

/// Diagnostics for one aggregation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AggregationStats {
    pub records: usize,
    /// Entries dropped by the collector because required fields were missing.
    pub malformed: u64,
    /// Records whose status code is not in the taxonomy.
    pub unknown_status: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Aggregation {
    pub groups: Vec<MetricGroup>,
    pub stats: AggregationStats,
}

#[derive(Debug, Default, Clone, Copy)]
struct Tally {
    queries: usize,
    blocked: usize,
}

impl Tally {
    fn add(&mut self, blocked: bool) {
        self.queries += 1;
        if blocked {
            self.blocked += 1;
        }
    }

    fn ads_percentage(&self) -> f64 {
        ads_percentage(self.blocked, self.queries)
    }
}

#[derive(Default)]
struct Reduction<'a> {
    domains: HashSet<&'a str>,
    categories: BTreeMap<StatusCategory, usize>,
    clients: BTreeMap<&'a str, Tally>,
    query_types: BTreeMap<&'a str, usize>,
    destinations: BTreeMap<&'a str, usize>,
}

impl Reduction<'_> {
    fn count(&self, category: StatusCategory) -> usize {
        self.categories.get(&category).copied().unwrap_or(0)
    }
}

pub struct AggregationEngine {
    table: Arc<StatusTable>,
}

impl AggregationEngine {
    pub fn new(table: Arc<StatusTable>) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &StatusTable {
        &self.table
    }

    /// Aggregates `batch` into metric groups sharing `window_end` as timestamp.
    ///
    /// Dimension keys are compared byte for byte; per-client, per-type and
    /// per-destination groups are only emitted for keys that occur in the batch.
    pub fn aggregate(
        &self,
        batch: &QueryBatch,
        summary: &ApplianceSummary,
        window_end: DateTime<FixedOffset>,
        host: &str,
    ) -> Aggregation {
        let reduction = self.reduce(batch);
        let total = batch.records.len();
        let blocked = reduction.count(StatusCategory::Blocked);

        let mut groups = Vec::with_capacity(
            4 + reduction.clients.len() + reduction.query_types.len() + reduction.destinations.len(),
        );

        groups.push(
            host_group(Measurement::Domains, window_end, host)
                .with_field("domain_count", summary.domains_being_blocked)
                .with_field("unique_domains", FieldValue::count(reduction.domains.len()))
                .with_field(
                    "forwarded",
                    FieldValue::count(reduction.count(StatusCategory::Forwarded)),
                )
                .with_field(
                    "cached",
                    FieldValue::count(reduction.count(StatusCategory::Cached)),
                ),
        );

        groups.push(
            host_group(Measurement::Queries, window_end, host)
                .with_field("queries", FieldValue::count(total))
                .with_field("blocked", FieldValue::count(blocked))
                .with_field("ads_percentage", ads_percentage(blocked, total)),
        );

        for (client, tally) in &reduction.clients {
            groups.push(
                host_group(Measurement::Clients, window_end, host)
                    .with_tag("client", *client)
                    .with_field("queries", FieldValue::count(tally.queries))
                    .with_field("blocked", FieldValue::count(tally.blocked))
                    .with_field("ads_percentage", tally.ads_percentage()),
            );
        }

        let mut other = host_group(Measurement::Other, window_end, host)
            .with_field("gravity_last_update", summary.gravity_last_update.clone());
        if let Some(enabled) = summary.blocking_enabled {
            other = other.with_field("status", enabled);
        }
        groups.push(other);

        for (query_type, count) in &reduction.query_types {
            groups.push(
                host_group(Measurement::QueryTypes, window_end, host)
                    .with_tag("query_type", *query_type)
                    .with_field("queries", FieldValue::count(*count)),
            );
        }

        for (destination, count) in &reduction.destinations {
            groups.push(
                host_group(Measurement::ForwardDestinations, window_end, host)
                    .with_tag("destination", *destination)
                    .with_field("queries", FieldValue::count(*count)),
            );
        }

        Aggregation {
            groups,
            stats: AggregationStats {
                records: total,
                malformed: batch.malformed,
                unknown_status: reduction.count(StatusCategory::Unknown),
            },
        }
    }

    fn reduce<'a>(&self, batch: &'a QueryBatch) -> Reduction<'a> {
        let mut reduction = Reduction::default();

        for record in &batch.records {
            let category = self.table.classify_status(record.status_code);
            let blocked = category == StatusCategory::Blocked;

            *reduction.categories.entry(category).or_insert(0) += 1;
            reduction.domains.insert(record.domain.as_str());
            reduction
                .clients
                .entry(record.client.as_str())
                .or_default()
                .add(blocked);
            *reduction
                .query_types
                .entry(record.query_type.as_str())
                .or_insert(0) += 1;

            if let Some(destination) = record.canonical_destination() {
                *reduction.destinations.entry(destination).or_insert(0) += 1;
            }
        }

        reduction
    }
}
