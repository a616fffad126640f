use super::aggregation::host_group;
use chrono::{DateTime, FixedOffset};
use holeflux_domain::{ApplianceSummary, Measurement, MetricGroup, UpstreamStats};

/// Maps the appliance's own summary counters to metric groups.
///
/// Nothing is recomputed: percentages and counts are the appliance's values.
pub fn totals_groups(
    summary: &ApplianceSummary,
    upstreams: &[UpstreamStats],
    timestamp: DateTime<FixedOffset>,
    host: &str,
) -> Vec<MetricGroup> {
    let mut groups = Vec::with_capacity(4 + summary.query_types.len() + upstreams.len());

    groups.push(
        host_group(Measurement::Domains, timestamp, host)
            .with_field("domain_count", summary.domains_being_blocked)
            .with_field("unique_domains", summary.unique_domains)
            .with_field("forwarded", summary.forwarded)
            .with_field("cached", summary.cached),
    );

    groups.push(
        host_group(Measurement::Queries, timestamp, host)
            .with_field("queries", summary.queries_total)
            .with_field("blocked", summary.queries_blocked)
            .with_field("ads_percentage", summary.percent_blocked),
    );

    groups.push(
        host_group(Measurement::Clients, timestamp, host)
            .with_field("total_clients", summary.clients_total)
            .with_field("unique_clients", summary.clients_active)
            .with_field("total_queries", summary.total_typed_queries()),
    );

    let mut other = host_group(Measurement::Other, timestamp, host)
        .with_field("gravity_last_update", summary.gravity_last_update.clone());
    if let Some(enabled) = summary.blocking_enabled {
        other = other.with_field("status", enabled);
    }
    groups.push(other);

    for (query_type, count) in &summary.query_types {
        groups.push(
            host_group(Measurement::QueryTypes, timestamp, host)
                .with_tag("query_type", query_type.as_str())
                .with_field("value", *count as f64),
        );
    }

    for upstream in upstreams {
        groups.push(
            host_group(Measurement::ForwardDestinations, timestamp, host)
                .with_tag("ip", upstream.ip.as_str())
                .with_tag("destination", upstream.display_name())
                .with_field("value", upstream.count as f64),
        );
    }

    groups
}
