use super::aggregation::host_group;
use holeflux_domain::{Measurement, MetricGroup, QueryBatch, StatusTable};

/// One `logs` group per query, stamped with the query's own time.
pub fn raw_log_groups(batch: &QueryBatch, table: &StatusTable, host: &str) -> Vec<MetricGroup> {
    batch
        .records
        .iter()
        .map(|record| {
            let mut group = host_group(Measurement::Logs, record.timestamp.fixed_offset(), host)
                .with_tag("query_type", record.query_type.as_str())
                .with_tag("client", record.client.as_str())
                .with_tag("status", table.status_display(record.status_code))
                .with_tag("reply_type", table.classify_reply(record.reply_type_code))
                .with_tag("dnssec", table.dnssec_display(record.dnssec_code))
                .with_field("domain", record.domain.as_str())
                .with_field("reply_time", record.reply_time_ms);

            if let Some(destination) = record.canonical_destination() {
                group = group.with_tag("destination", destination);
            }
            group
        })
        .collect()
}
