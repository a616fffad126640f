//! InfluxDB line protocol encoding.
//!
//! ```text
//! measurement,tag1=v1,tag2=v2 field1=1i,field2=0.5,field3="text" 1700000000000000000
//! ```

use holeflux_domain::{FieldValue, MetricGroup};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EscapeContext {
    Measurement,
    /// Tag keys, tag values and field keys share one rule set.
    Key,
    FieldString,
}

pub fn escape(value: &str, context: EscapeContext) -> String {
    let mut out = String::with_capacity(value.len() + 4);

    for c in value.chars() {
        let special = match context {
            EscapeContext::Measurement => matches!(c, ',' | ' ' | '\\'),
            EscapeContext::Key => matches!(c, ',' | '=' | ' ' | '\\'),
            EscapeContext::FieldString => matches!(c, '"' | '\\'),
        };
        if special {
            out.push('\\');
        }
        // Newlines would terminate the line.
        match c {
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            _ => out.push(c),
        }
    }

    out
}

fn encode_field(value: &FieldValue) -> Option<String> {
    match value {
        FieldValue::Integer(v) => Some(format!("{}i", v)),
        FieldValue::Float(v) if v.is_finite() => Some(format!("{}", v)),
        FieldValue::Float(_) => None,
        FieldValue::Boolean(v) => Some(v.to_string()),
        FieldValue::String(v) => Some(format!(
            "\"{}\"",
            escape(v, EscapeContext::FieldString)
        )),
    }
}

/// Encodes one group as a single line.
///
/// Returns `None` when nothing encodable remains: no finite fields, or a
/// timestamp outside the nanosecond range. Tags with empty values are dropped.
pub fn encode_group(group: &MetricGroup) -> Option<String> {
    let timestamp = group.timestamp.timestamp_nanos_opt()?;

    let fields: Vec<String> = group
        .fields
        .iter()
        .filter_map(|(key, value)| {
            encode_field(value).map(|v| format!("{}={}", escape(key, EscapeContext::Key), v))
        })
        .collect();
    if fields.is_empty() {
        return None;
    }

    let mut line = escape(group.measurement.as_str(), EscapeContext::Measurement);
    for (key, value) in group.tags.iter().filter(|(_, v)| !v.is_empty()) {
        line.push(',');
        line.push_str(&escape(key, EscapeContext::Key));
        line.push('=');
        line.push_str(&escape(value, EscapeContext::Key));
    }

    line.push(' ');
    line.push_str(&fields.join(","));
    line.push(' ');
    line.push_str(&timestamp.to_string());

    Some(line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, TimeZone};
    use holeflux_domain::Measurement;

    fn group() -> MetricGroup {
        let ts = FixedOffset::east_opt(7200)
            .unwrap()
            .timestamp_opt(1_700_000_000, 0)
            .unwrap();
        MetricGroup::new(Measurement::Clients, ts)
    }

    #[test]
    fn test_escape_rules_per_context() {
        assert_eq!(escape("a b,c", EscapeContext::Measurement), "a\\ b\\,c");
        assert_eq!(escape("a=b c", EscapeContext::Key), "a\\=b\\ c");
        assert_eq!(escape("say \"hi\"", EscapeContext::FieldString), "say \\\"hi\\\"");
        assert_eq!(escape("x=y", EscapeContext::Measurement), "x=y");
    }

    #[test]
    fn test_encode_group_formats_types() {
        let line = encode_group(
            &group()
                .with_tag("hostname", "pi.hole")
                .with_tag("client", "living room")
                .with_field("queries", 5i64)
                .with_field("ads_percentage", 40.0)
                .with_field("status", true)
                .with_field("domain", "ads.example"),
        )
        .unwrap();

        assert_eq!(
            line,
            "clients,client=living\\ room,hostname=pi.hole \
             ads_percentage=40,domain=\"ads.example\",queries=5i,status=true \
             1700000000000000000"
        );
    }

    #[test]
    fn test_encode_group_skips_empty_tags_and_non_finite_fields() {
        let line = encode_group(
            &group()
                .with_tag("client", "")
                .with_field("ratio", f64::NAN)
                .with_field("queries", 1i64),
        )
        .unwrap();
        assert_eq!(line, "clients queries=1i 1700000000000000000");
    }

    #[test]
    fn test_encode_group_without_fields() {
        assert!(encode_group(&group().with_tag("hostname", "pi.hole")).is_none());
    }
}
