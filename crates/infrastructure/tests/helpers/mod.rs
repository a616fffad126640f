#![allow(dead_code)]

use chrono::{FixedOffset, TimeZone};
use holeflux_domain::{Measurement, MetricGroup};
use serde_json::{json, Value};

pub fn auth_ok(sid: &str) -> Value {
    json!({
        "session": {
            "valid": true,
            "totp": false,
            "sid": sid,
            "csrf": "csrf-token",
            "validity": 1800,
            "message": "password correct"
        },
        "took": 0.01
    })
}

pub fn summary_body() -> Value {
    json!({
        "queries": {
            "total": 50,
            "blocked": 10,
            "percent_blocked": 20.0,
            "unique_domains": 25,
            "forwarded": 30,
            "cached": 10,
            "types": {"A": 30, "AAAA": 20}
        },
        "clients": {"active": 4, "total": 7},
        "gravity": {"domains_being_blocked": 100, "last_update": 1699990000},
        "took": 0.002
    })
}

pub fn query_entry(time: i64, domain: &str, status: &str, client: &str) -> Value {
    json!({
        "id": time,
        "time": time as f64 + 0.5,
        "type": "A",
        "domain": domain,
        "cname": null,
        "status": status,
        "client": {"ip": client, "name": null},
        "dnssec": "INSECURE",
        "reply": {"type": "IP", "time": 1.25},
        "list_id": null,
        "upstream": "9.9.9.9#53",
        "ede": {"code": -1, "text": null}
    })
}

pub fn metric_group(measurement: Measurement, queries: i64) -> MetricGroup {
    let ts = FixedOffset::east_opt(0)
        .unwrap()
        .timestamp_opt(1_700_000_000, 0)
        .unwrap();
    MetricGroup::new(measurement, ts)
        .with_tag("hostname", "pi.hole")
        .with_field("queries", queries)
}
