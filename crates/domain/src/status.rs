//! Appliance status, reply and DNSSEC code tables.
//!
//! The FTL engine reports every query with three integer codes. Their meaning
//! shifts between appliance releases, so the mapping lives in data tables that
//! can be swapped per version or extended from configuration. Lookups are total:
//! codes absent from the table classify as [`StatusCategory::Unknown`] and
//! render as `UNKNOWN`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

const UNKNOWN_LABEL: &str = "UNKNOWN";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusCategory {
    Blocked,
    Forwarded,
    Cached,
    Other,
    Unknown,
}

impl StatusCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusCategory::Blocked => "blocked",
            StatusCategory::Forwarded => "forwarded",
            StatusCategory::Cached => "cached",
            StatusCategory::Other => "other",
            StatusCategory::Unknown => "unknown",
        }
    }

    pub fn all() -> &'static [StatusCategory] {
        &[
            StatusCategory::Blocked,
            StatusCategory::Forwarded,
            StatusCategory::Cached,
            StatusCategory::Other,
            StatusCategory::Unknown,
        ]
    }
}

impl fmt::Display for StatusCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Appliance release whose code tables should be used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TaxonomyVersion {
    V5,
    #[default]
    V6,
}

impl FromStr for TaxonomyVersion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "v5" | "5" => Ok(TaxonomyVersion::V5),
            "v6" | "6" => Ok(TaxonomyVersion::V6),
            other => Err(format!("unknown taxonomy version: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct StatusEntry {
    label: String,
    category: StatusCategory,
}

use StatusCategory::{Blocked, Cached, Forwarded, Other, Unknown};

const V6_STATUS: &[(i32, &str, StatusCategory)] = &[
    (0, "UNKNOWN", Unknown),
    (1, "GRAVITY", Blocked),
    (2, "FORWARDED", Forwarded),
    (3, "CACHE", Cached),
    (4, "REGEX", Blocked),
    (5, "DENYLIST", Blocked),
    (6, "EXTERNAL_BLOCKED_IP", Blocked),
    (7, "EXTERNAL_BLOCKED_NULL", Blocked),
    (8, "EXTERNAL_BLOCKED_NXRA", Blocked),
    (9, "GRAVITY_CNAME", Blocked),
    (10, "REGEX_CNAME", Blocked),
    (11, "DENYLIST_CNAME", Blocked),
    (12, "RETRIED", Forwarded),
    (13, "RETRIED_DNSSEC", Forwarded),
    (14, "IN_PROGRESS", Other),
    (15, "DBBUSY", Blocked),
    (16, "SPECIAL_DOMAIN", Blocked),
    (17, "CACHE_STALE", Cached),
    (18, "EXTERNAL_BLOCKED_EDE15", Blocked),
];

const V5_STATUS: &[(i32, &str, StatusCategory)] = &[
    (0, "UNKNOWN", Unknown),
    (1, "GRAVITY", Blocked),
    (2, "FORWARDED", Forwarded),
    (3, "CACHED", Cached),
    (4, "REGEX", Blocked),
    (5, "BLACKLIST", Blocked),
    (6, "EXTERNAL_BLOCKED_IP", Blocked),
    (7, "EXTERNAL_BLOCKED_NULL", Blocked),
    (8, "EXTERNAL_BLOCKED_NXRA", Blocked),
    (9, "GRAVITY_CNAME", Blocked),
    (10, "REGEX_CNAME", Blocked),
    (11, "BLACKLIST_CNAME", Blocked),
    (12, "RETRIED", Forwarded),
    (13, "RETRIED_DNSSEC", Forwarded),
    (14, "IN_PROGRESS", Other),
    (15, "DBBUSY", Blocked),
    (16, "SPECIAL_DOMAIN", Blocked),
    (17, "CACHED_STALE", Cached),
];

const REPLY_TYPES: &[(i32, &str)] = &[
    (0, "UNKNOWN"),
    (1, "NODATA"),
    (2, "NXDOMAIN"),
    (3, "CNAME"),
    (4, "IP"),
    (5, "DOMAIN"),
    (6, "RRNAME"),
    (7, "SERVFAIL"),
    (8, "REFUSED"),
    (9, "NOTIMP"),
    (10, "OTHER"),
    (11, "DNSSEC"),
    (12, "NONE"),
    (13, "BLOB"),
];

const DNSSEC_STATES: &[(i32, &str)] = &[
    (0, "UNKNOWN"),
    (1, "SECURE"),
    (2, "INSECURE"),
    (3, "BOGUS"),
    (4, "ABANDONED"),
    (5, "TRUNCATED"),
];

/// Versioned lookup tables for the three FTL code families.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusTable {
    version: TaxonomyVersion,
    statuses: BTreeMap<i32, StatusEntry>,
    replies: BTreeMap<i32, String>,
    dnssec: BTreeMap<i32, String>,
}

impl StatusTable {
    pub fn for_version(version: TaxonomyVersion) -> Self {
        let statuses = match version {
            TaxonomyVersion::V5 => V5_STATUS,
            TaxonomyVersion::V6 => V6_STATUS,
        };

        Self {
            version,
            statuses: statuses
                .iter()
                .map(|(code, label, category)| {
                    (
                        *code,
                        StatusEntry {
                            label: (*label).to_string(),
                            category: *category,
                        },
                    )
                })
                .collect(),
            replies: label_map(REPLY_TYPES),
            dnssec: label_map(DNSSEC_STATES),
        }
    }

    pub fn version(&self) -> TaxonomyVersion {
        self.version
    }

    /// Adds or replaces a status code.
    pub fn extend_status(&mut self, code: i32, label: impl Into<String>, category: StatusCategory) {
        self.statuses.insert(
            code,
            StatusEntry {
                label: label.into(),
                category,
            },
        );
    }

    pub fn classify_status(&self, code: i32) -> StatusCategory {
        self.statuses
            .get(&code)
            .map(|entry| entry.category)
            .unwrap_or(StatusCategory::Unknown)
    }

    pub fn status_label(&self, code: i32) -> &str {
        self.statuses
            .get(&code)
            .map(|entry| entry.label.as_str())
            .unwrap_or(UNKNOWN_LABEL)
    }

    /// Status label in display case, e.g. `GRAVITY_CNAME` → `Gravity_cname`.
    pub fn status_display(&self, code: i32) -> String {
        display_case(self.status_label(code))
    }

    pub fn classify_reply(&self, code: i32) -> &str {
        self.replies
            .get(&code)
            .map(String::as_str)
            .unwrap_or(UNKNOWN_LABEL)
    }

    pub fn classify_dnssec(&self, code: i32) -> &str {
        self.dnssec
            .get(&code)
            .map(String::as_str)
            .unwrap_or(UNKNOWN_LABEL)
    }

    pub fn dnssec_display(&self, code: i32) -> String {
        display_case(self.classify_dnssec(code))
    }

    pub fn status_code_for(&self, label: &str) -> i32 {
        self.statuses
            .iter()
            .find(|(_, entry)| entry.label.eq_ignore_ascii_case(label.trim()))
            .map(|(code, _)| *code)
            .unwrap_or(0)
    }

    pub fn reply_code_for(&self, label: &str) -> i32 {
        reverse_lookup(&self.replies, label)
    }

    pub fn dnssec_code_for(&self, label: &str) -> i32 {
        reverse_lookup(&self.dnssec, label)
    }

    pub fn is_blocked(&self, code: i32) -> bool {
        self.classify_status(code) == StatusCategory::Blocked
    }
}

impl Default for StatusTable {
    fn default() -> Self {
        Self::for_version(TaxonomyVersion::default())
    }
}

fn label_map(entries: &[(i32, &str)]) -> BTreeMap<i32, String> {
    entries
        .iter()
        .map(|(code, label)| (*code, (*label).to_string()))
        .collect()
}

fn reverse_lookup(map: &BTreeMap<i32, String>, label: &str) -> i32 {
    map.iter()
        .find(|(_, known)| known.eq_ignore_ascii_case(label.trim()))
        .map(|(code, _)| *code)
        .unwrap_or(0)
}

fn display_case(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
