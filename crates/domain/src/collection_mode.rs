use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// What the collector pulls from the appliance each cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CollectionMode {
    /// Appliance summary counters only, no per-query detail.
    Totals,
    /// Raw query log reduced by the aggregation engine.
    #[default]
    Live,
    /// One sink record per logged query, no aggregation.
    Raw,
}

impl CollectionMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            CollectionMode::Totals => "totals",
            CollectionMode::Live => "live",
            CollectionMode::Raw => "raw",
        }
    }

    pub fn requires_credential(&self) -> bool {
        matches!(self, CollectionMode::Live | CollectionMode::Raw)
    }
}

impl fmt::Display for CollectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CollectionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "totals" => Ok(CollectionMode::Totals),
            "live" => Ok(CollectionMode::Live),
            "raw" => Ok(CollectionMode::Raw),
            other => Err(format!("unknown collection mode: {}", other)),
        }
    }
}
