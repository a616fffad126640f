use crate::collection_mode::CollectionMode;
use serde::{Deserialize, Serialize};

/// Longest accepted poll interval (one day).
pub const MAX_INTERVAL_SECS: u64 = 86_400;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CollectionConfig {
    /// Poll interval in seconds. Required; there is no sensible default.
    #[serde(default)]
    pub interval_secs: Option<u64>,

    #[serde(default)]
    pub mode: CollectionMode,
}
