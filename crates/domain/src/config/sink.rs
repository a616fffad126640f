use serde::{Deserialize, Serialize};

/// InfluxDB write API flavour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SinkApi {
    V1,
    #[default]
    V2,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SinkConfig {
    #[serde(default)]
    pub url: Option<String>,

    #[serde(default)]
    pub api: SinkApi,

    // v2
    #[serde(default)]
    pub org: Option<String>,
    #[serde(default)]
    pub bucket: Option<String>,
    #[serde(default)]
    pub token: Option<String>,

    // v1
    #[serde(default)]
    pub database: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,

    /// Maximum number of lines per write request.
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl SinkConfig {
    pub fn base_url(&self) -> Option<String> {
        self.url
            .as_deref()
            .map(|url| url.trim().trim_end_matches('/').to_string())
    }
}

impl Default for SinkConfig {
    fn default() -> Self {
        Self {
            url: None,
            api: SinkApi::default(),
            org: None,
            bucket: None,
            token: None,
            database: None,
            username: None,
            password: None,
            batch_size: default_batch_size(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_batch_size() -> usize {
    5000
}

fn default_timeout_secs() -> u64 {
    10
}
