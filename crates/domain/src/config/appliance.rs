use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApplianceConfig {
    /// Host name or base URL of the Pi-hole web interface.
    #[serde(default)]
    pub url: Option<String>,

    #[serde(default)]
    pub password: Option<String>,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Page size requested from the query log endpoint.
    #[serde(default = "default_max_queries")]
    pub max_queries: u32,
}

impl ApplianceConfig {
    /// Base URL with a scheme, `http://` when none was configured.
    pub fn base_url(&self) -> Option<String> {
        self.url.as_deref().map(|url| {
            let url = url.trim().trim_end_matches('/');
            if url.starts_with("http") {
                url.to_string()
            } else {
                format!("http://{}", url)
            }
        })
    }

    pub fn has_password(&self) -> bool {
        self.password.as_deref().is_some_and(|p| !p.is_empty())
    }
}

impl Default for ApplianceConfig {
    fn default() -> Self {
        Self {
            url: None,
            password: None,
            timeout_secs: default_timeout_secs(),
            max_queries: default_max_queries(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_max_queries() -> u32 {
    100_000
}
