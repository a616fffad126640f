use serde::{Deserialize, Serialize};

use super::appliance::ApplianceConfig;
use super::collection::{CollectionConfig, MAX_INTERVAL_SECS};
use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::sink::{SinkApi, SinkConfig};
use super::taxonomy::TaxonomyConfig;
use crate::collection_mode::CollectionMode;

const LOCAL_CONFIG_PATH: &str = "holeflux.toml";
const SYSTEM_CONFIG_PATH: &str = "/etc/holeflux/config.toml";

/// Main configuration structure for holeflux
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Pi-hole connection
    #[serde(default)]
    pub appliance: ApplianceConfig,

    /// InfluxDB connection
    #[serde(default)]
    pub sink: SinkConfig,

    /// Poll interval and mode
    #[serde(default)]
    pub collection: CollectionConfig,

    /// Status code tables
    #[serde(default)]
    pub taxonomy: TaxonomyConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file, environment and CLI flags
    ///
    /// Priority order (highest wins):
    /// 1. CLI overrides
    /// 2. Environment variables
    /// 3. Explicitly provided path, else holeflux.toml, else /etc/holeflux/config.toml
    /// 4. Default configuration
    pub fn load<F>(
        path: Option<&str>,
        env: F,
        cli_overrides: CliOverrides,
    ) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if let Some(path) = Self::get_config_path() {
            Self::from_file(&path)?
        } else {
            Self::default()
        };

        config.apply_env(env)?;
        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(interval) = overrides.interval_secs {
            self.collection.interval_secs = Some(interval);
        }
        if let Some(mode) = overrides.mode {
            self.collection.mode = mode;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    /// Checks every setting the collection loop depends on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if is_blank(self.appliance.base_url()) {
            return Err(ConfigError::Validation(
                "appliance url (PIHOLE_HOSTNAME) is required".to_string(),
            ));
        }

        match self.collection.interval_secs {
            None => {
                return Err(ConfigError::Validation(
                    "collection interval (PIHOLE_INTERVAL) is required".to_string(),
                ))
            }
            Some(0) => {
                return Err(ConfigError::Validation(
                    "collection interval must be a positive number of seconds".to_string(),
                ))
            }
            Some(secs) if secs > MAX_INTERVAL_SECS => {
                return Err(ConfigError::Validation(format!(
                    "collection interval {}s exceeds the maximum of {}s",
                    secs, MAX_INTERVAL_SECS
                )))
            }
            Some(_) => {}
        }

        if self.collection.mode.requires_credential() && !self.appliance.has_password() {
            return Err(ConfigError::Validation(format!(
                "{} mode requires the appliance password (PIHOLE_AUTHENTICATION)",
                self.collection.mode
            )));
        }

        if is_blank(self.sink.base_url()) {
            return Err(ConfigError::Validation(
                "sink url (INFLUX_DB_ADDRESS) is required".to_string(),
            ));
        }

        match self.sink.api {
            SinkApi::V2 => {
                if self.sink.org.is_none() || self.sink.bucket.is_none() {
                    return Err(ConfigError::Validation(
                        "InfluxDB v2 sink requires org and bucket".to_string(),
                    ));
                }
            }
            SinkApi::V1 => {
                if self.sink.database.is_none() {
                    return Err(ConfigError::Validation(
                        "InfluxDB v1 sink requires a database".to_string(),
                    ));
                }
            }
        }

        if self.sink.batch_size == 0 {
            return Err(ConfigError::Validation(
                "sink batch_size must be positive".to_string(),
            ));
        }

        Ok(())
    }

    /// Poll interval; zero until [`Config::validate`] has passed.
    pub fn interval_secs(&self) -> u64 {
        self.collection.interval_secs.unwrap_or(0)
    }

    pub fn mode(&self) -> CollectionMode {
        self.collection.mode
    }

    /// Get the path to the configuration file being used
    pub fn get_config_path() -> Option<String> {
        if std::path::Path::new(LOCAL_CONFIG_PATH).exists() {
            Some(LOCAL_CONFIG_PATH.to_string())
        } else if std::path::Path::new(SYSTEM_CONFIG_PATH).exists() {
            Some(SYSTEM_CONFIG_PATH.to_string())
        } else {
            None
        }
    }
}

fn is_blank(url: Option<String>) -> bool {
    match url.as_deref() {
        None => true,
        Some(url) => url.is_empty() || url == "http://",
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub interval_secs: Option<u64>,
    pub mode: Option<CollectionMode>,
    pub log_level: Option<String>,
}
