use holeflux_domain::{CliOverrides, Config, ConfigError};
use tracing::info;

pub fn load_config(path: Option<&str>, overrides: CliOverrides) -> Result<Config, ConfigError> {
    let config = Config::load(path, |name| std::env::var(name).ok(), overrides)?;
    config.validate()?;
    Ok(config)
}

pub fn log_config(config: &Config) {
    let appliance = config.appliance.base_url().unwrap_or_default();
    let sink = config.sink.base_url().unwrap_or_default();

    info!(
        appliance = %appliance,
        sink = %sink,
        sink_api = ?config.sink.api,
        mode = %config.mode(),
        interval_secs = config.interval_secs(),
        taxonomy = ?config.taxonomy.version,
        "Configuration loaded"
    );
}
