pub mod appliance;
pub mod collection;
pub mod env;
pub mod errors;
pub mod logging;
pub mod root;
pub mod sink;
pub mod taxonomy;

pub use appliance::ApplianceConfig;
pub use collection::{CollectionConfig, MAX_INTERVAL_SECS};
pub use errors::ConfigError;
pub use logging::{LogFormat, LoggingConfig};
pub use root::{CliOverrides, Config};
pub use sink::{SinkApi, SinkConfig};
pub use taxonomy::{ExtraStatus, TaxonomyConfig};
