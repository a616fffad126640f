//! holeflux domain layer
pub mod collection_mode;
pub mod config;
pub mod errors;
pub mod metric_group;
pub mod query_record;
pub mod session;
pub mod status;
pub mod summary;
pub mod window;

pub use collection_mode::CollectionMode;
pub use config::{CliOverrides, Config, ConfigError};
pub use errors::DomainError;
pub use metric_group::{FieldValue, Measurement, MetricGroup};
pub use query_record::{QueryBatch, QueryRecord};
pub use session::{Session, SessionState};
pub use status::{StatusCategory, StatusTable, TaxonomyVersion};
pub use summary::{ApplianceSummary, UpstreamStats};
pub use window::Window;
