pub mod metrics_collection;
pub mod runner;
pub mod schedule;

pub use metrics_collection::{CycleOutcome, JobStats, MetricsCollectionJob};
pub use runner::JobRunner;
pub use schedule::{backoff_for, WakeSchedule, MAX_BACKOFF};
