pub mod metrics;

pub use metrics::{CollectMetricsUseCase, CollectedMetrics, PublishMetricsUseCase};
