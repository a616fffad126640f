pub mod collect;
pub mod publish;

pub use collect::{CollectMetricsUseCase, CollectedMetrics};
pub use publish::PublishMetricsUseCase;
