mod appliance_client;
mod metric_sink;

pub use appliance_client::ApplianceClient;
pub use metric_sink::MetricSink;
