pub mod builders;
pub mod mock_ports;

pub use builders::{summary_with_types, QueryRecordBuilder};
pub use mock_ports::{MockApplianceClient, MockMetricSink};
