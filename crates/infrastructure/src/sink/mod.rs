pub mod influx;
pub mod line_protocol;

pub use influx::InfluxSink;
