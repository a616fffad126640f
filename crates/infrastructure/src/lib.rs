pub mod appliance;
pub mod sink;
