pub mod aggregation;
pub mod raw_log;
pub mod totals;

pub use aggregation::{ads_percentage, Aggregation, AggregationEngine, AggregationStats};
pub use raw_log::raw_log_groups;
pub use totals::totals_groups;
