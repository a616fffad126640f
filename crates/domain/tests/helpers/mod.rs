pub mod builders;

pub use builders::QueryRecordBuilder;
