use crate::status::{StatusCategory, StatusTable, TaxonomyVersion};
use serde::{Deserialize, Serialize};

/// Status code added on top of the built-in table for `version`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ExtraStatus {
    pub code: i32,
    pub label: String,
    pub category: StatusCategory,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TaxonomyConfig {
    #[serde(default)]
    pub version: TaxonomyVersion,

    #[serde(default)]
    pub extra_status: Vec<ExtraStatus>,
}

impl TaxonomyConfig {
    pub fn build_table(&self) -> StatusTable {
        let mut table = StatusTable::for_version(self.version);
        for extra in &self.extra_status {
            table.extend_status(extra.code, extra.label.clone(), extra.category);
        }
        table
    }
}
