// sluice-core/src/application/summary.rs

use serde::Serialize;
use std::collections::BTreeMap;

use crate::domain::spec::LoadConfig;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeCount {
    pub data_type: String,
    pub columns: usize,
}

/// Number of declared columns per data type, most frequent first.
pub fn type_summary(config: &LoadConfig) -> Vec<TypeCount> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for col in &config.expected_columns {
        *counts.entry(col.data_type.as_str()).or_default() += 1;
    }

    let mut summary: Vec<TypeCount> = counts
        .into_iter()
        .map(|(data_type, columns)| TypeCount {
            data_type: data_type.to_string(),
            columns,
        })
        .collect();
    // stable sort keeps the alphabetical order among ties
    summary.sort_by(|a, b| b.columns.cmp(&a.columns));
    summary
}
