// sluice-core/src/application/scaffold.rs

use std::path::Path;
use tracing::info;

use crate::domain::spec::{ColumnSpec, DataType, LoadConfig};
use crate::error::SluiceError;
use crate::infrastructure::csv::CsvReader;

/// Starter config derived from a CSV: one nullable `string` column per
/// heading and the file's current row count.
pub fn scaffold_config(csv_path: &Path, delimiter: u8) -> Result<LoadConfig, SluiceError> {
    let table = CsvReader::new(delimiter).read_raw(csv_path)?;

    let columns = table
        .headers
        .iter()
        .map(|h| ColumnSpec::new(h.trim(), DataType::String))
        .collect();

    let mut config = LoadConfig::new(table.row_count(), columns);
    config.source_file_name = csv_path
        .file_name()
        .and_then(|n| n.to_str())
        .map(str::to_string);
    config.check()?;

    info!(
        columns = config.expected_columns.len(),
        rows = config.expected_rows,
        "Config scaffolded"
    );
    Ok(config)
}
