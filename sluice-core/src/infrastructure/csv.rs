// sluice-core/src/infrastructure/csv.rs

use std::path::Path;
use tracing::{info, instrument};

use crate::domain::Table;
use crate::domain::spec::LoadConfig;
use crate::infrastructure::error::InfrastructureError;

/// Reads delimited text files into a [`Table`].
#[derive(Debug, Clone, Copy)]
pub struct CsvReader {
    delimiter: u8,
}

impl Default for CsvReader {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

impl CsvReader {
    pub fn new(delimiter: u8) -> Self {
        Self { delimiter }
    }

    fn csv_error(path: &Path, source: csv::Error) -> InfrastructureError {
        InfrastructureError::Csv {
            path: path.display().to_string(),
            source,
        }
    }

    /// Every cell kept as text, nulls not yet resolved.
    #[instrument(skip(self))]
    pub fn read_raw(&self, path: &Path) -> Result<Table, InfrastructureError> {
        if !path.exists() {
            return Err(InfrastructureError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("CSV file not found: {}", path.display()),
            )));
        }

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(true)
            .flexible(false)
            .from_path(path)
            .map_err(|e| Self::csv_error(path, e))?;

        let headers = reader
            .headers()
            .map_err(|e| Self::csv_error(path, e))?
            .iter()
            .map(|h| h.trim_start_matches('\u{feff}').to_string())
            .collect::<Vec<_>>();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|e| Self::csv_error(path, e))?;
            rows.push(record.iter().map(|cell| Some(cell.to_string())).collect());
        }

        info!(columns = headers.len(), rows = rows.len(), "CSV read");
        Ok(Table::new(headers, rows))
    }

    /// Reads the file and turns the config's null markers into nulls.
    pub fn read_table(&self, path: &Path, config: &LoadConfig) -> Result<Table, InfrastructureError> {
        let mut table = self.read_raw(path)?;
        for row in &mut table.rows {
            for cell in row.iter_mut() {
                if cell.as_deref().is_some_and(|v| config.is_null_marker(v)) {
                    *cell = None;
                }
            }
        }
        Ok(table)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::spec::{ColumnSpec, DataType};
    use anyhow::Result;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_read_table_resolves_nulls() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("people.csv");
        fs::write(&path, "id,name,score\n1,ada,NA\n2,,7\n")?;

        let config = LoadConfig::new(2, vec![ColumnSpec::new("id", DataType::Int)]);
        let table = CsvReader::default().read_table(&path, &config)?;

        assert_eq!(table.headers, vec!["id", "name", "score"]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.rows[0][2], None);
        assert_eq!(table.rows[1][1], None);
        assert_eq!(table.rows[1][2].as_deref(), Some("7"));
        Ok(())
    }

    #[test]
    fn test_quoted_fields_and_custom_delimiter() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("money.csv");
        fs::write(&path, "\u{feff}name;salary\n\"Lovelace; Ada\";\"$1,234.50\"\n")?;

        let table = CsvReader::new(b';').read_raw(&path)?;
        assert_eq!(table.headers, vec!["name", "salary"]);
        assert_eq!(table.rows[0][0].as_deref(), Some("Lovelace; Ada"));
        assert_eq!(table.rows[0][1].as_deref(), Some("$1,234.50"));
        Ok(())
    }

    #[test]
    fn test_ragged_rows_are_an_error() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("ragged.csv");
        fs::write(&path, "a,b\n1,2\n3\n")?;

        let err = CsvReader::default().read_raw(&path).unwrap_err();
        assert!(matches!(err, InfrastructureError::Csv { .. }));
        Ok(())
    }

    #[test]
    fn test_missing_file() {
        let err = CsvReader::default()
            .read_raw(Path::new("/no/such/file.csv"))
            .unwrap_err();
        assert!(matches!(err, InfrastructureError::Io(_)));
    }
}
