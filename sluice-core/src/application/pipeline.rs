// sluice-core/src/application/pipeline.rs

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

use crate::application::refresh::{RefreshOutcome, Refresher};
use crate::domain::Table;
use crate::domain::cleaning::{CleanSummary, clean_table};
use crate::domain::schema::{TableDefinition, TableRef};
use crate::domain::spec::LoadConfig;
use crate::domain::validation::{CsvValidator, ValidationReport};
use crate::error::SluiceError;
use crate::infrastructure::csv::CsvReader;
use crate::infrastructure::fs::write_json;
use crate::ports::warehouse::Warehouse;

pub const RUN_RESULTS_FILE: &str = "run_results.json";

#[derive(Debug, Clone)]
pub struct LoadOptions {
    pub schema: String,
    pub delimiter: u8,
    /// Where `run_results.json` goes. Nothing is written when `None`.
    pub target_dir: Option<PathBuf>,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            schema: "main".to_string(),
            delimiter: b',',
            target_dir: None,
        }
    }
}

/// Record of one `load`, persisted as `run_results.json`.
#[derive(Debug, Clone, Serialize)]
pub struct LoadRun {
    pub generated_at: DateTime<Utc>,
    pub source: String,
    pub table: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh: Option<RefreshOutcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cleaning: Option<CleanSummary>,
    pub validation: ValidationReport,
}

impl LoadRun {
    pub fn rows_loaded(&self) -> u64 {
        self.refresh.as_ref().map_or(0, |r| r.rows_loaded)
    }
}

/// `table_name` from the config, else the uppercased file stem.
pub fn target_table_name(config: &LoadConfig, csv_path: &Path) -> Result<String, SluiceError> {
    if let Some(name) = config.table_name.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
        return Ok(name.to_uppercase());
    }
    csv_path
        .file_stem()
        .and_then(|s| s.to_str())
        .map(|s| s.trim().to_uppercase())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| {
            SluiceError::InternalError(format!(
                "Cannot derive a table name from {:?}",
                csv_path
            ))
        })
}

/// Reads the CSV and runs every check against it.
#[instrument(skip(config))]
pub fn validate_source(
    config: &LoadConfig,
    csv_path: &Path,
    delimiter: u8,
) -> Result<(Table, ValidationReport), SluiceError> {
    let table = CsvReader::new(delimiter).read_table(csv_path, config)?;
    let validator = CsvValidator::new()
        .map_err(|e| SluiceError::InternalError(format!("Predicate regex: {}", e)))?;
    let report = validator.validate(&table, config);
    Ok((table, report))
}

/// Validate, clean, then create-or-truncate and insert.
///
/// A failed validation stops before touching the warehouse; the returned
/// run then has `success == false` and no refresh outcome.
pub async fn run_load(
    warehouse: &dyn Warehouse,
    config: &LoadConfig,
    csv_path: &Path,
    options: &LoadOptions,
) -> Result<LoadRun, SluiceError> {
    println!("🚀 Loading {}", csv_path.display());
    let start_time = std::time::Instant::now();

    let table_ref = TableRef::new(&options.schema, target_table_name(config, csv_path)?);

    // 1. VALIDATE
    println!("🔍 Validating against {} declared columns...", config.expected_columns.len());
    let (mut table, report) = validate_source(config, csv_path, options.delimiter)?;

    let mut run = LoadRun {
        generated_at: Utc::now(),
        source: csv_path.display().to_string(),
        table: table_ref.to_string(),
        success: report.passed(),
        refresh: None,
        cleaning: None,
        validation: report,
    };

    if run.success {
        // 2. CLEAN
        let summary = clean_table(&mut table, config);
        println!("🧹 Cleaned {} cells ({} skipped)", summary.cleaned, summary.skipped);
        run.cleaning = Some(summary);

        // 3. LOAD
        table.uppercase_headers();
        let definition = TableDefinition::from_columns(&config.expected_columns, warehouse.dialect());
        let outcome = Refresher::refresh_table(warehouse, &table_ref, &definition, &table).await?;

        let _ = warehouse.execute("CHECKPOINT").await;

        println!(
            "✨ Done in {:.2}s. Loaded {} rows into {}.",
            start_time.elapsed().as_secs_f64(),
            outcome.rows_loaded,
            table_ref
        );
        run.refresh = Some(outcome);
    } else {
        info!(failed = run.validation.failed_checks(), "Validation failed, warehouse untouched");
    }

    // 4. FINALIZE
    if let Some(dir) = &options.target_dir {
        write_json(dir.join(RUN_RESULTS_FILE), &run)?;
    }

    Ok(run)
}
