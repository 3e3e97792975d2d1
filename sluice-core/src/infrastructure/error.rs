// sluice-core/src/infrastructure/error.rs

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum DatabaseError {
    #[error("DuckDB Engine Error: {0}")]
    #[diagnostic(
        code(sluice::infra::database::duckdb),
        help("An error occurred inside the SQL engine.")
    )]
    DuckDB(#[from] duckdb::Error),
}

#[derive(Error, Debug, Diagnostic)]
pub enum InfrastructureError {
    // --- DATABASE (Abstracted) ---
    #[error(transparent)]
    #[diagnostic(transparent)]
    Database(#[from] DatabaseError),

    // --- FILESYSTEM (IO) ---
    #[error("File System Error: {0}")]
    #[diagnostic(
        code(sluice::infra::io),
        help("Check file permissions or path validity.")
    )]
    Io(#[from] std::io::Error),

    // --- CONFIG ---
    #[error("JSON Parsing Error: {0}")]
    #[diagnostic(
        code(sluice::infra::json),
        help("Check your JSON syntax (commas, quotes, types).")
    )]
    JsonError(#[from] serde_json::Error),

    #[error("YAML Parsing Error: {0}")]
    #[diagnostic(
        code(sluice::infra::yaml),
        help("Check your YAML syntax (indentation, types).")
    )]
    YamlError(#[from] serde_yaml::Error),

    #[error("Configuration Error: {0}")]
    ConfigError(String),

    #[error("Configuration not found at '{0}'")]
    #[diagnostic(code(sluice::infra::config_missing))]
    ConfigNotFound(String),

    #[error("Unsupported warehouse '{0}'")]
    #[diagnostic(
        code(sluice::infra::warehouse),
        help("Only 'duckdb' is available as a local warehouse.")
    )]
    UnsupportedWarehouse(String),

    // --- CSV ---
    #[error("CSV Error in '{path}': {source}")]
    #[diagnostic(
        code(sluice::infra::csv),
        help("Every row must have as many fields as the header row.")
    )]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },
}

// Manual implementation for shortcuts (e.g. `?` operator on duckdb calls)
impl From<duckdb::Error> for InfrastructureError {
    fn from(err: duckdb::Error) -> Self {
        InfrastructureError::Database(DatabaseError::DuckDB(err))
    }
}

// Config loading goes through anyhow::Context, as in the project loader.
impl From<anyhow::Error> for InfrastructureError {
    fn from(err: anyhow::Error) -> Self {
        InfrastructureError::ConfigError(format!("{:#}", err))
    }
}
