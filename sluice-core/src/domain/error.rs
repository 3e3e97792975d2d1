// sluice-core/src/domain/error.rs

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum DomainError {
    #[error("Validation failed: {failed} of {total} checks did not pass")]
    #[diagnostic(
        code(sluice::domain::validation),
        help("Fix the CSV or the column specification; the findings above list every offending cell.")
    )]
    ValidationFailed { failed: usize, total: usize },

    #[error(
        "Table '{table}' does not match the expected schema. Expected: {expected:?}, found: {actual:?}"
    )]
    #[diagnostic(
        code(sluice::domain::schema_drift),
        help("Drop the existing table or align the column specification with it.")
    )]
    SchemaDrift {
        table: String,
        expected: Vec<String>,
        actual: Vec<String>,
    },

    #[error("Invalid column specification: {0}")]
    #[diagnostic(code(sluice::domain::config))]
    InvalidConfig(String),
}
