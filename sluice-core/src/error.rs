// sluice-core/src/error.rs

use crate::domain::error::DomainError;
use crate::infrastructure::error::InfrastructureError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SluiceError {
    // --- DOMAIN (validation, schema drift, config rules) ---
    #[error(transparent)]
    Domain(#[from] DomainError),

    // --- INFRASTRUCTURE (IO, parsing, warehouse) ---
    #[error(transparent)]
    Infrastructure(#[from] InfrastructureError),

    #[error("Internal Error: {0}")]
    InternalError(String),
}

// Manual implementation to avoid duplicate enum variant but keep ergonomics
impl From<std::io::Error> for SluiceError {
    fn from(err: std::io::Error) -> Self {
        SluiceError::Infrastructure(InfrastructureError::Io(err))
    }
}

impl From<duckdb::Error> for SluiceError {
    fn from(err: duckdb::Error) -> Self {
        SluiceError::Infrastructure(InfrastructureError::from(err))
    }
}
