// sluice-core/src/domain/mod.rs

pub mod cleaning;
pub mod error;
pub mod schema;
pub mod spec;
pub mod table;
pub mod validation;

// Short paths for the application layer and the CLI
pub use error::DomainError;
pub use table::Table;
