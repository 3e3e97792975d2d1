// sluice-core/src/domain/schema/mod.rs

pub mod definition;
pub mod mapping;

pub use definition::{ColumnDefinition, TableDefinition, TableRef, quote_ident};
pub use mapping::{SqlDialect, sql_type_for};
