// sluice-core/src/ports/warehouse.rs

// What the loader needs from a warehouse, independent of the vendor behind it.

use async_trait::async_trait;

use crate::domain::Table;
use crate::domain::schema::{SqlDialect, TableDefinition, TableRef};
use crate::error::SluiceError;

/// A column as reported by the warehouse catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSchema {
    pub name: String,
    pub data_type: String,
    pub is_nullable: bool,
}

#[async_trait]
pub trait Warehouse: Send + Sync {
    /// Type mapping flavour used to build the table definition.
    fn dialect(&self) -> SqlDialect;

    async fn execute(&self, query: &str) -> Result<(), SluiceError>;

    async fn table_exists(&self, table: &TableRef) -> Result<bool, SluiceError>;

    /// Columns in ordinal position order.
    async fn fetch_columns(&self, table: &TableRef) -> Result<Vec<ColumnSchema>, SluiceError>;

    /// Writes every row of `data`, matched to `definition` by header name.
    /// With `replace`, the existing rows are deleted in the same transaction,
    /// so a failed insert leaves the previous contents in place.
    /// Returns the number of rows written.
    async fn bulk_insert(
        &self,
        table: &TableRef,
        definition: &TableDefinition,
        data: &Table,
        replace: bool,
    ) -> Result<u64, SluiceError>;
}
