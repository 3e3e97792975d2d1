// sluice-core/src/infrastructure/adapters/duckdb.rs

use async_trait::async_trait;
use duckdb::{Config, Connection, params, params_from_iter};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, error, info};

use crate::domain::Table;
use crate::domain::schema::{SqlDialect, TableDefinition, TableRef, quote_ident};
use crate::error::SluiceError;
use crate::infrastructure::error::InfrastructureError;
use crate::ports::warehouse::{ColumnSchema, Warehouse};

/// Local warehouse backed by a DuckDB file (or `:memory:`).
pub struct DuckDbWarehouse {
    conn: Arc<Mutex<Connection>>,
}

impl DuckDbWarehouse {
    pub fn new(db_path: &str) -> Result<Self, InfrastructureError> {
        let config = Config::default();

        let conn = if db_path == ":memory:" {
            Connection::open_in_memory_with_flags(config)?
        } else {
            Connection::open_with_flags(db_path, config)?
        };
        info!(path = %db_path, "Connected to DuckDB");

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, SluiceError> {
        self.conn.lock().map_err(|_| {
            SluiceError::Infrastructure(InfrastructureError::Io(std::io::Error::other(
                "DuckDB Mutex Poisoned",
            )))
        })
    }
}

fn db_error(context: &str, err: duckdb::Error) -> SluiceError {
    error!("An error occurred while {}: {}", context, err);
    SluiceError::Infrastructure(InfrastructureError::from(err))
}

/// `INSERT INTO t ("A", "B") VALUES (CAST(? AS INTEGER), CAST(? AS TEXT))`
fn insert_statement(table: &TableRef, definition: &TableDefinition) -> String {
    let names = definition
        .columns
        .iter()
        .map(|c| quote_ident(&c.name))
        .collect::<Vec<_>>()
        .join(", ");
    let casts = definition
        .columns
        .iter()
        .map(|c| format!("CAST(? AS {})", c.sql_type))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "INSERT INTO {} ({}) VALUES ({})",
        table.qualified(),
        names,
        casts
    )
}

#[async_trait]
impl Warehouse for DuckDbWarehouse {
    fn dialect(&self) -> SqlDialect {
        SqlDialect::DuckDb
    }

    async fn execute(&self, query: &str) -> Result<(), SluiceError> {
        let conn = self.lock()?;
        debug!(%query, "Executing");
        conn.execute(query, [])
            .map(|_rows| ())
            .map_err(|e| db_error("executing a statement", e))
    }

    async fn table_exists(&self, table: &TableRef) -> Result<bool, SluiceError> {
        let conn = self.lock()?;
        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM information_schema.tables WHERE table_schema = ? AND table_name = ?",
                params![table.schema, table.table],
                |row| row.get(0),
            )
            .map_err(|e| db_error("checking table existence", e))?;
        Ok(count > 0)
    }

    async fn fetch_columns(&self, table: &TableRef) -> Result<Vec<ColumnSchema>, SluiceError> {
        let conn = self.lock()?;

        let mut stmt = conn
            .prepare(
                "SELECT column_name, data_type, is_nullable FROM information_schema.columns \
                 WHERE table_schema = ? AND table_name = ? ORDER BY ordinal_position",
            )
            .map_err(|e| db_error("reading the column catalog", e))?;

        let rows = stmt
            .query_map(params![table.schema, table.table], |row| {
                let nullable: String = row.get(2)?;
                Ok(ColumnSchema {
                    name: row.get(0)?,
                    data_type: row.get(1)?,
                    is_nullable: nullable.eq_ignore_ascii_case("YES"),
                })
            })
            .map_err(|e| db_error("reading the column catalog", e))?;

        let mut columns = Vec::new();
        for row in rows {
            columns.push(row.map_err(|e| db_error("reading the column catalog", e))?);
        }

        Ok(columns)
    }

    async fn bulk_insert(
        &self,
        table: &TableRef,
        definition: &TableDefinition,
        data: &Table,
        replace: bool,
    ) -> Result<u64, SluiceError> {
        let indices = definition
            .columns
            .iter()
            .map(|c| {
                data.column_index(&c.name).ok_or_else(|| {
                    SluiceError::InternalError(format!(
                        "Column '{}' is absent from the data to insert",
                        c.name
                    ))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let sql = insert_statement(table, definition);
        debug!(%sql, rows = data.row_count(), "Bulk insert");

        let mut conn = self.lock()?;
        let tx = conn
            .transaction()
            .map_err(|e| db_error("opening a transaction", e))?;

        // Dropping `tx` on any error below rolls the delete back.
        if replace {
            let deleted = tx
                .execute(&format!("DELETE FROM {}", table.qualified()), [])
                .map_err(|e| db_error(&format!("truncating table '{}'", table), e))?;
            debug!(%table, deleted, "Existing rows deleted");
        }

        let mut inserted = 0u64;
        {
            let mut stmt = tx
                .prepare(&sql)
                .map_err(|e| db_error("preparing the insert", e))?;

            for row in &data.rows {
                let values: Vec<Option<String>> = indices
                    .iter()
                    .map(|&i| row.get(i).cloned().flatten())
                    .collect();
                stmt.execute(params_from_iter(values))
                    .map_err(|e| db_error(&format!("inserting data into table '{}'", table), e))?;
                inserted += 1;
            }
        }

        tx.commit()
            .map_err(|e| db_error("committing the insert", e))?;

        Ok(inserted)
    }
}
