// sluice-core/src/application/refresh.rs

use serde::Serialize;
use tracing::{info, instrument, warn};

use crate::domain::Table;
use crate::domain::error::DomainError;
use crate::domain::schema::{TableDefinition, TableRef, quote_ident};
use crate::error::SluiceError;
use crate::ports::warehouse::Warehouse;

/// What happened to the target table before the insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RefreshAction {
    Created,
    Truncated,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RefreshOutcome {
    pub action: RefreshAction,
    pub rows_loaded: u64,
}

pub struct Refresher;

impl Refresher {
    pub async fn prepare_schema(warehouse: &dyn Warehouse, schema: &str) -> Result<(), SluiceError> {
        warehouse
            .execute(&format!("CREATE SCHEMA IF NOT EXISTS {}", quote_ident(schema)))
            .await
    }

    /// Create-or-truncate the table, then load `data`.
    ///
    /// An existing table whose ordered columns differ from `definition`
    /// aborts with [`DomainError::SchemaDrift`] and is left untouched. The
    /// truncate shares the insert's transaction, so a rejected reload keeps
    /// the previous rows.
    #[instrument(skip(warehouse, definition, data), fields(rows = data.row_count()))]
    pub async fn refresh_table(
        warehouse: &dyn Warehouse,
        table: &TableRef,
        definition: &TableDefinition,
        data: &Table,
    ) -> Result<RefreshOutcome, SluiceError> {
        Self::prepare_schema(warehouse, &table.schema).await?;

        let action = if warehouse.table_exists(table).await? {
            let actual: Vec<String> = warehouse
                .fetch_columns(table)
                .await?
                .into_iter()
                .map(|c| c.name)
                .collect();
            let expected = definition.column_names();

            let same = actual.len() == expected.len()
                && actual
                    .iter()
                    .zip(&expected)
                    .all(|(a, e)| a.eq_ignore_ascii_case(e));
            if !same {
                warn!(%table, ?expected, ?actual, "Existing table does not match the definition");
                return Err(DomainError::SchemaDrift {
                    table: table.to_string(),
                    expected,
                    actual,
                }
                .into());
            }
            RefreshAction::Truncated
        } else {
            warehouse.execute(&definition.create_statement(table)).await?;
            info!(%table, "Table created");
            RefreshAction::Created
        };

        let replace = action == RefreshAction::Truncated;
        let rows_loaded = warehouse
            .bulk_insert(table, definition, data, replace)
            .await?;
        if replace {
            info!(%table, "Table truncated");
        }
        info!(%table, rows_loaded, "Rows inserted");

        Ok(RefreshOutcome {
            action,
            rows_loaded,
        })
    }
}
