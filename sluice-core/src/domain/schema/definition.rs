// sluice-core/src/domain/schema/definition.rs

use serde::Serialize;
use std::fmt;
use tracing::debug;

use crate::domain::schema::mapping::{SqlDialect, sql_type_for};
use crate::domain::spec::ColumnSpec;

/// Double-quotes an identifier, escaping embedded quotes.
pub fn quote_ident(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnDefinition {
    pub name: String,
    pub sql_type: String,
}

/// Ordered (name, SQL type) pairs of the target table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableDefinition {
    pub dialect: SqlDialect,
    pub columns: Vec<ColumnDefinition>,
}

impl TableDefinition {
    pub fn from_columns(columns: &[ColumnSpec], dialect: SqlDialect) -> Self {
        let columns = columns
            .iter()
            .map(|col| {
                let name = col.normalized_name();
                let sql_type = sql_type_for(&col.data_type, dialect);
                debug!(column = %name, declared = %col.data_type, %sql_type, "Mapped column type");
                ColumnDefinition {
                    name,
                    sql_type: sql_type.to_string(),
                }
            })
            .collect();

        Self { dialect, columns }
    }

    /// Column list as written inside `CREATE TABLE t(...)`: `A INTEGER, B TEXT`.
    pub fn to_ddl(&self) -> String {
        self.columns
            .iter()
            .map(|c| format!("{} {}", c.name, c.sql_type))
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    pub fn create_statement(&self, table: &TableRef) -> String {
        let cols = self
            .columns
            .iter()
            .map(|c| format!("{} {}", quote_ident(&c.name), c.sql_type))
            .collect::<Vec<_>>()
            .join(", ");
        format!("CREATE TABLE IF NOT EXISTS {}({})", table.qualified(), cols)
    }
}

/// Schema-qualified table name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableRef {
    pub schema: String,
    pub table: String,
}

impl TableRef {
    pub fn new(schema: impl Into<String>, table: impl Into<String>) -> Self {
        Self {
            schema: schema.into(),
            table: table.into(),
        }
    }

    pub fn qualified(&self) -> String {
        format!("{}.{}", quote_ident(&self.schema), quote_ident(&self.table))
    }
}

impl fmt::Display for TableRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.schema, self.table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::spec::DataType;

    fn columns() -> Vec<ColumnSpec> {
        vec![
            ColumnSpec::new("id", DataType::Int),
            ColumnSpec::new("name", DataType::String),
            ColumnSpec::new("joined", DataType::Date),
            ColumnSpec::new("salary", DataType::Currency),
            ColumnSpec::new("payload", DataType::Json),
            ColumnSpec::new("label", DataType::Nvarchar),
        ]
    }

    #[test]
    fn test_ddl_snowflake() {
        let def = TableDefinition::from_columns(&columns(), SqlDialect::Snowflake);
        insta::assert_snapshot!(
            def.to_ddl(),
            @"ID INTEGER, NAME TEXT, JOINED DATE, SALARY FLOAT, PAYLOAD VARIANT, LABEL TEXT"
        );
    }

    #[test]
    fn test_create_statement_duckdb() {
        let def = TableDefinition::from_columns(&columns()[..3], SqlDialect::DuckDb);
        let table = TableRef::new("main", "PEOPLE");
        insta::assert_snapshot!(
            def.create_statement(&table),
            @r#"CREATE TABLE IF NOT EXISTS "main"."PEOPLE"("ID" INTEGER, "NAME" TEXT, "JOINED" DATE)"#
        );
    }

    #[test]
    fn test_column_names_are_ordered_and_uppercased() {
        let def = TableDefinition::from_columns(&columns(), SqlDialect::DuckDb);
        assert_eq!(
            def.column_names(),
            vec!["ID", "NAME", "JOINED", "SALARY", "PAYLOAD", "LABEL"]
        );
    }

    #[test]
    fn test_quote_ident_escapes() {
        assert_eq!(quote_ident(r#"we"ird"#), r#""we""ird""#);
        assert_eq!(TableRef::new("s", "t").to_string(), "s.t");
    }
}
