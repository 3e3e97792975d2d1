// sluice-core/src/domain/schema/mapping.rs

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::domain::spec::DataType;

/// Generic text type, used for every tag the lookup does not know.
pub const DEFAULT_SQL_TYPE: &str = "TEXT";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SqlDialect {
    #[default]
    Snowflake,
    DuckDb,
}

impl FromStr for SqlDialect {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "snowflake" => Ok(Self::Snowflake),
            "duckdb" => Ok(Self::DuckDb),
            other => Err(format!(
                "Unknown SQL dialect '{}'. Expected one of: snowflake, duckdb.",
                other
            )),
        }
    }
}

impl fmt::Display for SqlDialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Snowflake => f.write_str("snowflake"),
            Self::DuckDb => f.write_str("duckdb"),
        }
    }
}

/// Static lookup from declared type to warehouse type.
///
/// `nvarchar` and `Other` tags are deliberately absent and fall through to
/// [`DEFAULT_SQL_TYPE`].
fn lookup(data_type: &DataType) -> Option<&'static str> {
    let sql = match data_type {
        DataType::String
        | DataType::Gender
        | DataType::Enum
        | DataType::Url
        | DataType::Email
        | DataType::IpAddress
        | DataType::Coordinates => "TEXT",
        DataType::Integer | DataType::PositiveInteger | DataType::Int => "INTEGER",
        DataType::Bigint => "BIGINT",
        DataType::Float
        | DataType::Percentage
        | DataType::ScientificNotation
        | DataType::Currency => "FLOAT",
        DataType::Decimal => "DECIMAL(38, 10)",
        DataType::Date => "DATE",
        DataType::Time => "TIME",
        DataType::Datetime => "TIMESTAMP",
        DataType::Boolean | DataType::Bit => "BOOLEAN",
        DataType::Json => "VARIANT",
        DataType::BinaryData => "BINARY",
        DataType::Nvarchar | DataType::Other(_) => return None,
    };
    Some(sql)
}

pub fn sql_type_for(data_type: &DataType, dialect: SqlDialect) -> &'static str {
    let sql = lookup(data_type).unwrap_or(DEFAULT_SQL_TYPE);
    match (dialect, sql) {
        // DuckDB's INTEGER is 32-bit; the 64-bit tags need BIGINT there.
        (SqlDialect::DuckDb, "INTEGER")
            if matches!(data_type, DataType::Integer | DataType::PositiveInteger) =>
        {
            "BIGINT"
        }
        (SqlDialect::DuckDb, "VARIANT") => "JSON",
        (SqlDialect::DuckDb, "BINARY") => "BLOB",
        _ => sql,
    }
}
