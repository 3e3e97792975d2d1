// sluice-core/src/domain/spec/config.rs

use serde::{Deserialize, Deserializer, Serialize, de};
use std::collections::HashSet;
use validator::{Validate, ValidationError};

use crate::domain::error::DomainError;
use crate::domain::spec::data_type::DataType;

/// Spellings the dataframe world reads as a missing value.
pub const DEFAULT_NULL_MARKERS: [&str; 14] = [
    "", "NA", "N/A", "n/a", "#N/A", "#NA", "NULL", "null", "NaN", "nan", "-NaN", "-nan", "None",
    "<NA>",
];

// =============================================================================
//  1. COLUMN DESCRIPTOR
// =============================================================================

/// One entry of `expected_columns`.
///
/// Both the lowercase keys (`name`, `datatype`) and the information-schema
/// style keys (`COLUMN_NAME`, `DATA_TYPE`, `IS_NULLABLE`,
/// `CHARACTER_MAXIMUM_LENGTH`) are accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct ColumnSpec {
    #[serde(alias = "COLUMN_NAME")]
    #[validate(length(min = 1, message = "Column name cannot be empty"))]
    pub name: String,

    #[serde(rename = "datatype", alias = "data_type", alias = "DATA_TYPE")]
    pub data_type: DataType,

    #[serde(
        alias = "IS_NULLABLE",
        default = "default_nullable",
        deserialize_with = "deserialize_nullable"
    )]
    pub nullable: bool,

    #[serde(
        alias = "CHARACTER_MAXIMUM_LENGTH",
        default,
        deserialize_with = "deserialize_max_length",
        skip_serializing_if = "Option::is_none"
    )]
    #[validate(range(min = 1, message = "Maximum length must be at least 1"))]
    pub max_length: Option<usize>,
}

impl ColumnSpec {
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
            nullable: true,
            max_length: None,
        }
    }

    pub fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = Some(max_length);
        self
    }

    /// Header names are compared uppercased.
    pub fn normalized_name(&self) -> String {
        self.name.trim().to_uppercase()
    }
}

fn default_nullable() -> bool {
    true
}

#[derive(Deserialize)]
#[serde(untagged)]
enum FlagRepr {
    Bool(bool),
    Text(String),
}

fn deserialize_nullable<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    match FlagRepr::deserialize(deserializer)? {
        FlagRepr::Bool(b) => Ok(b),
        FlagRepr::Text(s) => match s.trim().to_uppercase().as_str() {
            "YES" | "Y" | "TRUE" => Ok(true),
            "NO" | "N" | "FALSE" => Ok(false),
            other => Err(de::Error::custom(format!(
                "Invalid nullability flag: '{}'. Expected YES/NO or a boolean.",
                other
            ))),
        },
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LengthRepr {
    Number(u64),
    Text(String),
}

fn deserialize_max_length<'de, D>(deserializer: D) -> Result<Option<usize>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<LengthRepr>::deserialize(deserializer)? {
        None => Ok(None),
        Some(LengthRepr::Number(n)) => usize::try_from(n)
            .map(Some)
            .map_err(|_| de::Error::custom(format!("Maximum length {} is out of range", n))),
        Some(LengthRepr::Text(s)) => s
            .trim()
            .parse::<usize>()
            .map(Some)
            .map_err(|_| de::Error::custom(format!("Invalid maximum length: '{}'", s))),
    }
}

// =============================================================================
//  2. LOAD CONFIG (csv_config.json)
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoadConfig {
    /// CSV file name, resolved against the data directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_file_name: Option<String>,

    /// Target table. Defaults to the uppercased CSV file stem.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_name: Option<String>,

    pub expected_rows: usize,

    #[validate(length(min = 1, message = "At least one expected column is required"))]
    #[validate(nested)]
    #[validate(custom(function = "validate_unique_names"))]
    pub expected_columns: Vec<ColumnSpec>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub null_markers: Option<Vec<String>>,
}

impl LoadConfig {
    pub fn new(expected_rows: usize, expected_columns: Vec<ColumnSpec>) -> Self {
        Self {
            source_file_name: None,
            table_name: None,
            expected_rows,
            expected_columns,
            null_markers: None,
        }
    }

    /// Structural rules on the config itself (non-empty, unique names...).
    pub fn check(&self) -> Result<(), DomainError> {
        self.validate()
            .map_err(|e| DomainError::InvalidConfig(e.to_string()))
    }

    /// Case-insensitive lookup by column name.
    pub fn column(&self, name: &str) -> Option<&ColumnSpec> {
        let wanted = name.trim().to_uppercase();
        self.expected_columns
            .iter()
            .find(|c| c.normalized_name() == wanted)
    }

    pub fn is_null_marker(&self, cell: &str) -> bool {
        let trimmed = cell.trim();
        match &self.null_markers {
            Some(markers) => markers.iter().any(|m| m.trim() == trimmed),
            None => DEFAULT_NULL_MARKERS.contains(&trimmed),
        }
    }
}

fn validate_unique_names(columns: &[ColumnSpec]) -> Result<(), ValidationError> {
    let mut seen = HashSet::new();
    for col in columns {
        if !seen.insert(col.normalized_name()) {
            let mut err = ValidationError::new("duplicate_column");
            err.message = Some(format!("Column '{}' is declared more than once", col.name).into());
            return Err(err);
        }
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_lowercase_keys() {
        let json = r#"{
            "source_file_name": "people.csv",
            "expected_rows": 2,
            "expected_columns": [
                {"name": "id", "datatype": "int", "nullable": false},
                {"name": "name", "datatype": "string", "max_length": 20}
            ]
        }"#;

        let config: LoadConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.expected_rows, 2);
        assert_eq!(config.expected_columns.len(), 2);
        assert_eq!(config.expected_columns[0].data_type, DataType::Int);
        assert!(!config.expected_columns[0].nullable);
        assert!(config.expected_columns[1].nullable);
        assert_eq!(config.expected_columns[1].max_length, Some(20));
        assert!(config.check().is_ok());
    }

    #[test]
    fn test_parse_information_schema_keys() {
        let json = r#"{
            "expected_rows": 1,
            "expected_columns": [
                {"COLUMN_NAME": "NAME", "DATA_TYPE": "nvarchar", "IS_NULLABLE": "NO", "CHARACTER_MAXIMUM_LENGTH": "50"},
                {"COLUMN_NAME": "CREATED", "DATA_TYPE": "datetime", "IS_NULLABLE": "YES"}
            ]
        }"#;

        let config: LoadConfig = serde_json::from_str(json).unwrap();
        let name = &config.expected_columns[0];
        assert_eq!(name.data_type, DataType::Nvarchar);
        assert!(!name.nullable);
        assert_eq!(name.max_length, Some(50));
        assert!(config.expected_columns[1].nullable);
    }

    #[test]
    fn test_bad_nullable_flag_is_rejected() {
        let json = r#"{"expected_rows": 0, "expected_columns": [
            {"name": "a", "datatype": "int", "nullable": "MAYBE"}
        ]}"#;
        assert!(serde_json::from_str::<LoadConfig>(json).is_err());
    }

    #[test]
    fn test_check_rejects_duplicates_and_empty() {
        let dup = LoadConfig::new(
            0,
            vec![
                ColumnSpec::new("id", DataType::Int),
                ColumnSpec::new("ID", DataType::String),
            ],
        );
        let err = dup.check().unwrap_err();
        assert!(err.to_string().contains("more than once"));

        let empty = LoadConfig::new(0, vec![]);
        assert!(empty.check().is_err());

        let zero_len = LoadConfig::new(0, vec![ColumnSpec::new("a", DataType::String).with_max_length(0)]);
        assert!(zero_len.check().is_err());
    }

    #[test]
    fn test_column_lookup_and_null_markers() {
        let mut config = LoadConfig::new(0, vec![ColumnSpec::new("Email", DataType::Email)]);
        assert!(config.column("EMAIL").is_some());
        assert!(config.column("phone").is_none());

        assert!(config.is_null_marker(""));
        assert!(config.is_null_marker(" NULL "));
        assert!(!config.is_null_marker("0"));

        config.null_markers = Some(vec!["-".into()]);
        assert!(config.is_null_marker("-"));
        assert!(!config.is_null_marker("NULL"));
    }
}
