// sluice-core/src/domain/spec/data_type.rs

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Declared type of a CSV column, as written in the column specification.
///
/// Tags outside the known set are kept verbatim in `Other`: they load as
/// generic text and accept any value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DataType {
    String,
    Nvarchar,
    Enum,
    Gender,
    Integer,
    Int,
    Bigint,
    PositiveInteger,
    Float,
    Decimal,
    Percentage,
    ScientificNotation,
    Currency,
    Date,
    Time,
    Datetime,
    Boolean,
    Bit,
    Json,
    Url,
    Email,
    IpAddress,
    Coordinates,
    BinaryData,
    Other(String),
}

impl DataType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::String => "string",
            Self::Nvarchar => "nvarchar",
            Self::Enum => "enum",
            Self::Gender => "gender",
            Self::Integer => "integer",
            Self::Int => "int",
            Self::Bigint => "bigint",
            Self::PositiveInteger => "positive_integer",
            Self::Float => "float",
            Self::Decimal => "decimal",
            Self::Percentage => "percentage",
            Self::ScientificNotation => "scientific_notation",
            Self::Currency => "currency",
            Self::Date => "date",
            Self::Time => "time",
            Self::Datetime => "datetime",
            Self::Boolean => "boolean",
            Self::Bit => "bit",
            Self::Json => "json",
            Self::Url => "url",
            Self::Email => "email",
            Self::IpAddress => "ip_address",
            Self::Coordinates => "coordinates",
            Self::BinaryData => "binary_data",
            Self::Other(tag) => tag.as_str(),
        }
    }

    /// Columns subject to the length and formatting rules.
    pub fn is_text(&self) -> bool {
        matches!(self, Self::String | Self::Nvarchar | Self::Enum)
    }

    /// Never fails: unknown tags become `Other`.
    pub fn from_tag(s: &str) -> Self {
        let tag = s.trim().to_lowercase();
        match tag.as_str() {
            "string" => Self::String,
            "nvarchar" => Self::Nvarchar,
            "enum" => Self::Enum,
            "gender" => Self::Gender,
            "integer" => Self::Integer,
            "int" => Self::Int,
            "bigint" => Self::Bigint,
            "positive_integer" => Self::PositiveInteger,
            "float" => Self::Float,
            "decimal" => Self::Decimal,
            "percentage" => Self::Percentage,
            "scientific_notation" => Self::ScientificNotation,
            "currency" => Self::Currency,
            "date" => Self::Date,
            "time" => Self::Time,
            "datetime" => Self::Datetime,
            "boolean" => Self::Boolean,
            "bit" => Self::Bit,
            "json" => Self::Json,
            "url" => Self::Url,
            "email" => Self::Email,
            "ip_address" => Self::IpAddress,
            "coordinates" => Self::Coordinates,
            "binary_data" => Self::BinaryData,
            _ => Self::Other(tag),
        }
    }
}

impl FromStr for DataType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_tag(s))
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for DataType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for DataType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(DataType::from_tag(&s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("DATE".parse::<DataType>(), Ok(DataType::Date));
        assert_eq!(" Ip_Address ".parse::<DataType>(), Ok(DataType::IpAddress));
    }

    #[test]
    fn test_unknown_tag_is_kept() {
        let dt = DataType::from_tag("geometry");
        assert_eq!(dt, DataType::Other("geometry".into()));
        assert_eq!(dt.to_string(), "geometry");
    }

    #[test]
    fn test_text_family() {
        assert!(DataType::Nvarchar.is_text());
        assert!(DataType::Enum.is_text());
        assert!(!DataType::Currency.is_text());
        assert!(!DataType::Other("x".into()).is_text());
    }
}
