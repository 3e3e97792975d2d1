// sluice-core/src/domain/validation/predicates.rs

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use regex::Regex;
use std::net::IpAddr;

use crate::domain::spec::DataType;

const GENDERS: [&str; 8] = [
    "male",
    "female",
    "m",
    "f",
    "other",
    "unknown",
    "x",
    "non-binary",
];

/// Per-type cell predicates. Regexes are compiled once and reused for every cell.
pub struct TypePredicates {
    decimal: Regex,
    percentage: Regex,
    scientific: Regex,
    currency: Regex,
    url: Regex,
    email: Regex,
    hex: Regex,
}

impl TypePredicates {
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            // DECIMAL(38, 10) leaves 28 integer digits
            decimal: Regex::new(r"^[+-]?(\d{1,28}(\.\d*)?|\.\d+)$")?,
            percentage: Regex::new(r"^[+-]?(\d+\.?\d*|\.\d+)\s?%?$")?,
            scientific: Regex::new(r"^[+-]?(\d+\.?\d*|\.\d+)[eE][+-]?\d+$")?,
            currency: Regex::new(r"^[+-]?[$€£¥]?\s?(\d{1,3}(,\d{3})+|\d+)(\.\d+)?$")?,
            url: Regex::new(r"(?i)^https?://[^\s/$.?#][^\s]*$")?,
            email: Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$")?,
            hex: Regex::new(r"^(0[xX])?([0-9a-fA-F]{2})+$")?,
        })
    }

    /// Does a non-null cell conform to its declared type?
    pub fn matches(&self, data_type: &DataType, value: &str) -> bool {
        let v = value.trim();
        match data_type {
            DataType::String | DataType::Nvarchar | DataType::Enum | DataType::Other(_) => true,
            DataType::Gender => GENDERS.contains(&v.to_lowercase().as_str()),
            DataType::Integer | DataType::Bigint => v.parse::<i64>().is_ok(),
            DataType::Int => v.parse::<i32>().is_ok(),
            DataType::PositiveInteger => v.parse::<i64>().is_ok_and(|n| n > 0),
            DataType::Float => v.parse::<f64>().is_ok_and(f64::is_finite),
            DataType::Decimal => self.decimal.is_match(v),
            DataType::Percentage => self.percentage.is_match(v),
            DataType::ScientificNotation => self.scientific.is_match(v),
            DataType::Currency => self.is_currency(v),
            DataType::Date => NaiveDate::parse_from_str(v, "%Y-%m-%d").is_ok(),
            DataType::Time => {
                NaiveTime::parse_from_str(v, "%H:%M:%S").is_ok()
                    || NaiveTime::parse_from_str(v, "%H:%M").is_ok()
            }
            DataType::Datetime => {
                NaiveDateTime::parse_from_str(v, "%Y-%m-%dT%H:%M:%S").is_ok()
                    || NaiveDateTime::parse_from_str(v, "%Y-%m-%d %H:%M:%S").is_ok()
            }
            DataType::Boolean => {
                matches!(v.to_lowercase().as_str(), "true" | "false" | "1" | "0")
            }
            DataType::Bit => v == "0" || v == "1",
            DataType::Json => serde_json::from_str::<serde_json::Value>(v).is_ok(),
            DataType::Url => self.url.is_match(v),
            DataType::Email => self.email.is_match(v),
            DataType::IpAddress => v.parse::<IpAddr>().is_ok(),
            DataType::Coordinates => is_coordinates(v),
            DataType::BinaryData => self.hex.is_match(v),
        }
    }

    fn is_currency(&self, v: &str) -> bool {
        // Accounting negatives: (1,234.50). The parentheses are the only sign.
        let inner = match v.strip_prefix('(') {
            Some(rest) => match rest.strip_suffix(')') {
                Some(inner) => inner.trim(),
                None => return false,
            },
            None => return self.currency.is_match(v),
        };
        !inner.starts_with(['+', '-']) && self.currency.is_match(inner)
    }
}

fn is_coordinates(v: &str) -> bool {
    let mut parts = v.split(',');
    let (Some(lat), Some(lon), None) = (parts.next(), parts.next(), parts.next()) else {
        return false;
    };
    match (lat.trim().parse::<f64>(), lon.trim().parse::<f64>()) {
        (Ok(lat), Ok(lon)) => (-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lon),
        _ => false,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn check(dt: DataType, ok: &[&str], ko: &[&str]) {
        let p = TypePredicates::new().unwrap();
        for v in ok {
            assert!(p.matches(&dt, v), "{} should accept '{}'", dt, v);
        }
        for v in ko {
            assert!(!p.matches(&dt, v), "{} should reject '{}'", dt, v);
        }
    }

    #[test]
    fn test_integers() {
        check(DataType::Int, &["1", "-42", " 7 ", "2147483647"], &["1.5", "abc", "2147483648"]);
        check(DataType::Bigint, &["2147483648", "-9"], &["9.0", ""]);
        check(
            DataType::PositiveInteger,
            &["1", "900", "9223372036854775807"],
            &["0", "-1", "1.0", "9223372036854775808"],
        );
    }

    #[test]
    fn test_numbers() {
        check(DataType::Float, &["1", "1.5", "-0.25", "1e3"], &["inf", "NaN", "1,5"]);
        check(
            DataType::Decimal,
            &["10.25", "-3", ".5", "1234567890123456789012345678.5"],
            &["1e3", "ten", "12345678901234567890123456789"],
        );
        check(DataType::Percentage, &["12%", "12.5 %", "0.3"], &["%", "12%%"]);
        check(DataType::ScientificNotation, &["1.2e10", "-3E-2"], &["12", "e10"]);
    }

    #[test]
    fn test_currency() {
        check(
            DataType::Currency,
            &["$1,234.50", "1234.5", "€12", "-$3.00", "(1,000.00)", "£ 9"],
            &["$1,23.00", "12$", "(5.00", "abc", "$", "(-5.00)", "-$-3", "$-3", "(+$2)"],
        );
    }

    #[test]
    fn test_temporal() {
        check(DataType::Date, &["2024-02-29"], &["2023-02-29", "29/02/2024"]);
        check(DataType::Time, &["23:59:59", "08:30"], &["25:00", "noon"]);
        check(
            DataType::Datetime,
            &["2024-01-01T10:00:00", "2024-01-01 10:00:00"],
            &["2024-01-01", "2024-01-01T10:00"],
        );
    }

    #[test]
    fn test_flags_and_text_shapes() {
        check(DataType::Boolean, &["true", "FALSE", "1", "0"], &["yes", "2"]);
        check(DataType::Bit, &["0", "1"], &["true", "2"]);
        check(DataType::Gender, &["Female", "m", "non-binary"], &["robot"]);
        check(DataType::Json, &[r#"{"a": 1}"#, "[1,2]"], &["{a:1}"]);
        check(DataType::Url, &["https://example.com/x?y=1", "HTTP://a.b"], &["ftp://a.b", "example.com"]);
        check(DataType::Email, &["ada@example.com"], &["ada@", "ada.example.com"]);
        check(DataType::IpAddress, &["10.0.0.1", "::1"], &["300.1.1.1"]);
        check(DataType::Coordinates, &["48.85, 2.35"], &["91,0", "1", "1,2,3"]);
        check(DataType::BinaryData, &["0xDEADBEEF", "00ff"], &["0xABC", "zz"]);
        check(DataType::String, &["anything", ""], &[]);
        check(DataType::Other("geometry".into()), &["POINT(1 2)"], &[]);
    }
}
