// sluice-core/src/domain/validation/mod.rs

pub mod checks;
pub mod predicates;
pub mod report;

pub use predicates::TypePredicates;
pub use report::{CheckKind, CheckOutcome, Finding, ValidationReport};

use tracing::{info, warn};

use crate::domain::spec::LoadConfig;
use crate::domain::table::Table;

/// Runs every structural and field-level check of a CSV against its config.
pub struct CsvValidator {
    predicates: TypePredicates,
}

impl CsvValidator {
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            predicates: TypePredicates::new()?,
        })
    }

    /// All checks always run; the verdict is the AND of every outcome.
    pub fn validate(&self, table: &Table, config: &LoadConfig) -> ValidationReport {
        let columns = checks::check_columns(table, config);

        let outcomes = vec![
            columns.outcome,
            checks::check_nulls(table, config),
            checks::check_types(table, config, &self.predicates),
            checks::check_row_count(table, config.expected_rows),
            checks::check_text_length(table, config),
            checks::check_text_format(table, config),
        ];

        for outcome in &outcomes {
            if outcome.passed {
                info!(check = %outcome.check, "Check passed");
            }
            for finding in &outcome.findings {
                warn!(check = %finding.check, column = ?finding.column, "{}", finding.message);
            }
        }

        ValidationReport {
            row_count: table.row_count(),
            missing_columns: columns.missing,
            unexpected_columns: columns.unexpected,
            checks: outcomes,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::spec::{ColumnSpec, DataType};

    fn cell(v: &str) -> Option<String> {
        Some(v.to_string())
    }

    fn config_ab() -> LoadConfig {
        LoadConfig::new(
            2,
            vec![
                ColumnSpec::new("A", DataType::Int).not_null(),
                ColumnSpec::new("B", DataType::String),
            ],
        )
    }

    fn table_ab() -> Table {
        Table::new(
            vec!["a".into(), "b".into()],
            vec![vec![cell("1"), cell("x")], vec![cell("2"), cell("y")]],
        )
    }

    #[test]
    fn test_matching_csv_passes() {
        let report = CsvValidator::new().unwrap().validate(&table_ab(), &config_ab());
        assert!(report.passed());
        assert_eq!(report.checks.len(), 6);
        assert_eq!(report.findings().count(), 0);
    }

    #[test]
    fn test_missing_column_is_reported() {
        let table = Table::new(vec!["A".into()], vec![vec![cell("1")], vec![cell("2")]]);
        let report = CsvValidator::new().unwrap().validate(&table, &config_ab());

        assert!(!report.passed());
        assert_eq!(report.missing_columns, vec!["B"]);
        assert!(report.unexpected_columns.is_empty());
        let finding = report.findings().next().unwrap();
        assert_eq!(finding.check, CheckKind::Columns);
        assert!(finding.message.contains("missing"));
    }

    #[test]
    fn test_unexpected_column_is_reported() {
        let mut table = table_ab();
        table.headers.push("c".into());
        for row in &mut table.rows {
            row.push(cell("z"));
        }
        let report = CsvValidator::new().unwrap().validate(&table, &config_ab());
        assert!(!report.passed());
        assert_eq!(report.unexpected_columns, vec!["C"]);
    }

    #[test]
    fn test_duplicate_headers_fail_the_column_check() {
        let table = Table::new(
            vec!["a".into(), "A".into(), "b".into()],
            vec![
                vec![cell("1"), cell("notanint"), cell("x")],
                vec![cell("2"), cell("3"), cell("y")],
            ],
        );
        let report = CsvValidator::new().unwrap().validate(&table, &config_ab());

        assert!(!report.passed());
        assert!(report.missing_columns.is_empty());
        assert!(report.unexpected_columns.is_empty());
        let columns = report.outcome(CheckKind::Columns).unwrap();
        assert!(!columns.passed);
        assert_eq!(columns.findings.len(), 1);
        assert_eq!(columns.findings[0].column.as_deref(), Some("A"));
        assert!(columns.findings[0].message.contains("more than once"));
    }

    #[test]
    fn test_every_check_runs_after_a_failure() {
        // wrong columns, a null in A, a bad int, and a wrong row count
        let table = Table::new(
            vec!["A".into(), "B".into(), "EXTRA".into()],
            vec![
                vec![None, cell("x"), cell("1")],
                vec![cell("two"), cell("y"), cell("2")],
                vec![cell("3"), cell("z"), cell("3")],
            ],
        );
        let report = CsvValidator::new().unwrap().validate(&table, &config_ab());

        assert!(!report.passed());
        assert_eq!(report.failed_checks(), 4);
        for kind in [
            CheckKind::Columns,
            CheckKind::Nulls,
            CheckKind::Types,
            CheckKind::RowCount,
        ] {
            assert!(!report.outcome(kind).unwrap().passed, "{} should fail", kind);
        }

        let nulls = report.outcome(CheckKind::Nulls).unwrap();
        assert_eq!(nulls.findings[0].rows, vec![1]);
        let types = report.outcome(CheckKind::Types).unwrap();
        assert_eq!(types.findings[0].rows, vec![2]);
        assert!(types.findings[0].message.contains("'two'"));

        let err = report.ensure_passed().unwrap_err();
        assert_eq!(err.to_string(), "Validation failed: 4 of 6 checks did not pass");
    }

    #[test]
    fn test_nullable_columns_accept_nulls() {
        let table = Table::new(
            vec!["A".into(), "B".into()],
            vec![vec![cell("1"), None], vec![cell("2"), None]],
        );
        let report = CsvValidator::new().unwrap().validate(&table, &config_ab());
        assert!(report.passed());
    }

    #[test]
    fn test_nvarchar_rules() {
        let config = LoadConfig::new(
            3,
            vec![ColumnSpec::new("LABEL", DataType::Nvarchar).with_max_length(8)],
        );
        let table = Table::new(
            vec!["LABEL".into()],
            vec![
                vec![cell("N'ok'")],
                vec![cell("N'far too long'")],
                vec![cell("plain")],
            ],
        );
        let report = CsvValidator::new().unwrap().validate(&table, &config);

        let length = report.outcome(CheckKind::TextLength).unwrap();
        assert!(!length.passed);
        assert_eq!(length.findings[0].rows, vec![2]);

        let format = report.outcome(CheckKind::TextFormat).unwrap();
        assert!(!format.passed);
        assert_eq!(format.findings[0].rows, vec![3]);

        assert!(report.outcome(CheckKind::Columns).unwrap().passed);
        assert!(report.outcome(CheckKind::RowCount).unwrap().passed);
    }

    #[test]
    fn test_max_length_ignored_for_non_text() {
        let config = LoadConfig::new(1, vec![ColumnSpec::new("N", DataType::Integer).with_max_length(1)]);
        let table = Table::new(vec!["N".into()], vec![vec![cell("12345")]]);
        let report = CsvValidator::new().unwrap().validate(&table, &config);
        assert!(report.passed());
    }
}
