// sluice-core/src/domain/validation/checks.rs

use std::collections::BTreeSet;

use crate::domain::spec::{ColumnSpec, DataType, LoadConfig};
use crate::domain::table::Table;
use crate::domain::validation::predicates::TypePredicates;
use crate::domain::validation::report::{CheckKind, CheckOutcome, Finding};

const PREVIEW_LIMIT: usize = 5;

fn preview(values: &[&str]) -> String {
    let mut shown: Vec<String> = values
        .iter()
        .take(PREVIEW_LIMIT)
        .map(|v| format!("'{}'", v))
        .collect();
    if values.len() > PREVIEW_LIMIT {
        shown.push(format!("... (+{} more)", values.len() - PREVIEW_LIMIT));
    }
    shown.join(", ")
}

/// Declared columns that exist in the CSV, with their header index.
fn present_columns<'a>(
    table: &'a Table,
    config: &'a LoadConfig,
) -> impl Iterator<Item = (usize, &'a ColumnSpec)> + 'a {
    config
        .expected_columns
        .iter()
        .filter_map(move |col| table.column_index(&col.name).map(|idx| (idx, col)))
}

/// Non-null cells of a column failing `reject`, as (1-based row, value).
fn offending_cells<'a>(
    table: &'a Table,
    idx: usize,
    mut reject: impl FnMut(&str) -> bool,
) -> Vec<(usize, &'a str)> {
    table
        .column_values(idx)
        .enumerate()
        .filter_map(|(i, cell)| cell.map(|v| (i + 1, v)))
        .filter(|(_, v)| reject(*v))
        .collect()
}

fn cell_finding(
    check: CheckKind,
    col: &ColumnSpec,
    cells: Vec<(usize, &str)>,
    describe: &str,
) -> Finding {
    let values: Vec<&str> = cells.iter().map(|(_, v)| *v).collect();
    Finding {
        check,
        column: Some(col.normalized_name()),
        rows: cells.iter().map(|(r, _)| *r).collect(),
        message: format!(
            "Column '{}': {} entries {}: {}",
            col.normalized_name(),
            cells.len(),
            describe,
            preview(&values)
        ),
    }
}

// --- (a) COLUMN SET EQUALITY ---

pub struct ColumnsCheck {
    pub outcome: CheckOutcome,
    pub missing: Vec<String>,
    pub unexpected: Vec<String>,
}

pub fn check_columns(table: &Table, config: &LoadConfig) -> ColumnsCheck {
    let expected: BTreeSet<String> = config
        .expected_columns
        .iter()
        .map(ColumnSpec::normalized_name)
        .collect();

    // Headers equal after normalization would shadow each other downstream.
    let mut actual = BTreeSet::new();
    let mut duplicated = BTreeSet::new();
    for header in &table.headers {
        let name = header.trim().to_uppercase();
        if !actual.insert(name.clone()) {
            duplicated.insert(name);
        }
    }

    let missing: Vec<String> = expected.difference(&actual).cloned().collect();
    let unexpected: Vec<String> = actual.difference(&expected).cloned().collect();

    let mut findings = Vec::new();
    for name in &duplicated {
        findings.push(Finding {
            check: CheckKind::Columns,
            column: Some(name.clone()),
            rows: vec![],
            message: format!("Found more than once: '{}'", name),
        });
    }
    for name in &missing {
        findings.push(Finding {
            check: CheckKind::Columns,
            column: Some(name.clone()),
            rows: vec![],
            message: format!("Expected but missing: '{}'", name),
        });
    }
    for name in &unexpected {
        findings.push(Finding {
            check: CheckKind::Columns,
            column: Some(name.clone()),
            rows: vec![],
            message: format!("Found but not expected: '{}'", name),
        });
    }

    ColumnsCheck {
        outcome: CheckOutcome::from_findings(CheckKind::Columns, findings),
        missing,
        unexpected,
    }
}

// --- (b) NULLS IN NON-NULLABLE COLUMNS ---

pub fn check_nulls(table: &Table, config: &LoadConfig) -> CheckOutcome {
    let findings = present_columns(table, config)
        .filter(|(_, col)| !col.nullable)
        .filter_map(|(idx, col)| {
            let rows: Vec<usize> = table
                .column_values(idx)
                .enumerate()
                .filter(|(_, cell)| cell.is_none())
                .map(|(i, _)| i + 1)
                .collect();
            if rows.is_empty() {
                return None;
            }
            Some(Finding {
                check: CheckKind::Nulls,
                column: Some(col.normalized_name()),
                message: format!(
                    "Column '{}' is not nullable but has {} null values (rows {:?})",
                    col.normalized_name(),
                    rows.len(),
                    rows
                ),
                rows,
            })
        })
        .collect();

    CheckOutcome::from_findings(CheckKind::Nulls, findings)
}

// --- (c) DATA TYPE CONSISTENCY ---

pub fn check_types(
    table: &Table,
    config: &LoadConfig,
    predicates: &TypePredicates,
) -> CheckOutcome {
    let findings = present_columns(table, config)
        .filter_map(|(idx, col)| {
            let cells = offending_cells(table, idx, |v| !predicates.matches(&col.data_type, v));
            if cells.is_empty() {
                return None;
            }
            let describe = format!("do not match the expected datatype '{}'", col.data_type);
            Some(cell_finding(CheckKind::Types, col, cells, &describe))
        })
        .collect();

    CheckOutcome::from_findings(CheckKind::Types, findings)
}

// --- (d) ROW COUNT ---

pub fn check_row_count(table: &Table, expected_rows: usize) -> CheckOutcome {
    let actual = table.row_count();
    let findings = if actual == expected_rows {
        vec![]
    } else {
        vec![Finding {
            check: CheckKind::RowCount,
            column: None,
            rows: vec![],
            message: format!(
                "The number of rows in the CSV does not match the expected number. Expected: {}, but got: {}",
                expected_rows, actual
            ),
        }]
    };
    CheckOutcome::from_findings(CheckKind::RowCount, findings)
}

// --- (e) TEXT RULES ---

pub fn check_text_length(table: &Table, config: &LoadConfig) -> CheckOutcome {
    let findings = present_columns(table, config)
        .filter(|(_, col)| col.data_type.is_text())
        .filter_map(|(idx, col)| {
            let max = col.max_length?;
            let cells = offending_cells(table, idx, |v| v.chars().count() > max);
            if cells.is_empty() {
                return None;
            }
            let describe = format!("exceed the maximum length of {}", max);
            Some(cell_finding(CheckKind::TextLength, col, cells, &describe))
        })
        .collect();

    CheckOutcome::from_findings(CheckKind::TextLength, findings)
}

/// `nvarchar` cells must be written as SQL national literals: `N'...'`.
pub fn check_text_format(table: &Table, config: &LoadConfig) -> CheckOutcome {
    let findings = present_columns(table, config)
        .filter(|(_, col)| col.data_type == DataType::Nvarchar)
        .filter_map(|(idx, col)| {
            let cells = offending_cells(table, idx, |v| !is_national_literal(v));
            if cells.is_empty() {
                return None;
            }
            Some(cell_finding(
                CheckKind::TextFormat,
                col,
                cells,
                "do not have the N'XXX' format",
            ))
        })
        .collect();

    CheckOutcome::from_findings(CheckKind::TextFormat, findings)
}

fn is_national_literal(v: &str) -> bool {
    v.len() >= 3 && v.starts_with("N'") && v.ends_with('\'')
}
