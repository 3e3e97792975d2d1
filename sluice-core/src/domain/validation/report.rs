// sluice-core/src/domain/validation/report.rs

use serde::Serialize;
use std::fmt;

use crate::domain::error::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckKind {
    Columns,
    Nulls,
    Types,
    RowCount,
    TextLength,
    TextFormat,
}

impl fmt::Display for CheckKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Columns => "columns",
            Self::Nulls => "nulls",
            Self::Types => "types",
            Self::RowCount => "row_count",
            Self::TextLength => "text_length",
            Self::TextFormat => "text_format",
        };
        f.write_str(label)
    }
}

/// One diagnostic. `rows` holds 1-based data-row numbers (header excluded).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    pub check: CheckKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub rows: Vec<usize>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckOutcome {
    pub check: CheckKind,
    pub passed: bool,
    pub findings: Vec<Finding>,
}

impl CheckOutcome {
    pub fn from_findings(check: CheckKind, findings: Vec<Finding>) -> Self {
        Self {
            check,
            passed: findings.is_empty(),
            findings,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub row_count: usize,
    pub missing_columns: Vec<String>,
    pub unexpected_columns: Vec<String>,
    pub checks: Vec<CheckOutcome>,
}

impl ValidationReport {
    /// Logical AND of every check.
    pub fn passed(&self) -> bool {
        self.checks.iter().all(|c| c.passed)
    }

    pub fn failed_checks(&self) -> usize {
        self.checks.iter().filter(|c| !c.passed).count()
    }

    pub fn findings(&self) -> impl Iterator<Item = &Finding> {
        self.checks.iter().flat_map(|c| c.findings.iter())
    }

    pub fn outcome(&self, check: CheckKind) -> Option<&CheckOutcome> {
        self.checks.iter().find(|c| c.check == check)
    }

    pub fn ensure_passed(&self) -> Result<(), DomainError> {
        if self.passed() {
            return Ok(());
        }
        Err(DomainError::ValidationFailed {
            failed: self.failed_checks(),
            total: self.checks.len(),
        })
    }
}
