// sluice-core/src/domain/cleaning.rs

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use std::str::FromStr;
use tracing::{debug, warn};

use crate::domain::spec::{DataType, LoadConfig};
use crate::domain::table::Table;

const CURRENCY_SYMBOLS: [char; 4] = ['$', '€', '£', '¥'];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CleanSummary {
    pub cleaned: usize,
    pub skipped: usize,
}

/// Normalizes a currency cell to two-decimal fixed-point text.
///
/// `"$1,234.50"` -> `"1234.50"`, `"(12)"` -> `"-12.00"`. At most one sign
/// marker is accepted: a leading `-`/`+` or accounting parentheses. Rounds
/// half away from zero.
pub fn normalize_currency(raw: &str) -> Option<String> {
    let s = raw.trim();
    let (negative, body) = match s.strip_prefix('(').and_then(|r| r.strip_suffix(')')) {
        Some(inner) => (true, inner.trim()),
        None => match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s.strip_prefix('+').unwrap_or(s)),
        },
    };

    let mut digits = String::with_capacity(body.len() + 1);
    for ch in body.chars() {
        match ch {
            ',' | ' ' => {}
            c if CURRENCY_SYMBOLS.contains(&c) => {}
            c if c.is_ascii_digit() || c == '.' => digits.push(c),
            _ => return None,
        }
    }
    if !digits.bytes().any(|b| b.is_ascii_digit()) {
        return None;
    }
    if digits.starts_with('.') {
        digits.insert(0, '0');
    }

    let amount = Decimal::from_str(&digits)
        .ok()?
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let amount = if negative && !amount.is_zero() { -amount } else { amount };
    Some(format!("{:.2}", amount))
}

/// Drops a trailing `%` so the warehouse can cast the value to FLOAT.
pub fn normalize_percentage(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    let number = trimmed.strip_suffix('%').map(str::trim_end).unwrap_or(trimmed);
    if number.is_empty() {
        return None;
    }
    Some(number.to_string())
}

/// Rewrites currency and percentage columns in place. Nulls are left alone.
pub fn clean_table(table: &mut Table, config: &LoadConfig) -> CleanSummary {
    let mut summary = CleanSummary::default();

    for col in &config.expected_columns {
        let normalize: fn(&str) -> Option<String> = match col.data_type {
            DataType::Currency => normalize_currency,
            DataType::Percentage => normalize_percentage,
            _ => continue,
        };
        let Some(idx) = table.column_index(&col.name) else {
            continue;
        };

        for row in 0..table.row_count() {
            let Some(raw) = table.rows[row].get(idx).cloned().flatten() else {
                continue;
            };
            match normalize(&raw) {
                Some(clean) => {
                    if clean != raw {
                        debug!(column = %col.name, row = row + 1, from = %raw, to = %clean, "Cleaned cell");
                    }
                    table.set_cell(row, idx, Some(clean));
                    summary.cleaned += 1;
                }
                None => {
                    warn!(column = %col.name, row = row + 1, value = %raw, "Could not normalize value, left untouched");
                    summary.skipped += 1;
                }
            }
        }
    }

    summary
}
