// sluice/src/commands/report.rs
//
// Terminal rendering of validation reports.

use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};

use sluice_core::domain::validation::ValidationReport;

const MAX_LISTED_ROWS: usize = 5;

fn header_cell(label: &str) -> Cell {
    Cell::new(label).add_attribute(Attribute::Bold)
}

fn rows_label(rows: &[usize]) -> String {
    if rows.is_empty() {
        return "-".to_string();
    }
    let mut label = rows
        .iter()
        .take(MAX_LISTED_ROWS)
        .map(usize::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    if rows.len() > MAX_LISTED_ROWS {
        label.push_str(&format!(" (+{})", rows.len() - MAX_LISTED_ROWS));
    }
    label
}

pub fn print_report(report: &ValidationReport) {
    println!("\n📋 Checks ({} data rows)", report.row_count);
    for outcome in &report.checks {
        let glyph = if outcome.passed { "✅" } else { "❌" };
        println!("   {} {}", glyph, outcome.check);
    }

    if report.passed() {
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            header_cell("Check"),
            header_cell("Column"),
            header_cell("Rows"),
            header_cell("Finding"),
        ]);

    for finding in report.findings() {
        table.add_row(vec![
            Cell::new(finding.check).fg(Color::Yellow),
            Cell::new(finding.column.as_deref().unwrap_or("-")),
            Cell::new(rows_label(&finding.rows)),
            Cell::new(&finding.message),
        ]);
    }
    println!("{table}");
}
