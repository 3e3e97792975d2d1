// sluice/src/commands/summary.rs
//
// USE CASE: Count declared columns per data type.

use anyhow::Context;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Table};
use std::path::PathBuf;

use sluice_core::application::type_summary;
use sluice_core::infrastructure::load_config;

pub fn execute(config_path: PathBuf) -> anyhow::Result<()> {
    let config = load_config(&config_path)
        .with_context(|| format!("Failed to load config from {:?}", config_path))?;

    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED).set_header(vec![
        Cell::new("Data type").add_attribute(Attribute::Bold),
        Cell::new("Columns").add_attribute(Attribute::Bold),
    ]);

    for entry in type_summary(&config) {
        table.add_row(vec![
            Cell::new(&entry.data_type),
            Cell::new(entry.columns).set_alignment(CellAlignment::Right),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL").add_attribute(Attribute::Bold),
        Cell::new(config.expected_columns.len())
            .add_attribute(Attribute::Bold)
            .set_alignment(CellAlignment::Right),
    ]);

    println!("📊 {}", config_path.display());
    println!("{table}");
    Ok(())
}
