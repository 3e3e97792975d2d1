// sluice/src/commands/scaffold.rs
//
// USE CASE: Bootstrap a column spec from an existing CSV.

use anyhow::Context;
use std::path::PathBuf;

use sluice_core::application::scaffold_config;
use sluice_core::infrastructure::save_config;

pub fn execute(csv: PathBuf, output: PathBuf, force: bool, delimiter: u8) -> anyhow::Result<()> {
    println!("🕵️‍♀️  Reading headings from {}...", csv.display());

    let config = scaffold_config(&csv, delimiter)
        .with_context(|| format!("Failed to scaffold a config from {:?}", csv))?;
    println!(
        "📝 Found {} columns and {} rows.",
        config.expected_columns.len(),
        config.expected_rows
    );

    save_config(&output, &config, force)?;

    println!("✨ {} written. Adjust the data types before loading.", output.display());
    Ok(())
}
