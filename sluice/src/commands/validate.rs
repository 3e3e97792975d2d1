// sluice/src/commands/validate.rs
//
// USE CASE: Check a CSV against its column spec, warehouse untouched.

use anyhow::Context;
use sluice_core::application::validate_source;
use sluice_core::infrastructure::{load_config, resolve_source_path};

use crate::cli::SourceArgs;
use crate::commands::report::print_report;

pub fn execute(source: SourceArgs) -> anyhow::Result<()> {
    println!("⚙️  Loading configuration...");
    let config = load_config(&source.config)
        .with_context(|| format!("Failed to load config from {:?}", source.config))?;

    let csv_path = resolve_source_path(
        &config,
        &source.config,
        source.csv.as_deref(),
        source.data_dir.as_deref(),
    )?;
    println!("🔍 Validating {}", csv_path.display());

    let (_, report) = validate_source(&config, &csv_path, source.delimiter)
        .with_context(|| format!("Failed to read {:?}", csv_path))?;
    print_report(&report);

    if let Err(e) = report.ensure_passed() {
        eprintln!("\n❌ FAILURE. {}", e);
        std::process::exit(1);
    }

    println!("\n✨ SUCCESS! {} matches its specification.", csv_path.display());
    Ok(())
}
