// sluice/src/commands/load.rs
//
// USE CASE: Validate, clean and load a CSV into the warehouse.

use anyhow::Context;
use std::path::PathBuf;
use tracing::debug;

use sluice_core::application::{LoadOptions, run_load};
use sluice_core::infrastructure::{
    DuckDbWarehouse, WarehouseKind, WarehouseProfile, load_config, resolve_source_path,
};
use sluice_core::ports::Warehouse;

use crate::cli::SourceArgs;
use crate::commands::report::print_report;

pub async fn execute(
    source: SourceArgs,
    database: Option<String>,
    schema: Option<String>,
    target_dir: PathBuf,
) -> anyhow::Result<()> {
    let start = std::time::Instant::now();

    // A. Load the Config (Infra)
    println!("⚙️  Loading configuration...");
    let config = load_config(&source.config)
        .with_context(|| format!("Failed to load config from {:?}", source.config))?;
    let csv_path = resolve_source_path(
        &config,
        &source.config,
        source.csv.as_deref(),
        source.data_dir.as_deref(),
    )?;

    // B. Instantiate the warehouse adapter
    let profile = WarehouseProfile::from_env()?.with_overrides(database, schema);
    debug!(?profile, "Warehouse profile resolved");
    let warehouse: Box<dyn Warehouse> = match profile.kind {
        WarehouseKind::DuckDb => {
            println!("   Warehouse: DuckDB 🦆 ({})", profile.database);
            Box::new(
                DuckDbWarehouse::new(&profile.database)
                    .with_context(|| format!("Failed to initialize DuckDB at {}", profile.database))?,
            )
        }
    };

    // C. Run the load (Application Layer)
    let options = LoadOptions {
        schema: profile.schema.clone(),
        delimiter: source.delimiter,
        target_dir: Some(target_dir),
    };

    match run_load(warehouse.as_ref(), &config, &csv_path, &options).await {
        Ok(run) => {
            print_report(&run.validation);
            if run.success {
                println!(
                    "\n✨ SUCCESS! {} rows loaded into {} in {:.2?}",
                    run.rows_loaded(),
                    run.table,
                    start.elapsed()
                );
            } else {
                eprintln!(
                    "\n❌ FAILURE. {} of {} checks failed, nothing was loaded.",
                    run.validation.failed_checks(),
                    run.validation.checks.len()
                );
                std::process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("\n💥 LOAD ERROR: {}", e);
            std::process::exit(1);
        }
    }

    Ok(())
}
