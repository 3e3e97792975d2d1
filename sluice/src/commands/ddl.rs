// sluice/src/commands/ddl.rs
//
// USE CASE: Show the warehouse table a config would produce.

use anyhow::Context;
use std::path::{Path, PathBuf};

use sluice_core::application::target_table_name;
use sluice_core::domain::schema::{SqlDialect, TableDefinition, TableRef};
use sluice_core::infrastructure::load_config;

pub fn execute(
    config_path: PathBuf,
    dialect: SqlDialect,
    table: Option<String>,
    schema: String,
) -> anyhow::Result<()> {
    let config = load_config(&config_path)
        .with_context(|| format!("Failed to load config from {:?}", config_path))?;

    let table_name = match table {
        Some(name) => name.trim().to_uppercase(),
        None => {
            let source = config.source_file_name.as_deref().unwrap_or_default();
            target_table_name(&config, Path::new(source))
                .context("No table name: pass --table or set 'table_name' in the config")?
        }
    };

    let definition = TableDefinition::from_columns(&config.expected_columns, dialect);
    let table_ref = TableRef::new(schema, table_name);

    println!("📐 {} ({})", table_ref, dialect);
    println!("   {}", definition.to_ddl());
    println!("\n{};", definition.create_statement(&table_ref));
    Ok(())
}
