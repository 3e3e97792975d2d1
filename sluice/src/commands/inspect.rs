// sluice/src/commands/inspect.rs
//
// USE CASE: Inspect a loaded table (schema + sample rows).

use anyhow::Context;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, ContentArrangement, Table};
use duckdb::{Connection, params};
use std::path::Path;

use sluice_core::domain::schema::{TableRef, quote_ident};

pub fn execute(database: String, schema: String, table: String, limit: usize) -> anyhow::Result<()> {
    if !Path::new(&database).exists() {
        anyhow::bail!(
            "❌ Database not found at: {}\n👉 Have you run 'sluice load'?",
            database
        );
    }

    let conn = Connection::open(&database)
        .with_context(|| format!("Failed to open DuckDB at {}", database))?;
    let table_ref = TableRef::new(schema, table.trim().to_uppercase());

    println!("\n🔍 Inspecting Table: '{}'", table_ref);

    let mut stmt_cols = conn.prepare(
        "SELECT column_name, data_type, is_nullable FROM information_schema.columns \
         WHERE table_schema = ? AND table_name = ? ORDER BY ordinal_position",
    )?;
    let columns: Vec<(String, String, String)> = stmt_cols
        .query_map(params![table_ref.schema, table_ref.table], |row| {
            Ok((row.get(0)?, row.get(1)?, row.get(2)?))
        })?
        .collect::<Result<Vec<_>, _>>()?;

    if columns.is_empty() {
        anyhow::bail!("❌ Table '{}' not found in {}", table_ref, database);
    }

    let mut schema_table = Table::new();
    schema_table.load_preset(UTF8_FULL_CONDENSED).set_header(vec![
        Cell::new("Column").add_attribute(Attribute::Bold),
        Cell::new("Type").add_attribute(Attribute::Bold),
        Cell::new("Nullable").add_attribute(Attribute::Bold),
    ]);
    for (name, data_type, nullable) in &columns {
        schema_table.add_row(vec![name, data_type, nullable]);
    }
    println!("{schema_table}");

    let total: i64 = conn.query_row(
        &format!("SELECT COUNT(*) FROM {}", table_ref.qualified()),
        [],
        |row| row.get(0),
    )?;
    println!("   --- Rows ({} total, showing up to {}) ---", total, limit);

    // Render every value as text so any column type prints the same way
    let select_list = columns
        .iter()
        .map(|(name, _, _)| format!("CAST({} AS VARCHAR)", quote_ident(name)))
        .collect::<Vec<_>>()
        .join(", ");
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM {} LIMIT {}",
        select_list,
        table_ref.qualified(),
        limit
    ))?;
    let mut rows = stmt.query([])?;

    let mut sample = Table::new();
    sample
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(
            columns
                .iter()
                .map(|(name, _, _)| Cell::new(name).add_attribute(Attribute::Bold))
                .collect::<Vec<_>>(),
        );

    while let Some(row) = rows.next()? {
        let values: Vec<String> = (0..columns.len())
            .map(|i| match row.get::<_, Option<String>>(i) {
                Ok(Some(val)) => val,
                Ok(None) => "NULL".to_string(),
                Err(_) => "ERROR".to_string(),
            })
            .collect();
        sample.add_row(values);
    }
    println!("{sample}");

    Ok(())
}
