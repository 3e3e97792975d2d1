// sluice/src/cli.rs
//
// Single source of truth for all CLI definitions (Clap structs).

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use sluice_core::domain::schema::SqlDialect;

#[derive(Parser)]
#[command(name = "sluice")]
#[command(about = "Validate CSV files against a column spec and load them into a warehouse", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Which CSV to read and how to interpret it.
#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// Column specification (.json, .yml or .yaml)
    #[arg(long, short)]
    pub config: PathBuf,

    /// CSV file (default: 'source_file_name' from the config)
    #[arg(long)]
    pub csv: Option<PathBuf>,

    /// Folder 'source_file_name' is resolved against (default: the config's folder)
    #[arg(long, env = "SLUICE_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Field delimiter: a single ASCII character, or 'tab'
    #[arg(long, default_value = ",", value_parser = parse_delimiter)]
    pub delimiter: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 🚀 Validates, cleans and loads a CSV into the warehouse
    Load {
        #[command(flatten)]
        source: SourceArgs,

        /// DuckDB database file (or ':memory:')
        #[arg(long, env = "SLUICE_DATABASE")]
        database: Option<String>,

        /// Target schema
        #[arg(long, env = "SLUICE_SCHEMA")]
        schema: Option<String>,

        /// Where run_results.json is written
        #[arg(long, default_value = "target")]
        target_dir: PathBuf,
    },

    /// ✅ Runs every check without touching the warehouse
    Validate {
        #[command(flatten)]
        source: SourceArgs,
    },

    /// 📐 Prints the table definition derived from a config
    Ddl {
        #[arg(long, short)]
        config: PathBuf,

        /// snowflake | duckdb
        #[arg(long, default_value = "snowflake")]
        dialect: SqlDialect,

        /// Table name (default: 'table_name' or the CSV stem, uppercased)
        #[arg(long, short)]
        table: Option<String>,

        #[arg(long, env = "SLUICE_SCHEMA", default_value = "main")]
        schema: String,
    },

    /// 🏗️  Writes a starter config from a CSV's headings
    Scaffold {
        #[arg(long)]
        csv: PathBuf,

        /// Output file (.json, .yml or .yaml)
        #[arg(long, short, default_value = "csv_config.json")]
        output: PathBuf,

        /// Replace an existing output file
        #[arg(long)]
        force: bool,

        #[arg(long, default_value = ",", value_parser = parse_delimiter)]
        delimiter: u8,
    },

    /// 📊 Counts declared columns per data type
    Summary {
        #[arg(long, short)]
        config: PathBuf,
    },

    /// 🔍 Inspects a loaded table (schema + sample rows)
    Inspect {
        /// Table name to inspect
        #[arg(long, short)]
        table: String,

        /// DuckDB database file
        #[arg(long, env = "SLUICE_DATABASE", default_value = "sluice.duckdb")]
        database: String,

        #[arg(long, env = "SLUICE_SCHEMA", default_value = "main")]
        schema: String,

        /// Number of sample rows to display
        #[arg(long, default_value = "5")]
        limit: usize,
    },
}

fn parse_delimiter(raw: &str) -> Result<u8, String> {
    if raw.eq_ignore_ascii_case("tab") || raw == "\\t" {
        return Ok(b'\t');
    }
    match raw.as_bytes() {
        [b] if b.is_ascii() => Ok(*b),
        _ => Err(format!(
            "'{}' is not a single ASCII character",
            raw
        )),
    }
}
