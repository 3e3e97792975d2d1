// sluice-core/src/infrastructure/mod.rs

pub mod adapters;
pub mod config;
pub mod csv;
pub mod error;
pub mod fs;

pub use adapters::duckdb::DuckDbWarehouse;
pub use config::{WarehouseKind, WarehouseProfile, load_config, resolve_source_path, save_config};
pub use self::csv::CsvReader;
