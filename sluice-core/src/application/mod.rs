// sluice-core/src/application/mod.rs

pub mod pipeline;
pub mod refresh;
pub mod scaffold;
pub mod summary;

// --- RE-EXPORTS ---
// `use sluice_core::application::{run_load, Refresher};` from the CLI.

pub use pipeline::{LoadOptions, LoadRun, run_load, target_table_name, validate_source};
pub use refresh::{RefreshAction, RefreshOutcome, Refresher};
pub use scaffold::scaffold_config;
pub use summary::{TypeCount, type_summary};
