// sluice-core/src/domain/spec/mod.rs

pub mod config;
pub mod data_type;

pub use config::{ColumnSpec, DEFAULT_NULL_MARKERS, LoadConfig};
pub use data_type::DataType;
