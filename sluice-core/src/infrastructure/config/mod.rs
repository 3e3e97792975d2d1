pub mod load;
pub mod warehouse;

pub use load::{load_config, resolve_source_path, save_config};
pub use warehouse::{WarehouseKind, WarehouseProfile};
