// sluice/src/commands/mod.rs

pub mod ddl;
pub mod inspect;
pub mod load;
pub mod report;
pub mod scaffold;
pub mod summary;
pub mod validate;
