// sluice-core/src/lib.rs

#![allow(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
#![warn(clippy::perf)]

// --- HEXAGONAL MODULES ---

// Contracts the loader relies on (Warehouse)
pub mod ports;

// Column specs, type predicates, validation, cleaning, DDL mapping.
// Depends on nothing else in the crate.
pub mod domain;

// CSV reader, config files, DuckDB adapter
pub mod infrastructure;

// Use cases: load, refresh, scaffold, summary
pub mod application;

pub mod error;

pub use error::SluiceError;
