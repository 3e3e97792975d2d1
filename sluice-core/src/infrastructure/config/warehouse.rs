// sluice-core/src/infrastructure/config/warehouse.rs

use std::fmt;
use std::str::FromStr;
use tracing::info;

use crate::infrastructure::error::InfrastructureError;

pub const ENV_WAREHOUSE: &str = "SLUICE_WAREHOUSE";
pub const ENV_DATABASE: &str = "SLUICE_DATABASE";
pub const ENV_SCHEMA: &str = "SLUICE_SCHEMA";

pub const DEFAULT_DATABASE: &str = "sluice.duckdb";
pub const DEFAULT_SCHEMA: &str = "main";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WarehouseKind {
    #[default]
    DuckDb,
}

impl FromStr for WarehouseKind {
    type Err = InfrastructureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "duckdb" => Ok(WarehouseKind::DuckDb),
            other => Err(InfrastructureError::UnsupportedWarehouse(other.to_string())),
        }
    }
}

impl fmt::Display for WarehouseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WarehouseKind::DuckDb => write!(f, "duckdb"),
        }
    }
}

/// Where `load` writes: engine, database file and schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WarehouseProfile {
    pub kind: WarehouseKind,
    pub database: String,
    pub schema: String,
}

impl Default for WarehouseProfile {
    fn default() -> Self {
        Self {
            kind: WarehouseKind::default(),
            database: DEFAULT_DATABASE.to_string(),
            schema: DEFAULT_SCHEMA.to_string(),
        }
    }
}

impl WarehouseProfile {
    /// Defaults layered with `SLUICE_*` environment variables.
    pub fn from_env() -> Result<Self, InfrastructureError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, InfrastructureError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut profile = Self::default();

        if let Some(val) = lookup(ENV_WAREHOUSE) {
            profile.kind = val.parse()?;
        }
        if let Some(val) = lookup(ENV_DATABASE) {
            info!(old = %profile.database, new = %val, "Overriding database via ENV");
            profile.database = val;
        }
        if let Some(val) = lookup(ENV_SCHEMA) {
            info!(old = %profile.schema, new = %val, "Overriding schema via ENV");
            profile.schema = val;
        }

        Ok(profile)
    }

    /// CLI flags win over the environment.
    pub fn with_overrides(mut self, database: Option<String>, schema: Option<String>) -> Self {
        if let Some(db) = database {
            self.database = db;
        }
        if let Some(schema) = schema {
            self.schema = schema;
        }
        self
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_profile_defaults() {
        let profile = WarehouseProfile::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(profile, WarehouseProfile::default());
        assert_eq!(profile.database, "sluice.duckdb");
        assert_eq!(profile.schema, "main");
    }

    #[test]
    fn test_profile_env_and_flag_layering() {
        let profile = WarehouseProfile::from_lookup(lookup_from(&[
            ("SLUICE_WAREHOUSE", "DuckDB"),
            ("SLUICE_DATABASE", ":memory:"),
            ("SLUICE_SCHEMA", "staging"),
        ]))
        .unwrap();
        assert_eq!(profile.database, ":memory:");
        assert_eq!(profile.schema, "staging");

        let profile = profile.with_overrides(Some("local.duckdb".into()), None);
        assert_eq!(profile.database, "local.duckdb");
        assert_eq!(profile.schema, "staging");
    }

    #[test]
    fn test_unknown_warehouse_is_rejected() {
        let err = WarehouseProfile::from_lookup(lookup_from(&[("SLUICE_WAREHOUSE", "snowflake")]))
            .unwrap_err();
        assert!(matches!(err, InfrastructureError::UnsupportedWarehouse(ref w) if w == "snowflake"));
    }
}
