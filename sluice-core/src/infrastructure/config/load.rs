// sluice-core/src/infrastructure/config/load.rs

use anyhow::Context;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

use crate::domain::spec::LoadConfig;
use crate::infrastructure::error::InfrastructureError;
use crate::infrastructure::fs::{atomic_write, write_json};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigFormat {
    Json,
    Yaml,
}

impl ConfigFormat {
    fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yml") || ext.eq_ignore_ascii_case("yaml") => {
                ConfigFormat::Yaml
            }
            _ => ConfigFormat::Json,
        }
    }
}

/// Reads a column config (`.json`, `.yml` or `.yaml`) and checks its
/// structural rules.
#[instrument]
pub fn load_config(path: &Path) -> Result<LoadConfig, InfrastructureError> {
    if !path.exists() {
        return Err(InfrastructureError::ConfigNotFound(
            path.display().to_string(),
        ));
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config at {:?}", path))?;

    let config: LoadConfig = match ConfigFormat::from_path(path) {
        ConfigFormat::Json => serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse JSON config at {:?}", path))?,
        ConfigFormat::Yaml => serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse YAML config at {:?}", path))?,
    };

    config
        .check()
        .map_err(|e| InfrastructureError::ConfigError(format!("{:?}: {}", path, e)))?;

    info!(
        columns = config.expected_columns.len(),
        expected_rows = config.expected_rows,
        "Config loaded"
    );
    Ok(config)
}

/// Writes `config` as JSON or YAML (by extension). An existing file is
/// only replaced when `overwrite` is set.
#[instrument(skip(config))]
pub fn save_config(
    path: &Path,
    config: &LoadConfig,
    overwrite: bool,
) -> Result<(), InfrastructureError> {
    if path.exists() && !overwrite {
        return Err(InfrastructureError::ConfigError(format!(
            "{:?} already exists (use --force to replace it)",
            path
        )));
    }

    match ConfigFormat::from_path(path) {
        ConfigFormat::Json => write_json(path, config)?,
        ConfigFormat::Yaml => atomic_write(path, serde_yaml::to_string(config)?)?,
    }
    info!(path = ?path, "Config written");
    Ok(())
}

/// Picks the CSV to read: an explicit path wins, otherwise
/// `source_file_name` is joined to `data_dir` (or the config's own folder).
pub fn resolve_source_path(
    config: &LoadConfig,
    config_path: &Path,
    explicit: Option<&Path>,
    data_dir: Option<&Path>,
) -> Result<PathBuf, InfrastructureError> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }

    let file_name = config.source_file_name.as_deref().ok_or_else(|| {
        InfrastructureError::ConfigError(
            "No CSV given: pass --csv or set 'source_file_name' in the config".to_string(),
        )
    })?;

    let base = match data_dir {
        Some(dir) => dir.to_path_buf(),
        None => config_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default(),
    };
    Ok(base.join(file_name))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::spec::DataType;
    use anyhow::Result;
    use tempfile::tempdir;

    #[test]
    fn test_load_json_config() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("csv_config.json");
        fs::write(
            &path,
            r#"{"source_file_name": "people.csv", "expected_rows": 3,
                "expected_columns": [{"name": "id", "datatype": "int"}]}"#,
        )?;

        let config = load_config(&path)?;
        assert_eq!(config.expected_rows, 3);
        assert_eq!(config.expected_columns[0].data_type, DataType::Int);
        Ok(())
    }

    #[test]
    fn test_load_yaml_config() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("people.yml");
        fs::write(
            &path,
            "expected_rows: 1\nexpected_columns:\n  - name: joined\n    datatype: date\n    nullable: NO\n",
        )?;

        let config = load_config(&path)?;
        assert_eq!(config.expected_columns[0].data_type, DataType::Date);
        assert!(!config.expected_columns[0].nullable);
        Ok(())
    }

    #[test]
    fn test_missing_config_is_reported() {
        let err = load_config(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, InfrastructureError::ConfigNotFound(_)));
    }

    #[test]
    fn test_malformed_and_invalid_configs() -> Result<()> {
        let dir = tempdir()?;

        let broken = dir.path().join("broken.json");
        fs::write(&broken, "{ not json")?;
        assert!(matches!(
            load_config(&broken).unwrap_err(),
            InfrastructureError::ConfigError(_)
        ));

        let empty = dir.path().join("empty.json");
        fs::write(&empty, r#"{"expected_rows": 0, "expected_columns": []}"#)?;
        let err = load_config(&empty).unwrap_err();
        assert!(err.to_string().contains("empty.json"));
        Ok(())
    }

    #[test]
    fn test_save_config_round_trips_and_refuses_overwrite() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("scaffold.yaml");
        let mut config = LoadConfig::new(
            4,
            vec![crate::domain::spec::ColumnSpec::new("city", DataType::String)],
        );
        config.source_file_name = Some("cities.csv".into());

        save_config(&path, &config, false)?;
        let reloaded = load_config(&path)?;
        assert_eq!(reloaded.expected_rows, 4);
        assert_eq!(reloaded.source_file_name.as_deref(), Some("cities.csv"));

        assert!(save_config(&path, &config, false).is_err());
        save_config(&path, &config, true)?;
        Ok(())
    }

    #[test]
    fn test_resolve_source_path() {
        let mut config = LoadConfig::new(0, vec![]);
        let cfg_path = Path::new("/data/configs/csv_config.json");

        assert!(resolve_source_path(&config, cfg_path, None, None).is_err());

        config.source_file_name = Some("people.csv".into());
        assert_eq!(
            resolve_source_path(&config, cfg_path, None, None).unwrap(),
            PathBuf::from("/data/configs/people.csv")
        );
        assert_eq!(
            resolve_source_path(&config, cfg_path, None, Some(Path::new("/in"))).unwrap(),
            PathBuf::from("/in/people.csv")
        );
        assert_eq!(
            resolve_source_path(&config, cfg_path, Some(Path::new("x.csv")), None).unwrap(),
            PathBuf::from("x.csv")
        );
    }
}
