use std::fs;
use std::path::{Path, PathBuf};

use directories::BaseDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct BookwheelConfig {
    pub version: u32,
    pub columns: ColumnConfig,
    pub wheel: WheelConfig,
}

impl Default for BookwheelConfig {
    fn default() -> Self {
        Self {
            version: 1,
            columns: ColumnConfig::default(),
            wheel: WheelConfig::default(),
        }
    }
}

/// Header names of the recognized spreadsheet columns.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ColumnConfig {
    pub title: String,
    pub author: String,
    pub status: String,
    pub proposer: String,
}

impl Default for ColumnConfig {
    fn default() -> Self {
        Self {
            title: "Nombre".to_string(),
            author: "Autor".to_string(),
            status: "Estatus".to_string(),
            proposer: "Propuesto por".to_string(),
        }
    }
}

/// Ranges the spin duration and number of full turns are drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct WheelConfig {
    pub min_duration_secs: u64,
    pub max_duration_secs: u64,
    pub min_spins: u32,
    pub max_spins: u32,
}

impl Default for WheelConfig {
    fn default() -> Self {
        Self {
            min_duration_secs: 10,
            max_duration_secs: 24,
            min_spins: 15,
            max_spins: 34,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not resolve home directory for config path")]
    HomeDirectoryUnavailable,
    #[error("failed to read config at {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid config: {message}")]
    Validation { message: String },
}

pub fn resolve_config_path() -> Result<PathBuf, ConfigError> {
    let base_dirs = BaseDirs::new().ok_or(ConfigError::HomeDirectoryUnavailable)?;
    Ok(base_dirs
        .home_dir()
        .join(".config")
        .join("bookwheel")
        .join("config.toml"))
}

pub fn load_config(path: &Path) -> Result<BookwheelConfig, ConfigError> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let parsed: BookwheelConfig = toml::from_str(&raw).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    validate_config(&parsed)?;
    Ok(parsed)
}

/// Loads `path` when it exists, otherwise falls back to the defaults.
pub fn load_config_or_default(path: &Path) -> Result<BookwheelConfig, ConfigError> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        return Ok(BookwheelConfig::default());
    }
    load_config(path)
}

pub fn validate_config(config: &BookwheelConfig) -> Result<(), ConfigError> {
    if config.version != 1 {
        return Err(validation("version must be 1"));
    }

    let columns = [
        ("title", &config.columns.title),
        ("author", &config.columns.author),
        ("status", &config.columns.status),
        ("proposer", &config.columns.proposer),
    ];
    for (field, value) in columns {
        if value.trim().is_empty() {
            return Err(validation(format!("columns.{field} must be non-empty")));
        }
    }

    let wheel = &config.wheel;
    if wheel.min_duration_secs == 0 {
        return Err(validation("wheel.min_duration_secs must be at least 1"));
    }
    if wheel.min_duration_secs > wheel.max_duration_secs {
        return Err(validation(
            "wheel.min_duration_secs must not exceed wheel.max_duration_secs",
        ));
    }
    if wheel.min_spins == 0 {
        return Err(validation("wheel.min_spins must be at least 1"));
    }
    if wheel.min_spins > wheel.max_spins {
        return Err(validation("wheel.min_spins must not exceed wheel.max_spins"));
    }

    Ok(())
}

fn validation(message: impl Into<String>) -> ConfigError {
    ConfigError::Validation {
        message: message.into(),
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn defaults_match_original_sheet_layout() {
        let config = BookwheelConfig::default();
        assert_eq!(config.columns.title, "Nombre");
        assert_eq!(config.columns.author, "Autor");
        assert_eq!(config.columns.status, "Estatus");
        assert_eq!(config.columns.proposer, "Propuesto por");
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let temp = tempfile::tempdir().expect("temp dir");
        let config =
            load_config_or_default(&temp.path().join("config.toml")).expect("default config");
        assert_eq!(config, BookwheelConfig::default());
    }

    #[test]
    fn partial_file_keeps_defaults_for_missing_sections() {
        let temp = tempfile::tempdir().expect("temp dir");
        let path = temp.path().join("config.toml");
        fs::write(
            &path,
            r#"
version = 1

[columns]
title = "Title"
"#,
        )
        .expect("write config");

        let config = load_config(&path).expect("config");
        assert_eq!(config.columns.title, "Title");
        assert_eq!(config.columns.status, "Estatus");
        assert_eq!(config.wheel, WheelConfig::default());
    }

    #[test]
    fn load_config_rejects_unknown_version() {
        let temp = tempfile::tempdir().expect("temp dir");
        let path = temp.path().join("config.toml");
        fs::write(&path, "version = 2\n").expect("write config");

        let error = load_config(&path).expect_err("invalid version");
        assert!(error.to_string().contains("version must be 1"));
    }

    #[test]
    fn load_config_reports_parse_errors_with_path() {
        let temp = tempfile::tempdir().expect("temp dir");
        let path = temp.path().join("config.toml");
        fs::write(&path, "version = [").expect("write config");

        let error = load_config(&path).expect_err("parse error");
        assert!(matches!(error, ConfigError::Parse { .. }));
        assert!(error.to_string().contains("config.toml"));
    }

    #[test]
    fn validate_rejects_blank_columns() {
        let mut config = BookwheelConfig::default();
        config.columns.status = "  ".to_string();
        let error = validate_config(&config).expect_err("blank column");
        assert!(error.to_string().contains("columns.status"));
    }

    #[test]
    fn validate_rejects_inverted_wheel_ranges() {
        let mut config = BookwheelConfig::default();
        config.wheel.min_duration_secs = 30;
        assert!(validate_config(&config).is_err());

        let mut config = BookwheelConfig::default();
        config.wheel.min_spins = 0;
        assert!(validate_config(&config).is_err());

        let mut config = BookwheelConfig::default();
        config.wheel.max_spins = 3;
        assert!(validate_config(&config).is_err());
    }
}
