use crate::error::{ChefAnalyzeError, Result};
use crate::finder::{find_chef_workstation_config_file, find_config_file};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// The parts of a Chef Workstation `config.toml` this tool reads.
/// Sections and keys it does not know about are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WorkstationConfig {
    pub log: LogSettings,
    pub telemetry: TelemetrySettings,
    pub chef: ChefSettings,
}

/// `[log]`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LogSettings {
    pub level: Option<String>,
    pub location: Option<PathBuf>,
}

/// `[telemetry]`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TelemetrySettings {
    pub enable: Option<bool>,
    pub dev: Option<bool>,
}

/// `[chef]`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ChefSettings {
    pub trusted_certs_dir: Option<PathBuf>,
}

impl WorkstationConfig {
    /// Locate `name` with [`find_config_file`] and load it.
    pub fn load(name: &str) -> Result<(PathBuf, Self)> {
        let path = find_config_file(name)?;
        let config = Self::from_path(&path)?;
        Ok((path, config))
    }

    /// Load the default `config.toml`.
    pub fn load_default() -> Result<(PathBuf, Self)> {
        let path = find_chef_workstation_config_file()?;
        let config = Self::from_path(&path)?;
        Ok((path, config))
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "Loading config file");
        let content = fs::read_to_string(path).map_err(|source| ChefAnalyzeError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ChefAnalyzeError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// The configured log level, lowercased. `None` when unset.
    pub fn log_level(&self) -> Result<Option<String>> {
        let Some(level) = self.log.level.as_deref() else {
            return Ok(None);
        };
        let level = level.trim().to_ascii_lowercase();
        if LOG_LEVELS.contains(&level.as_str()) {
            Ok(Some(level))
        } else {
            Err(ChefAnalyzeError::InvalidConfiguration(format!(
                "unknown log level '{}', expected one of: {}",
                level,
                LOG_LEVELS.join(", ")
            )))
        }
    }
}
