use super::{LoggingConfig, ShellConfig};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Cannot read config file: {0}")]
    Read(String),

    #[error("Invalid config file: {0}")]
    Parse(String),
}

/// Main configuration, loaded from a TOML file with CLI flags layered on top.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub shell: ShellConfig,
}

/// Command-line values that take precedence over the config file.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub log_level: Option<String>,
    pub shell_class: Option<String>,
}

impl Config {
    /// Load the configuration. A missing `path` means defaults only.
    pub fn load(path: Option<&Path>, overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => {
                let raw = std::fs::read_to_string(path)
                    .map_err(|e| ConfigError::Read(format!("{}: {}", path.display(), e)))?;
                toml::from_str(&raw)
                    .map_err(|e| ConfigError::Parse(format!("{}: {}", path.display(), e)))?
            }
            None => Self::default(),
        };

        if let Some(level) = overrides.log_level {
            config.logging.level = level;
        }
        if let Some(class) = overrides.shell_class {
            config.shell.class = class;
        }
        Ok(config)
    }
}
