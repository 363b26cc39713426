use crate::options::Options;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Program configuration read from a configuration file
#[derive(Clone, Deserialize, Debug, Default, PartialEq)]
pub(crate) struct Config {
    /// Gameplay & presentation settings
    #[serde(default)]
    pub(crate) options: Options,
}

impl Config {
    /// Return the default configuration file path
    pub(crate) fn default_path() -> Result<PathBuf, ConfigError> {
        dirs::config_local_dir()
            .map(|p| p.join("gridsnake").join("config.toml"))
            .ok_or(ConfigError::NoPath)
    }

    /// Read configuration from a file on disk.  If the file does not exist and
    /// `allow_missing` is true, a default `Config` value is returned.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the file could not be read or if the file's contents
    /// could not be deserialized, including when the options it contains are
    /// out of range.
    pub(crate) fn load(path: &Path, allow_missing: bool) -> Result<Config, ConfigError> {
        let content = match fs_err::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && allow_missing => {
                log::debug!("no configuration file at {}; using defaults", path.display());
                return Ok(Config::default());
            }
            Err(e) => return Err(ConfigError::Read(e)),
        };
        let config = toml::from_str(&content)?;
        log::debug!("loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Load the configuration file at the default path, falling back to the
    /// default configuration if there is no file or no default path.
    pub(crate) fn load_default() -> Result<Config, ConfigError> {
        match Config::default_path() {
            Ok(path) => Config::load(&path, true),
            Err(e) => {
                log::warn!("{e}; using default configuration");
                Ok(Config::default())
            }
        }
    }
}

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("failed to determine path to local configuration directory")]
    NoPath,
    #[error("failed to read configuration file")]
    Read(#[from] std::io::Error),
    #[error("failed to parse configuration file")]
    Parse(#[from] toml::de::Error),
}
