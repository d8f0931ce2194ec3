//! Addressable configuration keys for `config get` / `config set`.

use std::path::PathBuf;
use std::str::FromStr;

use super::error::{ConfigError, ConfigResult};
use super::file::ConfigFile;
use crate::logging::LOG_LEVELS;

/// A `section.key` entry in `config.ini`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    LibraryDirectory,
    ImportAutoConfirm,
    ImportAssetPrefix,
    LoggingLevel,
    LoggingDirectory,
}

impl ConfigKey {
    /// All keys in file order.
    pub fn all() -> &'static [ConfigKey] {
        &[
            ConfigKey::LibraryDirectory,
            ConfigKey::ImportAutoConfirm,
            ConfigKey::ImportAssetPrefix,
            ConfigKey::LoggingLevel,
            ConfigKey::LoggingDirectory,
        ]
    }

    /// Full name, e.g. `import.auto_confirm`.
    pub fn name(&self) -> &'static str {
        match self {
            Self::LibraryDirectory => "library.directory",
            Self::ImportAutoConfirm => "import.auto_confirm",
            Self::ImportAssetPrefix => "import.asset_prefix",
            Self::LoggingLevel => "logging.level",
            Self::LoggingDirectory => "logging.directory",
        }
    }

    /// INI section holding the key.
    pub fn section(&self) -> &'static str {
        self.name().split_once('.').map(|(s, _)| s).unwrap_or("")
    }

    /// Key name within its section.
    pub fn key_name(&self) -> &'static str {
        self.name().split_once('.').map(|(_, k)| k).unwrap_or("")
    }

    /// One-line explanation shown by `config list`.
    pub fn description(&self) -> &'static str {
        match self {
            Self::LibraryDirectory => "Where imported courses are stored",
            Self::ImportAutoConfirm => "Replace a course in the same language without asking",
            Self::ImportAssetPrefix => "Path prefix marking references to files inside a package",
            Self::LoggingLevel => "Minimum log level",
            Self::LoggingDirectory => "Directory for daily log files; unset logs to stderr only",
        }
    }

    /// Current value as a string; empty when unset.
    pub fn get(&self, config: &ConfigFile) -> String {
        match self {
            Self::LibraryDirectory => config.library.directory.display().to_string(),
            Self::ImportAutoConfirm => config.import.auto_confirm.to_string(),
            Self::ImportAssetPrefix => config.import.asset_prefix.clone(),
            Self::LoggingLevel => config.logging.level.clone(),
            Self::LoggingDirectory => config
                .logging
                .directory
                .as_ref()
                .map(|d| d.display().to_string())
                .unwrap_or_default(),
        }
    }

    /// Validate `value` and store it.
    pub fn set(&self, config: &mut ConfigFile, value: &str) -> ConfigResult<()> {
        let value = value.trim();
        match self {
            Self::LibraryDirectory => {
                if value.is_empty() {
                    return Err(self.invalid(value, "directory must not be empty"));
                }
                config.library.directory = PathBuf::from(value);
            }
            Self::ImportAutoConfirm => {
                config.import.auto_confirm = parse_bool(*self, value)?;
            }
            Self::ImportAssetPrefix => {
                if value.is_empty() {
                    return Err(self.invalid(value, "prefix must not be empty"));
                }
                config.import.asset_prefix = value.to_string();
            }
            Self::LoggingLevel => {
                config.logging.level = validate_log_level(value)?;
            }
            Self::LoggingDirectory => {
                config.logging.directory = if value.is_empty() {
                    None
                } else {
                    Some(PathBuf::from(value))
                };
            }
        }
        Ok(())
    }

    fn invalid(&self, value: &str, reason: &str) -> ConfigError {
        ConfigError::InvalidValue {
            key: self.name().to_string(),
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }
}

impl FromStr for ConfigKey {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::all()
            .iter()
            .copied()
            .find(|key| key.name() == wanted)
            .ok_or_else(|| ConfigError::UnknownKey(s.to_string()))
    }
}

pub(super) fn parse_bool(key: ConfigKey, value: &str) -> ConfigResult<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        _ => Err(key.invalid(value, "expected true or false")),
    }
}

pub(super) fn validate_log_level(value: &str) -> ConfigResult<String> {
    let level = value.to_ascii_lowercase();
    if LOG_LEVELS.contains(&level.as_str()) {
        Ok(level)
    } else {
        Err(ConfigKey::LoggingLevel.invalid(
            value,
            &format!("expected one of {}", LOG_LEVELS.join(", ")),
        ))
    }
}
