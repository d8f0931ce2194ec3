//! The `config.ini` file.
//!
//! ```ini
//! [library]
//! directory = /home/user/.local/share/lexy/courses
//!
//! [import]
//! auto_confirm = false
//! asset_prefix = assets/
//!
//! [logging]
//! level = info
//! directory = /home/user/.local/state/lexy/logs
//! ```
//!
//! Missing sections and keys take their defaults.

use std::fs;
use std::path::{Path, PathBuf};

use ini::Ini;

use super::error::{ConfigError, ConfigResult};
use super::keys::{parse_bool, validate_log_level, ConfigKey};
use super::{config_file_path, default_library_dir};
use crate::importer::{ImportConfig, DEFAULT_ASSET_PREFIX};
use crate::logging::{LoggingConfig, DEFAULT_LOG_LEVEL};

/// `[library]` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibrarySettings {
    /// Directory holding imported courses.
    pub directory: PathBuf,
}

/// `[import]` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSettings {
    /// Replace conflicting courses without asking.
    pub auto_confirm: bool,
    /// Prefix marking package-internal asset paths.
    pub asset_prefix: String,
}

/// `[logging]` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingSettings {
    pub level: String,
    /// Write a log file here in addition to stderr.
    pub directory: Option<PathBuf>,
}

/// Parsed configuration file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigFile {
    pub library: LibrarySettings,
    pub import: ImportSettings,
    pub logging: LoggingSettings,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            library: LibrarySettings {
                directory: default_library_dir(),
            },
            import: ImportSettings {
                auto_confirm: false,
                asset_prefix: DEFAULT_ASSET_PREFIX.to_string(),
            },
            logging: LoggingSettings {
                level: DEFAULT_LOG_LEVEL.to_string(),
                directory: None,
            },
        }
    }
}

impl ConfigFile {
    /// Load from the default location.
    pub fn load() -> ConfigResult<Self> {
        Self::load_from(&config_file_path())
    }

    /// Load from `path`, returning defaults if the file does not exist.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let ini = Ini::load_from_file(path).map_err(|e| match e {
            ini::Error::Io(source) => ConfigError::Io {
                path: path.to_path_buf(),
                source,
            },
            ini::Error::Parse(e) => ConfigError::Parse {
                path: path.to_path_buf(),
                reason: e.to_string(),
            },
        })?;

        Self::from_ini(&ini)
    }

    fn from_ini(ini: &Ini) -> ConfigResult<Self> {
        let mut config = Self::default();

        if let Some(dir) = non_empty(ini.get_from(Some("library"), "directory")) {
            config.library.directory = PathBuf::from(dir);
        }

        if let Some(value) = non_empty(ini.get_from(Some("import"), "auto_confirm")) {
            config.import.auto_confirm = parse_bool(ConfigKey::ImportAutoConfirm, value)?;
        }
        if let Some(prefix) = non_empty(ini.get_from(Some("import"), "asset_prefix")) {
            config.import.asset_prefix = prefix.to_string();
        }

        if let Some(level) = non_empty(ini.get_from(Some("logging"), "level")) {
            config.logging.level = validate_log_level(level)?;
        }
        config.logging.directory =
            non_empty(ini.get_from(Some("logging"), "directory")).map(PathBuf::from);

        Ok(config)
    }

    /// Save to the default location.
    pub fn save(&self) -> ConfigResult<()> {
        self.save_to(&config_file_path())
    }

    /// Save to `path`, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> ConfigResult<()> {
        let io_error = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_error)?;
        }

        self.to_ini().write_to_file(path).map_err(io_error)
    }

    fn to_ini(&self) -> Ini {
        let mut ini = Ini::new();

        ini.with_section(Some("library"))
            .set("directory", self.library.directory.to_string_lossy());

        ini.with_section(Some("import"))
            .set("auto_confirm", self.import.auto_confirm.to_string())
            .set("asset_prefix", self.import.asset_prefix.as_str());

        let directory = self
            .logging
            .directory
            .as_ref()
            .map(|d| d.to_string_lossy().into_owned())
            .unwrap_or_default();
        ini.with_section(Some("logging"))
            .set("level", self.logging.level.as_str())
            .set("directory", directory);

        ini
    }

    /// Pipeline settings derived from this file.
    pub fn import_config(&self) -> ImportConfig {
        ImportConfig::new().with_asset_prefix(self.import.asset_prefix.clone())
    }

    /// Logging settings derived from this file.
    pub fn logging_config(&self) -> LoggingConfig {
        let config = LoggingConfig::new(self.logging.level.clone());
        match self.logging.directory {
            Some(ref dir) => config.with_file(dir.clone()),
            None => config,
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp = TempDir::new().unwrap();
        let config = ConfigFile::load_from(&temp.path().join("config.ini")).unwrap();

        assert_eq!(config, ConfigFile::default());
        assert!(!config.import.auto_confirm);
        assert_eq!(config.import.asset_prefix, "assets/");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_save_and_load() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("config.ini");

        let mut config = ConfigFile::default();
        config.library.directory = temp.path().join("courses");
        config.import.auto_confirm = true;
        config.logging.level = "debug".to_string();
        config.logging.directory = Some(temp.path().join("logs"));
        config.save_to(&path).unwrap();

        let loaded = ConfigFile::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.ini");
        fs::write(&path, "[import]\nasset_prefix = media/\n").unwrap();

        let config = ConfigFile::load_from(&path).unwrap();

        assert_eq!(config.import.asset_prefix, "media/");
        assert!(!config.import.auto_confirm);
        assert_eq!(config.library.directory, default_library_dir());
        assert!(config.logging.directory.is_none());
    }

    #[test]
    fn test_invalid_boolean_rejected() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.ini");
        fs::write(&path, "[import]\nauto_confirm = perhaps\n").unwrap();

        let err = ConfigFile::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn test_import_config_uses_prefix() {
        let mut config = ConfigFile::default();
        config.import.asset_prefix = "media/".to_string();

        assert_eq!(config.import_config().asset_prefix, "media/");
    }

    #[test]
    fn test_logging_config_file_output() {
        let mut config = ConfigFile::default();
        assert!(config.logging_config().file_directory.is_none());

        config.logging.directory = Some(PathBuf::from("/var/log/lexy"));
        assert_eq!(
            config.logging_config().file_directory,
            Some(PathBuf::from("/var/log/lexy"))
        );
    }
}
