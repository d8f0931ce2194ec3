//! User configuration stored in `config.ini`.
//!
//! The file lives in the platform configuration directory
//! (`~/.config/lexy/config.ini` on Linux). Command-line arguments override
//! values read from it.

mod error;
mod file;
mod keys;

pub use error::{ConfigError, ConfigResult};
pub use file::{ConfigFile, ImportSettings, LibrarySettings, LoggingSettings};
pub use keys::ConfigKey;

use std::path::PathBuf;

/// Directory holding Lexy's configuration.
pub fn config_directory() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("lexy")
}

/// Path of the configuration file.
pub fn config_file_path() -> PathBuf {
    config_directory().join("config.ini")
}

/// Default directory for imported courses.
pub fn default_library_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("lexy")
        .join("courses")
}
