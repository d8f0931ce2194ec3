//! Logging setup.
//!
//! Logs go to stderr and, when a directory is configured, to a
//! `lexy.log` file written by a background thread. `RUST_LOG` overrides the
//! configured level.

use std::fs;
use std::io;
use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;
use tracing::level_filters::LevelFilter;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Level used when none is configured.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Accepted level names.
pub const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

const LOG_FILE_PREFIX: &str = "lexy";
const LOG_FILE_SUFFIX: &str = "log";

/// Errors raised while installing the subscriber.
#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("invalid log level '{0}'")]
    InvalidLevel(String),

    #[error("failed to create log directory {}: {source}", path.display())]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to open log file: {0}")]
    Appender(String),

    #[error("a global logger is already installed")]
    AlreadyInitialized,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    pub level: String,
    /// Also write logs to a file in this directory.
    pub file_directory: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self::new(DEFAULT_LOG_LEVEL)
    }
}

impl LoggingConfig {
    pub fn new(level: impl Into<String>) -> Self {
        Self {
            level: level.into(),
            file_directory: None,
        }
    }

    /// Set the level.
    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }

    /// Enable file output in `directory`.
    pub fn with_file(mut self, directory: PathBuf) -> Self {
        self.file_directory = Some(directory);
        self
    }

    /// Parsed level.
    pub fn level_filter(&self) -> Result<LevelFilter, LoggingError> {
        LevelFilter::from_str(&self.level).map_err(|_| LoggingError::InvalidLevel(self.level.clone()))
    }

    /// Path of the log file, when file output is enabled.
    pub fn log_file_path(&self) -> Option<PathBuf> {
        self.file_directory
            .as_ref()
            .map(|dir| dir.join(format!("{}.{}", LOG_FILE_PREFIX, LOG_FILE_SUFFIX)))
    }
}

/// Keeps the file writer alive. Buffered lines are flushed when dropped.
#[must_use = "dropping the guard stops file logging"]
pub struct LogGuard {
    _worker: Option<WorkerGuard>,
}

/// Install the global subscriber.
///
/// Hold the returned guard until the program exits.
pub fn init_logging(config: &LoggingConfig) -> Result<LogGuard, LoggingError> {
    let filter = EnvFilter::builder()
        .with_default_directive(config.level_filter()?.into())
        .from_env_lossy();

    let stderr_layer = fmt::layer()
        .with_writer(io::stderr)
        .with_target(false)
        .compact();

    let (file_layer, worker) = match config.file_directory {
        Some(ref dir) => {
            fs::create_dir_all(dir).map_err(|source| LoggingError::CreateDirectory {
                path: dir.clone(),
                source,
            })?;

            let appender = RollingFileAppender::builder()
                .rotation(Rotation::NEVER)
                .filename_prefix(LOG_FILE_PREFIX)
                .filename_suffix(LOG_FILE_SUFFIX)
                .build(dir)
                .map_err(|e| LoggingError::Appender(e.to_string()))?;
            let (writer, guard) = tracing_appender::non_blocking(appender);

            let layer = fmt::layer().with_writer(writer).with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .map_err(|_| LoggingError::AlreadyInitialized)?;

    Ok(LogGuard { _worker: worker })
}
