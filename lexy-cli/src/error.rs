//! CLI error types.

use std::fmt;

use lexy::config::ConfigError;
use lexy::importer::ImportError;
use lexy::library::LibraryError;
use lexy::logging::LoggingError;

/// Errors reported by CLI commands.
#[derive(Debug)]
pub enum CliError {
    /// Invalid or missing configuration.
    Config(String),

    /// Reading or writing the configuration file failed.
    ConfigFile(ConfigError),

    /// The course library could not be read or written.
    Library(LibraryError),

    /// A package import failed.
    Import(ImportError),

    /// Logging could not be set up.
    Logging(LoggingError),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::ConfigFile(e) => write!(f, "Configuration error: {}", e),
            CliError::Library(e) => write!(f, "Course library error: {}", e),
            // Import details are logged; users only see the generic message.
            CliError::Import(e) => write!(f, "{}", e.user_message()),
            CliError::Logging(e) => write!(f, "Failed to initialize logging: {}", e),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Config(_) => None,
            CliError::ConfigFile(e) => Some(e),
            CliError::Library(e) => Some(e),
            CliError::Import(e) => Some(e),
            CliError::Logging(e) => Some(e),
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        CliError::ConfigFile(e)
    }
}

impl From<LibraryError> for CliError {
    fn from(e: LibraryError) -> Self {
        CliError::Library(e)
    }
}

impl From<ImportError> for CliError {
    fn from(e: ImportError) -> Self {
        CliError::Import(e)
    }
}

impl From<LoggingError> for CliError {
    fn from(e: LoggingError) -> Self {
        CliError::Logging(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lexy::importer::GENERIC_FAILURE_MESSAGE;

    #[test]
    fn test_config_error_display() {
        let err = CliError::Config("missing library".to_string());
        assert!(err.to_string().contains("Configuration error"));
        assert!(err.to_string().contains("missing library"));
    }

    #[test]
    fn test_import_error_shows_generic_message() {
        let err: CliError = ImportError::MalformedManifest {
            reason: "expected value at line 1".to_string(),
        }
        .into();

        assert_eq!(err.to_string(), GENERIC_FAILURE_MESSAGE);
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_library_error_conversion() {
        let err: CliError = LibraryError::NotFound("es-101".to_string()).into();
        assert!(matches!(err, CliError::Library(_)));
        assert!(err.to_string().contains("es-101"));
    }
}
