//! Error types for package container access.

use thiserror::Error;

/// Result type for archive operations.
pub type ArchiveResult<T> = Result<T, ArchiveError>;

/// Errors that can occur while opening or reading a package container.
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// The bytes are not a readable zip container.
    #[error("not a valid package archive: {reason}")]
    InvalidContainer { reason: String },

    /// An entry exists but its contents could not be read.
    #[error("failed to read entry {path}: {reason}")]
    EntryRead { path: String, reason: String },

    /// An entry was read as text but is not valid UTF-8.
    #[error("entry {path} is not valid UTF-8")]
    InvalidUtf8 { path: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ArchiveError::EntryRead {
            path: "assets/cat.png".to_string(),
            reason: "corrupt deflate stream".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "failed to read entry assets/cat.png: corrupt deflate stream"
        );
    }
}
