//! Error types for the import pipeline.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::archive::ArchiveError;
use crate::package::SegmentKind;

/// Result type for import operations.
pub type ImportResult<T> = Result<T, ImportError>;

/// The one message shown to users for any failed import.
///
/// Details go to the log; the user only learns that the package was not
/// accepted.
pub const GENERIC_FAILURE_MESSAGE: &str =
    "Failed to process .lexy file. Ensure it is a valid package.";

/// Fatal errors that abort an import before anything is delivered.
///
/// A missing asset is not an error; see
/// [`MissingAsset`](super::MissingAsset). Declining the conflict prompt is
/// not an error either; it yields [`ImportOutcome::Cancelled`](super::ImportOutcome).
#[derive(Debug, Error)]
pub enum ImportError {
    /// The package file could not be read from disk.
    #[error("failed to read package {}: {source}", path.display())]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The bytes are not a valid package container.
    #[error("invalid package container: {0}")]
    Format(#[source] ArchiveError),

    /// The package has no manifest entry.
    #[error("package has no {path}")]
    MissingManifest { path: String },

    /// The manifest exists but cannot be parsed or has an invalid shape.
    #[error("malformed manifest: {reason}")]
    MalformedManifest { reason: String },

    /// The manifest's format sentinel is missing or not recognized.
    #[error("unsupported package format {}", found.as_deref().unwrap_or("(none)"))]
    UnsupportedFormat { found: Option<String> },

    /// A declared and present data file is not a well-formed JSON array.
    #[error("malformed {segment} data file {path}: {reason}")]
    MalformedSegment {
        segment: SegmentKind,
        path: String,
        reason: String,
    },

    /// A referenced asset exists but could not be read.
    #[error("failed to read asset {path}: {reason}")]
    AssetRead { path: String, reason: String },

    /// Another import is still running on this pipeline.
    #[error("another import is already in progress")]
    ImportInProgress,
}

/// Coarse classification of [`ImportError`], for logs and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportErrorKind {
    Io,
    Format,
    MissingManifest,
    MalformedManifest,
    UnsupportedFormat,
    MalformedSegment,
    AssetRead,
    Busy,
}

impl ImportError {
    /// Classify this error.
    pub fn kind(&self) -> ImportErrorKind {
        match self {
            Self::ReadFailed { .. } => ImportErrorKind::Io,
            Self::Format(_) => ImportErrorKind::Format,
            Self::MissingManifest { .. } => ImportErrorKind::MissingManifest,
            Self::MalformedManifest { .. } => ImportErrorKind::MalformedManifest,
            Self::UnsupportedFormat { .. } => ImportErrorKind::UnsupportedFormat,
            Self::MalformedSegment { .. } => ImportErrorKind::MalformedSegment,
            Self::AssetRead { .. } => ImportErrorKind::AssetRead,
            Self::ImportInProgress => ImportErrorKind::Busy,
        }
    }

    /// Message suitable for showing to the user.
    pub fn user_message(&self) -> &'static str {
        GENERIC_FAILURE_MESSAGE
    }
}

impl From<ArchiveError> for ImportError {
    fn from(e: ArchiveError) -> Self {
        ImportError::Format(e)
    }
}
