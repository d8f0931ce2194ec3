//! Read access to `.lexy` package containers.
//!
//! A package is a zip archive. This module knows nothing about courses; it
//! only answers "is there an entry at this path" and "give me its bytes".
//!
//! # Overview
//!
//! ```text
//! raw bytes ──► PackageArchive ──► entry(path) ──► EntryHandle
//!                (zip container)                    │
//!                                                   ├──► read_text()
//!                                                   └──► read_binary()
//! ```
//!
//! Everything above this layer talks to the [`PackageSource`] trait, so the
//! importer can be driven by an in-memory [`MemorySource`] in tests.

mod error;
mod memory;
mod zip_archive;

pub use error::{ArchiveError, ArchiveResult};
pub use memory::MemorySource;
pub use zip_archive::PackageArchive;

/// Handle to an entry that was found in a package.
///
/// Handles are only meaningful for the source that produced them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryHandle {
    /// Position of the entry inside its source.
    pub index: usize,
    /// Full path of the entry within the package.
    pub path: String,
}

impl EntryHandle {
    /// Create a new entry handle.
    pub fn new(index: usize, path: impl Into<String>) -> Self {
        Self {
            index,
            path: path.into(),
        }
    }
}

/// Named-entry lookup and content retrieval over a package container.
///
/// Reads must be repeatable: reading the same handle twice yields the same
/// bytes.
pub trait PackageSource {
    /// Look up a file entry by its full path.
    ///
    /// Directory entries are never returned.
    fn entry(&self, path: &str) -> Option<EntryHandle>;

    /// Read an entry as raw bytes.
    fn read_binary(&mut self, handle: &EntryHandle) -> ArchiveResult<Vec<u8>>;

    /// Paths of all file entries, in container order.
    fn entry_names(&self) -> Vec<String>;

    /// Read an entry as UTF-8 text.
    ///
    /// A leading byte order mark is dropped.
    fn read_text(&mut self, handle: &EntryHandle) -> ArchiveResult<String> {
        let bytes = self.read_binary(handle)?;
        decode_text(&handle.path, bytes)
    }
}

/// Decode entry bytes as UTF-8, stripping a BOM if present.
pub(crate) fn decode_text(path: &str, bytes: Vec<u8>) -> ArchiveResult<String> {
    let text = String::from_utf8(bytes).map_err(|_| ArchiveError::InvalidUtf8 {
        path: path.to_string(),
    })?;

    match text.strip_prefix('\u{feff}') {
        Some(stripped) => Ok(stripped.to_string()),
        None => Ok(text),
    }
}
