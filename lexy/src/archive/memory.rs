//! In-memory package source.

use std::collections::BTreeMap;

use super::error::{ArchiveError, ArchiveResult};
use super::{EntryHandle, PackageSource};

/// A package source backed by a path → bytes map.
///
/// Useful for embedders that already hold unpacked package contents, and for
/// driving the importer in tests without building a zip.
///
/// # Example
///
/// ```
/// use lexy::archive::{MemorySource, PackageSource};
///
/// let mut source = MemorySource::new()
///     .with_entry("manifest.json", r#"{"format":"lexy-package"}"#);
///
/// let handle = source.entry("manifest.json").unwrap();
/// assert!(source.read_text(&handle).unwrap().contains("lexy-package"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    entries: BTreeMap<String, Vec<u8>>,
}

impl MemorySource {
    /// Create an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry (builder pattern).
    pub fn with_entry(mut self, path: impl Into<String>, contents: impl Into<Vec<u8>>) -> Self {
        self.insert(path, contents);
        self
    }

    /// Add or replace an entry.
    pub fn insert(&mut self, path: impl Into<String>, contents: impl Into<Vec<u8>>) {
        self.entries.insert(path.into(), contents.into());
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the source has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl PackageSource for MemorySource {
    fn entry(&self, path: &str) -> Option<EntryHandle> {
        self.entries
            .keys()
            .position(|key| key == path)
            .map(|index| EntryHandle::new(index, path))
    }

    fn read_binary(&mut self, handle: &EntryHandle) -> ArchiveResult<Vec<u8>> {
        self.entries
            .get(&handle.path)
            .cloned()
            .ok_or_else(|| ArchiveError::EntryRead {
                path: handle.path.clone(),
                reason: "entry no longer present".to_string(),
            })
    }

    fn entry_names(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }
}
