//! Zip-backed package container.

use std::fmt;
use std::io::{Cursor, Read};

use sha2::{Digest, Sha256};
use zip::ZipArchive;

use super::error::{ArchiveError, ArchiveResult};
use super::{EntryHandle, PackageSource};

/// A `.lexy` package opened from raw bytes.
///
/// The archive owns its decoded buffers; they are released when the value is
/// dropped at the end of an import.
pub struct PackageArchive {
    inner: ZipArchive<Cursor<Vec<u8>>>,
    byte_len: usize,
    sha256: String,
}

impl PackageArchive {
    /// Open a package from its raw bytes.
    ///
    /// Fails with [`ArchiveError::InvalidContainer`] if the bytes are not a
    /// zip archive. The file extension of the original package is never
    /// consulted.
    pub fn from_bytes(bytes: Vec<u8>) -> ArchiveResult<Self> {
        let byte_len = bytes.len();
        let sha256 = hex_digest(&bytes);

        let inner = ZipArchive::new(Cursor::new(bytes)).map_err(|e| {
            ArchiveError::InvalidContainer {
                reason: e.to_string(),
            }
        })?;

        Ok(Self {
            inner,
            byte_len,
            sha256,
        })
    }

    /// Number of entries in the container, directories included.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Whether the container has no entries at all.
    pub fn is_empty(&self) -> bool {
        self.inner.len() == 0
    }

    /// Size of the raw package in bytes.
    pub fn byte_len(&self) -> usize {
        self.byte_len
    }

    /// SHA-256 of the raw package bytes, lowercase hex.
    pub fn sha256(&self) -> &str {
        &self.sha256
    }
}

impl PackageSource for PackageArchive {
    fn entry(&self, path: &str) -> Option<EntryHandle> {
        if path.is_empty() || path.ends_with('/') {
            return None;
        }

        self.inner
            .index_for_name(path)
            .map(|index| EntryHandle::new(index, path))
    }

    fn read_binary(&mut self, handle: &EntryHandle) -> ArchiveResult<Vec<u8>> {
        let mut file = self
            .inner
            .by_index(handle.index)
            .map_err(|e| ArchiveError::EntryRead {
                path: handle.path.clone(),
                reason: e.to_string(),
            })?;

        let mut buffer = Vec::with_capacity(file.size() as usize);
        file.read_to_end(&mut buffer)
            .map_err(|e| ArchiveError::EntryRead {
                path: handle.path.clone(),
                reason: e.to_string(),
            })?;

        Ok(buffer)
    }

    fn entry_names(&self) -> Vec<String> {
        self.inner
            .file_names()
            .filter(|name| !name.ends_with('/'))
            .map(str::to_string)
            .collect()
    }
}

impl fmt::Debug for PackageArchive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PackageArchive")
            .field("entries", &self.inner.len())
            .field("byte_len", &self.byte_len)
            .field("sha256", &self.sha256)
            .finish()
    }
}

/// SHA-256 of `bytes` as lowercase hex.
pub(crate) fn hex_digest(bytes: &[u8]) -> String {
    format!("{:x}", Sha256::digest(bytes))
}
