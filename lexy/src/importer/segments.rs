//! Data segment loading.
//!
//! Each of the four segment kinds is loaded from the data file the manifest
//! declares for it:
//!
//! | Declaration | Entry in package | Result |
//! |---|---|---|
//! | none | - | empty, no lookup |
//! | declared | missing | empty, logged |
//! | declared | present, valid JSON array | records |
//! | declared | present, anything else | [`ImportError::MalformedSegment`] |
//!
//! Records are not checked field by field; any JSON value is accepted as a
//! record.

use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::archive::PackageSource;
use crate::package::{CultureItem, PackageManifest, SegmentKind, SegmentRecords};

use super::error::{ImportError, ImportResult};

/// Segments loaded from a package, before asset resolution.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadedSegments {
    pub dictionary: SegmentRecords,
    pub grammar: SegmentRecords,
    pub culture: Vec<CultureItem>,
    pub units: SegmentRecords,
    pub stats: SegmentStats,
}

/// What the loader found while loading segments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SegmentStats {
    /// Segments the manifest declared.
    pub declared: usize,
    /// Declared segments whose entry was present and parsed.
    pub loaded: usize,
    /// Declared segments whose entry was missing: (kind, declared path).
    pub dangling: Vec<(SegmentKind, String)>,
}

impl LoadedSegments {
    /// Number of records in a segment.
    pub fn len_of(&self, kind: SegmentKind) -> usize {
        match kind {
            SegmentKind::Dictionary => self.dictionary.len(),
            SegmentKind::Grammar => self.grammar.len(),
            SegmentKind::Culture => self.culture.len(),
            SegmentKind::Units => self.units.len(),
        }
    }
}

/// Load all four segments declared by `manifest`.
pub fn load_segments<S: PackageSource + ?Sized>(
    source: &mut S,
    manifest: &PackageManifest,
) -> ImportResult<LoadedSegments> {
    let mut stats = SegmentStats::default();

    let dictionary = load_segment(source, manifest, SegmentKind::Dictionary, &mut stats)?;
    let grammar = load_segment(source, manifest, SegmentKind::Grammar, &mut stats)?;
    let culture = load_segment(source, manifest, SegmentKind::Culture, &mut stats)?;
    let units = load_segment(source, manifest, SegmentKind::Units, &mut stats)?;

    Ok(LoadedSegments {
        dictionary,
        grammar,
        culture,
        units,
        stats,
    })
}

/// Load one segment as a list of `T`.
fn load_segment<S, T>(
    source: &mut S,
    manifest: &PackageManifest,
    kind: SegmentKind,
    stats: &mut SegmentStats,
) -> ImportResult<Vec<T>>
where
    S: PackageSource + ?Sized,
    T: DeserializeOwned,
{
    let Some(data_file) = manifest.data_file(kind) else {
        return Ok(Vec::new());
    };
    stats.declared += 1;

    let Some(handle) = source.entry(&data_file.path) else {
        warn!(
            segment = %kind,
            path = %data_file.path,
            "Declared data file not found in package, treating segment as empty"
        );
        stats.dangling.push((kind, data_file.path.clone()));
        return Ok(Vec::new());
    };

    let malformed = |reason: String| ImportError::MalformedSegment {
        segment: kind,
        path: data_file.path.clone(),
        reason,
    };

    let text = source
        .read_text(&handle)
        .map_err(|e| malformed(e.to_string()))?;
    let records: Vec<T> = serde_json::from_str(&text).map_err(|e| malformed(e.to_string()))?;

    debug!(segment = %kind, path = %data_file.path, records = records.len(), "Loaded segment");
    stats.loaded += 1;

    Ok(records)
}
