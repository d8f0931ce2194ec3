//! Course package data model.
//!
//! This module provides the data structures that flow through the import
//! pipeline: the package manifest, the culture items that carry asset
//! references, and the assembled course record handed to the application.
//!
//! # Overview
//!
//! A `.lexy` package is a zip archive laid out like this:
//!
//! ```text
//! manifest.json              ← PackageManifest (mandatory)
//! data/dictionary.json       ← declared in manifest.dataFiles.dictionary
//! data/grammar.json          ← declared in manifest.dataFiles.grammar
//! data/culture.json          ← declared in manifest.dataFiles.culture
//! data/units.json            ← declared in manifest.dataFiles.units
//! assets/...                 ← binaries referenced from culture items
//! ```
//!
//! # Type Hierarchy
//!
//! ```text
//! CourseRecord
//! ├── id, course_title, language
//! ├── units:        Vec<Value>   (schema owned by the app)
//! ├── dictionary:   Vec<Value>
//! ├── grammar:      Vec<Value>
//! └── culture_items: Vec<CultureItem>   (records kept as parsed)
//!                    ├── thumbnailUrl   ← asset reference
//!                    └── assets[]
//!                        └── value      ← asset reference
//! ```

mod course;
mod culture;
mod manifest;
mod segment;

pub use course::{CourseRecord, MediaMap, SegmentRecords};
pub use culture::{AssetKind, CultureAsset, CultureItem};
pub use manifest::{
    DataFileRef, ManifestFields, PackageManifest, DEFAULT_LANGUAGE, FORMAT_SENTINEL,
    MANIFEST_PATH,
};
pub use segment::SegmentKind;
