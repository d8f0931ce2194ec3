//! Package manifest descriptor.
//!
//! The typed form of `manifest.json`. Parsing and validation live in
//! [`crate::importer`]; this type only holds the validated result.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::segment::SegmentKind;

/// Fixed path of the manifest entry inside a package.
pub const MANIFEST_PATH: &str = "manifest.json";

/// Value the manifest's `format` field must carry.
pub const FORMAT_SENTINEL: &str = "lexy-package";

/// Language used when the manifest does not declare one.
pub const DEFAULT_LANGUAGE: &str = "Unknown";

/// Validated package manifest.
///
/// # Example
///
/// ```
/// use lexy::package::{PackageManifest, SegmentKind};
///
/// let manifest = PackageManifest::new("French")
///     .with_title("Français")
///     .with_data_file(SegmentKind::Dictionary, "data/dict.json");
///
/// assert_eq!(manifest.language(), "French");
/// assert_eq!(
///     manifest.data_file(SegmentKind::Dictionary).map(|f| f.path.as_str()),
///     Some("data/dict.json")
/// );
/// assert!(manifest.data_file(SegmentKind::Units).is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageManifest {
    /// Format sentinel, always [`FORMAT_SENTINEL`] once validated.
    pub format: String,

    /// Declared course identity, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course_id: Option<String>,

    /// Descriptive fields.
    pub fields: ManifestFields,

    /// Logical segment name → data file reference.
    ///
    /// Keys other than the four [`SegmentKind`] names are kept but ignored.
    #[serde(default)]
    pub data_files: BTreeMap<String, DataFileRef>,
}

/// Descriptive manifest fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestFields {
    /// Course title, if declared.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Course language. Never empty.
    pub language: String,
}

impl Default for ManifestFields {
    fn default() -> Self {
        Self {
            title: None,
            language: DEFAULT_LANGUAGE.to_string(),
        }
    }
}

/// Reference from the manifest to a data file entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataFileRef {
    /// Path of the entry inside the package.
    pub path: String,
}

impl DataFileRef {
    /// Create a data file reference.
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

impl PackageManifest {
    /// Create a manifest for the given language with no data files.
    ///
    /// An empty language falls back to [`DEFAULT_LANGUAGE`].
    pub fn new(language: impl Into<String>) -> Self {
        let language = language.into();
        let language = if language.trim().is_empty() {
            DEFAULT_LANGUAGE.to_string()
        } else {
            language
        };

        Self {
            format: FORMAT_SENTINEL.to_string(),
            course_id: None,
            fields: ManifestFields {
                title: None,
                language,
            },
            data_files: BTreeMap::new(),
        }
    }

    /// Set the course identity (builder pattern).
    pub fn with_course_id(mut self, id: impl Into<String>) -> Self {
        self.course_id = Some(id.into());
        self
    }

    /// Set the course title (builder pattern).
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.fields.title = Some(title.into());
        self
    }

    /// Declare a data file for a segment (builder pattern).
    pub fn with_data_file(mut self, kind: SegmentKind, path: impl Into<String>) -> Self {
        self.data_files
            .insert(kind.manifest_key().to_string(), DataFileRef::new(path));
        self
    }

    /// Course language.
    pub fn language(&self) -> &str {
        &self.fields.language
    }

    /// Course title, if declared.
    pub fn title(&self) -> Option<&str> {
        self.fields.title.as_deref()
    }

    /// Data file declared for a segment, if any.
    pub fn data_file(&self, kind: SegmentKind) -> Option<&DataFileRef> {
        self.data_files.get(kind.manifest_key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_defaults_empty_language() {
        assert_eq!(PackageManifest::new("").language(), DEFAULT_LANGUAGE);
        assert_eq!(PackageManifest::new("   ").language(), DEFAULT_LANGUAGE);
        assert_eq!(PackageManifest::new("Spanish").language(), "Spanish");
    }

    #[test]
    fn test_builder() {
        let manifest = PackageManifest::new("German")
            .with_course_id("de-101")
            .with_title("Deutsch")
            .with_data_file(SegmentKind::Units, "data/units.json");

        assert_eq!(manifest.format, FORMAT_SENTINEL);
        assert_eq!(manifest.course_id.as_deref(), Some("de-101"));
        assert_eq!(manifest.title(), Some("Deutsch"));
        assert_eq!(
            manifest.data_file(SegmentKind::Units),
            Some(&DataFileRef::new("data/units.json"))
        );
    }

    #[test]
    fn test_serializes_camel_case() {
        let manifest = PackageManifest::new("Italian")
            .with_course_id("it-1")
            .with_data_file(SegmentKind::Grammar, "g.json");
        let json = serde_json::to_value(&manifest).unwrap();

        assert_eq!(json["courseId"], "it-1");
        assert_eq!(json["dataFiles"]["grammar"]["path"], "g.json");
        assert_eq!(json["fields"]["language"], "Italian");
    }
}
