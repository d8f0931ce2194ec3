//! Manifest validation.
//!
//! Turns the `manifest.json` entry into a [`PackageManifest`]. The format
//! sentinel is checked strictly; descriptive fields are read permissively
//! (a missing language becomes "Unknown", missing data files become an empty
//! map).

use std::collections::BTreeMap;

use serde_json::{Map, Value};
use tracing::debug;

use crate::archive::PackageSource;
use crate::package::{
    DataFileRef, ManifestFields, PackageManifest, SegmentKind, FORMAT_SENTINEL, MANIFEST_PATH,
};

use super::config::ImportConfig;
use super::error::{ImportError, ImportResult};

/// Locate, read and validate the manifest of a package.
pub fn read_manifest<S: PackageSource + ?Sized>(
    source: &mut S,
    config: &ImportConfig,
) -> ImportResult<PackageManifest> {
    let handle = source
        .entry(MANIFEST_PATH)
        .ok_or_else(|| ImportError::MissingManifest {
            path: MANIFEST_PATH.to_string(),
        })?;

    let text = source
        .read_text(&handle)
        .map_err(|e| ImportError::MalformedManifest {
            reason: e.to_string(),
        })?;

    parse_manifest(&text, config)
}

/// Parse and validate manifest text.
///
/// # Example
///
/// ```
/// use lexy::importer::{parse_manifest, ImportConfig};
///
/// let manifest = parse_manifest(
///     r#"{"format": "lexy-package", "fields": {"language": "Spanish"}}"#,
///     &ImportConfig::default(),
/// )
/// .unwrap();
///
/// assert_eq!(manifest.language(), "Spanish");
/// assert!(manifest.data_files.is_empty());
/// ```
pub fn parse_manifest(text: &str, config: &ImportConfig) -> ImportResult<PackageManifest> {
    let value: Value =
        serde_json::from_str(text).map_err(|e| ImportError::MalformedManifest {
            reason: e.to_string(),
        })?;

    let object = value
        .as_object()
        .ok_or_else(|| ImportError::MalformedManifest {
            reason: format!("expected a JSON object, found {}", type_name(&value)),
        })?;

    match object.get("format") {
        Some(Value::String(format)) if format == FORMAT_SENTINEL => {}
        Some(Value::String(other)) => {
            return Err(ImportError::UnsupportedFormat {
                found: Some(other.clone()),
            })
        }
        Some(other) => {
            return Err(ImportError::UnsupportedFormat {
                found: Some(other.to_string()),
            })
        }
        None => return Err(ImportError::UnsupportedFormat { found: None }),
    }

    let fields = parse_fields(object.get("fields"), config)?;
    let data_files = parse_data_files(object.get("dataFiles"))?;

    Ok(PackageManifest {
        format: FORMAT_SENTINEL.to_string(),
        course_id: object.get("courseId").and_then(identity_string),
        fields,
        data_files,
    })
}

fn parse_fields(value: Option<&Value>, config: &ImportConfig) -> ImportResult<ManifestFields> {
    let fields = match value {
        None | Some(Value::Null) => return Ok(default_fields(config)),
        Some(Value::Object(fields)) => fields,
        Some(other) => {
            return Err(ImportError::MalformedManifest {
                reason: format!("fields must be an object, found {}", type_name(other)),
            })
        }
    };

    let language = non_empty_string(fields, "language")
        .unwrap_or_else(|| config.default_language.clone());

    Ok(ManifestFields {
        title: non_empty_string(fields, "title"),
        language,
    })
}

fn default_fields(config: &ImportConfig) -> ManifestFields {
    ManifestFields {
        title: None,
        language: config.default_language.clone(),
    }
}

fn parse_data_files(value: Option<&Value>) -> ImportResult<BTreeMap<String, DataFileRef>> {
    let entries = match value {
        None | Some(Value::Null) => return Ok(BTreeMap::new()),
        Some(Value::Object(entries)) => entries,
        Some(other) => {
            return Err(ImportError::MalformedManifest {
                reason: format!("dataFiles must be an object, found {}", type_name(other)),
            })
        }
    };

    let mut data_files = BTreeMap::new();
    for (name, entry) in entries {
        // A null declaration is the same as no declaration.
        if entry.is_null() {
            continue;
        }

        let path = entry
            .get("path")
            .and_then(Value::as_str)
            .ok_or_else(|| ImportError::MalformedManifest {
                reason: format!("dataFiles.{} has no string path", name),
            })?;

        if SegmentKind::from_manifest_key(name).is_none() {
            debug!(name = %name, path, "Data file declaration has no segment, it will not be loaded");
        }
        data_files.insert(name.clone(), DataFileRef::new(path));
    }

    Ok(data_files)
}

fn non_empty_string(object: &Map<String, Value>, key: &str) -> Option<String> {
    object
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .map(str::to_string)
}

/// Course identities may be written as strings or numbers.
fn identity_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::MemorySource;
    use crate::importer::ImportErrorKind;

    fn parse(text: &str) -> ImportResult<PackageManifest> {
        parse_manifest(text, &ImportConfig::default())
    }

    #[test]
    fn test_full_manifest() {
        let manifest = parse(
            r#"{
                "format": "lexy-package",
                "courseId": "es-101",
                "fields": {"title": "Español Básico", "language": "Spanish"},
                "dataFiles": {
                    "dictionary": {"path": "data/dict.json"},
                    "culture": {"path": "data/culture.json"}
                }
            }"#,
        )
        .unwrap();

        assert_eq!(manifest.course_id.as_deref(), Some("es-101"));
        assert_eq!(manifest.title(), Some("Español Básico"));
        assert_eq!(manifest.language(), "Spanish");
        assert_eq!(
            manifest.data_file(SegmentKind::Dictionary).unwrap().path,
            "data/dict.json"
        );
        assert!(manifest.data_file(SegmentKind::Grammar).is_none());
    }

    #[test]
    fn test_minimal_manifest_uses_defaults() {
        let manifest = parse(r#"{"format": "lexy-package"}"#).unwrap();

        assert_eq!(manifest.language(), "Unknown");
        assert!(manifest.title().is_none());
        assert!(manifest.course_id.is_none());
        assert!(manifest.data_files.is_empty());
    }

    #[test]
    fn test_empty_language_uses_default() {
        let manifest =
            parse(r#"{"format": "lexy-package", "fields": {"language": ""}}"#).unwrap();
        assert_eq!(manifest.language(), "Unknown");

        let manifest =
            parse(r#"{"format": "lexy-package", "fields": {"language": null}}"#).unwrap();
        assert_eq!(manifest.language(), "Unknown");
    }

    #[test]
    fn test_configured_default_language() {
        let config = ImportConfig::new().with_default_language("Klingon");
        let manifest = parse_manifest(r#"{"format": "lexy-package"}"#, &config).unwrap();
        assert_eq!(manifest.language(), "Klingon");
    }

    #[test]
    fn test_wrong_format_is_unsupported() {
        let err = parse(r#"{"format": "anki-deck", "fields": {"language": "French"}}"#)
            .unwrap_err();
        assert!(matches!(
            err,
            ImportError::UnsupportedFormat { found: Some(ref f) } if f == "anki-deck"
        ));
    }

    #[test]
    fn test_missing_format_is_unsupported() {
        let err = parse(r#"{"fields": {"language": "French"}}"#).unwrap_err();
        assert!(matches!(err, ImportError::UnsupportedFormat { found: None }));
    }

    #[test]
    fn test_non_string_format_is_unsupported() {
        let err = parse(r#"{"format": 2}"#).unwrap_err();
        assert_eq!(err.kind(), ImportErrorKind::UnsupportedFormat);
    }

    #[test]
    fn test_invalid_json_is_malformed() {
        let err = parse(r#"{"format": "lexy-package""#).unwrap_err();
        assert_eq!(err.kind(), ImportErrorKind::MalformedManifest);
    }

    #[test]
    fn test_non_object_is_malformed() {
        let err = parse(r#"["lexy-package"]"#).unwrap_err();
        assert!(err.to_string().contains("an array"));
    }

    #[test]
    fn test_data_file_without_path_is_malformed() {
        let err = parse(r#"{"format": "lexy-package", "dataFiles": {"units": {}}}"#)
            .unwrap_err();
        assert_eq!(err.kind(), ImportErrorKind::MalformedManifest);
        assert!(err.to_string().contains("dataFiles.units"));
    }

    #[test]
    fn test_null_data_file_is_undeclared() {
        let manifest =
            parse(r#"{"format": "lexy-package", "dataFiles": {"units": null}}"#).unwrap();
        assert!(manifest.data_file(SegmentKind::Units).is_none());
    }

    #[test]
    fn test_numeric_course_id() {
        let manifest = parse(r#"{"format": "lexy-package", "courseId": 42}"#).unwrap();
        assert_eq!(manifest.course_id.as_deref(), Some("42"));
    }

    #[test]
    fn test_blank_course_id_is_ignored() {
        let manifest = parse(r#"{"format": "lexy-package", "courseId": " "}"#).unwrap();
        assert!(manifest.course_id.is_none());
    }

    #[test]
    fn test_read_manifest_missing_entry() {
        let mut source = MemorySource::new().with_entry("data/dict.json", "[]");
        let err = read_manifest(&mut source, &ImportConfig::default()).unwrap_err();

        assert!(matches!(err, ImportError::MissingManifest { ref path } if path == "manifest.json"));
    }

    #[test]
    fn test_read_manifest_invalid_utf8_is_malformed() {
        let mut source = MemorySource::new().with_entry("manifest.json", vec![0xFFu8, 0x00]);
        let err = read_manifest(&mut source, &ImportConfig::default()).unwrap_err();

        assert_eq!(err.kind(), ImportErrorKind::MalformedManifest);
    }

    #[test]
    fn test_read_manifest_from_source() {
        let mut source = MemorySource::new().with_entry(
            "manifest.json",
            r#"{"format": "lexy-package", "fields": {"language": "French"}}"#,
        );
        let manifest = read_manifest(&mut source, &ImportConfig::default()).unwrap();

        assert_eq!(manifest.language(), "French");
    }
}
