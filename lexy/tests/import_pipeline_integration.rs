//! Integration tests for the import pipeline.
//!
//! These tests drive complete `.lexy` archives through the pipeline:
//! - Manifest validation failures deliver nothing
//! - Culture assets are inlined with their original bytes
//! - The conflict gate runs before any data file is touched
//! - Delivered courses land in the course library
//!
//! Run with: `cargo test --test import_pipeline_integration`

use std::cell::Cell;
use std::io::{Cursor, Write};

use lexy::archive::{ArchiveResult, EntryHandle, PackageArchive, PackageSource};
use lexy::importer::{
    decode_data_url, AutoConfirm, AutoDecline, ConflictPrompt, ImportConfig, ImportErrorKind,
    ImportOutcome, ImportPipeline, ImportedCourse, LanguageConflict,
};
use lexy::library::CourseLibrary;
use lexy::package::MANIFEST_PATH;
use serde_json::json;
use tempfile::TempDir;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

// ============================================================================
// Helper Functions
// ============================================================================

/// Build a zip archive from `(path, bytes)` pairs.
fn build_archive(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();
    for (name, bytes) in entries {
        writer.start_file(*name, options).unwrap();
        writer.write_all(bytes).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

/// Import `bytes` with no existing courses, expecting success.
fn import_ok(bytes: Vec<u8>) -> ImportedCourse {
    ImportPipeline::default()
        .import_bytes(bytes, &[], &AutoDecline)
        .unwrap()
        .imported()
        .expect("import should not be cancelled")
}

const PNG: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x2A];

const SPANISH_MANIFEST: &str = r#"{
    "format": "lexy-package",
    "fields": {"language": "Spanish", "title": "Español Básico"},
    "dataFiles": {"dictionary": {"path": "data/dict.json"}}
}"#;

const SPANISH_DICTIONARY: &str = r#"[{"id":"w1","word":"hola","translation":"hello"}]"#;

const CULTURE_MANIFEST: &str = r#"{
    "format": "lexy-package",
    "courseId": "es-culture",
    "fields": {"language": "Spanish"},
    "dataFiles": {"culture": {"path": "data/culture.json"}}
}"#;

const CULTURE_ITEMS: &str = r#"[
    {
        "id": "c1",
        "category": "Art & Masterpieces",
        "title": "Guernica",
        "description": "Picasso, 1937",
        "thumbnailUrl": "assets/guernica.png",
        "assets": [
            {"type": "image", "name": "Detail", "value": "assets/detail.png"},
            {"type": "link", "name": "Museum", "value": "https://www.museoreinasofia.es"}
        ]
    }
]"#;

/// Wraps a source and counts every access other than the manifest.
struct CountingSource<S> {
    inner: S,
    data_accesses: Cell<usize>,
}

impl<S: PackageSource> CountingSource<S> {
    fn new(inner: S) -> Self {
        Self {
            inner,
            data_accesses: Cell::new(0),
        }
    }

    fn note(&self, path: &str) {
        if path != MANIFEST_PATH {
            self.data_accesses.set(self.data_accesses.get() + 1);
        }
    }
}

impl<S: PackageSource> PackageSource for CountingSource<S> {
    fn entry(&self, path: &str) -> Option<EntryHandle> {
        self.note(path);
        self.inner.entry(path)
    }

    fn read_binary(&mut self, handle: &EntryHandle) -> ArchiveResult<Vec<u8>> {
        self.note(&handle.path);
        self.inner.read_binary(handle)
    }

    fn entry_names(&self) -> Vec<String> {
        self.inner.entry_names()
    }
}

// ============================================================================
// Manifest Validation
// ============================================================================

#[test]
fn test_manifest_without_data_files_gives_empty_course() {
    let bytes = build_archive(&[(
        "manifest.json",
        br#"{"format": "lexy-package", "fields": {"language": "Italian"}}"#,
    )]);

    let imported = import_ok(bytes);

    assert!(imported.course.is_empty());
    assert_eq!(imported.course.language, "Italian");
    assert!(imported.media_map.is_empty());
}

#[test]
fn test_missing_manifest_fails() {
    let bytes = build_archive(&[("data/dict.json", SPANISH_DICTIONARY.as_bytes())]);

    let err = ImportPipeline::default()
        .import_bytes(bytes, &[], &AutoConfirm)
        .unwrap_err();

    assert_eq!(err.kind(), ImportErrorKind::MissingManifest);
}

#[test]
fn test_wrong_format_sentinel_fails() {
    for manifest in [
        r#"{"format": "anki-deck", "fields": {"language": "Spanish"}}"#,
        r#"{"fields": {"language": "Spanish"}}"#,
        r#"{"format": "LEXY-PACKAGE"}"#,
    ] {
        let bytes = build_archive(&[("manifest.json", manifest.as_bytes())]);
        let err = ImportPipeline::default()
            .import_bytes(bytes, &[], &AutoConfirm)
            .unwrap_err();

        assert_eq!(err.kind(), ImportErrorKind::UnsupportedFormat, "{}", manifest);
    }
}

#[test]
fn test_not_an_archive_fails() {
    let err = ImportPipeline::default()
        .import_bytes(b"PK\x03\x04 truncated".to_vec(), &[], &AutoConfirm)
        .unwrap_err();

    assert_eq!(err.kind(), ImportErrorKind::Format);
}

#[test]
fn test_malformed_present_data_file_fails() {
    let bytes = build_archive(&[
        ("manifest.json", SPANISH_MANIFEST.as_bytes()),
        ("data/dict.json", b"[{\"id\": \"w1\""),
    ]);

    let err = ImportPipeline::default()
        .import_bytes(bytes, &[], &AutoConfirm)
        .unwrap_err();

    assert_eq!(err.kind(), ImportErrorKind::MalformedSegment);
}

// ============================================================================
// Asset Resolution
// ============================================================================

#[test]
fn test_thumbnail_inlined_with_original_bytes() {
    let bytes = build_archive(&[
        ("manifest.json", CULTURE_MANIFEST.as_bytes()),
        ("data/culture.json", CULTURE_ITEMS.as_bytes()),
        ("assets/guernica.png", PNG),
    ]);

    let imported = import_ok(bytes);
    let item = &imported.course.culture_items[0];

    let thumbnail = item.thumbnail_url().unwrap();
    assert!(!thumbnail.starts_with("assets/"));
    let (content_type, decoded) = decode_data_url(thumbnail).unwrap();
    assert_eq!(content_type, "image/png");
    assert_eq!(decoded, PNG);
    assert_eq!(item.field("description"), Some(&json!("Picasso, 1937")));
}

#[test]
fn test_loose_culture_records_import() {
    let items = r#"[
        {"id": "c1", "category": "Music", "title": "Bésame mucho", "thumbnailUrl": null, "description": null},
        {"id": 7, "category": "Cinema", "title": "Roma", "thumbnailUrl": "assets/guernica.png"},
        {"category": "Festivals"}
    ]"#;
    let bytes = build_archive(&[
        ("manifest.json", CULTURE_MANIFEST.as_bytes()),
        ("data/culture.json", items.as_bytes()),
        ("assets/guernica.png", PNG),
    ]);

    let imported = import_ok(bytes);
    let culture = &imported.course.culture_items;

    assert_eq!(culture.len(), 3);
    assert!(culture[0].as_value()["thumbnailUrl"].is_null());
    assert!(culture[0].as_value()["description"].is_null());
    assert_eq!(culture[1].as_value()["id"], 7);
    assert!(culture[1]
        .thumbnail_url()
        .unwrap()
        .starts_with("data:image/png;base64,"));
    assert_eq!(culture[2].as_value(), &json!({"category": "Festivals"}));
}

#[test]
fn test_absent_asset_left_unchanged() {
    let bytes = build_archive(&[
        ("manifest.json", CULTURE_MANIFEST.as_bytes()),
        ("data/culture.json", CULTURE_ITEMS.as_bytes()),
        ("assets/guernica.png", PNG),
    ]);

    let imported = import_ok(bytes);
    let assets = imported.course.culture_items[0].asset_list();

    assert_eq!(assets[0].value, "assets/detail.png");
    assert_eq!(assets[1].value, "https://www.museoreinasofia.es");
    assert_eq!(imported.stats.assets.missing.len(), 1);
    assert_eq!(imported.stats.assets.missing[0].path, "assets/detail.png");
}

#[test]
fn test_custom_asset_prefix() {
    let items = CULTURE_ITEMS.replace("assets/", "media/");
    let bytes = build_archive(&[
        ("manifest.json", CULTURE_MANIFEST.as_bytes()),
        ("data/culture.json", items.as_bytes()),
        ("media/guernica.png", PNG),
    ]);

    let pipeline = ImportPipeline::new(ImportConfig::new().with_asset_prefix("media/"));
    let imported = pipeline
        .import_bytes(bytes, &[], &AutoConfirm)
        .unwrap()
        .imported()
        .unwrap();

    assert!(imported.course.culture_items[0]
        .thumbnail_url()
        .unwrap()
        .starts_with("data:image/png;base64,"));
}

// ============================================================================
// Idempotence
// ============================================================================

#[test]
fn test_importing_twice_gives_identical_records() {
    let manifest = r#"{
        "format": "lexy-package",
        "fields": {"language": "German"},
        "dataFiles": {"culture": {"path": "data/culture.json"}}
    }"#;
    let bytes = build_archive(&[
        ("manifest.json", manifest.as_bytes()),
        ("data/culture.json", CULTURE_ITEMS.as_bytes()),
        ("assets/guernica.png", PNG),
        ("assets/detail.png", PNG),
    ]);

    let mut first = import_ok(bytes.clone()).course;
    let mut second = import_ok(bytes).course;

    assert_ne!(first.id, second.id);
    assert_eq!(first.course_title, "Imported Course");
    first.id.clear();
    second.id.clear();
    assert_eq!(first, second);
}

// ============================================================================
// Conflict Gate
// ============================================================================

#[test]
fn test_declined_conflict_loads_no_data() {
    let manifest = r#"{
        "format": "lexy-package",
        "fields": {"language": "french"},
        "dataFiles": {
            "dictionary": {"path": "data/dict.json"},
            "culture": {"path": "data/culture.json"}
        }
    }"#;
    let bytes = build_archive(&[
        ("manifest.json", manifest.as_bytes()),
        ("data/dict.json", SPANISH_DICTIONARY.as_bytes()),
        ("data/culture.json", CULTURE_ITEMS.as_bytes()),
    ]);
    let mut source = CountingSource::new(PackageArchive::from_bytes(bytes).unwrap());

    let asked = Cell::new(0);
    let prompt = |conflict: &LanguageConflict| {
        asked.set(asked.get() + 1);
        assert_eq!(conflict.existing, "FRENCH");
        false
    };

    let outcome = ImportPipeline::default()
        .import_source(&mut source, &["FRENCH".to_string()], &prompt)
        .unwrap();

    assert!(matches!(outcome, ImportOutcome::Cancelled(_)));
    assert_eq!(asked.get(), 1);
    assert_eq!(source.data_accesses.get(), 0);
}

#[test]
fn test_confirmed_conflict_loads_data() {
    let bytes = build_archive(&[
        ("manifest.json", SPANISH_MANIFEST.as_bytes()),
        ("data/dict.json", SPANISH_DICTIONARY.as_bytes()),
    ]);
    let mut source = CountingSource::new(PackageArchive::from_bytes(bytes).unwrap());
    let prompt: &dyn ConflictPrompt = &AutoConfirm;

    let imported = ImportPipeline::default()
        .import_source(&mut source, &["spanish".to_string()], prompt)
        .unwrap()
        .imported()
        .unwrap();

    assert_eq!(imported.replaces.unwrap().existing, "spanish");
    assert!(source.data_accesses.get() > 0);
}

// ============================================================================
// End to End
// ============================================================================

#[test]
fn test_spanish_dictionary_scenario() {
    let bytes = build_archive(&[
        ("manifest.json", SPANISH_MANIFEST.as_bytes()),
        ("data/dict.json", SPANISH_DICTIONARY.as_bytes()),
    ]);

    let course = import_ok(bytes).course;

    assert_eq!(course.language, "Spanish");
    assert_eq!(course.course_title, "Español Básico");
    assert_eq!(course.dictionary.len(), 1);
    assert_eq!(course.dictionary[0]["word"], "hola");
    assert!(course.grammar.is_empty());
    assert!(course.units.is_empty());
    assert!(course.culture_items.is_empty());
}

#[test]
fn test_import_file_into_library() {
    let temp = TempDir::new().unwrap();
    let package = temp.path().join("spanish.lexy");
    std::fs::write(
        &package,
        build_archive(&[
            ("manifest.json", SPANISH_MANIFEST.as_bytes()),
            ("data/dict.json", SPANISH_DICTIONARY.as_bytes()),
        ]),
    )
    .unwrap();
    let mut library = CourseLibrary::open(temp.path().join("library")).unwrap();
    let pipeline = ImportPipeline::default();

    let imported = pipeline
        .import_file(&package, &library.languages().unwrap(), &AutoDecline)
        .unwrap()
        .imported()
        .unwrap();
    let id = imported.course.id.clone();
    let report = pipeline.deliver(imported, &mut library).unwrap();

    assert!(!report.replaced_existing());
    let stored = library.get(&id).unwrap();
    assert_eq!(stored.course_title, "Español Básico");
    assert_eq!(library.languages().unwrap(), vec!["Spanish".to_string()]);

    // A second import of the same language now conflicts.
    let outcome = pipeline
        .import_file(&package, &library.languages().unwrap(), &AutoDecline)
        .unwrap();
    assert!(outcome.is_cancelled());
}
