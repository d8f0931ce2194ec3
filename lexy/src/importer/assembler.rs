//! Course assembly.

use uuid::Uuid;

use crate::package::{CourseRecord, CultureItem, MediaMap, PackageManifest, SegmentRecords};

use super::config::ImportConfig;

/// Segments ready to be assembled into a course.
#[derive(Debug, Clone, Default)]
pub struct AssemblyParts {
    pub dictionary: SegmentRecords,
    pub grammar: SegmentRecords,
    pub units: SegmentRecords,
    pub culture_items: Vec<CultureItem>,
}

/// Build the course record for a validated manifest.
///
/// Identity falls back to a freshly generated one and the title to
/// [`ImportConfig::default_title`]. The returned media map is always empty:
/// assets are already inline in the culture items.
pub fn assemble_course(
    manifest: PackageManifest,
    parts: AssemblyParts,
    config: &ImportConfig,
) -> (CourseRecord, MediaMap) {
    let PackageManifest {
        course_id, fields, ..
    } = manifest;

    let course = CourseRecord {
        id: course_id.unwrap_or_else(generate_course_id),
        course_title: fields
            .title
            .unwrap_or_else(|| config.default_title.clone()),
        language: fields.language,
        units: parts.units,
        dictionary: parts.dictionary,
        grammar: parts.grammar,
        culture_items: parts.culture_items,
    };

    (course, MediaMap::new())
}

/// Generate a unique course identity.
pub fn generate_course_id() -> String {
    format!("course-{}", Uuid::new_v4().simple())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_uses_manifest_identity() {
        let manifest = PackageManifest::new("Spanish")
            .with_course_id("es-101")
            .with_title("Español Básico");
        let parts = AssemblyParts {
            dictionary: vec![json!({"id": "w1"})],
            ..Default::default()
        };

        let (course, media_map) = assemble_course(manifest, parts, &ImportConfig::default());

        assert_eq!(course.id, "es-101");
        assert_eq!(course.course_title, "Español Básico");
        assert_eq!(course.language, "Spanish");
        assert_eq!(course.dictionary.len(), 1);
        assert!(media_map.is_empty());
    }

    #[test]
    fn test_defaults_for_missing_identity_and_title() {
        let (course, _) = assemble_course(
            PackageManifest::new("French"),
            AssemblyParts::default(),
            &ImportConfig::default(),
        );

        assert!(course.id.starts_with("course-"));
        assert_eq!(course.course_title, "Imported Course");
        assert!(course.is_empty());
    }

    #[test]
    fn test_configured_default_title() {
        let config = ImportConfig::new().with_default_title("Sin título");
        let (course, _) =
            assemble_course(PackageManifest::new("Spanish"), AssemblyParts::default(), &config);

        assert_eq!(course.course_title, "Sin título");
    }

    #[test]
    fn test_generated_ids_are_unique() {
        let a = generate_course_id();
        let b = generate_course_id();

        assert_ne!(a, b);
        assert_eq!(a.len(), "course-".len() + 32);
    }
}
