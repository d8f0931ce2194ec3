//! Stored course type with library context.
//!
//! The [`StoredCourse`] struct wraps a [`CourseRecord`] with the metadata the
//! library records when it accepts a course.

use std::ops::Deref;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::package::CourseRecord;

/// A course held by a [`CourseLibrary`](super::CourseLibrary).
///
/// Contains the [`CourseRecord`] rather than flattening it; [`Deref`] gives
/// transparent access to the course fields.
///
/// # Example
///
/// ```
/// use lexy::library::StoredCourse;
/// use lexy::package::CourseRecord;
///
/// let course = CourseRecord {
///     id: "es-101".to_string(),
///     course_title: "Español".to_string(),
///     language: "Spanish".to_string(),
///     units: vec![],
///     dictionary: vec![],
///     grammar: vec![],
///     culture_items: vec![],
/// };
/// let stored = StoredCourse::new(course);
///
/// assert_eq!(stored.language, "Spanish");
/// assert_eq!(stored.summary().dictionary, 0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredCourse {
    /// The imported course.
    pub course: CourseRecord,

    /// When the library accepted the course.
    pub imported_at: DateTime<Utc>,
}

impl StoredCourse {
    /// Wrap a course imported now.
    pub fn new(course: CourseRecord) -> Self {
        Self {
            course,
            imported_at: Utc::now(),
        }
    }

    /// Listing view of this course.
    pub fn summary(&self) -> CourseSummary {
        CourseSummary {
            id: self.course.id.clone(),
            title: self.course.course_title.clone(),
            language: self.course.language.clone(),
            imported_at: self.imported_at,
            units: self.course.units.len(),
            dictionary: self.course.dictionary.len(),
            grammar: self.course.grammar.len(),
            culture_items: self.course.culture_items.len(),
        }
    }

    /// Unwrap the course.
    pub fn into_course(self) -> CourseRecord {
        self.course
    }
}

impl Deref for StoredCourse {
    type Target = CourseRecord;

    fn deref(&self) -> &Self::Target {
        &self.course
    }
}

/// Record counts and identity of a stored course.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseSummary {
    pub id: String,
    pub title: String,
    pub language: String,
    pub imported_at: DateTime<Utc>,
    pub units: usize,
    pub dictionary: usize,
    pub grammar: usize,
    pub culture_items: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn course() -> CourseRecord {
        CourseRecord {
            id: "fr-1".to_string(),
            course_title: "Français".to_string(),
            language: "French".to_string(),
            units: vec![json!({"id": "u1"})],
            dictionary: vec![json!({"id": "w1"}), json!({"id": "w2"})],
            grammar: Vec::new(),
            culture_items: Vec::new(),
        }
    }

    #[test]
    fn test_summary_counts() {
        let stored = StoredCourse::new(course());
        let summary = stored.summary();

        assert_eq!(summary.id, "fr-1");
        assert_eq!(summary.title, "Français");
        assert_eq!(summary.units, 1);
        assert_eq!(summary.dictionary, 2);
        assert_eq!(summary.grammar, 0);
        assert_eq!(summary.imported_at, stored.imported_at);
    }

    #[test]
    fn test_deref_to_course() {
        let stored = StoredCourse::new(course());
        assert!(stored.is_language("french"));
        assert_eq!(stored.into_course(), course());
    }

    #[test]
    fn test_serialized_timestamp_is_rfc3339() {
        let stored = StoredCourse::new(course());
        let json = serde_json::to_value(&stored).unwrap();

        let text = json["importedAt"].as_str().unwrap();
        assert!(DateTime::parse_from_rfc3339(text).is_ok());
        assert_eq!(json["course"]["courseTitle"], "Français");
    }
}
