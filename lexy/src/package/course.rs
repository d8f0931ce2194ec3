//! Assembled course record.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::culture::CultureItem;

/// Records of a data segment whose schema belongs to the application.
///
/// Dictionary entries, grammar lessons and units are carried as opaque JSON
/// values; the importer only guarantees they came from a well-formed array.
pub type SegmentRecords = Vec<Value>;

/// Auxiliary map from archive path to resolved location.
///
/// Delivered alongside every course. Assets are resolved inline, so the map
/// is always empty.
pub type MediaMap = BTreeMap<String, String>;

/// A fully imported course, ready to hand to the application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseRecord {
    pub id: String,
    pub course_title: String,
    pub language: String,
    #[serde(default)]
    pub units: SegmentRecords,
    #[serde(default)]
    pub dictionary: SegmentRecords,
    #[serde(default)]
    pub grammar: SegmentRecords,
    #[serde(default)]
    pub culture_items: Vec<CultureItem>,
}

impl CourseRecord {
    /// Whether all four segments are empty.
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
            && self.dictionary.is_empty()
            && self.grammar.is_empty()
            && self.culture_items.is_empty()
    }

    /// Whether this course is for `language`, ignoring case.
    pub fn is_language(&self, language: &str) -> bool {
        self.language.to_lowercase() == language.to_lowercase()
    }
}
