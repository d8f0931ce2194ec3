//! Culture items and their attached assets.
//!
//! Culture records belong to the consuming application. The importer only
//! needs to find and rewrite the two kinds of asset reference they carry, so
//! a [`CultureItem`] keeps the record exactly as it was parsed and exposes
//! typed accessors over it. A record with a numeric id, a null thumbnail or
//! no title at all passes through untouched.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

const ID: &str = "id";
const CATEGORY: &str = "category";
const TITLE: &str = "title";
const THUMBNAIL_URL: &str = "thumbnailUrl";
const ASSETS: &str = "assets";

/// A culture card: a person, film, festival, artwork and so on.
///
/// Wire shape (camelCase):
///
/// ```text
/// { id, category, title, description, thumbnailUrl,
///   subtitle?, platform?, assets?: [{ type, name, value }] }
/// ```
///
/// `thumbnailUrl` and every asset `value` may be an asset reference into the
/// package (`assets/...`) until the importer resolves them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CultureItem(Value);

impl CultureItem {
    /// Create a culture item with no thumbnail and no assets.
    pub fn new(
        id: impl Into<String>,
        category: impl Into<String>,
        title: impl Into<String>,
    ) -> Self {
        let mut record = Map::new();
        record.insert(ID.to_string(), Value::String(id.into()));
        record.insert(CATEGORY.to_string(), Value::String(category.into()));
        record.insert(TITLE.to_string(), Value::String(title.into()));
        Self(Value::Object(record))
    }

    /// Wrap a parsed record as-is.
    pub fn from_value(record: Value) -> Self {
        Self(record)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }

    /// Raw value of a top-level field.
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Set a top-level field (builder pattern). No-op on non-object records.
    pub fn with_field(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.set_field(key, value.into());
        self
    }

    /// Identifier for log lines and reports: the id if it is a string,
    /// its JSON text otherwise, `?` when absent.
    pub fn id_label(&self) -> String {
        match self.field(ID) {
            Some(Value::String(id)) => id.clone(),
            Some(Value::Null) | None => "?".to_string(),
            Some(other) => other.to_string(),
        }
    }

    pub fn category(&self) -> Option<&str> {
        self.str_field(CATEGORY)
    }

    pub fn title(&self) -> Option<&str> {
        self.str_field(TITLE)
    }

    /// Thumbnail, if the record carries one as a string.
    pub fn thumbnail_url(&self) -> Option<&str> {
        self.str_field(THUMBNAIL_URL)
    }

    /// Replace the thumbnail (builder pattern).
    pub fn with_thumbnail(mut self, thumbnail_url: impl Into<String>) -> Self {
        self.set_thumbnail_url(thumbnail_url.into());
        self
    }

    pub fn set_thumbnail_url(&mut self, thumbnail_url: String) {
        self.set_field(THUMBNAIL_URL, Value::String(thumbnail_url));
    }

    /// Replace the attached assets (builder pattern).
    pub fn with_assets(mut self, assets: Vec<CultureAsset>) -> Self {
        let assets = assets.iter().map(CultureAsset::to_value).collect();
        self.set_field(ASSETS, Value::Array(assets));
        self
    }

    /// Attached asset records, empty unless `assets` is an array.
    pub fn asset_records(&self) -> &[Value] {
        self.field(ASSETS)
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Mutable access to the asset records, `None` unless `assets` is an array.
    pub fn asset_records_mut(&mut self) -> Option<&mut Vec<Value>> {
        self.0.get_mut(ASSETS).and_then(Value::as_array_mut)
    }

    /// Attached assets that have the full `{ type, name, value }` shape.
    pub fn asset_list(&self) -> Vec<CultureAsset> {
        self.asset_records()
            .iter()
            .filter_map(CultureAsset::from_record)
            .collect()
    }

    fn str_field(&self, key: &str) -> Option<&str> {
        self.field(key).and_then(Value::as_str)
    }

    fn set_field(&mut self, key: &str, value: Value) {
        if let Value::Object(record) = &mut self.0 {
            record.insert(key.to_string(), value);
        }
    }
}

/// Media attached to a culture item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CultureAsset {
    #[serde(rename = "type")]
    pub kind: AssetKind,
    pub name: String,
    /// Archive path, external URL, or inline data URL once resolved.
    pub value: String,
}

impl CultureAsset {
    /// Create an asset.
    pub fn new(kind: AssetKind, name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            value: value.into(),
        }
    }

    /// Typed view of an asset record, `None` if it does not have the full shape.
    pub fn from_record(record: &Value) -> Option<Self> {
        Self::deserialize(record).ok()
    }

    fn to_value(&self) -> Value {
        let mut record = Map::new();
        record.insert("type".to_string(), Value::String(self.kind.to_string()));
        record.insert("name".to_string(), Value::String(self.name.clone()));
        record.insert("value".to_string(), Value::String(self.value.clone()));
        Value::Object(record)
    }
}

/// Kind of media an asset carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    Youtube,
    Video,
    Image,
    Audio,
    Pdf,
    Link,
}

impl AssetKind {
    pub const ALL: [AssetKind; 6] = [
        Self::Youtube,
        Self::Video,
        Self::Image,
        Self::Audio,
        Self::Pdf,
        Self::Link,
    ];

    /// Wire name of the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Youtube => "youtube",
            Self::Video => "video",
            Self::Image => "image",
            Self::Audio => "audio",
            Self::Pdf => "pdf",
            Self::Link => "link",
        }
    }

    /// Kind for a wire name, `None` if unknown.
    pub fn from_wire(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == name)
    }

    /// Content type used for an in-package binary of this kind when the file
    /// extension does not identify it.
    pub fn fallback_content_type(&self) -> &'static str {
        match self {
            Self::Image => "image/png",
            Self::Audio => "audio/mpeg",
            Self::Video => "video/mp4",
            Self::Pdf => "application/pdf",
            Self::Youtube | Self::Link => "application/octet-stream",
        }
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
