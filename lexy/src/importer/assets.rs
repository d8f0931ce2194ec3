//! Asset resolution for culture items.
//!
//! Culture items are the only records that point at binaries inside the
//! package. Resolution consumes the loaded items and produces new ones in
//! which every reference that could be found is replaced by a `data:` URL:
//!
//! ```text
//! thumbnailUrl: "assets/amelie.jpg"   ──►  "data:image/jpeg;base64,/9j/4AAQ..."
//! assets[0].value: "assets/theme.mp3" ──►  "data:audio/mpeg;base64,SUQzBA..."
//! assets[1].value: "https://..."      ──►  unchanged
//! assets[2].value: "assets/gone.png"  ──►  unchanged, reported as MissingAsset
//! ```
//!
//! Items are resolved independently of each other. The same path referenced
//! twice encodes to the same value, so encodings are cached per run.

use std::collections::HashMap;
use std::fmt;

use serde_json::Value;
use tracing::{debug, warn};

use crate::archive::PackageSource;
use crate::package::{AssetKind, CultureItem};

use super::error::{ImportError, ImportResult};
use super::inline::{content_type_for, encode_data_url};

/// Which field of a culture item held a reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetField {
    /// The item's `thumbnailUrl`.
    Thumbnail,
    /// The `value` of one of the item's assets.
    Asset { index: usize, name: String },
}

impl fmt::Display for AssetField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Thumbnail => f.write_str("thumbnailUrl"),
            Self::Asset { index, name } => write!(f, "assets[{}] ({})", index, name),
        }
    }
}

/// A reference whose entry is not in the package.
///
/// Non-fatal: the field keeps its original path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingAsset {
    pub item_id: String,
    pub field: AssetField,
    pub path: String,
}

impl fmt::Display for MissingAsset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "culture item {} {}: {} not found in package",
            self.item_id, self.field, self.path
        )
    }
}

/// Summary of an asset resolution pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolveReport {
    /// Fields rewritten to an inline encoding.
    pub resolved: usize,
    /// References left unchanged because their entry is absent.
    pub missing: Vec<MissingAsset>,
    /// Resolutions served from an earlier encoding of the same path.
    pub cache_hits: usize,
    /// Total size of distinct binaries inlined.
    pub bytes_inlined: u64,
}

/// Culture items after resolution.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedCulture {
    pub items: Vec<CultureItem>,
    pub report: ResolveReport,
}

/// Resolves asset references against one package.
pub struct AssetResolver<'a, S: PackageSource + ?Sized> {
    source: &'a mut S,
    prefix: &'a str,
    encoded: HashMap<String, String>,
    report: ResolveReport,
}

impl<'a, S: PackageSource + ?Sized> AssetResolver<'a, S> {
    /// Create a resolver for references starting with `prefix`.
    pub fn new(source: &'a mut S, prefix: &'a str) -> Self {
        Self {
            source,
            prefix,
            encoded: HashMap::new(),
            report: ResolveReport::default(),
        }
    }

    /// Resolve every item, consuming the resolver.
    pub fn resolve_all(mut self, items: Vec<CultureItem>) -> ImportResult<ResolvedCulture> {
        let items = items
            .into_iter()
            .map(|item| self.resolve_item(item))
            .collect::<ImportResult<Vec<_>>>()?;

        Ok(ResolvedCulture {
            items,
            report: self.report,
        })
    }

    /// Resolve the references of one item in place.
    ///
    /// Fields that are absent or not strings are skipped, as are asset
    /// records without a string `value`.
    pub fn resolve_item(&mut self, mut item: CultureItem) -> ImportResult<CultureItem> {
        let item_id = item.id_label();

        if let Some(thumbnail) = item.thumbnail_url().map(str::to_string) {
            match self.resolve_value(&thumbnail, Some(AssetKind::Image))? {
                Some(inline) => item.set_thumbnail_url(inline),
                None => self.note_missing(&item_id, AssetField::Thumbnail, &thumbnail),
            }
        }

        if let Some(assets) = item.asset_records_mut() {
            for (index, asset) in assets.iter_mut().enumerate() {
                self.resolve_asset(&item_id, index, asset)?;
            }
        }

        Ok(item)
    }

    fn resolve_asset(&mut self, item_id: &str, index: usize, asset: &mut Value) -> ImportResult<()> {
        let Some(value) = asset.get("value").and_then(Value::as_str).map(str::to_string) else {
            return Ok(());
        };
        let kind = asset
            .get("type")
            .and_then(Value::as_str)
            .and_then(AssetKind::from_wire);

        match self.resolve_value(&value, kind)? {
            Some(inline) => {
                if let Some(slot) = asset.get_mut("value") {
                    *slot = Value::String(inline);
                }
            }
            None => {
                let name = asset
                    .get("name")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string();
                self.note_missing(item_id, AssetField::Asset { index, name }, &value);
            }
        }

        Ok(())
    }

    /// Inline encoding for `value`, or `None` if it is a reference whose entry
    /// is absent. Values that are not references come back unchanged.
    fn resolve_value(
        &mut self,
        value: &str,
        kind: Option<AssetKind>,
    ) -> ImportResult<Option<String>> {
        if !value.starts_with(self.prefix) {
            return Ok(Some(value.to_string()));
        }

        if let Some(inline) = self.encoded.get(value) {
            self.report.resolved += 1;
            self.report.cache_hits += 1;
            return Ok(Some(inline.clone()));
        }

        let Some(handle) = self.source.entry(value) else {
            return Ok(None);
        };

        let bytes = self
            .source
            .read_binary(&handle)
            .map_err(|e| ImportError::AssetRead {
                path: value.to_string(),
                reason: e.to_string(),
            })?;

        let content_type = content_type_for(value, kind);
        debug!(path = value, content_type, bytes = bytes.len(), "Inlined asset");

        let inline = encode_data_url(content_type, &bytes);
        self.report.resolved += 1;
        self.report.bytes_inlined += bytes.len() as u64;
        self.encoded.insert(value.to_string(), inline.clone());

        Ok(Some(inline))
    }

    fn note_missing(&mut self, item_id: &str, field: AssetField, path: &str) {
        let missing = MissingAsset {
            item_id: item_id.to_string(),
            field,
            path: path.to_string(),
        };
        warn!("{}", missing);
        self.report.missing.push(missing);
    }
}

/// Resolve the asset references of `items` against `source`.
pub fn resolve_assets<S: PackageSource + ?Sized>(
    source: &mut S,
    items: Vec<CultureItem>,
    prefix: &str,
) -> ImportResult<ResolvedCulture> {
    AssetResolver::new(source, prefix).resolve_all(items)
}
