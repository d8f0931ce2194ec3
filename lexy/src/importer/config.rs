//! Configuration for the import pipeline.

use crate::package::DEFAULT_LANGUAGE;

/// Prefix marking a field value as a path inside the package.
pub const DEFAULT_ASSET_PREFIX: &str = "assets/";

/// Title given to courses whose manifest declares none.
pub const DEFAULT_COURSE_TITLE: &str = "Imported Course";

/// Configuration for the import pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportConfig {
    /// Values starting with this prefix are resolved from the package.
    pub asset_prefix: String,

    /// Language used when the manifest declares none.
    pub default_language: String,

    /// Title used when the manifest declares none.
    pub default_title: String,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            asset_prefix: DEFAULT_ASSET_PREFIX.to_string(),
            default_language: DEFAULT_LANGUAGE.to_string(),
            default_title: DEFAULT_COURSE_TITLE.to_string(),
        }
    }
}

impl ImportConfig {
    /// Create a configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the asset prefix.
    ///
    /// An empty prefix would match every value, so it is ignored.
    pub fn with_asset_prefix(mut self, prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        if !prefix.is_empty() {
            self.asset_prefix = prefix;
        }
        self
    }

    /// Set the fallback course title.
    pub fn with_default_title(mut self, title: impl Into<String>) -> Self {
        self.default_title = title.into();
        self
    }

    /// Set the fallback course language.
    pub fn with_default_language(mut self, language: impl Into<String>) -> Self {
        let language = language.into();
        if !language.trim().is_empty() {
            self.default_language = language;
        }
        self
    }

    /// Whether `value` references an entry inside the package.
    pub fn is_asset_reference(&self, value: &str) -> bool {
        value.starts_with(&self.asset_prefix)
    }
}
