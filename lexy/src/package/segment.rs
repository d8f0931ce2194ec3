//! Data segment kinds.

use std::fmt;

/// The four content categories a package can declare in `dataFiles`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SegmentKind {
    /// Vocabulary entries.
    Dictionary,
    /// Grammar lessons.
    Grammar,
    /// Culture items (the only segment carrying asset references).
    Culture,
    /// Course units with their lessons and exercises.
    Units,
}

impl SegmentKind {
    /// All segment kinds, in load order.
    pub const ALL: [SegmentKind; 4] = [
        SegmentKind::Dictionary,
        SegmentKind::Grammar,
        SegmentKind::Culture,
        SegmentKind::Units,
    ];

    /// Logical name used as the key in the manifest's `dataFiles` map.
    pub fn manifest_key(&self) -> &'static str {
        match self {
            Self::Dictionary => "dictionary",
            Self::Grammar => "grammar",
            Self::Culture => "culture",
            Self::Units => "units",
        }
    }

    /// Parse a `dataFiles` key.
    pub fn from_manifest_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.manifest_key() == key)
    }
}

impl fmt::Display for SegmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.manifest_key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manifest_keys_round_trip() {
        for kind in SegmentKind::ALL {
            assert_eq!(SegmentKind::from_manifest_key(kind.manifest_key()), Some(kind));
        }
        assert_eq!(SegmentKind::from_manifest_key("books"), None);
    }

    #[test]
    fn test_load_order() {
        assert_eq!(
            SegmentKind::ALL,
            [
                SegmentKind::Dictionary,
                SegmentKind::Grammar,
                SegmentKind::Culture,
                SegmentKind::Units
            ]
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(SegmentKind::Culture.to_string(), "culture");
    }
}
