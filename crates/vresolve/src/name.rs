//! Output name parsing.
//!
//! A requested name such as `shot010_v03.mov` is reduced to a [`BaseName`]:
//! the stem (`shot010`) with any trailing version token removed, and the
//! extension (`.mov`) kept verbatim so it can be re-attached after the new
//! version marker.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

/// Trailing `_v<digits>` or `v<digits>`, either case.
static VERSION_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)_?v[0-9]+$").expect("version suffix pattern is valid"));

/// A requested name split into its canonical stem and extension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BaseName {
    /// Name without extension or version suffix. May be empty.
    pub stem: String,
    /// Extension including the leading dot, or empty.
    pub extension: String,
}

impl BaseName {
    /// Parse a requested output name.
    ///
    /// The extension is everything from the last `.`; a name without a dot
    /// has an empty extension. At most one trailing version token is
    /// stripped from what remains.
    pub fn parse(original_name: &str) -> Self {
        let (stem, extension) = split_extension(original_name);
        Self {
            stem: strip_version_suffix(stem),
            extension: extension.to_string(),
        }
    }
}

/// Split at the last `.`, keeping the dot on the extension side.
pub fn split_extension(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(idx) => name.split_at(idx),
        None => (name, ""),
    }
}

/// Remove one trailing `_v<digits>` / `v<digits>` token (case-insensitive).
pub fn strip_version_suffix(stem: &str) -> String {
    let mut stripped = stem.to_string();
    if let Some(m) = VERSION_SUFFIX.find(stem) {
        stripped.truncate(m.start());
    }
    stripped
}

/// Format `n` with at least `width` digits. Wider numbers are never cut.
pub fn zero_pad(n: u64, width: usize) -> String {
    let digits = n.to_string();
    let mut padded = "0".repeat(width.saturating_sub(digits.len()));
    padded.push_str(&digits);
    padded
}
