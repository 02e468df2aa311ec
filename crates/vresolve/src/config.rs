//! Resolver configuration.
//!
//! [`VersionConfig`] is the entire tunable surface of the resolver: the
//! version prefix used by the underscore convention, its zero-pad width, and
//! the floor for the first version in an empty folder. It is passed to
//! [`VersionResolver::new`](crate::resolver::VersionResolver::new) by value;
//! nothing is read from ambient state.
//!
//! # Examples
//!
//! Defaults (`_v`, two digits, starting at 1):
//!
//! ```
//! use vresolve::VersionConfig;
//!
//! let config = VersionConfig::default();
//! assert_eq!(config.version_prefix, "_v");
//! ```
//!
//! Overriding with builder methods:
//!
//! ```
//! use vresolve::VersionConfig;
//!
//! let config = VersionConfig::default()
//!     .with_prefix("_ver")
//!     .with_padding(3)
//!     .with_default_version(10);
//! assert_eq!(config.version_padding, 3);
//! ```
//!
//! A JSON file only needs the keys it overrides:
//!
//! ```json
//! { "version_padding": 3 }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Default version prefix for the underscore convention.
pub const DEFAULT_VERSION_PREFIX: &str = "_v";

/// Default zero-pad width for the underscore convention.
pub const DEFAULT_VERSION_PADDING: usize = 2;

/// Default floor for the first version in a folder.
pub const DEFAULT_VERSION: u64 = 1;

/// Configuration for a [`VersionResolver`](crate::resolver::VersionResolver).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VersionConfig {
    /// Prefix placed between the stem and the padded number. Default: `"_v"`.
    pub version_prefix: String,
    /// Minimum digit count for underscore-style versions. Default: `2`.
    pub version_padding: usize,
    /// Lowest version ever returned. Default: `1`.
    pub default_version: u64,
}

impl Default for VersionConfig {
    fn default() -> Self {
        Self {
            version_prefix: DEFAULT_VERSION_PREFIX.to_string(),
            version_padding: DEFAULT_VERSION_PADDING,
            default_version: DEFAULT_VERSION,
        }
    }
}

impl VersionConfig {
    /// Set the version prefix.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.version_prefix = prefix.into();
        self
    }

    /// Set the zero-pad width.
    pub fn with_padding(mut self, padding: usize) -> Self {
        self.version_padding = padding;
        self
    }

    /// Set the first-version floor.
    pub fn with_default_version(mut self, version: u64) -> Self {
        self.default_version = version;
        self
    }

    /// Load a configuration from a JSON file.
    ///
    /// Missing keys keep their defaults. Errors name the offending path.
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("failed to read config file '{}': {e}", path.display()))?;
        serde_json::from_str(&content)
            .map_err(|e| format!("failed to parse config file '{}': {e}", path.display()))
    }
}
