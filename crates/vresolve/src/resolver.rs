//! The auto-versioning resolver.
//!
//! [`VersionResolver::resolve`] turns a requested name and a folder snapshot
//! into the next free version-suffixed name:
//!
//! 1. Parse the name into a [`BaseName`] (extension split, version token
//!    stripped).
//! 2. Scan the listing with the underscore and bare matchers for that stem.
//! 3. Pick the convention: bare wins if any bare-style sibling exists.
//! 4. Next version = `max(highest + 1, default_version)`, where `highest`
//!    covers both conventions so versions never go backwards.
//! 5. Format `stem + marker + extension`.
//!
//! Resolution is pure. It neither creates nor reserves the name, so two
//! calls against the same listing return the same answer.

use serde::Serialize;
use tracing::debug;

use crate::config::VersionConfig;
use crate::convention::{VersionConvention, VersionMatcher, select_convention};
use crate::listing::DirectoryListing;
use crate::name::BaseName;

/// A resolved output name and how it was derived.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedName {
    /// The full file name, e.g. `shot010_v03.mov`.
    pub file_name: String,
    /// Canonical stem the version was attached to.
    pub stem: String,
    /// Extension including the dot, or empty.
    pub extension: String,
    /// The version number chosen.
    pub version: u64,
    /// The convention the number was formatted with.
    pub convention: VersionConvention,
}

impl ResolvedName {
    /// The resolved file name.
    pub fn as_str(&self) -> &str {
        &self.file_name
    }
}

impl std::fmt::Display for ResolvedName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.file_name)
    }
}

/// Computes next-in-sequence output names for a folder.
#[derive(Debug, Clone, Default)]
pub struct VersionResolver {
    config: VersionConfig,
}

impl VersionResolver {
    pub fn new(config: VersionConfig) -> Self {
        Self { config }
    }

    /// Resolve the next versioned name for `original_name` in `listing`.
    pub fn resolve(&self, listing: &DirectoryListing, original_name: &str) -> ResolvedName {
        let base = BaseName::parse(original_name);

        let underscore =
            VersionMatcher::underscore(&base.stem, &self.config).scan(listing.names());
        let bare = VersionMatcher::bare(&base.stem).scan(listing.names());
        let convention = select_convention(&underscore, &bare);

        let highest = underscore.merge(bare).highest_version;
        let version = highest
            .saturating_add(1)
            .max(self.config.default_version);

        let file_name = format!(
            "{}{}{}",
            base.stem,
            convention.marker(version, &self.config),
            base.extension
        );
        debug!(
            "{original_name} -> {file_name} (stem '{}', {convention}, highest {highest}, {} entries scanned)",
            base.stem,
            listing.len()
        );

        ResolvedName {
            file_name,
            stem: base.stem,
            extension: base.extension,
            version,
            convention,
        }
    }

    /// Resolve several names into the same folder.
    ///
    /// Each result is added to a working copy of `listing` before the next
    /// name is resolved, so repeated names get consecutive versions. The
    /// caller's listing is left untouched; the names are still unreserved on
    /// disk.
    pub fn resolve_batch<'a, I>(&self, listing: &DirectoryListing, names: I) -> Vec<ResolvedName>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut working = listing.clone();
        names
            .into_iter()
            .map(|name| {
                let resolved = self.resolve(&working, name);
                working.push(resolved.file_name.clone());
                resolved
            })
            .collect()
    }
}
