//! Version naming conventions and the per-folder convention sniffing.
//!
//! Two conventions exist in render folders:
//!
//! | Convention | Marker | Example |
//! |------------|--------|---------|
//! | [`Underscore`](VersionConvention::Underscore) | prefix + zero-padded digits | `shot010_v03.mov` |
//! | [`Bare`](VersionConvention::Bare) | `v` + unpadded digits | `shot010v3.mov` |
//!
//! Each convention has an independent [`VersionMatcher`] that scans a
//! listing and reports a [`ConventionScan`]. [`select_convention`] then
//! applies the precedence table. Matching is anchored at the start of the
//! filename. The stem is matched literally and case-sensitively; the prefix
//! and the `v` marker match in either case, as suffix stripping does.

use regex::Regex;
use serde::Serialize;
use tracing::{trace, warn};

use crate::config::VersionConfig;
use crate::name::zero_pad;

/// Marker used by the bare convention.
pub const BARE_MARKER: &str = "v";

/// How the version number is attached to the stem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VersionConvention {
    /// `stem` + prefix + zero-padded number, e.g. `shot_v01`.
    Underscore,
    /// `stem` + `v` + plain number, e.g. `shotv1`.
    Bare,
}

impl VersionConvention {
    /// Format the version marker for this convention.
    ///
    /// The prefix is used verbatim; only matching escapes it.
    pub fn marker(self, version: u64, config: &VersionConfig) -> String {
        match self {
            Self::Underscore => format!(
                "{}{}",
                config.version_prefix,
                zero_pad(version, config.version_padding)
            ),
            Self::Bare => format!("{BARE_MARKER}{version}"),
        }
    }
}

impl std::fmt::Display for VersionConvention {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Underscore => write!(f, "underscore"),
            Self::Bare => write!(f, "bare"),
        }
    }
}

/// Result of scanning a listing with one convention's pattern.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConventionScan {
    /// Largest version number seen, `0` when nothing matched.
    pub highest_version: u64,
    /// Whether any filename matched the pattern.
    pub matched: bool,
}

impl ConventionScan {
    /// Combine two scans, keeping the larger version.
    pub fn merge(self, other: Self) -> Self {
        Self {
            highest_version: self.highest_version.max(other.highest_version),
            matched: self.matched || other.matched,
        }
    }
}

/// A compiled pattern for one convention and one stem.
pub struct VersionMatcher {
    convention: VersionConvention,
    pattern: Option<Regex>,
}

impl VersionMatcher {
    /// Matcher for `<stem><prefix><digits>`, at least `version_padding` digits.
    pub fn underscore(stem: &str, config: &VersionConfig) -> Self {
        let min_digits = config.version_padding.max(1);
        let source = format!(
            "^{}(?i:{})([0-9]{{{min_digits},}})",
            regex::escape(stem),
            regex::escape(&config.version_prefix)
        );
        Self::compile(VersionConvention::Underscore, &source)
    }

    /// Matcher for `<stem>v<digits>`.
    pub fn bare(stem: &str) -> Self {
        let source = format!(
            "^{}(?i:{})([0-9]+)",
            regex::escape(stem),
            regex::escape(BARE_MARKER)
        );
        Self::compile(VersionConvention::Bare, &source)
    }

    fn compile(convention: VersionConvention, source: &str) -> Self {
        let pattern = match Regex::new(source) {
            Ok(re) => Some(re),
            Err(e) => {
                // Only reachable through the regex size limit on huge stems.
                warn!("{convention} version pattern rejected, treating as no matches: {e}");
                None
            }
        };
        Self {
            convention,
            pattern,
        }
    }

    /// The convention this matcher recognizes.
    pub fn convention(&self) -> VersionConvention {
        self.convention
    }

    /// Scan filenames for this convention.
    ///
    /// A number too large for `u64` still counts as a match but does not
    /// raise the highest version.
    pub fn scan<'a, I>(&self, names: I) -> ConventionScan
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut scan = ConventionScan::default();
        let Some(pattern) = &self.pattern else {
            return scan;
        };
        for name in names {
            let Some(caps) = pattern.captures(name) else {
                continue;
            };
            scan.matched = true;
            match caps[1].parse::<u64>() {
                Ok(version) => {
                    trace!("{name}: {} v{version}", self.convention);
                    scan.highest_version = scan.highest_version.max(version);
                }
                Err(e) => trace!("{name}: unparseable version number: {e}"),
            }
        }
        scan
    }
}

/// Pick the convention for the next version.
///
/// | bare matched | underscore matched | result |
/// |---|---|---|
/// | yes | any | `Bare` |
/// | no | any | `Underscore` |
pub fn select_convention(underscore: &ConventionScan, bare: &ConventionScan) -> VersionConvention {
    match (bare.matched, underscore.matched) {
        (true, _) => VersionConvention::Bare,
        (false, _) => VersionConvention::Underscore,
    }
}
