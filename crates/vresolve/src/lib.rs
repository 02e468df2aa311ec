//! Auto-versioning output names for render and dailies folders.
//!
//! `vresolve` answers one question: given the files already sitting in an
//! output folder and the name you want to render to, what is the next free
//! versioned name? It follows whichever numbering the folder already uses:
//! `shot010_v03.mov` (prefix + zero-padded digits) or `shot010v3.mov` (bare
//! `v` + digits).
//!
//! # Getting started
//!
//! ```
//! use vresolve::{DirectoryListing, VersionConfig, VersionResolver};
//!
//! let listing: DirectoryListing = ["shot010_v01.mov", "shot010_v02.mov"].into_iter().collect();
//! let resolver = VersionResolver::new(VersionConfig::default());
//!
//! let next = resolver.resolve(&listing, "shot010.mov");
//! assert_eq!(next.file_name, "shot010_v03.mov");
//! ```
//!
//! Listing a real folder first:
//!
//! ```no_run
//! use std::path::Path;
//! use vresolve::{FsListing, ListingSource, VersionResolver};
//!
//! let listing = FsListing.list(Path::new("/projects/ABC_DEF_001/_dailies/250101"))?;
//! let next = VersionResolver::default().resolve(&listing, "shot010.mov");
//! println!("{next}");
//! # Ok::<(), vresolve::ListingError>(())
//! ```
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | [`VersionConfig`]: prefix, padding, first-version floor; JSON loading |
//! | [`name`] | Stem/extension parsing and version-suffix stripping |
//! | [`convention`] | Underscore vs bare conventions, per-convention matchers, precedence |
//! | [`resolver`] | [`VersionResolver`] single and batch resolution |
//! | [`listing`] | [`DirectoryListing`] snapshots and the [`ListingSource`] providers |
//! | [`host`] | [`ProjectHost`] capability trait and render-queue setup |
//!
//! # Concurrency
//!
//! Resolution works on a snapshot and reserves nothing. If two processes
//! resolve against the same folder before either writes its file, both get
//! the same name. Within one process, use
//! [`resolve_batch`](VersionResolver::resolve_batch) for several outputs.

pub mod config;
pub mod convention;
pub mod host;
pub mod listing;
pub mod name;
pub mod resolver;

pub use config::VersionConfig;
pub use convention::{ConventionScan, VersionConvention, VersionMatcher, select_convention};
pub use host::{
    CompSelection, Composition, MemoryHost, ProjectHost, QueueError, QueueOptions, QueuedRender,
    queue_renders,
};
pub use listing::{DirectoryListing, FsListing, ListingError, ListingSource, MemoryListing};
pub use name::BaseName;
pub use resolver::{ResolvedName, VersionResolver};
