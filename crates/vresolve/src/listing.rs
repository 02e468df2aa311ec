//! Directory listings: the resolver's only input from the filesystem.
//!
//! A [`DirectoryListing`] is a point-in-time snapshot of the names in a
//! folder. It is taken before resolution and is not locked, so files created
//! by another process between the snapshot and the caller's write are not
//! seen. Callers resolving several names into one folder should use
//! [`VersionResolver::resolve_batch`](crate::resolver::VersionResolver::resolve_batch),
//! which extends a working copy of the snapshot after every resolution.
//!
//! Listings come from a [`ListingSource`]. [`FsListing`] reads a real
//! directory; [`MemoryListing`] serves fixed listings keyed by path.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

/// Failure to obtain a listing. Raised before the resolver runs.
#[derive(Debug, Error)]
pub enum ListingError {
    #[error("directory not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("failed to read directory '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Ordered snapshot of the entry names in one folder.
///
/// Files and subdirectories are not distinguished.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryListing {
    names: Vec<String>,
}

impl DirectoryListing {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Entry names in listing order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Append a name, e.g. one just handed out by the resolver.
    pub fn push(&mut self, name: impl Into<String>) {
        self.names.push(name.into());
    }
}

impl<S: Into<String>> FromIterator<S> for DirectoryListing {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<Vec<String>> for DirectoryListing {
    fn from(names: Vec<String>) -> Self {
        Self { names }
    }
}

/// Supplies directory listings to resolution callers.
pub trait ListingSource {
    /// Snapshot the entry names of `dir`.
    fn list(&self, dir: &Path) -> Result<DirectoryListing, ListingError>;
}

/// Lists real directories with `std::fs`.
///
/// Entries are returned sorted by name so results do not depend on the
/// platform's directory order. Names that are not valid UTF-8 are converted
/// lossily.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsListing;

impl ListingSource for FsListing {
    fn list(&self, dir: &Path) -> Result<DirectoryListing, ListingError> {
        let meta = match fs::metadata(dir) {
            Ok(meta) => meta,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(ListingError::NotFound(dir.to_path_buf()));
            }
            Err(source) => {
                return Err(ListingError::Io {
                    path: dir.to_path_buf(),
                    source,
                });
            }
        };
        if !meta.is_dir() {
            return Err(ListingError::NotADirectory(dir.to_path_buf()));
        }

        let io_err = |source: io::Error| ListingError::Io {
            path: dir.to_path_buf(),
            source,
        };
        let mut names = Vec::new();
        for entry in fs::read_dir(dir).map_err(io_err)? {
            let entry = entry.map_err(io_err)?;
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
        names.sort();

        debug!("Listed {} entries in {}", names.len(), dir.display());
        Ok(DirectoryListing::from(names))
    }
}

/// Fixed listings keyed by directory path.
///
/// Unknown paths report [`ListingError::NotFound`].
#[derive(Debug, Clone, Default)]
pub struct MemoryListing {
    dirs: HashMap<PathBuf, DirectoryListing>,
}

impl MemoryListing {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a directory and its entries.
    pub fn with_dir<I, S>(mut self, dir: impl Into<PathBuf>, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dirs.insert(dir.into(), names.into_iter().collect());
        self
    }
}

impl ListingSource for MemoryListing {
    fn list(&self, dir: &Path) -> Result<DirectoryListing, ListingError> {
        self.dirs
            .get(dir)
            .cloned()
            .ok_or_else(|| ListingError::NotFound(dir.to_path_buf()))
    }
}
