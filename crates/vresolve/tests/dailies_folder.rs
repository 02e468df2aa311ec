//! End-to-end tests against real dailies folders.
//!
//! Each test lays out files in a temporary directory, lists it with
//! `FsListing`, and checks the names the resolver hands back.

use std::fs;
use std::path::Path;

use vresolve::{
    CompSelection, Composition, FsListing, ListingSource, MemoryHost, QueueError, QueueOptions,
    VersionConfig, VersionConvention, VersionResolver, queue_renders,
};

/// Helper: create empty files in `dir`.
fn touch(dir: &Path, names: &[&str]) {
    for name in names {
        fs::write(dir.join(name), b"").unwrap();
    }
}

#[test]
fn resolves_next_version_in_real_folder() {
    let dir = tempfile::tempdir().unwrap();
    touch(dir.path(), &["shot010_v01.mov", "shot010_v02.mov"]);

    let listing = FsListing.list(dir.path()).unwrap();
    let next = VersionResolver::default().resolve(&listing, "shot010.mov");
    assert_eq!(next.file_name, "shot010_v03.mov");
}

#[test]
fn empty_folder_uses_underscore_default() {
    let dir = tempfile::tempdir().unwrap();
    let listing = FsListing.list(dir.path()).unwrap();

    let next = VersionResolver::default().resolve(&listing, "shot020_v1.mov");
    assert_eq!(next.stem, "shot020");
    assert_eq!(next.file_name, "shot020_v01.mov");
}

#[test]
fn bare_sibling_switches_whole_folder() {
    let dir = tempfile::tempdir().unwrap();
    touch(dir.path(), &["shot010v3.mov", "shot010_v01.mov", "notes.txt"]);

    let listing = FsListing.list(dir.path()).unwrap();
    let next = VersionResolver::default().resolve(&listing, "shot010.mov");
    assert_eq!(next.file_name, "shot010v4.mov");
    assert_eq!(next.convention, VersionConvention::Bare);
}

#[test]
fn subdirectories_count_as_versions() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("plate_v04")).unwrap();

    let listing = FsListing.list(dir.path()).unwrap();
    let next = VersionResolver::default().resolve(&listing, "plate");
    assert_eq!(next.file_name, "plate_v05");
}

#[test]
fn writing_the_result_advances_the_next_call() {
    let dir = tempfile::tempdir().unwrap();
    let resolver = VersionResolver::default();

    let first = resolver.resolve(&FsListing.list(dir.path()).unwrap(), "shot.mov");
    // Unchanged folder, unchanged answer.
    let again = resolver.resolve(&FsListing.list(dir.path()).unwrap(), "shot.mov");
    assert_eq!(first, again);

    touch(dir.path(), &[first.as_str()]);
    let second = resolver.resolve(&FsListing.list(dir.path()).unwrap(), "shot.mov");
    assert_eq!(first.file_name, "shot_v01.mov");
    assert_eq!(second.file_name, "shot_v02.mov");
}

#[test]
fn configured_padding_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("vresolve.json");
    fs::write(&config_path, r#"{"version_padding": 3}"#).unwrap();
    let renders = dir.path().join("renders");
    fs::create_dir(&renders).unwrap();
    touch(&renders, &["comp_v009.exr"]);

    let resolver = VersionResolver::new(VersionConfig::load(&config_path).unwrap());
    let next = resolver.resolve(&FsListing.list(&renders).unwrap(), "comp.exr");
    assert_eq!(next.file_name, "comp_v010.exr");
}

#[test]
fn render_queue_into_real_folder() {
    let dir = tempfile::tempdir().unwrap();
    touch(dir.path(), &["shot010_v01.mov"]);

    let mut host = MemoryHost::new(vec![
        Composition::new(1, "shot010"),
        Composition::new(2, "shot020"),
    ]);
    let options = QueueOptions::default()
        .with_selection(CompSelection::All)
        .with_extension(".mov");

    let queued = queue_renders(
        &mut host,
        &FsListing,
        dir.path(),
        &VersionResolver::default(),
        &options,
    )
    .unwrap();

    assert_eq!(queued.len(), 2);
    assert_eq!(queued[0].output_path, dir.path().join("shot010_v02.mov"));
    assert_eq!(queued[1].output_path, dir.path().join("shot020_v01.mov"));
    assert_eq!(host.queue()[1].1, dir.path().join("shot020_v01.mov"));
}

#[test]
fn render_queue_missing_folder_fails_before_queueing() {
    let dir = tempfile::tempdir().unwrap();
    let mut host = MemoryHost::new(vec![Composition::new(1, "shot010")]).with_active(1);

    let err = queue_renders(
        &mut host,
        &FsListing,
        &dir.path().join("_dailies"),
        &VersionResolver::default(),
        &QueueOptions::default(),
    )
    .unwrap_err();

    assert!(matches!(err, QueueError::Listing(_)));
    assert!(err.to_string().contains("directory not found"));
    assert!(host.queue().is_empty());
}
