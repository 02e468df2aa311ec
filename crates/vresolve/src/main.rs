//! Print the next free versioned output name for one or more renders.
//!
//! Scans the target directory, detects whether it uses `_v01` or `v1`
//! numbering, and prints one resolved name per requested name. Nothing is
//! created on disk.
//!
//! # Examples
//!
//! ```sh
//! # Next version of shot010.mov in the current directory
//! vresolve shot010.mov
//!
//! # Several outputs into one dailies folder, as full paths
//! vresolve --dir /projects/ABC/_dailies/250101 --full-path shot010.mov shot020.mov
//!
//! # Three-digit padding, JSON records
//! vresolve --padding 3 --json plate.exr
//!
//! # Settings from a file, with logging
//! vresolve --config vresolve.json -vv shot010.mov
//! ```

use std::io;
use std::path::PathBuf;
use std::process;

use clap::{ArgAction, Parser};
use serde::Serialize;
use tracing::Level;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::{Layer, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use vresolve::{
    DirectoryListing, FsListing, ListingError, ListingSource, ResolvedName, VersionConfig,
    VersionResolver,
};

/// Print the next free versioned output name for one or more renders.
#[derive(Parser)]
#[command(name = "vresolve")]
struct Cli {
    /// Requested output names (e.g. a composition name plus extension)
    #[arg(required = true)]
    names: Vec<String>,

    /// Directory to scan for existing versions
    #[arg(short, long, default_value = ".")]
    dir: PathBuf,

    // ── Versioning ─────────────────────────────────────────────
    /// Version prefix for zero-padded numbering
    #[arg(long)]
    prefix: Option<String>,

    /// Minimum digit count for zero-padded numbering
    #[arg(long)]
    padding: Option<usize>,

    /// Lowest version number to hand out
    #[arg(long)]
    default_version: Option<u64>,

    /// JSON file with version_prefix / version_padding / default_version
    #[arg(long)]
    config: Option<PathBuf>,

    // ── Behavior ───────────────────────────────────────────────
    /// Treat a missing directory as empty instead of failing
    #[arg(long)]
    allow_missing: bool,

    // ── Output mode ────────────────────────────────────────────
    /// Print paths joined with --dir instead of bare file names
    #[arg(long)]
    full_path: bool,

    /// Print a JSON array of resolution records
    #[arg(long)]
    json: bool,

    /// Log to stderr (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

/// One line of `--json` output.
#[derive(Serialize)]
struct Record<'a> {
    requested: &'a str,
    path: PathBuf,
    #[serde(flatten)]
    resolved: &'a ResolvedName,
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stderr)
        .with_target(false)
        .with_filter(LevelFilter::from_level(level));
    tracing_subscriber::registry().with(layer).init();
}

/// Flags override the config file, which overrides the defaults.
fn build_config(cli: &Cli) -> Result<VersionConfig, String> {
    let mut config = match &cli.config {
        Some(path) => VersionConfig::load(path)?,
        None => VersionConfig::default(),
    };
    if let Some(prefix) = &cli.prefix {
        config = config.with_prefix(prefix.clone());
    }
    if let Some(padding) = cli.padding {
        config = config.with_padding(padding);
    }
    if let Some(version) = cli.default_version {
        config = config.with_default_version(version);
    }
    Ok(config)
}

fn read_listing(cli: &Cli) -> Result<DirectoryListing, String> {
    match FsListing.list(&cli.dir) {
        Ok(listing) => Ok(listing),
        Err(ListingError::NotFound(_)) if cli.allow_missing => {
            tracing::debug!("{} does not exist, using an empty listing", cli.dir.display());
            Ok(DirectoryListing::new())
        }
        Err(e) => Err(e.to_string()),
    }
}

fn run(cli: &Cli) -> Result<String, String> {
    let resolver = VersionResolver::new(build_config(cli)?);
    let listing = read_listing(cli)?;
    let resolved = resolver.resolve_batch(&listing, cli.names.iter().map(String::as_str));

    if cli.json {
        let records: Vec<Record<'_>> = cli
            .names
            .iter()
            .zip(&resolved)
            .map(|(requested, resolved)| Record {
                requested,
                path: cli.dir.join(&resolved.file_name),
                resolved,
            })
            .collect();
        let json = serde_json::to_string_pretty(&records)
            .map_err(|e| format!("failed to serialize output: {e}"))?;
        return Ok(format!("{json}\n"));
    }

    let mut out = String::new();
    for r in &resolved {
        if cli.full_path {
            out.push_str(&cli.dir.join(&r.file_name).to_string_lossy());
        } else {
            out.push_str(&r.file_name);
        }
        out.push('\n');
    }
    Ok(out)
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(output) => print!("{output}"),
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("vresolve").chain(args.iter().copied()))
    }

    #[test]
    fn config_defaults_without_flags() {
        let config = build_config(&cli(&["shot.mov"])).unwrap();
        assert_eq!(config, VersionConfig::default());
    }

    #[test]
    fn flags_override_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vresolve.json");
        std::fs::write(&path, r#"{"version_prefix": "_ver", "version_padding": 3}"#).unwrap();
        let path_arg = path.to_string_lossy().into_owned();

        let from_file = build_config(&cli(&["--config", &path_arg, "shot.mov"])).unwrap();
        assert_eq!(from_file.version_prefix, "_ver");
        assert_eq!(from_file.version_padding, 3);
        assert_eq!(from_file.default_version, 1);

        let overridden =
            build_config(&cli(&["--config", &path_arg, "--padding", "4", "shot.mov"])).unwrap();
        assert_eq!(overridden.version_prefix, "_ver");
        assert_eq!(overridden.version_padding, 4);
    }

    #[test]
    fn bad_config_file_is_an_error() {
        let err = build_config(&cli(&["--config", "/nonexistent/vresolve.json", "shot.mov"]))
            .unwrap_err();
        assert!(err.contains("failed to read config file"));
    }

    #[test]
    fn missing_dir_is_an_error_by_default() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("_dailies").to_string_lossy().into_owned();

        let err = read_listing(&cli(&["--dir", &missing, "shot.mov"])).unwrap_err();
        assert!(err.contains("directory not found"));
    }

    #[test]
    fn allow_missing_gives_empty_listing() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("_dailies").to_string_lossy().into_owned();

        let listing =
            read_listing(&cli(&["--dir", &missing, "--allow-missing", "shot.mov"])).unwrap();
        assert!(listing.is_empty());
    }

    #[test]
    fn allow_missing_still_rejects_files() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("notes.txt");
        std::fs::write(&file, b"").unwrap();
        let file_arg = file.to_string_lossy().into_owned();

        let err = read_listing(&cli(&["--dir", &file_arg, "--allow-missing", "shot.mov"]))
            .unwrap_err();
        assert!(err.contains("not a directory"));
    }

    #[test]
    fn run_prints_one_name_per_line() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("shot_v01.mov"), b"").unwrap();
        let dir_arg = dir.path().to_string_lossy().into_owned();

        let out = run(&cli(&["--dir", &dir_arg, "shot.mov", "shot.mov"])).unwrap();
        assert_eq!(out, "shot_v02.mov\nshot_v03.mov\n");
    }

    #[test]
    fn run_json_records() {
        let dir = tempfile::tempdir().unwrap();
        let dir_arg = dir.path().to_string_lossy().into_owned();

        let out = run(&cli(&["--dir", &dir_arg, "--json", "plate.exr"])).unwrap();
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(json[0]["requested"], "plate.exr");
        assert_eq!(json[0]["file_name"], "plate_v01.exr");
        assert_eq!(json[0]["convention"], "underscore");
    }
}
