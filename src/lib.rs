//! ROM Collection Deduplication Library
//!
//! This library scans ROM collections organized by platform directory,
//! parses release metadata out of filenames, and resolves redundant copies
//! of the same game down to one canonical keeper per game. Resolution runs
//! in three phases (exact hash duplicates, name-scope duplicates, standalone
//! bad dumps) and produces an ordered removal-decision list that can be
//! reported as CSV, cached as Parquet, and replayed against the filesystem.

pub mod cli;
pub mod config;
pub mod io;
pub mod models;
pub mod services;

pub use config::Policy;
pub use models::{CacheMeta, CacheRecord, ErrorItem, RemovalDecision, RomFile};
pub use services::resolve::resolve;
pub use services::scan::Collection;

use std::collections::HashMap;
use std::path::Path;
use std::result;

/// Custom error type for the library
#[derive(Debug)]
pub enum Error {
    Io(std::io::Error),
    InvalidInput(String),
    Report(String),
    System(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O error: {e}"),
            Error::InvalidInput(msg) => write!(f, "Invalid input: {msg}"),
            Error::Report(msg) => write!(f, "Report error: {msg}"),
            Error::System(msg) => write!(f, "System error: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        Error::Report(err.to_string())
    }
}

pub type Result<T> = result::Result<T, Error>;

/// Options for scanning a collection
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Compute whole-file content hashes (phase 1 input). Disabling skips
    /// exact-duplicate detection but speeds up large collections.
    pub compute_hashes: bool,
    /// Restrict the scan to a single platform directory name.
    pub platform_filter: Option<String>,
    /// Hashes from a prior run, keyed by root-relative path. A file whose
    /// size still matches reuses the cached hash instead of re-reading.
    pub prior_hashes: Option<HashMap<String, CacheRecord>>,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            compute_hashes: true,
            platform_filter: None,
            prior_hashes: None,
        }
    }
}

/// Summary result from a scan operation
#[derive(Debug)]
pub struct Summary {
    pub root: String,
    pub collection: Collection,
    pub errors: Vec<ErrorItem>,
    pub started_at: std::time::SystemTime,
    pub finished_at: std::time::SystemTime,
}

/// Scan a collection root and build the duplicate-resolution indexes
///
/// # Arguments
/// * `root` - The ROMs directory, one platform per subdirectory
/// * `policy` - Static lookup tables for parsing and filtering
/// * `opts` - Scan options
///
/// # Returns
/// A Summary holding the indexed collection and any per-file errors
pub fn scan_collection<P: AsRef<Path>>(
    root: P,
    policy: &Policy,
    opts: &ScanOptions,
) -> Result<Summary> {
    let root_path = root.as_ref().to_string_lossy().to_string();

    if !root.as_ref().exists() {
        return Err(Error::InvalidInput(format!(
            "ROMs directory not found: {root_path}"
        )));
    }

    if !root.as_ref().is_dir() {
        return Err(Error::InvalidInput(format!(
            "Path is not a directory: {root_path}"
        )));
    }

    let started_at = std::time::SystemTime::now();

    let (collection, errors) = services::scan::scan_root(root.as_ref(), policy, opts)?;

    let finished_at = std::time::SystemTime::now();

    Ok(Summary {
        root: root_path,
        collection,
        errors,
        started_at,
        finished_at,
    })
}
