//! Data models for scanned ROM files, removal decisions, cache records, and errors

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::PathBuf;

/// Sentinel written to reports for decisions that keep nothing.
pub const NO_KEEPER: &str = "(none - bad ROM)";

/// One physical file found during a collection scan.
///
/// Created by the scanner and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct RomFile {
    /// Absolute filesystem location.
    pub path: PathBuf,
    /// Path relative to the collection root, `/`-separated.
    pub rel_path: String,
    /// Immediate platform directory name; the dedup scope.
    pub platform: String,
    /// Lower-cased file suffix including the dot, empty when absent.
    pub extension: String,
    /// Byte length at scan time.
    pub size: u64,
    /// Whole-file content hash, absent when hashing was skipped or disabled.
    pub hash: Option<String>,
    /// Metadata parsed out of the filename stem.
    pub name: RomName,
}

/// Structured release metadata extracted from a filename stem.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RomName {
    /// Stem with all tags stripped, whitespace collapsed, trailing
    /// hyphen/underscore runs trimmed.
    pub base_name: String,
    /// Recognized region tokens found in parenthetical tags.
    pub regions: BTreeSet<String>,
    /// Code from a `(Rev X)` tag.
    pub revision: Option<String>,
    /// Dotted numeric string from a `(vN.N)` tag.
    pub version: Option<String>,
    /// Disc index for multi-disc releases; part of identity, not quality.
    pub disc: Option<String>,
    /// Side index for multi-side media (e.g. FDS); part of identity.
    pub side: Option<String>,
    /// Parenthetical tags matching the removal vocabulary.
    pub bad_tags: BTreeSet<String>,
    /// All bracket tokens, verbatim.
    pub bracket_tags: BTreeSet<String>,
    /// Any bad parenthetical tag or bad bracket token present.
    pub is_bad: bool,
    /// The reserved good-dump bracket marker is present.
    pub is_verified_dump: bool,
    /// Re-release channel label when the name indicates a secondary
    /// distribution (virtual console, mini console, ...).
    pub source_variant: Option<String>,
}

/// One removal decision produced by the resolver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemovalDecision {
    pub platform: String,
    /// Root-relative path of the file to remove.
    pub remove: String,
    /// Root-relative path of the canonical copy, `None` for standalone bad
    /// files with no keeper.
    pub keep: Option<String>,
    /// Human-readable justification.
    pub reason: String,
    /// Byte size of the file to remove.
    pub size: u64,
}

/// An error encountered while scanning or replaying decisions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorItem {
    pub path: String,
    pub code: String,
    pub message: String,
}

/// Metadata stored alongside scan cache records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheMeta {
    pub scan_root: String,
    pub scanned_at: String,
    pub hash_algorithm: String,
}

/// One scanned file persisted to the scan cache.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheRecord {
    pub path: String,
    pub hash: Option<String>,
    pub size: u64,
}
