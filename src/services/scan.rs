//! Collection scanning and index construction.
//!
//! The scanner walks each platform directory under the collection root,
//! filters out non-ROM files, parses filename metadata, hashes eligible
//! files on a rayon pool, and builds the two indexes the resolver consumes:
//! by content hash and by (platform, normalized name). Hashing runs in
//! parallel into per-file results that are merged back single-threaded, so
//! the shared indexes never need locking. Per-file failures are recorded
//! and skipped; only a missing collection root is fatal.

use crate::config::Policy;
use crate::models::{ErrorItem, RomFile};
use crate::services::{hash, parse};
use crate::ScanOptions;
use rayon::prelude::*;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

/// Scanned ROM files plus the duplicate-resolution indexes.
///
/// `roms` preserves scan order; both indexes hold positions into it. The
/// resolver walks `roms` in order and looks groups up by key, which keeps
/// resolution deterministic across runs on an unchanged input set.
#[derive(Debug)]
pub struct Collection {
    pub root: PathBuf,
    pub roms: Vec<RomFile>,
    /// Content hash -> members, hash scope only.
    pub by_hash: HashMap<String, Vec<usize>>,
    /// (platform, normalized key) -> members.
    pub by_name: HashMap<(String, String), Vec<usize>>,
    /// Normalized grouping key per rom, parallel to `roms`.
    pub name_keys: Vec<String>,
}

impl Collection {
    /// Build the indexes over an already-scanned file list.
    #[must_use]
    pub fn from_roms(root: PathBuf, roms: Vec<RomFile>) -> Self {
        let mut by_hash: HashMap<String, Vec<usize>> = HashMap::new();
        let mut by_name: HashMap<(String, String), Vec<usize>> = HashMap::new();
        let mut name_keys = Vec::with_capacity(roms.len());

        for (index, rom) in roms.iter().enumerate() {
            if let Some(hash) = &rom.hash {
                by_hash.entry(hash.clone()).or_default().push(index);
            }

            let key = rom.name.normalized_key();
            by_name
                .entry((rom.platform.clone(), key.clone()))
                .or_default()
                .push(index);
            name_keys.push(key);
        }

        Self {
            root,
            roms,
            by_hash,
            by_name,
            name_keys,
        }
    }
}

/// Walk the collection root and build an indexed [`Collection`].
pub fn scan_root(
    root: &Path,
    policy: &Policy,
    opts: &ScanOptions,
) -> crate::Result<(Collection, Vec<ErrorItem>)> {
    log::info!("Scanning {}...", root.display());

    let mut errors = Vec::new();
    let mut pending = Vec::new();

    for platform_dir in platform_dirs(root, &mut errors)? {
        let platform = platform_dir
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        if platform.starts_with('.') || platform.starts_with('_') {
            continue;
        }
        if policy.skip_platforms.contains(&platform) {
            log::info!("  {platform}: skipped (full game installations)");
            continue;
        }
        if let Some(filter) = &opts.platform_filter
            && filter != &platform
        {
            continue;
        }

        let before = pending.len();
        collect_platform_files(&platform_dir, root, &platform, policy, &mut pending, &mut errors);
        log::info!("  {platform}: {} files", pending.len() - before);
    }

    log::info!("Total: {} ROM files scanned", pending.len());

    let roms = hash_pending(pending, policy, opts, &mut errors);

    Ok((Collection::from_roms(root.to_path_buf(), roms), errors))
}

/// First-level subdirectories of the root, sorted by name.
fn platform_dirs(root: &Path, errors: &mut Vec<ErrorItem>) -> crate::Result<Vec<PathBuf>> {
    let mut dirs = Vec::new();

    for entry in fs::read_dir(root)? {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                record_error(errors, root, &e);
                continue;
            }
        };
        let path = entry.path();
        if path.is_dir() {
            dirs.push(path);
        }
    }

    dirs.sort();
    Ok(dirs)
}

/// Recursively collect candidate ROM files under one platform directory.
fn collect_platform_files(
    dir: &Path,
    root: &Path,
    platform: &str,
    policy: &Policy,
    pending: &mut Vec<RomFile>,
    errors: &mut Vec<ErrorItem>,
) {
    let reader = match fs::read_dir(dir) {
        Ok(e) => e,
        Err(e) => {
            record_error(errors, dir, &e);
            return;
        }
    };

    // Sorted by name so scan order, and therefore decision order, is
    // stable across runs on an unchanged tree.
    let mut entries = Vec::new();
    for entry in reader {
        match entry {
            Ok(e) => entries.push(e),
            Err(e) => record_error(errors, dir, &e),
        }
    }
    entries.sort_by_key(std::fs::DirEntry::file_name);

    for entry in entries {
        let path = entry.path();
        let file_name = entry.file_name().to_string_lossy().to_string();

        if file_name.starts_with('.') {
            continue;
        }

        let metadata = match entry.metadata() {
            Ok(m) => m,
            Err(e) => {
                record_error(errors, &path, &e);
                continue;
            }
        };

        if metadata.is_dir() {
            collect_platform_files(&path, root, platform, policy, pending, errors);
            continue;
        }
        if !metadata.is_file() {
            continue;
        }

        let extension = path
            .extension()
            .map(|ext| format!(".{}", ext.to_string_lossy().to_lowercase()))
            .unwrap_or_default();
        if policy.is_ignored_extension(&extension) {
            continue;
        }

        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        let name = parse::parse_stem(&stem, policy);

        pending.push(RomFile {
            rel_path: relative_path(&path, root),
            platform: platform.to_string(),
            extension,
            size: metadata.len(),
            hash: None,
            name,
            path,
        });
    }
}

/// Hash all eligible files in parallel and merge results back in order.
///
/// Files whose hash computation fails are excluded from the returned list,
/// matching the per-file skip policy of the walk itself.
fn hash_pending(
    mut pending: Vec<RomFile>,
    policy: &Policy,
    opts: &ScanOptions,
    errors: &mut Vec<ErrorItem>,
) -> Vec<RomFile> {
    if !opts.compute_hashes {
        return pending;
    }

    let mut eligible = Vec::new();
    for (index, rom) in pending.iter_mut().enumerate() {
        if rom.size >= policy.hash_size_ceiling {
            log::debug!("Skipping hash for oversized file: {}", rom.rel_path);
            continue;
        }

        // Reuse a prior run's hash when the path and size still match.
        if let Some(prior) = &opts.prior_hashes
            && let Some(record) = prior.get(&rom.rel_path)
            && record.size == rom.size
            && let Some(hash) = &record.hash
        {
            rom.hash = Some(hash.clone());
            continue;
        }

        eligible.push(index);
    }

    let results: Vec<(usize, std::io::Result<String>)> = eligible
        .into_par_iter()
        .map(|index| (index, hash::hash_file(&pending[index].path)))
        .collect();

    let mut failed = HashSet::new();
    for (index, result) in results {
        match result {
            Ok(digest) => pending[index].hash = Some(digest),
            Err(e) => {
                let path = pending[index].path.clone();
                record_error(errors, &path, &e);
                failed.insert(index);
            }
        }
    }

    if failed.is_empty() {
        pending
    } else {
        pending
            .into_iter()
            .enumerate()
            .filter(|(index, _)| !failed.contains(index))
            .map(|(_, rom)| rom)
            .collect()
    }
}

/// Root-relative path, `/`-separated on every platform.
fn relative_path(path: &Path, root: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    let text = relative.to_string_lossy();
    if text.contains('\\') {
        text.replace('\\', "/")
    } else {
        text.to_string()
    }
}

/// Record a per-file error and keep scanning.
pub(crate) fn record_error(errors: &mut Vec<ErrorItem>, path: &Path, error: &std::io::Error) {
    let code = match error.kind() {
        std::io::ErrorKind::NotFound => "ENOENT",
        std::io::ErrorKind::PermissionDenied => "EACCES",
        _ => "IO",
    };

    log::warn!("Error processing {}: {error}", path.display());
    errors.push(ErrorItem {
        path: path.to_string_lossy().to_string(),
        code: code.to_string(),
        message: error.to_string(),
    });
}
