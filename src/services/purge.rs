//! Decision replay against the live filesystem.
//!
//! Replays a removal-decision list in one of three modes. Per-file failures
//! are collected and reported in aggregate; replay never halts early.

use crate::models::{ErrorItem, RemovalDecision};
use crate::services::scan::record_error;
use std::fs;
use std::path::Path;

/// How decisions are applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PurgeMode {
    /// Log what would happen; touch nothing.
    DryRun,
    /// Move each file under the quarantine root, preserving its relative path.
    Quarantine,
    /// Permanently delete each file.
    Delete,
}

/// Aggregate outcome of one replay.
#[derive(Debug, Default)]
pub struct PurgeOutcome {
    pub removed: u64,
    pub reclaimed_bytes: u64,
    pub errors: Vec<ErrorItem>,
}

/// Replay `decisions` rooted at `root`.
///
/// Files that no longer exist are warned about and skipped. Quarantine
/// creates destination directories as needed.
pub fn purge(
    root: &Path,
    quarantine_root: &Path,
    decisions: &[RemovalDecision],
    mode: PurgeMode,
) -> PurgeOutcome {
    if mode == PurgeMode::DryRun {
        log::info!("DRY RUN - no files will be modified");
    }

    let mut outcome = PurgeOutcome::default();

    for decision in decisions {
        let path = root.join(&decision.remove);

        if !path.exists() {
            log::warn!("File not found: {}", path.display());
            continue;
        }

        match mode {
            PurgeMode::DryRun => {
                log::info!(
                    "Would remove: {} ({:.2} MB)",
                    decision.remove,
                    decision.size as f64 / 1_000_000.0
                );
                log::info!("  Reason: {}", decision.reason);
                log::info!(
                    "  Keeping: {}",
                    decision.keep.as_deref().unwrap_or(crate::models::NO_KEEPER)
                );
            }
            PurgeMode::Quarantine => {
                let destination = quarantine_root.join(&decision.remove);
                match quarantine_file(&path, &destination) {
                    Ok(()) => {
                        log::info!("Quarantined: {}", decision.remove);
                        outcome.removed += 1;
                        outcome.reclaimed_bytes += decision.size;
                    }
                    Err(e) => {
                        log::error!("Error quarantining {}: {e}", path.display());
                        record_error(&mut outcome.errors, &path, &e);
                    }
                }
            }
            PurgeMode::Delete => match fs::remove_file(&path) {
                Ok(()) => {
                    log::info!("Deleted: {}", decision.remove);
                    outcome.removed += 1;
                    outcome.reclaimed_bytes += decision.size;
                }
                Err(e) => {
                    log::error!("Error deleting {}: {e}", path.display());
                    record_error(&mut outcome.errors, &path, &e);
                }
            },
        }
    }

    if mode != PurgeMode::DryRun {
        log::info!(
            "Removed {} files, freed {:.2} GB",
            outcome.removed,
            outcome.reclaimed_bytes as f64 / 1_000_000_000.0
        );
        if !outcome.errors.is_empty() {
            log::warn!("{} errors occurred", outcome.errors.len());
        }
    }

    outcome
}

fn quarantine_file(source: &Path, destination: &Path) -> std::io::Result<()> {
    if let Some(parent) = destination.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::rename(source, destination)
}
