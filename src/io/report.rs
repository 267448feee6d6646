//! CSV report read/write operations
//!
//! The report is the durable form of a resolution run: one row per removal
//! decision, sorted by platform and path so diffs between runs stay
//! readable. The purge command can replay a report without re-scanning.

use crate::models::{RemovalDecision, NO_KEEPER};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One CSV row. Sizes are reported in MB with two decimals, matching the
/// column header `size_mb`.
#[derive(Debug, Serialize, Deserialize)]
struct ReportRow {
    platform: String,
    remove: String,
    keep: String,
    reason: String,
    size_mb: String,
}

/// Write the decision list as a CSV report.
pub fn write_report(path: &str, decisions: &[RemovalDecision]) -> Result<()> {
    let file_path = Path::new(path);
    if let Some(parent) = file_path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }

    let mut writer = csv::Writer::from_path(file_path)?;

    let mut ordered: Vec<&RemovalDecision> = decisions.iter().collect();
    ordered.sort_by(|a, b| (&a.platform, &a.remove).cmp(&(&b.platform, &b.remove)));

    for decision in ordered {
        writer.serialize(ReportRow {
            platform: decision.platform.clone(),
            remove: decision.remove.clone(),
            keep: decision
                .keep
                .clone()
                .unwrap_or_else(|| NO_KEEPER.to_string()),
            reason: decision.reason.clone(),
            size_mb: format!("{:.2}", decision.size as f64 / 1_000_000.0),
        })?;
    }

    writer.flush()?;
    Ok(())
}

/// Load a decision list back from a CSV report.
pub fn read_report(path: &str) -> Result<Vec<RemovalDecision>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut decisions = Vec::new();

    for row in reader.deserialize::<ReportRow>() {
        let row = row?;
        let size_mb: f64 = row
            .size_mb
            .parse()
            .map_err(|_| Error::Report(format!("invalid size_mb value: {}", row.size_mb)))?;

        decisions.push(RemovalDecision {
            platform: row.platform,
            remove: row.remove,
            keep: if row.keep == NO_KEEPER {
                None
            } else {
                Some(row.keep)
            },
            reason: row.reason,
            size: (size_mb * 1_000_000.0).round() as u64,
        });
    }

    Ok(decisions)
}
