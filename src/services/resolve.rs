//! Three-phase duplicate resolution.
//!
//! Resolution walks the collection's indexes in scan order and emits one
//! [`RemovalDecision`] per removed file:
//!
//! 1. **Exact content**: every hash bucket with two or more files keeps its
//!    top-scoring member and removes the rest. Hash scope only; identical
//!    bytes are identical content regardless of naming.
//! 2. **Name scope**: every (platform, normalized key) group is partitioned
//!    by extension, the platform's preferred format fixes the keeper's
//!    extension, and the best-scoring file of that format wins. Everything
//!    else in the group is removed with a composite reason.
//! 3. **Orphan bad files**: still-undecided bad dumps are removed with no
//!    keeper.
//!
//! The decided set grows monotonically across phases, so no path ever
//! receives two decisions and hash judgment always precedes name judgment.

use crate::config::Policy;
use crate::models::{RemovalDecision, RomFile};
use crate::services::scan::Collection;
use crate::services::score::{region_rank, revision_rank, score};
use std::collections::HashSet;

/// Resolve the collection into an ordered removal-decision list.
#[must_use]
pub fn resolve(collection: &Collection, policy: &Policy) -> Vec<RemovalDecision> {
    log::info!("Finding duplicates...");

    let mut decided: HashSet<usize> = HashSet::new();
    let mut decisions = Vec::new();

    resolve_hash_duplicates(collection, policy, &mut decided, &mut decisions);
    resolve_name_duplicates(collection, policy, &mut decided, &mut decisions);
    resolve_orphan_bad_files(collection, &mut decided, &mut decisions);

    log::info!("Found {} duplicates", decisions.len());
    decisions
}

/// Phase 1: exact content duplicates, keyed by hash alone.
fn resolve_hash_duplicates(
    collection: &Collection,
    policy: &Policy,
    decided: &mut HashSet<usize>,
    decisions: &mut Vec<RemovalDecision>,
) {
    let mut seen_hashes: HashSet<&str> = HashSet::new();

    for rom in &collection.roms {
        let Some(hash) = &rom.hash else {
            continue;
        };
        if !seen_hashes.insert(hash.as_str()) {
            continue;
        }

        let Some(bucket) = collection.by_hash.get(hash) else {
            continue;
        };
        if bucket.len() < 2 {
            continue;
        }

        let ranked = rank_by_score(bucket, collection, policy);
        let keeper = &collection.roms[ranked[0]];

        for &loser in &ranked[1..] {
            if decided.insert(loser) {
                let rom = &collection.roms[loser];
                decisions.push(RemovalDecision {
                    platform: rom.platform.clone(),
                    remove: rom.rel_path.clone(),
                    keep: Some(keeper.rel_path.clone()),
                    reason: "Exact duplicate (hash match)".to_string(),
                    size: rom.size,
                });
            }
        }
    }
}

/// Phase 2: name-scope duplicates within each platform.
fn resolve_name_duplicates(
    collection: &Collection,
    policy: &Policy,
    decided: &mut HashSet<usize>,
    decisions: &mut Vec<RemovalDecision>,
) {
    let mut seen_groups: HashSet<(&str, &str)> = HashSet::new();

    for (index, rom) in collection.roms.iter().enumerate() {
        let key = collection.name_keys[index].as_str();
        if !seen_groups.insert((rom.platform.as_str(), key)) {
            continue;
        }

        let Some(group) = collection
            .by_name
            .get(&(rom.platform.clone(), key.to_string()))
        else {
            continue;
        };
        if group.len() < 2 {
            continue;
        }

        let remaining: Vec<usize> = group
            .iter()
            .copied()
            .filter(|member| !decided.contains(member))
            .collect();
        if remaining.len() < 2 {
            continue;
        }

        let Some(keeper) = pick_keeper(&remaining, collection, policy, &rom.platform) else {
            continue;
        };
        let keeper_rom = &collection.roms[keeper];

        for &member in &remaining {
            if member == keeper {
                continue;
            }
            if decided.insert(member) {
                let loser = &collection.roms[member];
                decisions.push(RemovalDecision {
                    platform: loser.platform.clone(),
                    remove: loser.rel_path.clone(),
                    keep: Some(keeper_rom.rel_path.clone()),
                    reason: removal_reason(loser, keeper_rom, policy),
                    size: loser.size,
                });
            }
        }
    }
}

/// Phase 3: bad dumps that survived the duplicate phases.
fn resolve_orphan_bad_files(
    collection: &Collection,
    decided: &mut HashSet<usize>,
    decisions: &mut Vec<RemovalDecision>,
) {
    for (index, rom) in collection.roms.iter().enumerate() {
        if decided.contains(&index) || !rom.name.is_bad {
            continue;
        }

        let tags = if rom.name.bad_tags.is_empty() {
            join_set(&rom.name.bracket_tags)
        } else {
            join_set(&rom.name.bad_tags)
        };

        decided.insert(index);
        decisions.push(RemovalDecision {
            platform: rom.platform.clone(),
            remove: rom.rel_path.clone(),
            keep: None,
            reason: format!("Bad ROM: {tags}"),
            size: rom.size,
        });
    }
}

/// Rank group members by score, best first. The sort is stable, so equal
/// vectors keep their scan order and resolution stays reproducible.
fn rank_by_score(members: &[usize], collection: &Collection, policy: &Policy) -> Vec<usize> {
    let mut ranked = members.to_vec();
    ranked.sort_by(|&a, &b| {
        score(&collection.roms[b].name, policy).cmp(&score(&collection.roms[a].name, policy))
    });
    ranked
}

/// Choose the keeper for a name group: format preference fixes the
/// extension first, then the best-scoring file within that extension wins.
fn pick_keeper(
    remaining: &[usize],
    collection: &Collection,
    policy: &Policy,
    platform: &str,
) -> Option<usize> {
    // Partition by extension, preserving first-seen order.
    let mut by_format: Vec<(&str, Vec<usize>)> = Vec::new();
    for &member in remaining {
        let extension = collection.roms[member].extension.as_str();
        match by_format.iter_mut().find(|(ext, _)| *ext == extension) {
            Some((_, members)) => members.push(member),
            None => by_format.push((extension, vec![member])),
        }
    }

    // Preferred formats first, then everything else in first-seen order.
    let preferred = policy.preferred_formats_for(platform);
    let mut format_order: Vec<&str> = preferred
        .iter()
        .map(String::as_str)
        .filter(|ext| by_format.iter().any(|(present, _)| present == ext))
        .collect();
    for (extension, _) in &by_format {
        if !format_order.contains(extension) {
            format_order.push(*extension);
        }
    }

    let best_format = format_order.first()?;
    let candidates = &by_format
        .iter()
        .find(|(ext, _)| ext == best_format)?
        .1;

    rank_by_score(candidates, collection, policy).first().copied()
}

/// Build the composite justification for removing `rom` in favor of `keeper`.
fn removal_reason(rom: &RomFile, keeper: &RomFile, policy: &Policy) -> String {
    let mut reasons = Vec::new();

    if rom.name.is_bad {
        if !rom.name.bad_tags.is_empty() {
            reasons.push(format!("Bad variant: {}", join_set(&rom.name.bad_tags)));
        }
        if rom
            .name
            .bracket_tags
            .iter()
            .any(|tag| policy.is_remove_bracket_tag(tag))
        {
            reasons.push(format!("Bad dump tag: [{}]", join_set(&rom.name.bracket_tags)));
        }
    }

    if let Some(variant) = &rom.name.source_variant
        && keeper.name.source_variant.is_none()
    {
        reasons.push(format!("Source variant: {variant}"));
    }

    if rom.extension != keeper.extension {
        reasons.push(format!("Non-preferred format: {}", rom.extension));
    }

    if region_rank(&rom.name, policy) < region_rank(&keeper.name, policy) {
        let regions = if rom.name.regions.is_empty() {
            "Unknown".to_string()
        } else {
            join_set(&rom.name.regions)
        };
        reasons.push(format!("Lower region priority: {regions}"));
    }

    if revision_rank(&rom.name) < revision_rank(&keeper.name) {
        let revision = rom
            .name
            .revision
            .as_deref()
            .or(rom.name.version.as_deref())
            .unwrap_or("base");
        reasons.push(format!("Older revision: {revision}"));
    }

    if !rom.name.is_verified_dump && keeper.name.is_verified_dump {
        reasons.push("Not verified dump".to_string());
    }

    if reasons.is_empty() {
        reasons.push("Duplicate (name match)".to_string());
    }

    reasons.join("; ")
}

fn join_set(set: &std::collections::BTreeSet<String>) -> String {
    set.iter().cloned().collect::<Vec<_>>().join(", ")
}
