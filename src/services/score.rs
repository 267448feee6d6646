//! Priority scoring over parsed metadata.
//!
//! Candidates within a duplicate group are ranked by a [`ScoreVector`]
//! compared lexicographically, higher is better. The field order realizes
//! the dominance policy: bad dumps lose to everything; among non-bad files
//! original-medium releases beat secondary re-releases; then verified dumps
//! beat unverified; then higher region weight; then newer revision/version.
//! Vectors are recomputed on demand and never cached.

use crate::config::Policy;
use crate::models::RomName;

/// Totally-ordered rank tuple. The derived `Ord` compares fields top to
/// bottom, which is exactly the required lexicographic order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ScoreVector {
    /// 0 for bad dumps, 1 otherwise.
    pub quality: u8,
    /// 0 for source-variant re-releases, 1 for original-medium releases.
    pub originality: u8,
    /// 1 for verified good dumps.
    pub verified: u8,
    /// Best configured region weight, 0 when no region is recognized.
    pub region: u32,
    /// Revision or version rank, 0 when absent or malformed.
    pub revision: u64,
}

/// Compute the rank vector for one parsed name.
#[must_use]
pub fn score(name: &RomName, policy: &Policy) -> ScoreVector {
    ScoreVector {
        quality: u8::from(!name.is_bad),
        originality: u8::from(name.source_variant.is_none()),
        verified: u8::from(name.is_verified_dump),
        region: region_rank(name, policy),
        revision: revision_rank(name),
    }
}

/// The highest configured weight among the name's regions.
#[must_use]
pub fn region_rank(name: &RomName, policy: &Policy) -> u32 {
    name.regions
        .iter()
        .filter_map(|region| policy.region_weight(region))
        .max()
        .unwrap_or(0)
}

/// Rank a revision or version tag; higher means newer.
///
/// Numeric revisions rank by value, alphabetic ones by bijective alphabet
/// position (A=1, B=2). Otherwise a version string is folded most
/// significant component first at radix 100 so `v2.0` outranks `v1.9`.
/// Any non-numeric version component voids the whole version. Values too
/// large for the rank saturate instead of wrapping, so an absurd but
/// parseable tag can never panic or scramble the ordering.
#[must_use]
pub fn revision_rank(name: &RomName) -> u64 {
    if let Some(revision) = &name.revision {
        if !revision.is_empty() && revision.chars().all(|c| c.is_ascii_digit()) {
            return revision.parse().unwrap_or(0);
        }
        if !revision.is_empty() && revision.chars().all(|c| c.is_ascii_alphabetic()) {
            return revision.to_ascii_uppercase().chars().fold(0u64, |acc, c| {
                acc.saturating_mul(26)
                    .saturating_add(u64::from(c as u8 - b'A') + 1)
            });
        }
    }

    if let Some(version) = &name.version {
        let components: Vec<&str> = version.split('.').collect();
        let mut rank = 0u64;

        for (position, component) in components.iter().enumerate() {
            let Ok(value) = component.parse::<u64>() else {
                return 0;
            };
            // Components beyond the weighted window still had to parse;
            // they just carry no weight.
            if position < 4 {
                let weight = 100u64.pow(3 - position as u32);
                rank = rank.saturating_add(value.saturating_mul(weight));
            }
        }

        return rank;
    }

    0
}
