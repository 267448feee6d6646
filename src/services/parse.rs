//! Filename metadata extraction.
//!
//! ROM filenames carry release metadata in parenthetical tags (`(USA)`,
//! `(Rev A)`, `(Beta)`) and bracket tags (`[!]`, `[h1]`). This module parses
//! a filename stem into a [`RomName`] without touching the filesystem. The
//! classification rules run in a fixed order so ambiguous tokens resolve
//! deterministically: regions first, then revision, version, disc, side,
//! removal vocabulary, source variants.

use crate::config::Policy;
use crate::models::RomName;
use once_cell::sync::Lazy;
use regex::Regex;

static REVISION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^Rev\s*([A-Z0-9]+)").expect("valid revision pattern"));
static VERSION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^v([0-9.]+)").expect("valid version pattern"));
static DISC_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^Dis[ck]\s*([0-9]+)").expect("valid disc pattern"));
static SIDE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^Side\s*([AB0-9]+)").expect("valid side pattern"));
/// Structural fallback for dump-quality codes: hack/trainer/pirate/bad
/// dump/overdump/fix letters, optionally numbered.
static BAD_BRACKET_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^[hptbof][0-9]*$").expect("valid bracket pattern"));
static TOKEN_SPLIT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[,\s]+").expect("valid token split pattern"));
static KEY_PUNCT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"['"-]"#).expect("valid punctuation pattern"));

/// Parse a filename stem into structured metadata.
///
/// Never fails: malformed tags stay in the base name and a tag-free stem
/// yields an empty metadata set.
#[must_use]
pub fn parse_stem(stem: &str, policy: &Policy) -> RomName {
    // Bracket tags can sit inside a parenthetical group, as in
    // `Game (US[b])`, so brackets are pulled out of the whole stem first.
    let (without_brackets, bracket_groups) = extract_groups(stem, '[', ']');
    let (raw_base, paren_groups) = extract_groups(&without_brackets, '(', ')');

    let mut name = RomName {
        base_name: clean_base(&raw_base),
        ..RomName::default()
    };

    for group in &paren_groups {
        classify_paren_group(group.trim(), policy, &mut name);
    }

    for token in &bracket_groups {
        classify_bracket_token(token.trim(), policy, &mut name);
    }

    name
}

impl RomName {
    /// Grouping key: lower-cased base name with quote/hyphen punctuation
    /// stripped and whitespace collapsed. Disc and side indexes are appended
    /// so parts of a multi-part release never collapse into one group.
    #[must_use]
    pub fn normalized_key(&self) -> String {
        let lowered = self.base_name.to_lowercase();
        let stripped = KEY_PUNCT_RE.replace_all(&lowered, "");
        let mut key = stripped
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ");

        if let Some(disc) = &self.disc {
            key = format!("{key} disc {disc}");
        }
        if let Some(side) = &self.side {
            key = format!("{key} side {side}");
        }

        key
    }
}

/// Extract non-nested `open`..`close` groups from `input`.
///
/// Each group is the literal text between one opener and the next closer.
/// Unmatched openers and empty groups are not groups; their characters stay
/// in the returned remainder.
fn extract_groups(input: &str, open: char, close: char) -> (String, Vec<String>) {
    let mut remainder = String::with_capacity(input.len());
    let mut groups = Vec::new();
    let mut rest = input;

    while let Some(start) = rest.find(open) {
        remainder.push_str(&rest[..start]);
        let after_open = &rest[start + open.len_utf8()..];

        match after_open.find(close) {
            Some(end) => {
                let inner = &after_open[..end];
                if inner.is_empty() {
                    remainder.push(open);
                    remainder.push(close);
                } else {
                    groups.push(inner.to_string());
                }
                rest = &after_open[end + close.len_utf8()..];
            }
            None => {
                // Unmatched opener: keep the rest literally.
                remainder.push_str(&rest[start..]);
                return (remainder, groups);
            }
        }
    }

    remainder.push_str(rest);
    (remainder, groups)
}

/// Collapse whitespace and trim trailing separator runs.
fn clean_base(raw: &str) -> String {
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed.trim_end_matches(['-', '_']).trim().to_string()
}

fn classify_paren_group(group: &str, policy: &Policy, name: &mut RomName) {
    // Region tokens are checked per token; the remaining patterns are
    // anchored against the whole group. One group can set several fields.
    for token in TOKEN_SPLIT_RE.split(group).filter(|t| !t.is_empty()) {
        if policy.is_region(token) {
            name.regions.insert(token.to_string());
        }
    }

    if let Some(captures) = REVISION_RE.captures(group) {
        name.revision = Some(captures[1].to_string());
    }

    if let Some(captures) = VERSION_RE.captures(group) {
        name.version = Some(captures[1].to_string());
    }

    if let Some(captures) = DISC_RE.captures(group) {
        name.disc = Some(captures[1].to_string());
    }

    if let Some(captures) = SIDE_RE.captures(group) {
        name.side = Some(captures[1].to_string());
    }

    if policy.is_remove_tag(group) {
        name.bad_tags.insert(group.to_string());
        name.is_bad = true;
    }

    if let Some(label) = policy.match_source_variant(group) {
        name.source_variant = Some(label.to_string());
    }
}

fn classify_bracket_token(token: &str, policy: &Policy, name: &mut RomName) {
    name.bracket_tags.insert(token.to_string());

    if token == policy.good_dump_tag {
        name.is_verified_dump = true;
    } else if policy.is_remove_bracket_tag(token) || BAD_BRACKET_RE.is_match(token) {
        name.is_bad = true;
    }
}
