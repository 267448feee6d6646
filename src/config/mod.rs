//! Static policy tables driving parsing, scoring, and resolution.
//!
//! Every lookup the extractor, scorer, and resolver perform goes through an
//! immutable [`Policy`] value supplied at startup. `Policy::default()` carries
//! the stock vocabulary; tests can inject alternate tables.

use std::collections::{BTreeSet, HashMap, HashSet};

/// Immutable configuration for one run.
#[derive(Debug, Clone)]
pub struct Policy {
    /// Region token -> priority weight (higher = better). Keys are stored
    /// upper-cased; lookups are case-insensitive.
    region_weights: HashMap<String, u32>,
    /// Parenthetical tags that mark a ROM for removal.
    pub remove_tags: BTreeSet<String>,
    /// Bracket tags that mark bad dumps or hacks (stored lower-cased).
    remove_bracket_tags: HashSet<String>,
    /// The reserved good-dump bracket marker.
    pub good_dump_tag: String,
    /// Re-release channel labels, checked in order; the first
    /// case-insensitive substring match wins.
    pub source_variants: Vec<String>,
    /// Preferred extension order per platform. The key matches when it is a
    /// case-insensitive substring of the platform directory name.
    preferred_formats: Vec<(String, Vec<String>)>,
    /// Extensions that are never ROMs.
    ignore_extensions: HashSet<String>,
    /// Platform directories holding full game installations; skipped entirely.
    pub skip_platforms: HashSet<String>,
    /// Files at or above this size are never hashed.
    pub hash_size_ceiling: u64,
}

impl Default for Policy {
    fn default() -> Self {
        let region_weights = [
            ("USA", 100),
            ("U", 100),
            ("US", 100),
            ("AMERICA", 100),
            ("EUROPE", 80),
            ("E", 80),
            ("EU", 80),
            ("WORLD", 70),
            ("W", 70),
            ("AUSTRALIA", 60),
            ("A", 60),
            ("JAPAN", 50),
            ("J", 50),
            ("JP", 50),
            ("KOREA", 40),
            ("K", 40),
            ("ASIA", 40),
            ("FRANCE", 35),
            ("F", 35),
            ("GERMANY", 35),
            ("G", 35),
            ("SPAIN", 35),
            ("S", 35),
            ("ITALY", 35),
            ("I", 35),
            ("BRAZIL", 30),
            ("B", 30),
            ("CHINA", 30),
            ("C", 30),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();

        let remove_tags = [
            // Betas and prototypes
            "Beta",
            "Proto",
            "Prototype",
            "Sample",
            "Demo",
            "Preview",
            "Promo",
            "Pre-Release",
            "Prerelease",
            "Debug",
            "Test",
            // Pirate/unlicensed
            "Pirate",
            "Unl",
            "Unlicensed",
            "Bootleg",
            // Special images to deprioritize
            "BIOS",
            "Program",
        ]
        .into_iter()
        .map(str::to_string)
        .collect();

        let remove_bracket_tags = [
            "h", "h1", "h2", "h3", "h4", "h5", // hacks
            "t", "t1", "t2", "t3", // trainers
            "p", "p1", "p2", "p3", "p4", "p5", // pirate
            "b", "b1", "b2", "b3", // bad dumps
            "o", "o1", // overdumps
            "f", "f1", // fixed
            "t+", // translations
        ]
        .into_iter()
        .map(str::to_string)
        .collect();

        // Ordered most-specific first so compound labels like
        // "Genesis Mini" never resolve to the bare "Mini" entry.
        let source_variants = [
            "Virtual Console",
            "Switch Online",
            "Mega Drive Mini",
            "Genesis Mini",
            "Classic Mini",
            "Evercade",
            "NSO",
            "3DS",
            "Wii",
            "Mini",
        ]
        .into_iter()
        .map(str::to_string)
        .collect();

        let preferred_formats = [
            (
                "Commodore 64",
                vec![".d64", ".g64", ".crt", ".prg", ".t64", ".tap", ".nib"],
            ),
            ("Commodore VIC-20", vec![".d64", ".crt", ".prg", ".t64", ".tap"]),
            ("Commodore Amiga", vec![".adf", ".ipf", ".lha", ".hdf"]),
            ("Sinclair ZX Spectrum", vec![".tzx", ".z80", ".tap", ".sna"]),
            ("Amstrad CPC", vec![".dsk", ".cdt", ".sna"]),
            ("MSX", vec![".rom", ".dsk", ".cas"]),
            ("Atari ST", vec![".st", ".stx", ".msa", ".ipf"]),
            ("NEC PC-98", vec![".hdi", ".fdi", ".d98", ".fdd"]),
        ]
        .into_iter()
        .map(|(platform, exts)| {
            (
                platform.to_string(),
                exts.into_iter().map(str::to_string).collect(),
            )
        })
        .collect();

        let ignore_extensions = [
            ".txt", ".nfo", ".diz", ".jpg", ".jpeg", ".png", ".gif", ".bmp",
            ".pdf", ".doc", ".md", ".html", ".htm", ".xml", ".json", ".dat",
            ".cue", ".m3u", ".sfv", ".md5", ".sha1",
            // Game data files, not ROMs
            ".spr", ".mov", ".dad", ".avi", ".mpg", ".mp3", ".wav", ".ogg",
            ".voc", ".mid", ".xmi", ".pak", ".grp", ".wad", ".cfg", ".ini",
            ".sav", ".srm", ".exe", ".com", ".bat", ".dll", ".so", ".dylib",
        ]
        .into_iter()
        .map(str::to_string)
        .collect();

        let skip_platforms = [
            "MS-DOS",
            "ScummVM",
            "Windows",
            "Apple Mac OS",
            "Linux",
            "DOS",
            "PC",
        ]
        .into_iter()
        .map(str::to_string)
        .collect();

        Self {
            region_weights,
            remove_tags,
            remove_bracket_tags,
            good_dump_tag: "!".to_string(),
            source_variants,
            preferred_formats,
            ignore_extensions,
            skip_platforms,
            hash_size_ceiling: 500_000_000,
        }
    }
}

impl Policy {
    /// Look up the priority weight for a region token, case-insensitively.
    #[must_use]
    pub fn region_weight(&self, token: &str) -> Option<u32> {
        self.region_weights
            .get(&token.to_ascii_uppercase())
            .copied()
    }

    /// Whether the token names a recognized region.
    #[must_use]
    pub fn is_region(&self, token: &str) -> bool {
        self.region_weight(token).is_some()
    }

    /// Whether a parenthetical group marks the file for removal. Exact match
    /// against the vocabulary, or containment of any vocabulary entry.
    #[must_use]
    pub fn is_remove_tag(&self, group: &str) -> bool {
        self.remove_tags.contains(group) || self.remove_tags.iter().any(|t| group.contains(t.as_str()))
    }

    /// Whether a bracket token is in the bad-dump vocabulary.
    #[must_use]
    pub fn is_remove_bracket_tag(&self, token: &str) -> bool {
        self.remove_bracket_tags.contains(&token.to_ascii_lowercase())
    }

    /// The first source-variant label contained in the group, if any.
    #[must_use]
    pub fn match_source_variant(&self, group: &str) -> Option<&str> {
        let lower = group.to_ascii_lowercase();
        self.source_variants
            .iter()
            .find(|label| lower.contains(&label.to_ascii_lowercase()))
            .map(String::as_str)
    }

    /// Preferred extension order for a platform directory, empty when the
    /// platform has no configured preference.
    #[must_use]
    pub fn preferred_formats_for(&self, platform: &str) -> &[String] {
        let lower = platform.to_ascii_lowercase();
        self.preferred_formats
            .iter()
            .find(|(name, _)| lower.contains(&name.to_ascii_lowercase()))
            .map_or(&[], |(_, formats)| formats.as_slice())
    }

    /// Whether the extension (lower-cased, with dot) is never a ROM.
    #[must_use]
    pub fn is_ignored_extension(&self, extension: &str) -> bool {
        self.ignore_extensions.contains(extension)
    }
}
