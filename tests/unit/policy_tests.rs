//! Unit tests for the stock policy tables

#[cfg(test)]
mod tests {
    use romsweep::Policy;

    #[test]
    fn test_region_weights_ordered() {
        let policy = Policy::default();

        let usa = policy.region_weight("USA").unwrap();
        let europe = policy.region_weight("Europe").unwrap();
        let world = policy.region_weight("World").unwrap();
        let japan = policy.region_weight("Japan").unwrap();
        let brazil = policy.region_weight("Brazil").unwrap();

        assert!(usa > europe);
        assert!(europe > world);
        assert!(world > japan);
        assert!(japan > brazil);
    }

    #[test]
    fn test_region_lookup_is_case_insensitive() {
        let policy = Policy::default();

        assert_eq!(policy.region_weight("usa"), policy.region_weight("USA"));
        assert!(policy.is_region("jApAn"));
        assert!(!policy.is_region("Atlantis"));
    }

    #[test]
    fn test_single_letter_region_aliases() {
        let policy = Policy::default();

        assert_eq!(policy.region_weight("U"), policy.region_weight("USA"));
        assert_eq!(policy.region_weight("J"), policy.region_weight("Japan"));
        assert_eq!(policy.region_weight("E"), policy.region_weight("Europe"));
    }

    #[test]
    fn test_remove_tag_exact_and_containment() {
        let policy = Policy::default();

        assert!(policy.is_remove_tag("Beta"));
        assert!(policy.is_remove_tag("Beta 3"));
        assert!(policy.is_remove_tag("Proto"));
        assert!(!policy.is_remove_tag("USA"));
        assert!(!policy.is_remove_tag("Rev A"));
    }

    #[test]
    fn test_remove_bracket_tags() {
        let policy = Policy::default();

        assert!(policy.is_remove_bracket_tag("h1"));
        assert!(policy.is_remove_bracket_tag("H1"));
        assert!(policy.is_remove_bracket_tag("b"));
        assert!(!policy.is_remove_bracket_tag("!"));
        assert!(!policy.is_remove_bracket_tag("x9"));
    }

    #[test]
    fn test_source_variant_order_prefers_compound_labels() {
        let policy = Policy::default();

        assert_eq!(
            policy.match_source_variant("Genesis Mini"),
            Some("Genesis Mini")
        );
        assert_eq!(
            policy.match_source_variant("Mega Drive Mini"),
            Some("Mega Drive Mini")
        );
        assert_eq!(policy.match_source_variant("Mini"), Some("Mini"));
        assert_eq!(policy.match_source_variant("Retail"), None);
    }

    #[test]
    fn test_preferred_formats_match_by_substring() {
        let policy = Policy::default();

        let c64 = policy.preferred_formats_for("Commodore 64");
        assert_eq!(c64.first().map(String::as_str), Some(".d64"));

        // Directory names with decorations still match
        let decorated = policy.preferred_formats_for("Commodore 64 (tapes)");
        assert!(!decorated.is_empty());

        assert!(policy.preferred_formats_for("nes").is_empty());
    }

    #[test]
    fn test_ignored_extensions() {
        let policy = Policy::default();

        assert!(policy.is_ignored_extension(".txt"));
        assert!(policy.is_ignored_extension(".sav"));
        assert!(!policy.is_ignored_extension(".nes"));
        assert!(!policy.is_ignored_extension(""));
    }
}
