//! Unit tests for priority scoring

#[cfg(test)]
mod tests {
    use romsweep::Policy;
    use romsweep::models::RomName;
    use romsweep::services::score::{revision_rank, score};

    fn named(base: &str) -> RomName {
        RomName {
            base_name: base.to_string(),
            ..RomName::default()
        }
    }

    #[test]
    fn test_bad_dump_loses_to_everything() {
        let policy = Policy::default();

        // A bad USA verified dump still ranks below a plain unknown-region file
        let mut bad = named("Game");
        bad.is_bad = true;
        bad.is_verified_dump = true;
        bad.regions.insert("USA".to_string());

        let plain = named("Game");

        assert!(score(&plain, &policy) > score(&bad, &policy));
    }

    #[test]
    fn test_source_variant_loses_to_original() {
        let policy = Policy::default();

        let mut rerelease = named("Game");
        rerelease.source_variant = Some("Virtual Console".to_string());
        rerelease.regions.insert("USA".to_string());

        let mut original = named("Game");
        original.regions.insert("Japan".to_string());

        assert!(score(&original, &policy) > score(&rerelease, &policy));
    }

    #[test]
    fn test_verified_beats_unverified() {
        let policy = Policy::default();

        let mut verified = named("Game");
        verified.is_verified_dump = true;

        let mut unverified = named("Game");
        unverified.regions.insert("USA".to_string());

        assert!(score(&verified, &policy) > score(&unverified, &policy));
    }

    #[test]
    fn test_region_weight_breaks_ties() {
        let policy = Policy::default();

        let mut usa = named("Game");
        usa.regions.insert("USA".to_string());

        let mut europe = named("Game");
        europe.regions.insert("Europe".to_string());

        let mut japan = named("Game");
        japan.regions.insert("Japan".to_string());

        assert!(score(&usa, &policy) > score(&europe, &policy));
        assert!(score(&europe, &policy) > score(&japan, &policy));
    }

    #[test]
    fn test_multi_region_uses_best_weight() {
        let policy = Policy::default();

        let mut multi = named("Game");
        multi.regions.insert("Japan".to_string());
        multi.regions.insert("USA".to_string());

        let mut europe = named("Game");
        europe.regions.insert("Europe".to_string());

        assert!(score(&multi, &policy) > score(&europe, &policy));
    }

    #[test]
    fn test_numeric_revision_rank() {
        let mut name = named("Game");
        name.revision = Some("2".to_string());
        assert_eq!(revision_rank(&name), 2);

        name.revision = Some("10".to_string());
        assert_eq!(revision_rank(&name), 10);
    }

    #[test]
    fn test_alphabetic_revision_rank() {
        let mut a = named("Game");
        a.revision = Some("A".to_string());
        let mut b = named("Game");
        b.revision = Some("B".to_string());

        assert_eq!(revision_rank(&a), 1);
        assert_eq!(revision_rank(&b), 2);
        assert!(revision_rank(&b) > revision_rank(&a));
    }

    #[test]
    fn test_version_rank_weighs_major_first() {
        let mut v20 = named("Game");
        v20.version = Some("2.0".to_string());
        let mut v19 = named("Game");
        v19.version = Some("1.9".to_string());
        let mut v111 = named("Game");
        v111.version = Some("1.11".to_string());

        assert!(revision_rank(&v20) > revision_rank(&v19));
        assert!(revision_rank(&v111) > revision_rank(&v19));
    }

    #[test]
    fn test_malformed_version_ranks_zero() {
        let mut name = named("Game");
        name.version = Some("1.".to_string());
        assert_eq!(revision_rank(&name), 0);

        name.version = Some(".".to_string());
        assert_eq!(revision_rank(&name), 0);
    }

    #[test]
    fn test_absent_revision_ranks_zero() {
        assert_eq!(revision_rank(&named("Game")), 0);
    }

    #[test]
    fn test_oversized_revision_saturates() {
        let mut huge = named("Game");
        huge.revision = Some("AAAAAAAAAAAAAAA".to_string());
        let mut sane = named("Game");
        sane.revision = Some("B".to_string());

        assert!(revision_rank(&huge) >= revision_rank(&sane));
    }

    #[test]
    fn test_oversized_version_component_saturates() {
        let mut huge = named("Game");
        huge.version = Some("18446744073709551.0".to_string());
        let mut sane = named("Game");
        sane.version = Some("2.0".to_string());

        assert!(revision_rank(&huge) >= revision_rank(&sane));
        assert_eq!(revision_rank(&huge), u64::MAX);
    }

    #[test]
    fn test_revision_outranks_base() {
        let policy = Policy::default();

        let mut rev_a = named("Game");
        rev_a.revision = Some("A".to_string());
        rev_a.regions.insert("USA".to_string());

        let mut base = named("Game");
        base.regions.insert("USA".to_string());

        assert!(score(&rev_a, &policy) > score(&base, &policy));
    }
}
