//! Unit tests for the binder model, merging and subsets.

use super::*;

fn binder(name: &str, cards: &[(&str, &str)]) -> Binder {
    Binder::from_pairs(name, cards.iter().copied())
}

mod construction_tests {
    use super::*;

    #[test]
    fn keeps_names_verbatim() {
        let b = binder("owned", &[("Fire // Ice", "100"), ("Jace, the Mind Sculptor", "7")]);
        assert_eq!(b.get("Fire // Ice"), Some("100"));
        assert_eq!(b.get("fire // ice"), None);
        assert!(b.contains("Jace, the Mind Sculptor"));
    }

    #[test]
    fn preserves_insertion_order() {
        let b = binder("owned", &[("Swamp", "3"), ("Island", "1"), ("Plains", "2")]);
        let names: Vec<&str> = b.card_names().collect();
        assert_eq!(names, vec!["Swamp", "Island", "Plains"]);
    }

    #[test]
    fn repeated_name_takes_later_catid_in_first_position() {
        let b = binder("owned", &[("Island", "1"), ("Swamp", "3"), ("Island", "9")]);
        assert_eq!(b.len(), 2);
        assert_eq!(b.get("Island"), Some("9"));
        assert_eq!(b.card_names().next(), Some("Island"));
    }

    #[test]
    fn drops_entries_without_name_or_catid() {
        let b = binder("owned", &[("", "1"), ("Island", ""), ("Swamp", "3")]);
        assert_eq!(b.len(), 1);
        assert!(b.contains("Swamp"));
    }

    #[test]
    fn empty_binder() {
        let b = Binder::new("nothing");
        assert!(b.is_empty());
        assert_eq!(b.name(), "nothing");
        assert!(b.to_map().is_empty());
    }
}

mod combine_binders_tests {
    use super::*;

    #[test]
    fn disjoint_binders_give_the_union() {
        let owned = binder("owned", &[("Island", "1"), ("Swamp", "3")]);
        let rented = binder("rented", &[("Mountain", "5")]);

        let merged = combine_binders(&owned, &rented).unwrap();

        let mut expected = owned.to_map();
        expected.extend(rented.to_map());
        assert_eq!(merged.to_map(), expected);
        assert_eq!(merged.name(), "owned+rented");
    }

    #[test]
    fn shared_card_with_same_catid_is_kept_once() {
        let owned = binder("owned", &[("Island", "1"), ("Swamp", "3")]);
        let rented = binder("rented", &[("Island", "1"), ("Forest", "4")]);

        let merged = combine_binders(&owned, &rented).unwrap();

        assert_eq!(merged.len(), 3);
        assert_eq!(merged.get("Island"), Some("1"));
    }

    #[test]
    fn shared_card_with_different_catid_is_a_conflict() {
        let owned = binder("owned", &[("Island", "1")]);
        let rented = binder("rented", &[("Island", "2")]);

        let err = combine_binders(&owned, &rented).unwrap_err();

        match &err {
            DraftError::MergeConflict {
                card,
                first,
                second,
                first_id,
                second_id,
            } => {
                assert_eq!(card, "Island");
                assert_eq!(first, "owned");
                assert_eq!(second, "rented");
                assert_eq!(first_id, "1");
                assert_eq!(second_id, "2");
            }
            other => panic!("expected merge conflict, got {other:?}"),
        }
        let message = err.to_string();
        assert!(message.contains("'Island'"));
        assert!(message.contains("'owned'"));
        assert!(message.contains("'rented'"));
    }

    #[test]
    fn contents_are_commutative_without_conflicts() {
        let a = binder("a", &[("Island", "1"), ("Swamp", "3")]);
        let b = binder("b", &[("Swamp", "3"), ("Forest", "4")]);

        let ab = combine_binders(&a, &b).unwrap();
        let ba = combine_binders(&b, &a).unwrap();

        assert_eq!(ab.to_map(), ba.to_map());
        assert_eq!(ba.name(), "b+a");
    }

    #[test]
    fn inputs_are_left_untouched() {
        let a = binder("a", &[("Island", "1")]);
        let b = binder("b", &[("Forest", "4")]);
        let _ = combine_binders(&a, &b).unwrap();
        assert_eq!(a.len(), 1);
        assert_eq!(b.len(), 1);
    }
}

mod fuzzy_subset_match_tests {
    use super::*;

    #[test]
    fn keeps_requested_names_as_keys() {
        let combined = binder(
            "owned+rented",
            &[("Fire", "100"), ("Wear/Tear", "200"), ("Island", "1")],
        );
        let wanted = ["Fire // Ice", "Wear // Tear", "Island"];

        let outcome = combined.fuzzy_subset_match(&wanted, "Session_x_Deck_1");

        assert!(outcome.is_clean());
        let subset = outcome.value;
        assert_eq!(subset.name(), "Session_x_Deck_1");
        assert_eq!(subset.get("Fire // Ice"), Some("100"));
        assert_eq!(subset.get("Wear // Tear"), Some("200"));
        assert_eq!(subset.get("Island"), Some("1"));
        assert!(!subset.contains("Fire"));
        assert!(!subset.contains("Wear/Tear"));
    }

    #[test]
    fn unmatched_cards_are_skipped_and_reported() {
        let combined = binder("owned", &[("Island", "1")]);
        let wanted = vec!["Island".to_string(), "Mountain".to_string()];

        let outcome = combined.fuzzy_subset_match(&wanted, "deck");

        assert_eq!(outcome.value.len(), 1);
        assert_eq!(unmatched_cards(&outcome.diagnostics), vec!["Mountain"]);
    }

    #[test]
    fn follows_request_order() {
        let combined = binder("owned", &[("Island", "1"), ("Swamp", "3")]);
        let subset = combined
            .fuzzy_subset_match(&["Swamp", "Island"], "deck")
            .value;
        let names: Vec<&str> = subset.card_names().collect();
        assert_eq!(names, vec!["Swamp", "Island"]);
    }

    #[test]
    fn empty_request_gives_empty_binder() {
        let combined = binder("owned", &[("Island", "1")]);
        let wanted: [&str; 0] = [];
        let outcome = combined.fuzzy_subset_match(&wanted, "deck");
        assert!(outcome.value.is_empty());
        assert!(outcome.is_clean());
    }
}
