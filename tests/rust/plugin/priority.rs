//! Copyright © 2025-2026 Wenze Wei. All Rights Reserved.
//!
//! This file is part of Jxn.
//! The Jxn project belongs to the Dunimd project team.

use proptest::prelude::*;

use jxn::JxnPriorityRegistry;

#[test]
fn test_same_priority_lands_in_consecutive_slots() {
    let mut table = JxnPriorityRegistry::new();
    let slots: Vec<i64> = ["A", "B", "C"].iter().map(|p| table.insert(*p, 100)).collect();
    assert_eq!(slots, vec![100, 101, 102]);
    assert_eq!(table.iter().copied().collect::<Vec<_>>(), vec!["A", "B", "C"]);
}

#[test]
fn test_slots_never_move() {
    let mut table = JxnPriorityRegistry::new();
    table.insert("late", 9000);
    table.insert("builtin", 101);
    table.insert("user", 1000);
    table.insert("builtin2", 101);

    let entries: Vec<(i64, &str)> = table.entries().map(|(k, v)| (k, *v)).collect();
    assert_eq!(
        entries,
        vec![(101, "builtin"), (102, "builtin2"), (1000, "user"), (9000, "late")]
    );
}

proptest! {
    #[test]
    fn prop_keys_unique_and_ascending(priorities in proptest::collection::vec(0i64..50, 0..40)) {
        let mut table = JxnPriorityRegistry::new();
        for (i, p) in priorities.iter().enumerate() {
            table.insert(i, *p);
        }

        prop_assert_eq!(table.len(), priorities.len());
        let keys: Vec<i64> = table.entries().map(|(k, _)| k).collect();
        prop_assert!(keys.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn prop_collision_lands_on_smallest_free_slot(
        taken in proptest::collection::btree_set(0i64..30, 0..20),
        requested in 0i64..30,
    ) {
        let mut table = JxnPriorityRegistry::new();
        for slot in &taken {
            table.insert(*slot, *slot);
        }

        let expected = (requested..).find(|s| !taken.contains(s)).unwrap();
        prop_assert_eq!(table.insert(-1, requested), expected);
    }
    #[test]
    fn prop_top_of_range_never_collides(
        offsets in proptest::collection::vec(0i64..8, 0..24),
    ) {
        let mut table = JxnPriorityRegistry::new();
        for (i, offset) in offsets.iter().enumerate() {
            table.insert(i, i64::MAX - offset);
        }

        prop_assert_eq!(table.len(), offsets.len());
        let keys: Vec<i64> = table.entries().map(|(k, _)| k).collect();
        prop_assert!(keys.windows(2).all(|w| w[0] < w[1]));
    }
}
