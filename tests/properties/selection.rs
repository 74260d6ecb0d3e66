//! Property tests for selection propagation.

use proptest::prelude::*;

use checkbox_tree::{ParentKeyPolicy, Selection, SelectionStore};

use crate::strategies::{forest, index_from, pick_keys, picks, policy};

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: A parent is never both checked and indeterminate.
    #[test]
    fn property_checked_and_indeterminate_are_exclusive(
        shapes in forest(),
        picks in picks(),
        policy in policy(),
    ) {
        let index = index_from(&shapes);
        let selection = Selection::from_keys(pick_keys(&index.all_keys(), &picks));
        let store = SelectionStore::new(selection, policy, &index);

        for key in index.parent_keys() {
            prop_assert!(
                !(store.is_parent_checked(&index, key) && store.is_indeterminate(&index, key)),
                "{} is both checked and indeterminate", key
            );
        }
    }

    /// PROPERTY: The stored indeterminate set always equals a fresh derivation.
    #[test]
    fn property_indeterminate_set_never_goes_stale(
        shapes in forest(),
        toggles in picks(),
        policy in policy(),
    ) {
        let index = index_from(&shapes);
        let mut store = SelectionStore::new(Selection::new(), policy, &index);

        for key in pick_keys(&index.all_keys(), &toggles) {
            if index.has_children(&key) {
                store.toggle_parent(&index, &key);
            } else {
                store.toggle_child(&index, &key);
            }

            let fresh = SelectionStore::new(store.selection().clone(), policy, &index);
            prop_assert_eq!(store.indeterminate(), fresh.indeterminate());
        }
    }

    /// PROPERTY: Unchecking a subtree twice leaves the selection as once.
    #[test]
    fn property_subtree_removal_is_idempotent(
        shapes in forest(),
        picks in picks(),
        target in 0usize..64,
        policy in policy(),
    ) {
        let index = index_from(&shapes);
        let all = index.all_keys();
        prop_assume!(!all.is_empty());
        let key = all[target % all.len()].to_string();

        let selection = Selection::from_keys(pick_keys(&all, &picks));
        let mut store = SelectionStore::new(selection, policy, &index);

        store.set_subtree(&index, &key, false);
        let once = store.selection().clone();
        let changed = store.set_subtree(&index, &key, false);

        prop_assert!(!changed);
        prop_assert_eq!(store.selection(), &once);
        prop_assert!(!index.children_keys(&key).iter().any(|k| once.contains(k)));
    }

    /// PROPERTY: Toggling a leaf twice restores its state and the indeterminate set
    /// (leaf-only storage, arbitrary starting selection).
    #[test]
    fn property_leaf_toggle_round_trip(
        shapes in forest(),
        picks in picks(),
        target in 0usize..64,
    ) {
        let index = index_from(&shapes);
        let leaves = index.leaf_keys();
        prop_assume!(!leaves.is_empty());
        let key = leaves[target % leaves.len()].to_string();

        let selection = Selection::from_keys(pick_keys(&index.all_keys(), &picks));
        let mut store = SelectionStore::new(selection, ParentKeyPolicy::LeavesOnly, &index);
        let was_checked = store.is_checked(&key);
        let indeterminate = store.indeterminate().to_vec();

        store.toggle_child(&index, &key);
        prop_assert_ne!(store.is_checked(&key), was_checked);
        store.toggle_child(&index, &key);

        prop_assert_eq!(store.is_checked(&key), was_checked);
        prop_assert_eq!(store.indeterminate(), indeterminate.as_slice());
    }

    /// PROPERTY: Toggling any key twice restores its state and the indeterminate
    /// set when parent keys are stored (states reached through toggles).
    #[test]
    fn property_store_parents_toggle_round_trip(
        shapes in forest(),
        history in picks(),
        target in 0usize..64,
    ) {
        let index = index_from(&shapes);
        let all = index.all_keys();
        prop_assume!(!all.is_empty());

        let mut store = SelectionStore::new(Selection::new(), ParentKeyPolicy::StoreParents, &index);
        for key in pick_keys(&all, &history) {
            if index.has_children(&key) {
                store.toggle_parent(&index, &key);
            } else {
                store.toggle_child(&index, &key);
            }
        }

        let key = all[target % all.len()].to_string();
        let was_checked = store.is_checked(&key);
        let indeterminate = store.indeterminate().to_vec();

        store.toggle_child(&index, &key);
        store.toggle_child(&index, &key);

        prop_assert_eq!(store.is_checked(&key), was_checked);
        prop_assert_eq!(store.indeterminate(), indeterminate.as_slice());
    }

    /// PROPERTY: After select-all every parent reads as checked.
    #[test]
    fn property_select_all_closure(
        shapes in forest(),
        picks in picks(),
        policy in policy(),
    ) {
        let index = index_from(&shapes);
        let selection = Selection::from_keys(pick_keys(&index.all_keys(), &picks));
        let mut store = SelectionStore::new(selection, policy, &index);

        store.select_all(&index);

        for key in index.parent_keys() {
            prop_assert!(store.is_parent_checked(&index, key));
        }
        for key in index.leaf_keys() {
            prop_assert!(store.is_checked(key));
        }
        prop_assert!(store.indeterminate().is_empty());
        prop_assert_eq!(store.are_all_selected(&index), !index.is_empty());
        if policy == ParentKeyPolicy::LeavesOnly {
            prop_assert!(store.selection().iter().all(|k| !index.has_children(k)));
        }
    }

    /// PROPERTY: Unknown keys never change the selection.
    #[test]
    fn property_unknown_keys_are_noops(
        shapes in forest(),
        picks in picks(),
        policy in policy(),
    ) {
        let index = index_from(&shapes);
        let selection = Selection::from_keys(pick_keys(&index.all_keys(), &picks));
        let mut store = SelectionStore::new(selection, policy, &index);
        let before = store.selection().clone();

        prop_assert!(!store.toggle_child(&index, "does-not-exist"));
        prop_assert!(!store.toggle_parent(&index, "does-not-exist"));
        prop_assert!(!store.set_subtree(&index, "does-not-exist", true));
        prop_assert_eq!(store.selection(), &before);
        prop_assert!(!store.is_indeterminate(&index, "does-not-exist"));
    }
}
