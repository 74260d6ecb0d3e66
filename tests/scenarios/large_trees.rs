//! Scenario: Option sets far beyond form size
//!
//! Journey: A host mounts a catalogue with one parent holding ten thousand
//! leaves, and an import whose flat rows form a ten-thousand-level chain.
//!
//! Success Criteria:
//! - Toggling the wide parent and re-deriving its state stays linear
//! - A deep chain is cut at MAX_DEPTH instead of exhausting the stack
//! - Toggles on the kept chain still ripple to the root

use checkbox_tree::{
    build_tree_from_flat, OptionNode, OptionTree, ParentKeyPolicy, Selection, SelectionStore,
    TreeConfig, TreeIndex, TreeSelectionEngine, MAX_DEPTH,
};
use serde_json::{json, Map, Value};

const WIDE: usize = 10_000;
const CHAIN: usize = 10_000;

fn wide_tree() -> OptionTree {
    let leaves: OptionTree = (0..WIDE)
        .map(|i| (format!("leaf{i}"), OptionNode::plain(format!("Leaf {i}"))))
        .collect();
    OptionTree::new().with("root", OptionNode::detailed("Root").with_children(leaves))
}

fn chain_items() -> Map<String, Value> {
    let mut items = Map::new();
    items.insert(
        "n0".to_string(),
        json!({"label": "Level 0", "parent_id": null}),
    );
    for i in 1..CHAIN {
        items.insert(
            format!("n{i}"),
            json!({"label": format!("Level {i}"), "parent_id": format!("n{}", i - 1)}),
        );
    }
    items
}

#[test]
fn scenario_wide_parent_toggles_as_a_unit() {
    let mut engine =
        TreeSelectionEngine::new(wide_tree(), Vec::<String>::new(), TreeConfig::default());

    assert!(engine.toggle("root"));
    assert_eq!(engine.selection().len(), WIDE);
    assert!(engine.is_parent_checked("root"));
    assert!(engine.are_all_selected());

    assert!(engine.toggle("leaf4321"));
    assert!(engine.is_indeterminate("root"));
    assert_eq!(engine.indeterminate(), ["root"]);
    assert_eq!(engine.selected_leaf_count(), WIDE - 1);

    // Partially checked, so the parent checks everything again
    assert!(engine.toggle("root"));
    assert_eq!(engine.selection().len(), WIDE);
    assert!(engine.toggle("root"));
    assert!(engine.selection().is_empty());

    assert_eq!(engine.rows().len(), WIDE + 1);
}

#[test]
fn scenario_wide_parent_recomputes_from_bound_selection() {
    let index = TreeIndex::new(wide_tree());
    let half = Selection::from_keys((0..WIDE / 2).map(|i| format!("leaf{i}")));
    let mut store = SelectionStore::new(half, ParentKeyPolicy::LeavesOnly, &index);
    assert_eq!(store.indeterminate(), ["root"]);

    assert!(store.select_all(&index));
    store.recompute_indeterminate(&index);
    assert!(store.indeterminate().is_empty());
    assert!(store.is_parent_checked(&index, "root"));
}

#[test]
fn scenario_deep_flat_chain_is_cut_at_max_depth() {
    let tree = build_tree_from_flat(&chain_items(), "parent_id");
    let index = TreeIndex::new(tree);

    assert_eq!(index.len(), MAX_DEPTH);
    let deepest = format!("n{}", MAX_DEPTH - 1);
    assert_eq!(index.depth_of(&deepest), Some(MAX_DEPTH - 1));
    assert!(!index.has_children(&deepest));
    assert!(!index.contains(&format!("n{MAX_DEPTH}")));
    assert_eq!(index.children_keys("n0").len(), MAX_DEPTH - 1);
}

#[test]
fn scenario_deep_chain_toggles_ripple_to_the_root() {
    let config = TreeConfig {
        hierarchical: true,
        store_parent_keys: true,
        ..TreeConfig::default()
    };
    let mut engine = TreeSelectionEngine::from_options(&chain_items(), Vec::<String>::new(), config);
    let deepest = format!("n{}", MAX_DEPTH - 1);

    assert!(engine.toggle(&deepest));
    assert_eq!(engine.selection().len(), MAX_DEPTH);
    assert!(engine.is_parent_checked("n0"));
    assert!(engine.indeterminate().is_empty());
    assert_eq!(engine.rows().len(), MAX_DEPTH);

    assert!(engine.toggle("n0"));
    assert!(engine.selection().is_empty());
}
