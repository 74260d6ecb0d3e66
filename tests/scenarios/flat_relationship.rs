//! Scenario: Categories loaded from a self-referencing relationship
//!
//! Journey: A product form lists categories stored as flat rows pointing at
//! their parent row. The host hands the rows over as-is and stores only the
//! leaf categories it gets back.
//!
//! Success Criteria:
//! - Numeric and textual parent ids both attach rows
//! - Rows pointing at missing parents are left out
//! - Ancestor states follow leaf toggles

use checkbox_tree::{parse_options_document, CheckState, TreeConfig, TreeSelectionEngine};

use crate::common::*;

fn mount() -> TreeSelectionEngine {
    let raw = parse_options_document(FLAT_CATEGORIES_JSON).unwrap();
    let config = TreeConfig {
        hierarchical: true,
        ..TreeConfig::default()
    };
    TreeSelectionEngine::from_options(&raw, Vec::<String>::new(), config)
}

#[test]
fn scenario_flat_rows_become_a_tree() {
    let engine = mount();

    assert_eq!(engine.all_keys(), vec!["1", "2", "3", "4"]);
    assert_eq!(engine.children_keys("1"), vec!["2", "3"]);
    assert_eq!(engine.parent_key_of("3"), Some("1"));
    assert_eq!(engine.find_node("5"), None);
    assert_eq!(
        engine.find_node("4").and_then(|n| n.description()),
        Some("Printed and digital")
    );
}

#[test]
fn scenario_ticking_leaf_categories() {
    let mut engine = mount();

    engine.toggle("2");
    assert_eq!(engine.check_state("1"), CheckState::Indeterminate);

    engine.toggle("3");
    assert_eq!(engine.check_state("1"), CheckState::Checked);
    assert_eq!(engine.persisted_keys(), vec!["2", "3"]);

    engine.toggle("4");
    assert!(engine.are_all_selected());
    assert_eq!(engine.selected_leaf_count(), 3);
}

#[test]
fn scenario_mixed_nested_and_flat_rows() {
    let raw = parse_options_document(
        r#"{
            "tag_child": {"label": "Child tag", "parent_id": "tag_root"},
            "colors": {"label": "Colors", "children": {"red": "Red", "blue": "Blue"}},
            "tag_root": {"label": "Tags", "parent_id": null}
        }"#,
    )
    .unwrap();
    let config = TreeConfig {
        hierarchical: true,
        ..TreeConfig::default()
    };
    let mut engine = TreeSelectionEngine::from_options(&raw, vec!["red".to_string()], config);

    assert_eq!(
        engine.all_keys(),
        vec!["colors", "red", "blue", "tag_root", "tag_child"]
    );
    assert!(engine.is_indeterminate("colors"));

    engine.toggle("tag_root");
    assert_eq!(engine.persisted_keys(), vec!["red", "tag_child"]);
}
