//! Scenario: Narrowing a large permission tree
//!
//! Journey: A user collapses everything, searches for one permission, ticks
//! it, clears the search and expands the branch again.
//!
//! Success Criteria:
//! - Search reveals ancestors of matches and hides unrelated branches
//! - Searching never changes the selection
//! - A search with no matches is reported

use checkbox_tree::{parse_options_document, TreeConfig, TreeSelectionEngine};

use crate::common::*;

fn mount() -> TreeSelectionEngine {
    let raw = parse_options_document(USER_MANAGEMENT_JSON).unwrap();
    let config = TreeConfig {
        searchable: true,
        collapsible: true,
        default_collapsed: true,
        ..TreeConfig::default()
    };
    TreeSelectionEngine::from_options(&raw, Vec::<String>::new(), config)
}

fn row_keys(engine: &TreeSelectionEngine) -> Vec<String> {
    engine.rows().into_iter().map(|row| row.key).collect()
}

#[test]
fn scenario_search_collapse_and_select() {
    let mut engine = mount();

    // Step 1: everything starts collapsed, at every depth
    assert_eq!(row_keys(&engine), vec!["user_management", "content"]);
    assert!(engine.is_collapsed("posts"));

    // Step 2: searching hides unrelated branches
    engine.set_search("create");
    assert!(engine.is_visible("user_management", "User Management"));
    assert!(!engine.is_visible("edit_users", "Edit Users"));
    assert!(!engine.is_visible("content", "Content"));
    assert_eq!(row_keys(&engine), vec!["user_management"]);

    // Step 3: expanding the match's parent shows only the match
    engine.toggle_expansion("user_management");
    assert_eq!(row_keys(&engine), vec!["user_management", "create_users"]);

    // Step 4: ticking the match does not depend on search
    engine.toggle("create_users");
    assert!(engine.is_indeterminate("user_management"));

    // Step 5: clearing search restores every row under expanded parents
    engine.set_search("");
    assert_eq!(
        row_keys(&engine),
        vec!["user_management", "create_users", "edit_users", "content"]
    );
    assert_eq!(engine.selection().to_vec(), ["create_users"]);
}

#[test]
fn scenario_search_without_results() {
    let mut engine = mount();
    engine.set_search("billing");

    assert!(!engine.has_any_visible_result());
    assert!(engine.rows().is_empty());
    assert!(engine.filtered_options().is_empty());

    engine.set_search("PUBLISH");
    assert!(engine.has_any_visible_result());
    engine.expand_all();
    assert_eq!(row_keys(&engine), vec!["content", "posts", "publish"]);
}

#[test]
fn scenario_collapse_all_keeps_selection() {
    let mut engine = mount();
    engine.expand_all();
    engine.toggle("content");
    engine.collapse_all();

    assert_eq!(row_keys(&engine), vec!["user_management", "content"]);
    assert!(engine.is_parent_checked("content"));
    assert!(engine.is_parent_checked("posts"));
    assert_eq!(engine.selection().to_vec(), ["publish"]);
}
