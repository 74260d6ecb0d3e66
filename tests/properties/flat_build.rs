//! Property tests for building trees from flat parent references.

use proptest::prelude::*;
use serde_json::{json, Map, Value};

use checkbox_tree::{build_tree_from_flat, TreeIndex};

/// Item `i` points at an earlier item or at the root, so every item is
/// reachable and the input is acyclic.
fn flat_items() -> impl Strategy<Value = Vec<Option<usize>>> {
    proptest::collection::vec(proptest::option::weighted(0.7, 0usize..64), 0..=24).prop_map(
        |parents| {
            parents
                .into_iter()
                .enumerate()
                .map(|(i, p)| if i == 0 { None } else { p.map(|p| p % i) })
                .collect()
        },
    )
}

fn to_map(parents: &[Option<usize>], numeric_ids: bool) -> Map<String, Value> {
    let mut map = Map::new();
    for (i, parent) in parents.iter().enumerate() {
        let parent = match parent {
            Some(p) if numeric_ids => json!(p),
            Some(p) => json!(p.to_string()),
            None => Value::Null,
        };
        map.insert(i.to_string(), json!({"name": format!("Item {i}"), "parent_id": parent}));
    }
    map
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Every reachable item lands under the parent it names.
    #[test]
    fn property_flat_build_places_every_item(
        parents in flat_items(),
        numeric_ids in any::<bool>(),
    ) {
        let items = to_map(&parents, numeric_ids);
        let index = TreeIndex::new(build_tree_from_flat(&items, "parent_id"));

        prop_assert_eq!(index.len(), parents.len());
        for (i, parent) in parents.iter().enumerate() {
            let key = i.to_string();
            let expected = parent.map(|p| p.to_string());
            prop_assert_eq!(index.parent_key_of(&key).map(str::to_string), expected);
            prop_assert_eq!(
                index.find_node(&key).unwrap().label().to_string(),
                format!("Item {i}")
            );
        }
    }

    /// PROPERTY: Built leaves never carry a `children` field.
    #[test]
    fn property_flat_build_omits_empty_children(parents in flat_items()) {
        let items = to_map(&parents, false);
        let tree = build_tree_from_flat(&items, "parent_id");
        let index = TreeIndex::new(tree.clone());
        let json = serde_json::to_value(&tree).unwrap();

        fn walk(value: &Value, index: &TreeIndex) -> Result<(), TestCaseError> {
            let Value::Object(map) = value else { return Ok(()) };
            for (key, node) in map {
                let children = node.get("children");
                prop_assert_eq!(children.is_some(), index.has_children(key));
                if let Some(children) = children {
                    walk(children, index)?;
                }
            }
            Ok(())
        }
        walk(&json, &index)?;
    }
}
