#![no_main]

use checkbox_tree::{build_tree_from_flat, TreeIndex, MAX_DEPTH};
use libfuzzer_sys::fuzz_target;
use serde_json::Value;

fuzz_target!(|data: &[u8]| {
    let Ok(Value::Object(items)) = serde_json::from_slice::<Value>(data) else {
        return;
    };

    // Cycles, dangling parents and long chains must neither hang nor panic
    let tree = build_tree_from_flat(&items, "parent_id");
    let index = TreeIndex::new(tree);
    assert!(index.len() <= items.len());
    for key in index.all_keys() {
        let _ = index.parent_key_of(key);
        let _ = index.children_keys(key);
        assert!(index.depth_of(key).is_some_and(|depth| depth < MAX_DEPTH));
    }
});
