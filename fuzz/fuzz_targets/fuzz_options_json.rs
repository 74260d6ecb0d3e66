#![no_main]

use checkbox_tree::{parse_options_document, TreeConfig, TreeSelectionEngine};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(content) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(raw) = parse_options_document(content) else {
        return;
    };

    // Lenient decoding plus every query and mutation must stay total
    let mut engine = TreeSelectionEngine::from_options(&raw, Vec::<String>::new(), TreeConfig::default());
    let keys: Vec<String> = engine.all_keys().into_iter().map(str::to_string).collect();
    for key in &keys {
        engine.toggle(key);
        let _ = engine.is_indeterminate(key);
    }
    let _ = engine.rows();
    engine.select_all();
    engine.deselect_all();
});
