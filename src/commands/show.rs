use std::path::Path;

use anyhow::Result;
use checkbox_tree::render::render_tree;
use checkbox_tree::{TreeConfig, TreeSelectionEngine};
use serde_json::json;

use super::input::load_options;
use super::output::{print_json, supports_unicode};

pub struct ShowOptions<'a> {
    pub options: &'a Path,
    pub selected: Vec<String>,
    pub search: Option<&'a str>,
    pub ascii: bool,
    pub json: bool,
}

pub fn cmd_show(args: ShowOptions<'_>, config: TreeConfig) -> Result<()> {
    let raw = load_options(args.options)?;
    let mut engine = TreeSelectionEngine::from_options(&raw, args.selected, config);
    if let Some(query) = args.search {
        if !engine.config().searchable {
            tracing::warn!("search ignored: configuration is not searchable");
        }
        engine.set_search(query);
    }

    if args.json {
        return print_json(&json!({
            "rows": engine.rows(),
            "selected_leaves": engine.selected_leaf_count(),
            "total_leaves": engine.leaf_count(),
            "has_results": engine.has_any_visible_result(),
        }));
    }

    println!("{}", render_tree(&engine, supports_unicode(args.ascii)));
    Ok(())
}
