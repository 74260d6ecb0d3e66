use std::path::Path;

use anyhow::{bail, Result};
use checkbox_tree::{TreeConfig, TreeSelectionEngine};
use serde_json::json;
use tracing::warn;

use super::input::load_options;
use super::output::print_json;

/// Bulk action applied before individual toggles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bulk {
    All,
    None,
}

pub fn cmd_toggle(
    options: &Path,
    selected: Vec<String>,
    bulk: Option<Bulk>,
    keys: &[String],
    config: TreeConfig,
) -> Result<()> {
    if bulk.is_some() && !config.bulk_toggleable {
        bail!("--all/--none require bulk_toggleable = true in the configuration");
    }

    let raw = load_options(options)?;
    let mut engine = TreeSelectionEngine::from_options(&raw, selected, config);

    match bulk {
        Some(Bulk::All) => {
            engine.select_all();
        }
        Some(Bulk::None) => {
            engine.deselect_all();
        }
        None => {}
    }

    for key in keys {
        if engine.find_node(key).is_none() {
            warn!(key = %key, "unknown key, toggle has no effect");
        }
        engine.toggle(key);
    }

    print_json(&json!({
        "selected": engine.selection(),
        "persisted": engine.persisted_keys(),
        "indeterminate": engine.indeterminate(),
    }))
}
