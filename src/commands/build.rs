use std::path::Path;

use anyhow::Result;
use checkbox_tree::{resolve_options, TreeConfig};

use super::input::load_options;
use super::output::print_json;

/// Resolve flat or mixed options and print the nested tree.
///
/// Options are always treated as hierarchical here; `--parent-field`
/// overrides the configured parent field.
pub fn cmd_build(options: &Path, parent_field: Option<&str>, config: &TreeConfig) -> Result<()> {
    let raw = load_options(options)?;
    let field = parent_field.unwrap_or(&config.parent_key_field);
    let tree = resolve_options(&raw, true, field);
    print_json(&tree)
}
