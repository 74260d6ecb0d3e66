//! Tree construction from host-supplied options.
//!
//! Options come either already nested (`children` mappings) or flat, with
//! each item naming its parent through a configurable field. Hierarchical
//! sources may mix both.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::error::{TreeError, TreeResult};

use super::node::{record_label, scalar_text, value_kind, OptionNode, OptionTree};
use super::MAX_DEPTH;

/// Where a flat item attaches
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum ParentRef {
    /// Parent field is null or missing
    Root,
    /// Textual key of the parent
    Key(String),
    /// Parent field holds something that can never equal a key
    Unmatchable,
}

fn parent_ref(item: &Value, parent_key_field: &str) -> ParentRef {
    let Value::Object(record) = item else {
        return ParentRef::Root;
    };
    match record.get(parent_key_field) {
        None | Some(Value::Null) => ParentRef::Root,
        Some(value) => scalar_text(value)
            .map(ParentRef::Key)
            .unwrap_or(ParentRef::Unmatchable),
    }
}

fn flat_label(key: &str, item: &Value) -> String {
    match item {
        Value::String(label) => label.clone(),
        Value::Object(record) => record_label(record, key),
        other => scalar_text(other).unwrap_or_else(|| key.to_string()),
    }
}

/// Build a nested tree from flat items with parent references.
///
/// Items whose parent field is null (or absent) become roots. Parent values
/// are compared by their text, so numeric ids match string keys. Items whose
/// parent never appears are unreachable and left out, as are items more than
/// [`MAX_DEPTH`] levels down. Nodes without children carry no `children` at
/// all.
pub fn build_tree_from_flat(items: &Map<String, Value>, parent_key_field: &str) -> OptionTree {
    let mut by_parent: HashMap<ParentRef, Vec<(&str, &Value)>> = HashMap::new();
    for (key, item) in items {
        by_parent
            .entry(parent_ref(item, parent_key_field))
            .or_default()
            .push((key.as_str(), item));
    }

    let mut cut = 0;
    let tree = build_level(&by_parent, &ParentRef::Root, 0, &mut cut);
    if cut > 0 {
        warn!(
            parents = cut,
            max_depth = MAX_DEPTH,
            "flat options nested too deep, deeper items dropped"
        );
    }
    debug!(
        items = items.len(),
        roots = tree.len(),
        "built option tree from flat items"
    );
    tree
}

// Each item sits under exactly one parent reference, so items on a cycle are
// never reachable from the roots. Depth is bounded by MAX_DEPTH.
fn build_level(
    by_parent: &HashMap<ParentRef, Vec<(&str, &Value)>>,
    parent: &ParentRef,
    depth: usize,
    cut: &mut usize,
) -> OptionTree {
    let Some(items) = by_parent.get(parent) else {
        return OptionTree::new();
    };

    items
        .iter()
        .map(|(key, item)| {
            let child_ref = ParentRef::Key(key.to_string());
            let children = if depth + 1 < MAX_DEPTH {
                build_level(by_parent, &child_ref, depth + 1, cut)
            } else {
                if by_parent.contains_key(&child_ref) {
                    *cut += 1;
                }
                OptionTree::new()
            };
            let mut node = OptionNode::detailed(flat_label(key, item));
            if let Some(description) = item.get("description").and_then(Value::as_str) {
                node = node.with_description(description);
            }
            (*key, node.with_children(children))
        })
        .collect()
}

/// Turn raw host options into an option tree.
///
/// Without `hierarchical` the mapping is decoded as an already-nested tree.
/// With it, entries carrying `children` are kept as they are and every other
/// entry goes through [`build_tree_from_flat`]; nested entries come first.
pub fn resolve_options(
    raw: &Map<String, Value>,
    hierarchical: bool,
    parent_key_field: &str,
) -> OptionTree {
    if !hierarchical {
        return OptionTree::from_json_map(raw);
    }

    let mut nested = Map::new();
    let mut flat = Map::new();
    for (key, item) in raw {
        let has_children = item.get("children").is_some_and(|c| !c.is_null());
        if has_children {
            nested.insert(key.clone(), item.clone());
        } else {
            flat.insert(key.clone(), item.clone());
        }
    }

    let mut tree = OptionTree::from_json_map(&nested);
    if !flat.is_empty() {
        tree.extend(build_tree_from_flat(&flat, parent_key_field));
    }
    tree
}

/// Parse an options document. The top level must be a JSON object.
pub fn parse_options_document(content: &str) -> TreeResult<Map<String, Value>> {
    match serde_json::from_str::<Value>(content)? {
        Value::Object(map) => Ok(map),
        other => Err(TreeError::InvalidOptions {
            message: format!("expected an object, found {}", value_kind(&other)),
        }),
    }
}

/// Read and parse an options document from disk
pub fn read_options(path: &Path) -> TreeResult<Map<String, Value>> {
    let content = fs::read_to_string(path)?;
    parse_options_document(&content)
}
