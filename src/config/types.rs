//! Configuration type definitions

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::TreeResult;
use crate::selection::ParentKeyPolicy;

use super::loader;

/// Field naming an item's parent in flat options
pub const DEFAULT_PARENT_KEY_FIELD: &str = "parent_id";

/// Per-project config file name
pub const PROJECT_CONFIG_FILE: &str = ".checkbox-tree.toml";

/// Behavior switches for a checkbox tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeConfig {
    /// Search query narrows visible nodes
    #[serde(default)]
    pub searchable: bool,

    /// Parents can be collapsed
    #[serde(default, alias = "expandable")]
    pub collapsible: bool,

    /// Parents start collapsed
    #[serde(default)]
    pub default_collapsed: bool,

    /// Inverse spelling of `default_collapsed`; wins when set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_expanded: Option<bool>,

    /// Host offers select-all / deselect-all
    #[serde(default)]
    pub bulk_toggleable: bool,

    /// Persist parent keys alongside leaves
    #[serde(default)]
    pub store_parent_keys: bool,

    /// Options may be flat with parent references
    #[serde(default)]
    pub hierarchical: bool,

    #[serde(default = "default_parent_key_field")]
    pub parent_key_field: String,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            searchable: false,
            collapsible: false,
            default_collapsed: false,
            default_expanded: None,
            bulk_toggleable: false,
            store_parent_keys: false,
            hierarchical: false,
            parent_key_field: default_parent_key_field(),
        }
    }
}

fn default_parent_key_field() -> String {
    DEFAULT_PARENT_KEY_FIELD.to_string()
}

impl TreeConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> TreeResult<Self> {
        loader::load_with_warnings(path).map(|(config, _)| config)
    }

    /// Load from project config, user config, or defaults
    pub fn load_or_default(project_root: Option<&Path>) -> Self {
        loader::load_or_default(project_root)
    }

    /// Whether parents start expanded
    pub fn starts_expanded(&self) -> bool {
        self.default_expanded.unwrap_or(!self.default_collapsed)
    }

    pub fn parent_key_policy(&self) -> ParentKeyPolicy {
        ParentKeyPolicy::from_store_parent_keys(self.store_parent_keys)
    }
}
