//! View state: collapse tracking and search visibility.
//!
//! Collapse state is a set of collapsed parent keys; a key that is not in
//! the set is expanded. Nothing here touches the selection.

use std::collections::HashSet;

use crate::config::TreeConfig;
use crate::tree::{matches_search, TreeIndex};

/// A blank query (empty or whitespace) shows everything
fn is_blank(query: &str) -> bool {
    query.trim().is_empty()
}

/// Whether a node is shown for `query`: its own label matches, or a
/// descendant of `key` does.
pub fn is_visible(index: &TreeIndex, key: &str, label: &str, query: &str) -> bool {
    if is_blank(query) || matches_search(label, query) {
        return true;
    }
    index.descendants_match(key, query)
}

/// Whether at least one node anywhere in the tree matches `query`
pub fn has_any_match(index: &TreeIndex, query: &str) -> bool {
    index.any_match(query)
}

#[derive(Debug, Clone, Default)]
pub struct ViewState {
    collapsible: bool,
    searchable: bool,
    collapsed: HashSet<String>,
    search: String,
}

impl ViewState {
    /// Create view state for `config` and seed the collapse set
    pub fn new(config: &TreeConfig, index: &TreeIndex) -> Self {
        let mut view = Self {
            collapsible: config.collapsible,
            searchable: config.searchable,
            collapsed: HashSet::new(),
            search: String::new(),
        };
        view.initialize_expansion(index, config.starts_expanded());
        view
    }

    /// Seed every parent, at every depth, with the same default
    pub fn initialize_expansion(&mut self, index: &TreeIndex, default_expanded: bool) {
        self.collapsed.clear();
        if self.collapsible && !default_expanded {
            self.collapse_all(index);
        }
    }

    /// Flip a parent between expanded and collapsed. Leaves, unknown keys
    /// and non-collapsible trees are left alone.
    pub fn toggle_expansion(&mut self, index: &TreeIndex, key: &str) {
        if !self.collapsible || !index.has_children(key) {
            return;
        }
        if !self.collapsed.remove(key) {
            self.collapsed.insert(key.to_string());
        }
    }

    pub fn is_collapsed(&self, key: &str) -> bool {
        self.collapsible && self.collapsed.contains(key)
    }

    pub fn is_expanded(&self, key: &str) -> bool {
        !self.is_collapsed(key)
    }

    pub fn expand_all(&mut self) {
        self.collapsed.clear();
    }

    pub fn collapse_all(&mut self, index: &TreeIndex) {
        if !self.collapsible {
            return;
        }
        self.collapsed = index
            .parent_keys()
            .into_iter()
            .map(str::to_string)
            .collect();
    }

    /// Current search text, as typed
    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_search(&mut self, query: impl Into<String>) {
        self.search = query.into();
    }

    /// Whether search currently narrows the tree
    pub fn is_search_active(&self) -> bool {
        self.searchable && !is_blank(&self.search)
    }

    /// Visibility of one node under the current search
    pub fn is_visible(&self, index: &TreeIndex, key: &str, label: &str) -> bool {
        !self.is_search_active() || is_visible(index, key, label, &self.search)
    }

    /// False only when an active search matches nothing
    pub fn has_any_visible_result(&self, index: &TreeIndex) -> bool {
        !self.is_search_active() || has_any_match(index, &self.search)
    }
}
