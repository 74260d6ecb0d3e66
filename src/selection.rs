//! Selection store
//!
//! The flat list of selected keys is the only persisted state. Parent
//! checkbox states (checked / indeterminate) are derived from it on every
//! read and never stored on their own.

use std::collections::HashSet;

use indexmap::IndexSet;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::tree::TreeIndex;

/// Displayed state of a checkbox
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckState {
    /// All counted descendants selected (or the leaf itself)
    Checked,
    /// Nothing selected
    Unchecked,
    /// Some but not all descendants selected
    Indeterminate,
}

/// Whether parent keys are persisted into the selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParentKeyPolicy {
    /// Only leaf keys are ever added
    #[default]
    LeavesOnly,
    /// Parent keys are added alongside their children
    StoreParents,
}

impl ParentKeyPolicy {
    pub fn from_store_parent_keys(store_parent_keys: bool) -> Self {
        if store_parent_keys {
            Self::StoreParents
        } else {
            Self::LeavesOnly
        }
    }

    /// Whether `key` may be added to the selection
    pub fn stores(self, index: &TreeIndex, key: &str) -> bool {
        match self {
            Self::StoreParents => true,
            Self::LeavesOnly => !index.has_children(key),
        }
    }

    /// Descendants of `key` whose checked state counts toward its own
    pub fn counted_descendants<'a>(self, index: &'a TreeIndex, key: &str) -> Vec<&'a str> {
        let mut keys = index.children_keys(key);
        keys.retain(|k| self.stores(index, k));
        keys
    }
}

/// Ordered set of selected keys.
///
/// Insertion order is kept for stable diffs; duplicates are dropped.
/// Equality ignores order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Selection {
    keys: IndexSet<String>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from keys, dropping duplicates
    pub fn from_keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keys: keys.into_iter().map(Into::into).collect(),
        }
    }

    /// Coerce an externally supplied value.
    ///
    /// Anything that is not an array becomes an empty selection. String
    /// elements are kept, numbers use their decimal text, everything else
    /// is skipped.
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Array(items) => Self::from_keys(items.iter().filter_map(|item| match item {
                Value::String(s) => Some(s.clone()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })),
            _ => Self::new(),
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    /// Add a key. Returns false if it was already present.
    pub fn insert(&mut self, key: impl Into<String>) -> bool {
        self.keys.insert(key.into())
    }

    /// Remove a key, keeping the order of the rest. Returns false if it was absent.
    pub fn remove(&mut self, key: &str) -> bool {
        self.keys.shift_remove(key)
    }

    /// Remove every key in `keys` in a single pass
    pub fn remove_all<'a, I>(&mut self, keys: I)
    where
        I: IntoIterator<Item = &'a str>,
    {
        let doomed: HashSet<&str> = keys.into_iter().collect();
        if !doomed.is_empty() {
            self.keys.retain(|k| !doomed.contains(k.as_str()));
        }
    }

    pub fn clear(&mut self) {
        self.keys.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }

    /// Keys in insertion order
    pub fn to_vec(&self) -> Vec<String> {
        self.keys.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for Selection {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::from_keys(iter)
    }
}

impl From<Vec<String>> for Selection {
    fn from(keys: Vec<String>) -> Self {
        Self::from_keys(keys)
    }
}

impl From<Option<Vec<String>>> for Selection {
    fn from(keys: Option<Vec<String>>) -> Self {
        keys.map(Self::from_keys).unwrap_or_default()
    }
}

impl<'de> Deserialize<'de> for Selection {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(value.as_ref().map(Self::from_value).unwrap_or_default())
    }
}

/// Selected keys plus the derived indeterminate set.
///
/// Every mutation recomputes the indeterminate set before returning, so a
/// reader never observes the two out of step.
#[derive(Debug, Clone, Default)]
pub struct SelectionStore {
    selection: Selection,
    indeterminate: Vec<String>,
    policy: ParentKeyPolicy,
}

impl SelectionStore {
    /// Create a store and derive its indeterminate set
    pub fn new(selection: Selection, policy: ParentKeyPolicy, index: &TreeIndex) -> Self {
        let mut store = Self {
            selection,
            indeterminate: Vec::new(),
            policy,
        };
        store.recompute_indeterminate(index);
        store
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Parent keys currently in the indeterminate state, pre-order
    pub fn indeterminate(&self) -> &[String] {
        &self.indeterminate
    }

    pub fn policy(&self) -> ParentKeyPolicy {
        self.policy
    }

    /// Key present in the selection
    pub fn is_checked(&self, key: &str) -> bool {
        self.selection.contains(key)
    }

    /// For parents: every counted descendant is checked. For leaves: `is_checked`.
    pub fn is_parent_checked(&self, index: &TreeIndex, key: &str) -> bool {
        let counted = self.policy.counted_descendants(index, key);
        if counted.is_empty() {
            return self.is_checked(key);
        }
        counted.iter().all(|k| self.is_checked(k))
    }

    /// Some, but not all, counted descendants are checked
    pub fn is_indeterminate(&self, index: &TreeIndex, key: &str) -> bool {
        let counted = self.policy.counted_descendants(index, key);
        if counted.is_empty() {
            return false;
        }
        let checked = counted.iter().filter(|k| self.is_checked(k)).count();
        checked > 0 && checked < counted.len()
    }

    /// Ternary display state
    pub fn check_state(&self, index: &TreeIndex, key: &str) -> CheckState {
        if !index.has_children(key) {
            return if self.is_checked(key) {
                CheckState::Checked
            } else {
                CheckState::Unchecked
            };
        }
        if self.is_parent_checked(index, key) {
            CheckState::Checked
        } else if self.is_indeterminate(index, key) {
            CheckState::Indeterminate
        } else {
            CheckState::Unchecked
        }
    }

    /// Keys `select_all` would select under the current policy
    pub fn select_all_keys<'a>(&self, index: &'a TreeIndex) -> Vec<&'a str> {
        let mut keys = index.all_keys();
        keys.retain(|k| self.policy.stores(index, k));
        keys
    }

    /// Check the subtree of `key` unless it is already fully checked, in
    /// which case uncheck it. Returns whether the selection changed.
    pub fn toggle_parent(&mut self, index: &TreeIndex, key: &str) -> bool {
        let should_check = !self.is_parent_checked(index, key);
        self.set_subtree(index, key, should_check)
    }

    /// Check or uncheck `key` and all of its descendants.
    ///
    /// Checking adds only the keys the policy allows; unchecking removes all
    /// of them, whether or not they were present. Ancestors are reconciled
    /// afterwards.
    pub fn set_subtree(&mut self, index: &TreeIndex, key: &str, checked: bool) -> bool {
        if !index.contains(key) {
            debug!(key, "subtree update on unknown key ignored");
            return false;
        }

        let before = self.selection.clone();
        let subtree = std::iter::once(key).chain(index.children_keys(key));
        if checked {
            for k in subtree {
                if self.policy.stores(index, k) {
                    self.selection.insert(k);
                }
            }
        } else {
            self.selection.remove_all(subtree);
        }

        self.update_parent_state(index, key);
        self.finish("set_subtree", key, &before, index)
    }

    /// Flip a single key, then reconcile its ancestors.
    /// Returns whether the selection changed.
    pub fn toggle_child(&mut self, index: &TreeIndex, key: &str) -> bool {
        if !index.contains(key) {
            debug!(key, "toggle_child on unknown key ignored");
            return false;
        }

        let before = self.selection.clone();
        if !self.selection.remove(key) && self.policy.stores(index, key) {
            self.selection.insert(key);
        }

        self.update_parent_state(index, key);
        self.finish("toggle_child", key, &before, index)
    }

    /// Walk from `key` to the root, adding ancestors whose counted
    /// descendants are all checked (when the policy stores parents) and
    /// removing ancestors with none checked.
    pub fn update_parent_state(&mut self, index: &TreeIndex, key: &str) {
        let mut current = key;
        while let Some(parent) = index.parent_key_of(current) {
            let counted = self.policy.counted_descendants(index, parent);
            let all_checked = counted.iter().all(|k| self.is_checked(k));
            let some_checked = counted.iter().any(|k| self.is_checked(k));

            if all_checked && self.policy.stores(index, parent) {
                self.selection.insert(parent);
            } else if !some_checked {
                self.selection.remove(parent);
            }

            current = parent;
        }
    }

    /// Select every key the policy allows
    pub fn select_all(&mut self, index: &TreeIndex) -> bool {
        let before = self.selection.clone();
        self.selection = Selection::from_keys(self.select_all_keys(index));
        self.finish("select_all", "", &before, index)
    }

    /// Clear the selection
    pub fn deselect_all(&mut self, index: &TreeIndex) -> bool {
        let before = self.selection.clone();
        self.selection.clear();
        self.finish("deselect_all", "", &before, index)
    }

    /// Swap in an externally supplied selection
    pub fn replace(&mut self, index: &TreeIndex, selection: Selection) {
        self.selection = selection;
        self.recompute_indeterminate(index);
        debug!(
            selected = self.selection.len(),
            indeterminate = self.indeterminate.len(),
            "selection replaced"
        );
    }

    /// Re-derive the indeterminate set over the whole tree
    pub fn recompute_indeterminate(&mut self, index: &TreeIndex) {
        self.indeterminate = index
            .parent_keys()
            .into_iter()
            .filter(|k| self.is_indeterminate(index, k))
            .map(str::to_string)
            .collect();
    }

    /// The selection as it should be stored: parent keys are filtered out
    /// unless the policy stores them.
    pub fn persisted_keys(&self, index: &TreeIndex) -> Vec<String> {
        match self.policy {
            ParentKeyPolicy::StoreParents => self.selection.to_vec(),
            ParentKeyPolicy::LeavesOnly => self
                .selection
                .iter()
                .filter(|k| !index.has_children(k))
                .map(str::to_string)
                .collect(),
        }
    }

    /// Non-empty tree with every storable key checked
    pub fn are_all_selected(&self, index: &TreeIndex) -> bool {
        let keys = self.select_all_keys(index);
        !keys.is_empty() && keys.iter().all(|k| self.is_checked(k))
    }

    /// Number of checked leaves
    pub fn selected_leaf_count(&self, index: &TreeIndex) -> usize {
        index
            .leaf_keys()
            .into_iter()
            .filter(|k| self.is_checked(k))
            .count()
    }

    fn finish(&mut self, op: &str, key: &str, before: &Selection, index: &TreeIndex) -> bool {
        self.recompute_indeterminate(index);
        let changed = self.selection != *before;
        debug!(
            op,
            key,
            before = before.len(),
            after = self.selection.len(),
            changed,
            "selection mutated"
        );
        changed
    }
}
