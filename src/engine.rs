//! Tree selection engine
//!
//! Facade over the tree index, the selection store and the view state.
//! A host builds one engine per mounted tree, renders from its queries and
//! calls its mutations on user input. Observers hear about every selection
//! change, whether it came from a mutation or from the host swapping the
//! selection wholesale.

use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

use crate::config::TreeConfig;
use crate::selection::{CheckState, Selection, SelectionStore};
use crate::tree::{resolve_options, OptionNode, OptionTree, TreeIndex};
use crate::view::ViewState;

/// Handle returned by [`TreeSelectionEngine::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Engine operation that changed the selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    ToggleParent(String),
    ToggleChild(String),
    SetSubtree { key: String, checked: bool },
    SelectAll,
    DeselectAll,
}

/// Where a selection change came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeOrigin {
    Mutation(Mutation),
    /// The host replaced the selection
    External,
}

/// Delivered to observers once derived state is up to date
#[derive(Debug, Clone, Copy)]
pub struct SelectionChange<'a> {
    pub origin: &'a ChangeOrigin,
    pub selection: &'a Selection,
    pub indeterminate: &'a [String],
}

type Observer = Box<dyn FnMut(&SelectionChange<'_>)>;

/// One renderable line of the tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeRow {
    pub key: String,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Depth level (0 = root)
    pub depth: usize,
    pub state: CheckState,
    pub has_children: bool,
    /// Always false for leaves
    pub expanded: bool,
    /// Leaves in this subtree
    pub leaf_count: usize,
}

pub struct TreeSelectionEngine {
    config: TreeConfig,
    index: TreeIndex,
    store: SelectionStore,
    view: ViewState,
    observers: Vec<(SubscriptionId, Observer)>,
    next_subscription: u64,
}

impl TreeSelectionEngine {
    /// Create an engine over an already nested tree
    pub fn new(tree: OptionTree, selection: impl Into<Selection>, config: TreeConfig) -> Self {
        let index = TreeIndex::new(tree);
        let store = SelectionStore::new(selection.into(), config.parent_key_policy(), &index);
        let view = ViewState::new(&config, &index);
        debug!(
            nodes = index.len(),
            selected = store.selection().len(),
            "tree selection engine created"
        );
        Self {
            config,
            index,
            store,
            view,
            observers: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Create an engine from raw host options, building the tree from flat
    /// parent references when the config is hierarchical
    pub fn from_options(
        raw: &Map<String, Value>,
        selection: impl Into<Selection>,
        config: TreeConfig,
    ) -> Self {
        let tree = resolve_options(raw, config.hierarchical, &config.parent_key_field);
        Self::new(tree, selection, config)
    }

    /// Swap in a new option tree. The selection is kept and re-derived,
    /// expansion is re-seeded from the config, the search query survives.
    pub fn rebuild(&mut self, tree: OptionTree) {
        self.index = TreeIndex::new(tree);
        let selection = self.store.selection().clone();
        self.store.replace(&self.index, selection);
        self.view
            .initialize_expansion(&self.index, self.config.starts_expanded());
    }

    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    pub fn index(&self) -> &TreeIndex {
        &self.index
    }

    pub fn tree(&self) -> &OptionTree {
        self.index.tree()
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    // Observation

    /// Register a callback run after every selection change
    pub fn subscribe<F>(&mut self, observer: F) -> SubscriptionId
    where
        F: FnMut(&SelectionChange<'_>) + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Drop a callback. Returns false if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(sub, _)| *sub != id);
        self.observers.len() != before
    }

    fn notify(&mut self, origin: ChangeOrigin) {
        let change = SelectionChange {
            origin: &origin,
            selection: self.store.selection(),
            indeterminate: self.store.indeterminate(),
        };
        for (_, observer) in self.observers.iter_mut() {
            observer(&change);
        }
    }

    fn after_mutation(&mut self, changed: bool, mutation: Mutation) -> bool {
        if changed {
            self.notify(ChangeOrigin::Mutation(mutation));
        }
        changed
    }

    // Tree queries

    pub fn children_keys(&self, key: &str) -> Vec<&str> {
        self.index.children_keys(key)
    }

    pub fn parent_key_of(&self, key: &str) -> Option<&str> {
        self.index.parent_key_of(key)
    }

    pub fn all_keys(&self) -> Vec<&str> {
        self.index.all_keys()
    }

    pub fn find_node(&self, key: &str) -> Option<&OptionNode> {
        self.index.find_node(key)
    }

    /// Keys the host should render as non-interactive
    pub fn disabled_keys<F>(&self, is_disabled: F) -> Vec<String>
    where
        F: Fn(&str, &str) -> bool,
    {
        self.index.disabled_keys(is_disabled)
    }

    // Selection queries

    pub fn selection(&self) -> &Selection {
        self.store.selection()
    }

    pub fn indeterminate(&self) -> &[String] {
        self.store.indeterminate()
    }

    pub fn is_checked(&self, key: &str) -> bool {
        self.store.is_checked(key)
    }

    pub fn is_parent_checked(&self, key: &str) -> bool {
        self.store.is_parent_checked(&self.index, key)
    }

    pub fn is_indeterminate(&self, key: &str) -> bool {
        self.store.is_indeterminate(&self.index, key)
    }

    pub fn check_state(&self, key: &str) -> CheckState {
        self.store.check_state(&self.index, key)
    }

    pub fn select_all_keys(&self) -> Vec<&str> {
        self.store.select_all_keys(&self.index)
    }

    /// The selection as the host should store it
    pub fn persisted_keys(&self) -> Vec<String> {
        self.store.persisted_keys(&self.index)
    }

    pub fn are_all_selected(&self) -> bool {
        self.store.are_all_selected(&self.index)
    }

    /// Leaves in the whole tree
    pub fn leaf_count(&self) -> usize {
        self.index.leaf_keys().len()
    }

    pub fn selected_leaf_count(&self) -> usize {
        self.store.selected_leaf_count(&self.index)
    }

    // Selection mutations

    /// Checkbox change handler: parents toggle their subtree, leaves flip
    pub fn toggle(&mut self, key: &str) -> bool {
        if self.index.has_children(key) {
            self.toggle_parent(key)
        } else {
            self.toggle_child(key)
        }
    }

    pub fn toggle_parent(&mut self, key: &str) -> bool {
        let changed = self.store.toggle_parent(&self.index, key);
        self.after_mutation(changed, Mutation::ToggleParent(key.to_string()))
    }

    pub fn toggle_child(&mut self, key: &str) -> bool {
        let changed = self.store.toggle_child(&self.index, key);
        self.after_mutation(changed, Mutation::ToggleChild(key.to_string()))
    }

    pub fn set_subtree(&mut self, key: &str, checked: bool) -> bool {
        let changed = self.store.set_subtree(&self.index, key, checked);
        self.after_mutation(
            changed,
            Mutation::SetSubtree {
                key: key.to_string(),
                checked,
            },
        )
    }

    pub fn select_all(&mut self) -> bool {
        let changed = self.store.select_all(&self.index);
        self.after_mutation(changed, Mutation::SelectAll)
    }

    pub fn deselect_all(&mut self) -> bool {
        let changed = self.store.deselect_all(&self.index);
        self.after_mutation(changed, Mutation::DeselectAll)
    }

    /// Host-side replacement of the bound selection. Observers are always
    /// told, even when the new selection equals the old one.
    pub fn replace_selection(&mut self, selection: impl Into<Selection>) {
        self.store.replace(&self.index, selection.into());
        self.notify(ChangeOrigin::External);
    }

    /// Like [`replace_selection`](Self::replace_selection) for an untyped
    /// value; anything that is not an array clears the selection.
    pub fn replace_selection_value(&mut self, value: &Value) {
        self.replace_selection(Selection::from_value(value));
    }

    // View

    pub fn toggle_expansion(&mut self, key: &str) {
        self.view.toggle_expansion(&self.index, key);
    }

    pub fn is_expanded(&self, key: &str) -> bool {
        self.view.is_expanded(key)
    }

    pub fn is_collapsed(&self, key: &str) -> bool {
        self.view.is_collapsed(key)
    }

    pub fn expand_all(&mut self) {
        self.view.expand_all();
    }

    pub fn collapse_all(&mut self) {
        self.view.collapse_all(&self.index);
    }

    pub fn search(&self) -> &str {
        self.view.search()
    }

    pub fn set_search(&mut self, query: impl Into<String>) {
        self.view.set_search(query);
    }

    pub fn is_visible(&self, key: &str, label: &str) -> bool {
        self.view.is_visible(&self.index, key, label)
    }

    pub fn has_any_visible_result(&self) -> bool {
        self.view.has_any_visible_result(&self.index)
    }

    /// The tree pruned to the active search
    pub fn filtered_options(&self) -> OptionTree {
        if self.view.is_search_active() {
            self.index.filtered(self.view.search())
        } else {
            self.index.tree().clone()
        }
    }

    /// Visible rows in pre-order. Children of collapsed parents are skipped.
    pub fn rows(&self) -> Vec<TreeRow> {
        let mut rows = Vec::new();
        self.index.walk(|key, node, depth| {
            if !self.is_visible(key, node.label()) {
                return false;
            }

            let has_children = node.has_children();
            let expanded = has_children && self.view.is_expanded(key);
            rows.push(TreeRow {
                key: key.to_string(),
                label: node.label().to_string(),
                description: node.description().map(str::to_string),
                depth,
                state: self.check_state(key),
                has_children,
                expanded,
                leaf_count: self.index.leaf_count(key),
            });
            expanded
        });
        rows
    }
}

impl fmt::Debug for TreeSelectionEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TreeSelectionEngine")
            .field("config", &self.config)
            .field("index", &self.index)
            .field("store", &self.store)
            .field("view", &self.view)
            .field("observers", &self.observers.len())
            .finish()
    }
}
