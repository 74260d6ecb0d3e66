//! Structural queries over an option tree.
//!
//! The tree is flattened once in pre-order. Every node's descendants then
//! occupy a contiguous run right after it, so descendant lookups are slices
//! and parent lookups are a single hop.

use std::collections::HashMap;

use tracing::{trace, warn};

use super::node::{OptionNode, OptionTree};

/// A flattened tree node
#[derive(Debug, Clone)]
struct IndexedNode {
    key: String,
    label: String,
    /// Position within its own level
    slot: usize,
    depth: usize,
    parent: Option<usize>,
    /// Exclusive end of this node's subtree in `nodes`
    end: usize,
    has_children: bool,
}

/// Read-only index over an [`OptionTree`].
///
/// All lookups are total: unknown keys yield empty results or `None`.
#[derive(Debug, Clone, Default)]
pub struct TreeIndex {
    tree: OptionTree,
    nodes: Vec<IndexedNode>,
    positions: HashMap<String, usize>,
}

impl TreeIndex {
    /// Index a tree
    pub fn new(tree: OptionTree) -> Self {
        let nodes = Self::flatten(&tree);

        let mut positions = HashMap::with_capacity(nodes.len());
        for (pos, node) in nodes.iter().enumerate() {
            if positions.contains_key(&node.key) {
                warn!(key = %node.key, "duplicate option key, keeping first occurrence");
                continue;
            }
            positions.insert(node.key.clone(), pos);
        }

        trace!(nodes = nodes.len(), "indexed option tree");
        Self {
            tree,
            nodes,
            positions,
        }
    }

    // Pre-order walk with an explicit stack of (level, next slot, parent).
    fn flatten(tree: &OptionTree) -> Vec<IndexedNode> {
        let mut nodes: Vec<IndexedNode> = Vec::new();
        let mut stack: Vec<(&OptionTree, usize, Option<usize>)> = vec![(tree, 0, None)];

        while let Some(frame) = stack.last_mut() {
            let (level, slot, parent) = *frame;
            let Some((key, node)) = level.get_index(slot) else {
                stack.pop();
                if let Some(parent) = parent {
                    nodes[parent].end = nodes.len();
                }
                continue;
            };
            frame.1 += 1;

            let pos = nodes.len();
            nodes.push(IndexedNode {
                key: key.to_string(),
                label: node.label().to_string(),
                slot,
                depth: stack.len() - 1,
                parent,
                end: pos + 1,
                has_children: node.has_children(),
            });
            if let Some(children) = node.children() {
                stack.push((children, 0, Some(pos)));
            }
        }
        nodes
    }

    /// The indexed tree
    pub fn tree(&self) -> &OptionTree {
        &self.tree
    }

    /// Number of nodes at every depth
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.positions.get(key).copied()
    }

    /// Whether the key exists anywhere in the tree
    pub fn contains(&self, key: &str) -> bool {
        self.positions.contains_key(key)
    }

    /// Whether the key is a parent (has non-empty children)
    pub fn has_children(&self, key: &str) -> bool {
        self.position(key)
            .map(|pos| self.nodes[pos].has_children)
            .unwrap_or(false)
    }

    /// All descendant keys of `key`, pre-order. Empty for leaves and unknown keys.
    pub fn children_keys(&self, key: &str) -> Vec<&str> {
        match self.position(key) {
            Some(pos) => self.nodes[pos + 1..self.nodes[pos].end]
                .iter()
                .map(|n| n.key.as_str())
                .collect(),
            None => Vec::new(),
        }
    }

    /// Nearest ancestor of `key`. `None` for root-level and unknown keys.
    pub fn parent_key_of(&self, key: &str) -> Option<&str> {
        let parent = self.nodes[self.position(key)?].parent?;
        Some(self.nodes[parent].key.as_str())
    }

    /// Every key in the tree, pre-order
    pub fn all_keys(&self) -> Vec<&str> {
        self.nodes.iter().map(|n| n.key.as_str()).collect()
    }

    /// Every key that has children, pre-order
    pub fn parent_keys(&self) -> Vec<&str> {
        self.nodes
            .iter()
            .filter(|n| n.has_children)
            .map(|n| n.key.as_str())
            .collect()
    }

    /// Every key without children, pre-order
    pub fn leaf_keys(&self) -> Vec<&str> {
        self.nodes
            .iter()
            .filter(|n| !n.has_children)
            .map(|n| n.key.as_str())
            .collect()
    }

    /// Locate a node anywhere in the tree
    pub fn find_node(&self, key: &str) -> Option<&OptionNode> {
        self.node_at(self.position(key)?)
    }

    // Climb to the root collecting slots, then descend by slot.
    fn node_at(&self, pos: usize) -> Option<&OptionNode> {
        let mut slots = Vec::with_capacity(self.nodes.get(pos)?.depth + 1);
        let mut current = Some(pos);
        while let Some(p) = current {
            slots.push(self.nodes[p].slot);
            current = self.nodes[p].parent;
        }

        let mut level = &self.tree;
        let mut found = None;
        for &slot in slots.iter().rev() {
            let (_, node) = level.get_index(slot)?;
            found = Some(node);
            if let Some(children) = node.children() {
                level = children;
            }
        }
        found
    }

    /// Depth of a key (0 = root level)
    pub fn depth_of(&self, key: &str) -> Option<usize> {
        self.position(key).map(|pos| self.nodes[pos].depth)
    }

    /// Number of leaves in the subtree rooted at `key`. A leaf counts itself.
    pub fn leaf_count(&self, key: &str) -> usize {
        match self.position(key) {
            Some(pos) => self.nodes[pos..self.nodes[pos].end]
                .iter()
                .filter(|n| !n.has_children)
                .count(),
            None => 0,
        }
    }

    /// Whether any descendant of `key` has a label matching `query`
    pub fn descendants_match(&self, key: &str, query: &str) -> bool {
        let Some(pos) = self.position(key) else {
            return false;
        };
        let query = query.to_lowercase();
        self.nodes[pos + 1..self.nodes[pos].end]
            .iter()
            .any(|n| n.label.to_lowercase().contains(&query))
    }

    /// Whether any node at any depth has a label matching `query`
    pub fn any_match(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.nodes
            .iter()
            .any(|n| n.label.to_lowercase().contains(&query))
    }

    /// Pre-order walk. `visit` gets each node with its depth and returns
    /// whether to descend into its children.
    pub fn walk<F>(&self, mut visit: F)
    where
        F: FnMut(&str, &OptionNode, usize) -> bool,
    {
        let mut pos = 0;
        while let Some(entry) = self.nodes.get(pos) {
            let descend = self
                .node_at(pos)
                .is_some_and(|node| visit(&entry.key, node, entry.depth));
            pos = if descend { pos + 1 } else { entry.end };
        }
    }

    /// Pruned copy of the tree: nodes whose label matches `query` or that
    /// have a matching descendant. A blank query keeps everything.
    pub fn filtered(&self, query: &str) -> OptionTree {
        if query.trim().is_empty() {
            return self.tree.clone();
        }
        filter_tree(&self.tree, query)
    }

    /// Keys that cannot be interacted with, pre-order.
    ///
    /// A parent whose children are all disabled is disabled too; otherwise
    /// `is_disabled(key, label)` decides.
    pub fn disabled_keys<F>(&self, is_disabled: F) -> Vec<String>
    where
        F: Fn(&str, &str) -> bool,
    {
        // Descendants follow their ancestors in pre-order, so a reverse
        // sweep settles every child before its parent.
        let mut disabled = vec![false; self.nodes.len()];
        for pos in (0..self.nodes.len()).rev() {
            let node = &self.nodes[pos];
            let cascaded = node.has_children && self.direct_children(pos).all(|c| disabled[c]);
            let off = cascaded || is_disabled(&node.key, &node.label);
            disabled[pos] = off;
        }

        self.nodes
            .iter()
            .zip(disabled)
            .filter(|(_, off)| *off)
            .map(|(n, _)| n.key.clone())
            .collect()
    }

    fn direct_children(&self, pos: usize) -> impl Iterator<Item = usize> + '_ {
        let end = self.nodes[pos].end;
        std::iter::successors(Some(pos + 1), move |&c| (c < end).then(|| self.nodes[c].end))
            .take_while(move |&c| c < end)
    }
}

impl From<OptionTree> for TreeIndex {
    fn from(tree: OptionTree) -> Self {
        Self::new(tree)
    }
}

/// Case-insensitive substring test
pub fn matches_search(label: &str, query: &str) -> bool {
    label.to_lowercase().contains(&query.to_lowercase())
}

/// True if the node's own label or any descendant label matches
pub fn subtree_matches_search(node: &OptionNode, query: &str) -> bool {
    matches_search(node.label(), query)
        || node
            .children()
            .is_some_and(|children| children_match_search(children, query))
}

/// True if any node of `tree`, at any depth, matches
pub fn children_match_search(tree: &OptionTree, query: &str) -> bool {
    tree.iter()
        .any(|(_, node)| subtree_matches_search(node, query))
}

fn filter_tree(tree: &OptionTree, query: &str) -> OptionTree {
    let mut filtered = OptionTree::new();
    for (key, node) in tree.iter() {
        let children = node
            .children()
            .map(|c| filter_tree(c, query))
            .unwrap_or_default();
        if !matches_search(node.label(), query) && children.is_empty() {
            continue;
        }
        let kept = match node {
            OptionNode::Label(_) => node.clone(),
            OptionNode::Detailed {
                label, description, ..
            } => OptionNode::Detailed {
                label: label.clone(),
                description: description.clone(),
                children: (!children.is_empty()).then_some(children),
            },
        };
        filtered.insert(key, kept);
    }
    filtered
}
