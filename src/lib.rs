//! checkbox-tree - hierarchical checkbox selection engine
//!
//! Maintains a flat list of selected keys while presenting a nested tree of
//! checkable options: parent/child propagation, indeterminate state,
//! search-driven visibility and collapse bookkeeping. Rendering is left to
//! the host; [`render`] offers a plain-text rendition.

pub mod config;
pub mod engine;
pub mod error;
pub mod render;
pub mod selection;
pub mod tree;
pub mod view;

// Re-exports for convenience
pub use config::TreeConfig;
pub use engine::{ChangeOrigin, Mutation, SelectionChange, SubscriptionId, TreeRow, TreeSelectionEngine};
pub use error::{TreeError, TreeResult};
pub use selection::{CheckState, ParentKeyPolicy, Selection, SelectionStore};
pub use tree::{
    build_tree_from_flat, children_match_search, matches_search, parse_options_document,
    read_options, resolve_options, subtree_matches_search, OptionNode, OptionTree, TreeIndex,
    MAX_DEPTH,
};
pub use view::ViewState;
