//! Option Tree
//!
//! The hierarchical options a checkbox tree is built from, plus read-only
//! structural queries over them.
//!
//! # Module Structure
//!
//! - `node` - OptionNode / OptionTree data model and lenient decoding
//! - `index` - TreeIndex: key lookup, descendants, parents, search matching
//! - `builder` - Tree construction from flat parent-referencing options

/// Number of levels kept when decoding or building a tree from host input.
///
/// Nodes that would sit deeper are dropped with a warning, the same way
/// unreachable flat items are.
pub const MAX_DEPTH: usize = 32;

mod builder;
mod index;
mod node;

pub use builder::{build_tree_from_flat, parse_options_document, read_options, resolve_options};
pub use index::{children_match_search, matches_search, subtree_matches_search, TreeIndex};
pub use node::{OptionNode, OptionTree};
