//! Option tree data model.
//!
//! Options arrive from the host as a keyed JSON mapping whose values are
//! either a plain label or a record with `label`, `description` and nested
//! `children`. Decoding is lenient: malformed nodes fall back to a usable
//! label instead of failing.

use indexmap::IndexMap;
use serde::de::Error as _;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use tracing::warn;

use super::MAX_DEPTH;

/// A single checkable item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionNode {
    /// Bare display text
    Label(String),
    /// Record form; `children` is never `Some` of an empty tree
    Detailed {
        label: String,
        description: Option<String>,
        children: Option<OptionTree>,
    },
}

impl OptionNode {
    /// Create a plain label node
    pub fn plain(label: impl Into<String>) -> Self {
        Self::Label(label.into())
    }

    /// Create a record node without description or children
    pub fn detailed(label: impl Into<String>) -> Self {
        Self::Detailed {
            label: label.into(),
            description: None,
            children: None,
        }
    }

    /// Attach a description
    pub fn with_description(self, description: impl Into<String>) -> Self {
        let (label, children) = self.into_parts();
        Self::Detailed {
            label,
            description: Some(description.into()),
            children,
        }
    }

    /// Attach children. An empty tree leaves the node a leaf.
    pub fn with_children(self, children: OptionTree) -> Self {
        let description = self.description().map(str::to_string);
        let (label, _) = self.into_parts();
        Self::Detailed {
            label,
            description,
            children: (!children.is_empty()).then_some(children),
        }
    }

    fn into_parts(self) -> (String, Option<OptionTree>) {
        match self {
            Self::Label(label) => (label, None),
            Self::Detailed {
                label, children, ..
            } => (label, children),
        }
    }

    /// Display text
    pub fn label(&self) -> &str {
        match self {
            Self::Label(label) | Self::Detailed { label, .. } => label,
        }
    }

    /// Secondary text, if any
    pub fn description(&self) -> Option<&str> {
        match self {
            Self::Label(_) => None,
            Self::Detailed { description, .. } => description.as_deref(),
        }
    }

    /// Nested options. `None` for leaves.
    pub fn children(&self) -> Option<&OptionTree> {
        match self {
            Self::Detailed {
                children: Some(children),
                ..
            } if !children.is_empty() => Some(children),
            _ => None,
        }
    }

    /// Whether this node is a parent
    pub fn has_children(&self) -> bool {
        self.children().is_some()
    }

    /// Decode a node at `depth`, resolving the label through `label`,
    /// `name`, `title` and finally the key itself. Children that would sit
    /// at [`MAX_DEPTH`] or below are dropped.
    pub(crate) fn from_value(key: &str, value: &Value, depth: usize) -> Self {
        match value {
            Value::String(label) => Self::Label(label.clone()),
            Value::Object(record) => {
                let children = match record.get("children") {
                    Some(Value::Object(children)) if !children.is_empty() => {
                        if depth + 1 < MAX_DEPTH {
                            Some(OptionTree::decode_level(children, depth + 1))
                        } else {
                            warn!(
                                key,
                                max_depth = MAX_DEPTH,
                                "options nested too deep, children dropped"
                            );
                            None
                        }
                    }
                    _ => None,
                };
                Self::Detailed {
                    label: record_label(record, key),
                    description: record
                        .get("description")
                        .and_then(Value::as_str)
                        .map(str::to_string),
                    children,
                }
            }
            other => Self::Label(scalar_text(other).unwrap_or_else(|| key.to_string())),
        }
    }
}

/// Label of a record-shaped item: `label`, then `name`, then `title`, then the key.
pub(crate) fn record_label(record: &Map<String, Value>, key: &str) -> String {
    ["label", "name", "title"]
        .iter()
        .find_map(|field| record.get(*field).and_then(scalar_text))
        .unwrap_or_else(|| key.to_string())
}

/// Text form of a JSON scalar usable as a label or key reference.
pub(crate) fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Human name of a JSON value's type, for error messages.
pub(crate) fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Ordered mapping from key to node.
///
/// Keys are expected to be unique across the whole tree, not just per level.
/// Equality compares entries regardless of order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionTree {
    entries: IndexMap<String, OptionNode>,
}

impl OptionTree {
    /// Create an empty tree
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, node: OptionNode) -> Self {
        self.insert(key, node);
        self
    }

    /// Insert at this level, replacing (in place) an entry with the same key
    pub fn insert(&mut self, key: impl Into<String>, node: OptionNode) -> Option<OptionNode> {
        self.entries.insert(key.into(), node)
    }

    /// Look up a key at this level only
    pub fn get(&self, key: &str) -> Option<&OptionNode> {
        self.entries.get(key)
    }

    /// Entry at a position of this level
    pub fn get_index(&self, index: usize) -> Option<(&str, &OptionNode)> {
        self.entries
            .get_index(index)
            .map(|(k, node)| (k.as_str(), node))
    }

    /// Whether this level has the key
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Entries at this level, in order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &OptionNode)> {
        self.entries.iter().map(|(k, node)| (k.as_str(), node))
    }

    /// Keys at this level, in order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Decode an already-nested options mapping.
    ///
    /// Levels at [`MAX_DEPTH`] and deeper are dropped with a warning.
    pub fn from_json_map(map: &Map<String, Value>) -> Self {
        Self::decode_level(map, 0)
    }

    fn decode_level(map: &Map<String, Value>, depth: usize) -> Self {
        map.iter()
            .map(|(key, value)| (key.clone(), OptionNode::from_value(key, value, depth)))
            .collect()
    }

    /// Encode back to the JSON shape hosts consume
    pub fn to_json_value(&self) -> Value {
        // Serializing plain strings and maps into a Value cannot fail
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

impl<K: Into<String>> FromIterator<(K, OptionNode)> for OptionTree {
    fn from_iter<I: IntoIterator<Item = (K, OptionNode)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|(k, node)| (k.into(), node)).collect(),
        }
    }
}

impl<K: Into<String>> Extend<(K, OptionNode)> for OptionTree {
    fn extend<I: IntoIterator<Item = (K, OptionNode)>>(&mut self, iter: I) {
        self.entries
            .extend(iter.into_iter().map(|(k, node)| (k.into(), node)));
    }
}

impl IntoIterator for OptionTree {
    type Item = (String, OptionNode);
    type IntoIter = indexmap::map::IntoIter<String, OptionNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl Serialize for OptionNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Label(label) => serializer.serialize_str(label),
            Self::Detailed {
                label,
                description,
                children,
            } => {
                let mut map = serializer.serialize_map(None)?;
                map.serialize_entry("label", label)?;
                if let Some(description) = description {
                    map.serialize_entry("description", description)?;
                }
                if let Some(children) = children.as_ref().filter(|c| !c.is_empty()) {
                    map.serialize_entry("children", children)?;
                }
                map.end()
            }
        }
    }
}

impl Serialize for OptionTree {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, node) in &self.entries {
            map.serialize_entry(key, node)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for OptionTree {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::Object(map) => Ok(Self::from_json_map(&map)),
            other => Err(D::Error::custom(format!(
                "expected an options object, found {}",
                value_kind(&other)
            ))),
        }
    }
}
