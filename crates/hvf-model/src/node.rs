//! Parsed export document tree.

use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};

/// One node of a parsed export document.
///
/// Serializes untagged, so a tree renders as plain JSON
/// (strings, arrays, objects in document order).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Node {
    Scalar(String),
    Sequence(Vec<Node>),
    Mapping(Mapping),
}

impl Node {
    pub fn scalar(value: impl Into<String>) -> Self {
        Self::Scalar(value.into())
    }

    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            Self::Scalar(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Self::Mapping(mapping) => Some(mapping),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[Node]> {
        match self {
            Self::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Direct child of a mapping node. `None` for scalars and sequences.
    pub fn get(&self, name: &str) -> Option<&Node> {
        self.as_mapping().and_then(|mapping| mapping.get(name))
    }

    /// Treats the node as a list of items.
    ///
    /// A repeated element is a sequence, but an element that occurs once is
    /// stored on its own; both read back as a slice here.
    pub fn items(&self) -> &[Node] {
        match self {
            Self::Sequence(items) => items,
            other => std::slice::from_ref(other),
        }
    }

    /// Printable form used for record cells: scalars as-is, anything else as compact JSON.
    pub fn to_text(&self) -> String {
        match self {
            Self::Scalar(value) => value.clone(),
            other => serde_json::to_string(other).unwrap_or_default(),
        }
    }
}

impl From<Mapping> for Node {
    fn from(mapping: Mapping) -> Self {
        Self::Mapping(mapping)
    }
}

impl From<&str> for Node {
    fn from(value: &str) -> Self {
        Self::Scalar(value.to_string())
    }
}

/// Named children in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Mapping {
    entries: Vec<(String, Node)>,
}

impl Mapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&Node> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, node)| node)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Node)> {
        self.entries.iter().map(|(key, node)| (key.as_str(), node))
    }

    pub fn entries(&self) -> &[(String, Node)] {
        &self.entries
    }

    pub fn values(&self) -> impl Iterator<Item = &Node> {
        self.entries.iter().map(|(_, node)| node)
    }

    /// Sets `name`, replacing an existing value in place.
    pub fn insert(&mut self, name: impl Into<String>, node: Node) {
        let name = name.into();
        match self.entries.iter_mut().find(|(key, _)| *key == name) {
            Some((_, slot)) => *slot = node,
            None => self.entries.push((name, node)),
        }
    }

    /// Adds a sibling occurrence of `name`.
    ///
    /// The first occurrence is stored as-is; later ones turn the entry into a
    /// sequence that keeps the position of the first.
    pub fn append(&mut self, name: impl Into<String>, node: Node) {
        let name = name.into();
        let Some((_, slot)) = self.entries.iter_mut().find(|(key, _)| *key == name) else {
            self.entries.push((name, node));
            return;
        };
        match slot {
            Node::Sequence(items) => items.push(node),
            existing => {
                let first = std::mem::replace(existing, Node::Sequence(Vec::with_capacity(2)));
                if let Node::Sequence(items) = existing {
                    items.push(first);
                    items.push(node);
                }
            }
        }
    }

    /// Builder form of [`Mapping::insert`].
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, node: impl Into<Node>) -> Self {
        self.insert(name, node.into());
        self
    }
}

impl<K: Into<String>> FromIterator<(K, Node)> for Mapping {
    fn from_iter<I: IntoIterator<Item = (K, Node)>>(iter: I) -> Self {
        let mut mapping = Self::new();
        for (name, node) in iter {
            mapping.insert(name, node);
        }
        mapping
    }
}

impl Serialize for Mapping {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, node) in &self.entries {
            map.serialize_entry(key, node)?;
        }
        map.end()
    }
}
