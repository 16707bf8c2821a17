//! Depth-first search for a field name anywhere in a node tree.

use std::slice;

use hvf_model::Node;

/// Every value stored under `name` reachable from `node`, in pre-order.
///
/// A mapping yields its own `name` entry before anything nested inside its
/// values, and a sequence is searched element by element, so the shallowest
/// occurrence in document order comes first. Scalars yield nothing.
///
/// The iterator is lazy and can be restarted by calling `locate` again.
pub fn locate<'a, 'n>(node: &'a Node, name: &'n str) -> Locate<'a, 'n> {
    let mut search = Locate {
        name,
        stack: Vec::new(),
        pending: None,
    };
    search.pending = search.enter(node);
    search
}

enum Frame<'a> {
    Sequence(slice::Iter<'a, Node>),
    Mapping(slice::Iter<'a, (String, Node)>),
}

pub struct Locate<'a, 'n> {
    name: &'n str,
    stack: Vec<Frame<'a>>,
    pending: Option<&'a Node>,
}

impl<'a> Locate<'a, '_> {
    /// Pushes the node's children and returns its own `name` entry, if any.
    fn enter(&mut self, node: &'a Node) -> Option<&'a Node> {
        match node {
            Node::Scalar(_) => None,
            Node::Sequence(items) => {
                self.stack.push(Frame::Sequence(items.iter()));
                None
            }
            Node::Mapping(mapping) => {
                self.stack.push(Frame::Mapping(mapping.entries().iter()));
                mapping.get(self.name)
            }
        }
    }
}

impl<'a> Iterator for Locate<'a, '_> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(hit) = self.pending.take() {
            return Some(hit);
        }
        loop {
            let child = match self.stack.last_mut()? {
                Frame::Sequence(items) => items.next(),
                Frame::Mapping(entries) => entries.next().map(|(_, value)| value),
            };
            match child {
                Some(child) => {
                    if let Some(hit) = self.enter(child) {
                        return Some(hit);
                    }
                }
                None => {
                    self.stack.pop();
                }
            }
        }
    }
}

/// First value under `name`, if any.
pub fn locate_first<'a>(node: &'a Node, name: &str) -> Option<&'a Node> {
    locate(node, name).next()
}
