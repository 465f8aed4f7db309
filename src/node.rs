//! Internal node implementation for the word-path tree.
//!
//! A `Node` holds an optional value and a concurrent map from single words to
//! child nodes. Children are always wrapped in an `Arc` so a child can be cloned
//! out of its parent's map and the map's shard lock released before descending.
//! Every operation here is recursive over the first word of the path and never
//! walks back up the tree.

use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tracing::trace;

use crate::util::{join_path, split_path};

/// Child map of a node. Reference counted so that replacing a node hands its
/// whole subtree to the replacement without copying.
pub(crate) type Children<T> = Arc<DashMap<String, Arc<Node<T>>>>;

/// Internal node type for the word-path tree.
#[derive(Debug)]
pub(crate) struct Node<T> {
    /// The value stored at this node. `None` for placeholders.
    pub value: Option<T>,

    /// Child nodes indexed by the word leading to them
    pub children: Children<T>,
}

impl<T> Node<T> {
    /// Creates a placeholder node with no value and no children.
    pub fn new() -> Self {
        Node {
            value: None,
            children: Arc::new(DashMap::new()),
        }
    }

    /// Creates a leaf node carrying `value`.
    pub fn with_value(value: T) -> Self {
        Node {
            value: Some(value),
            children: Arc::new(DashMap::new()),
        }
    }

    /// Creates a node that takes over an existing child map.
    pub fn with_children(value: Option<T>, children: Children<T>) -> Self {
        Node { value, children }
    }

    /// A node with neither value nor children is garbage and gets pruned.
    pub fn is_vacant(&self) -> bool {
        self.value.is_none() && self.children.is_empty()
    }

    /// Returns the child at `word`, releasing the map guard before returning.
    pub fn child(&self, word: &str) -> Option<Arc<Node<T>>> {
        self.children.get(word).map(|child| Arc::clone(child.value()))
    }

    fn child_or_placeholder(&self, word: &str) -> Arc<Node<T>> {
        if let Some(child) = self.child(word) {
            return child;
        }
        let slot = self
            .children
            .entry(word.to_owned())
            .or_insert_with(|| Arc::new(Node::new()));
        Arc::clone(slot.value())
    }

    /// Associates `value` with `path` below this node.
    ///
    /// Returns `true` when a node already occupied the final slot, whether or
    /// not it carried a value.
    pub fn put(&self, path: &str, value: T) -> bool {
        let (head, rest) = split_path(path);
        if !rest.is_empty() {
            return self.child_or_placeholder(head).put(rest, value);
        }

        match self.children.entry(head.to_owned()) {
            Entry::Occupied(mut slot) => {
                let children = Arc::clone(&slot.get().children);
                slot.insert(Arc::new(Node::with_children(Some(value), children)));
                true
            }
            Entry::Vacant(slot) => {
                slot.insert(Arc::new(Node::with_value(value)));
                false
            }
        }
    }

    /// Clears the value stored exactly at `path` below this node, pruning any
    /// node left without value and children on the way back.
    pub fn remove(&self, path: &str) -> bool {
        let (head, rest) = split_path(path);
        if !rest.is_empty() {
            let child = match self.child(head) {
                Some(child) => child,
                None => return false,
            };
            let removed = child.remove(rest);
            // Only prune if the slot still holds the node we emptied.
            let pruned = self
                .children
                .remove_if(head, |_, node| Arc::ptr_eq(node, &child) && node.is_vacant())
                .is_some();
            if pruned {
                trace!(word = head, "pruned empty node");
                return true;
            }
            return removed;
        }

        match self.children.entry(head.to_owned()) {
            Entry::Vacant(_) => false,
            Entry::Occupied(mut slot) => {
                let node = slot.get();
                if node.children.is_empty() {
                    slot.remove();
                    true
                } else if node.value.is_none() {
                    false
                } else {
                    let children = Arc::clone(&node.children);
                    slot.insert(Arc::new(Node::with_children(None, children)));
                    true
                }
            }
        }
    }

    /// Nearest-enclosing-value lookup.
    ///
    /// Returns the value found together with the number of words of `path`
    /// that lead from this node to the node holding it. A matched child without
    /// a value never answers; the lookup falls back to this node instead.
    pub fn lookup(&self, path: &str) -> Option<(usize, T)>
    where
        T: Clone,
    {
        let (head, rest) = split_path(path);
        let own = || self.value.clone().map(|value| (0, value));

        let child = match self.child(head) {
            Some(child) => child,
            None => return own(),
        };

        let found = if rest.is_empty() {
            child.value.clone().map(|value| (0, value))
        } else {
            child.lookup(rest)
        };

        found.map(|(depth, value)| (depth + 1, value)).or_else(own)
    }

    /// Fallback lookup returning only the value.
    pub fn get(&self, path: &str) -> Option<T>
    where
        T: Clone,
    {
        self.lookup(path).map(|(_, value)| value)
    }

    /// Walks `path` exactly, without fallback.
    pub fn descend(self: &Arc<Self>, path: &str) -> Option<Arc<Node<T>>> {
        let mut current = Arc::clone(self);
        let mut remaining = path.trim_start();
        while !remaining.is_empty() {
            let (head, rest) = split_path(remaining);
            current = current.child(head)?;
            remaining = rest;
        }
        Some(current)
    }

    /// Collects every value in the subtree below this node (not this node's own).
    pub fn collect_values(&self, out: &mut Vec<T>)
    where
        T: Clone,
    {
        for entry in self.children.iter() {
            let child = entry.value();
            if let Some(value) = &child.value {
                out.push(value.clone());
            }
            child.collect_values(out);
        }
    }

    /// Collects every `(path, value)` pair below this node, with paths built on `prefix`.
    pub fn collect_paths(&self, prefix: &str, out: &mut Vec<(String, T)>)
    where
        T: Clone,
    {
        for entry in self.children.iter() {
            let path = join_path(prefix, entry.key());
            let child = entry.value();
            if let Some(value) = &child.value {
                out.push((path.clone(), value.clone()));
            }
            child.collect_paths(&path, out);
        }
    }

    /// Returns the number of values stored below this node.
    pub fn subtree_size(&self) -> usize {
        self.children
            .iter()
            .map(|entry| {
                let child = entry.value();
                child.value.is_some() as usize + child.subtree_size()
            })
            .sum()
    }

    /// Immediate child words, sorted.
    pub fn words(&self) -> Vec<String> {
        let mut words: Vec<String> = self.children.iter().map(|entry| entry.key().clone()).collect();
        words.sort();
        words
    }

    /// Drops every child, and with them the whole subtree.
    pub fn clear(&self) {
        self.children.clear();
    }
}

impl<T> Default for Node<T> {
    fn default() -> Self {
        Self::new()
    }
}
