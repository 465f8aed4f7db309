//! Path view into a word-path tree.
//!
//! This module provides the `PathView` type, which gives read access to the
//! subtree under one exact path, e.g. to list the sub-commands of a command.

use std::fmt;
use std::sync::Arc;

use crate::node::Node;
use crate::util::normalize;

/// A lightweight view into the subtree at an exact path.
///
/// The view resolves its node once, when created. If that node is later
/// replaced in the tree the view keeps showing the old one, but children added
/// below it stay visible because a replaced node hands its child map over to
/// its successor.
///
/// # Examples
///
/// ```
/// use word_path_tree::WordPathTree;
///
/// let tree = WordPathTree::new();
/// tree.put("event", 1);
/// tree.put("event create", 2);
/// tree.put("event delete", 3);
///
/// let view = tree.view("event");
/// assert_eq!(view.value(), Some(1));
/// assert_eq!(view.len(), 3);
/// assert_eq!(view.get("create now"), Some(2));
/// assert_eq!(view.get("rename"), Some(1));
///
/// assert!(!tree.view("event rename").exists());
/// ```
#[derive(Clone)]
pub struct PathView<T> {
    /// The viewed path, whitespace collapsed
    path: String,

    /// The node at the path, if it exists
    node: Option<Arc<Node<T>>>,

    /// Value at the path when the view was taken
    value: Option<T>,
}

impl<T: Clone> PathView<T> {
    pub(crate) fn new(path: &str, node: Option<Arc<Node<T>>>, value: Option<T>) -> Self {
        PathView {
            path: normalize(path),
            node,
            value,
        }
    }

    /// Returns the viewed path with whitespace runs collapsed to single spaces.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns whether a node, valued or placeholder, exists at the path.
    pub fn exists(&self) -> bool {
        self.node.is_some()
    }

    /// Returns the value stored exactly at the path.
    pub fn value(&self) -> Option<T> {
        self.value.clone()
    }

    /// Fallback lookup relative to the viewed path.
    ///
    /// The viewed path's own value is the last fallback; nothing above the
    /// view is consulted.
    pub fn get(&self, rest: &str) -> Option<T> {
        match &self.node {
            Some(node) => node.get(rest.trim_start()).or_else(|| self.value()),
            None => None,
        }
    }

    /// Returns the words directly below the path, sorted.
    pub fn words(&self) -> Vec<String> {
        match &self.node {
            Some(node) => node.words(),
            None => Vec::new(),
        }
    }

    /// Returns every value in the viewed subtree, including the path's own.
    pub fn values(&self) -> Vec<T> {
        let mut values: Vec<T> = self.value.iter().cloned().collect();
        if let Some(node) = &self.node {
            node.collect_values(&mut values);
        }
        values
    }

    /// Returns the number of values in the viewed subtree.
    pub fn len(&self) -> usize {
        let below = match &self.node {
            Some(node) => node.subtree_size(),
            None => 0,
        };
        self.value.is_some() as usize + below
    }

    /// Returns whether the viewed subtree holds no values.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: Clone + fmt::Debug> fmt::Debug for PathView<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PathView")
            .field("path", &self.path)
            .field("exists", &self.exists())
            .field("value", &self.value)
            .field("words", &self.words())
            .finish()
    }
}
