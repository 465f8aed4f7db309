//! The main tree implementation.
//!
//! This module contains the `WordPathTree` type, which provides the primary API
//! for registering and resolving multi-word paths.

use std::fmt;
use std::iter::FromIterator;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::trace;

use crate::node::Node;
use crate::path_view::PathView;
use crate::util::{leading_words, skip_words};

/// A concurrent tree keyed by whitespace-separated word paths.
///
/// Each word of a path selects one level of the tree, so `"event create"` is
/// stored as the child `create` of the node `event`. Lookups resolve to the
/// value of the nearest enclosing path that has one, which is what a command
/// dispatcher needs: `"event create weekly"` resolves to the handler registered
/// at `"event create"` when nothing more specific exists.
///
/// # Consistency
///
/// Every node keeps its children in its own lock-striped map and there is no
/// tree-wide lock. A single map operation is atomic, but `put` and `remove`
/// touch several nodes one after another and are not atomic as a whole. A
/// reader racing with a writer can observe a path half-built or half-pruned.
/// Writers to disjoint paths never lose each other's updates.
///
/// # Examples
///
/// ```
/// use word_path_tree::WordPathTree;
///
/// let tree = WordPathTree::new();
/// tree.put("event", "list events");
/// tree.put("event create", "create an event");
///
/// assert_eq!(tree.get("event create weekly"), Some("create an event"));
/// assert_eq!(tree.get("event delete"), Some("list events"));
/// assert_eq!(tree.get("ban"), None);
/// ```
pub struct WordPathTree<T> {
    /// Holds the first level of words. Never carries a value itself.
    pub(crate) root: Arc<Node<T>>,

    /// Value answered when no registered path encloses the query
    fallback: RwLock<Option<T>>,
}

/// The result of [`WordPathTree::lookup`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match<'p, T> {
    /// The value that answered the lookup
    pub value: T,

    /// Words of the node holding `value`, joined by single spaces. Empty when
    /// the tree's fallback answered.
    pub path: String,

    /// The part of the input after the matched words
    pub rest: &'p str,
}

impl<T> WordPathTree<T> {
    /// Creates a new, empty tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use word_path_tree::WordPathTree;
    ///
    /// let tree = WordPathTree::<u32>::new();
    /// assert!(tree.is_empty());
    /// ```
    pub fn new() -> Self {
        WordPathTree {
            root: Arc::new(Node::new()),
            fallback: RwLock::new(None),
        }
    }

    /// Creates a tree whose root answers with `value` when nothing else does.
    ///
    /// # Examples
    ///
    /// ```
    /// use word_path_tree::WordPathTree;
    ///
    /// let tree = WordPathTree::with_fallback("unknown command");
    /// tree.put("ping", "pong");
    ///
    /// assert_eq!(tree.get("ping"), Some("pong"));
    /// assert_eq!(tree.get("pong"), Some("unknown command"));
    /// ```
    pub fn with_fallback(value: T) -> Self {
        WordPathTree {
            root: Arc::new(Node::new()),
            fallback: RwLock::new(Some(value)),
        }
    }

    /// Associates `value` with `path`.
    ///
    /// Returns `true` if a node already occupied `path`, even a placeholder
    /// created for a longer path, and `false` for a fresh insert. Anything
    /// already registered below `path` is kept.
    ///
    /// An empty path addresses the root and sets the fallback value.
    ///
    /// # Examples
    ///
    /// ```
    /// use word_path_tree::WordPathTree;
    ///
    /// let tree = WordPathTree::new();
    /// assert!(!tree.put("role add", 1));
    /// assert!(tree.put("role", 2));
    /// assert!(tree.put("role", 3));
    ///
    /// assert_eq!(tree.get("role add"), Some(1));
    /// assert_eq!(tree.get("role"), Some(3));
    /// ```
    pub fn put(&self, path: &str, value: T) -> bool {
        let path = path.trim_start();
        let replaced = if path.is_empty() {
            self.fallback.write().replace(value).is_some()
        } else {
            self.root.put(path, value)
        };
        trace!(path, replaced, "put");
        replaced
    }

    /// Clears the value stored exactly at `path`.
    ///
    /// Returns `true` if something was removed or pruned. Nodes left with
    /// neither a value nor children are dropped; a node that still has
    /// children stays behind as a placeholder.
    ///
    /// An empty path clears the fallback value.
    ///
    /// # Examples
    ///
    /// ```
    /// use word_path_tree::WordPathTree;
    ///
    /// let tree = WordPathTree::new();
    /// tree.put("role", 1);
    /// tree.put("role add", 2);
    ///
    /// assert!(tree.remove("role"));
    /// assert_eq!(tree.get("role"), None);
    /// assert_eq!(tree.get("role add"), Some(2));
    /// assert!(!tree.remove("role"));
    /// ```
    pub fn remove(&self, path: &str) -> bool {
        let path = path.trim_start();
        let removed = if path.is_empty() {
            self.fallback.write().take().is_some()
        } else {
            self.root.remove(path)
        };
        trace!(path, removed, "remove");
        removed
    }

    /// Discards every registered path. The fallback value is kept.
    pub fn clear(&self) {
        self.root.clear();
        trace!("clear");
    }

    /// Returns the number of values registered at paths.
    ///
    /// This walks the tree; under concurrent writes the count is a snapshot
    /// that may mix states from before and after those writes.
    pub fn len(&self) -> usize {
        self.root.subtree_size()
    }

    /// Returns `true` if no path carries a value.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Creates a view of the subtree at `path`.
    ///
    /// # Examples
    ///
    /// ```
    /// use word_path_tree::WordPathTree;
    ///
    /// let tree = WordPathTree::new();
    /// tree.put("event create", 1);
    /// tree.put("event delete", 2);
    ///
    /// let view = tree.view("event");
    /// assert!(view.exists());
    /// assert_eq!(view.words(), vec!["create".to_string(), "delete".to_string()]);
    /// ```
    pub fn view(&self, path: &str) -> PathView<T>
    where
        T: Clone,
    {
        let node = self.root.descend(path);
        let value = match &node {
            Some(node) if Arc::ptr_eq(node, &self.root) => self.fallback(),
            Some(node) => node.value.clone(),
            None => None,
        };
        PathView::new(path, node, value)
    }
}

impl<T: Clone> WordPathTree<T> {
    /// Returns the value of the nearest enclosing path that has one.
    ///
    /// A path whose node exists but carries no value falls back to the
    /// closest ancestor with a value, and finally to the fallback value. The
    /// lookup never considers sibling branches.
    ///
    /// # Examples
    ///
    /// ```
    /// use word_path_tree::WordPathTree;
    ///
    /// let tree = WordPathTree::new();
    /// tree.put("a b", 1);
    ///
    /// assert_eq!(tree.get("a b"), Some(1));
    /// assert_eq!(tree.get("a b c"), Some(1));
    /// assert_eq!(tree.get("a"), None);
    /// ```
    pub fn get(&self, path: &str) -> Option<T> {
        self.root
            .get(path.trim_start())
            .or_else(|| self.fallback())
    }

    /// Like [`get`](Self::get), but also reports which words matched.
    ///
    /// # Examples
    ///
    /// ```
    /// use word_path_tree::WordPathTree;
    ///
    /// let tree = WordPathTree::new();
    /// tree.put("role add", "add role");
    ///
    /// let found = tree.lookup("role  add @admin").unwrap();
    /// assert_eq!(found.value, "add role");
    /// assert_eq!(found.path, "role add");
    /// assert_eq!(found.rest, "@admin");
    /// ```
    pub fn lookup<'p>(&self, path: &'p str) -> Option<Match<'p, T>> {
        let path = path.trim_start();
        match self.root.lookup(path) {
            Some((depth, value)) => Some(Match {
                value,
                path: leading_words(path, depth),
                rest: skip_words(path, depth),
            }),
            None => self.fallback().map(|value| Match {
                value,
                path: String::new(),
                rest: path,
            }),
        }
    }

    /// Returns `true` if a value is stored exactly at `path`.
    pub fn contains(&self, path: &str) -> bool {
        let path = path.trim_start();
        if path.is_empty() {
            return false;
        }
        match self.root.descend(path) {
            Some(node) => node.value.is_some(),
            None => false,
        }
    }

    /// Returns the fallback value, if any.
    pub fn fallback(&self) -> Option<T> {
        self.fallback.read().clone()
    }

    /// Returns every value registered at a path, in no particular order.
    ///
    /// The result is a snapshot; later changes to the tree are not reflected.
    ///
    /// # Examples
    ///
    /// ```
    /// use word_path_tree::WordPathTree;
    ///
    /// let tree = WordPathTree::new();
    /// tree.put("x", 1);
    /// tree.put("x y", 2);
    ///
    /// let mut values = tree.get_values();
    /// values.sort();
    /// assert_eq!(values, vec![1, 2]);
    /// ```
    pub fn get_values(&self) -> Vec<T> {
        let mut values = Vec::new();
        self.root.collect_values(&mut values);
        values
    }

    /// Returns every registered `(path, value)` pair, sorted by path.
    pub fn paths(&self) -> Vec<(String, T)> {
        let mut paths = Vec::new();
        self.root.collect_paths("", &mut paths);
        paths.sort_by(|a, b| a.0.cmp(&b.0));
        paths
    }
}

impl<T> Default for WordPathTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

// Two trees are equal when they hold the same values at the same paths and
// the same fallback. Placeholders do not take part.
impl<T: Clone + PartialEq> PartialEq for WordPathTree<T> {
    fn eq(&self, other: &Self) -> bool {
        if std::ptr::eq(self, other) {
            return true;
        }
        self.fallback() == other.fallback() && self.paths() == other.paths()
    }
}

impl<T: Clone + Eq> Eq for WordPathTree<T> {}

impl<T: Clone + fmt::Debug> fmt::Debug for WordPathTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.paths()).finish()
    }
}

impl<S: AsRef<str>, T> Extend<(S, T)> for WordPathTree<T> {
    fn extend<I: IntoIterator<Item = (S, T)>>(&mut self, iter: I) {
        for (path, value) in iter {
            self.put(path.as_ref(), value);
        }
    }
}

impl<S: AsRef<str>, T> FromIterator<(S, T)> for WordPathTree<T> {
    fn from_iter<I: IntoIterator<Item = (S, T)>>(iter: I) -> Self {
        let mut tree = WordPathTree::new();
        tree.extend(iter);
        tree
    }
}
