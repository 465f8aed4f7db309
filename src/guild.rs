//! Per-guild scoping of trees.
//!
//! A [`GuildKey`] pairs a guild id with a name, so one guild can hold several
//! trees (`"commands"`, `"aliases"`, ...) and guilds never see each other's
//! entries. [`ScopedTrees`] is the concurrent registry of those trees.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use dashmap::DashMap;
use tracing::debug;

use crate::tree::WordPathTree;
use crate::{Error, Result};

/// A guild id paired with an item name.
///
/// Equality, hashing and ordering use both fields. The text form is
/// `"<guild_id>:<name>"`.
///
/// # Examples
///
/// ```
/// use word_path_tree::GuildKey;
///
/// let key = GuildKey::new(42, "commands");
/// assert_eq!(key.to_string(), "42:commands");
/// assert_eq!("42:commands".parse::<GuildKey>().unwrap(), key);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GuildKey {
    pub guild_id: u64,
    pub name: String,
}

impl GuildKey {
    pub fn new(guild_id: u64, name: impl Into<String>) -> Self {
        GuildKey {
            guild_id,
            name: name.into(),
        }
    }
}

impl fmt::Display for GuildKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.guild_id, self.name)
    }
}

impl FromStr for GuildKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (id, name) = s
            .split_once(':')
            .ok_or_else(|| Error::MalformedGuildKey(s.to_owned()))?;
        if name.is_empty() {
            return Err(Error::MalformedGuildKey(s.to_owned()));
        }
        let guild_id = id.parse().map_err(|source| Error::InvalidGuildId {
            id: id.to_owned(),
            source,
        })?;
        Ok(GuildKey::new(guild_id, name))
    }
}

/// A concurrent registry of trees, one per [`GuildKey`].
///
/// # Examples
///
/// ```
/// use word_path_tree::{GuildKey, ScopedTrees};
///
/// let scopes = ScopedTrees::new();
/// scopes.tree(&GuildKey::new(1, "commands")).put("ping", "pong");
///
/// assert_eq!(scopes.resolve(&GuildKey::new(1, "commands"), "ping"), Some("pong"));
/// assert_eq!(scopes.resolve(&GuildKey::new(2, "commands"), "ping"), None);
/// ```
pub struct ScopedTrees<T> {
    trees: DashMap<GuildKey, Arc<WordPathTree<T>>>,
}

impl<T> ScopedTrees<T> {
    pub fn new() -> Self {
        ScopedTrees {
            trees: DashMap::new(),
        }
    }

    /// Returns the tree for `key`, creating an empty one if needed.
    pub fn tree(&self, key: &GuildKey) -> Arc<WordPathTree<T>> {
        if let Some(tree) = self.get_tree(key) {
            return tree;
        }
        let tree = self.trees.entry(key.clone()).or_insert_with(|| {
            debug!(%key, "creating tree");
            Arc::new(WordPathTree::new())
        });
        Arc::clone(tree.value())
    }

    /// Returns the tree for `key` if one exists.
    pub fn get_tree(&self, key: &GuildKey) -> Option<Arc<WordPathTree<T>>> {
        self.trees.get(key).map(|tree| Arc::clone(tree.value()))
    }

    /// Drops the tree for `key`. Returns whether one existed.
    pub fn remove_tree(&self, key: &GuildKey) -> bool {
        let removed = self.trees.remove(key).is_some();
        if removed {
            debug!(%key, "dropped tree");
        }
        removed
    }

    /// Drops every tree of `guild_id`, returning how many were dropped.
    pub fn remove_guild(&self, guild_id: u64) -> usize {
        let keys: Vec<GuildKey> = self
            .trees
            .iter()
            .filter(|entry| entry.key().guild_id == guild_id)
            .map(|entry| entry.key().clone())
            .collect();
        let dropped = keys
            .iter()
            .filter(|key| self.trees.remove(*key).is_some())
            .count();
        debug!(guild_id, dropped, "dropped guild trees");
        dropped
    }

    /// Returns every key with a tree, sorted.
    pub fn keys(&self) -> Vec<GuildKey> {
        let mut keys: Vec<GuildKey> = self.trees.iter().map(|entry| entry.key().clone()).collect();
        keys.sort();
        keys
    }

    pub fn len(&self) -> usize {
        self.trees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trees.is_empty()
    }
}

impl<T: Clone> ScopedTrees<T> {
    /// Fallback lookup of `path` in the tree for `key`.
    pub fn resolve(&self, key: &GuildKey, path: &str) -> Option<T> {
        self.get_tree(key)?.get(path)
    }
}

impl<T> Default for ScopedTrees<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_guild_key_equality_uses_both_fields() {
        let mut keys = HashSet::new();
        keys.insert(GuildKey::new(1, "commands"));
        keys.insert(GuildKey::new(1, "commands"));
        keys.insert(GuildKey::new(1, "aliases"));
        keys.insert(GuildKey::new(2, "commands"));

        assert_eq!(keys.len(), 3);
    }

    #[test]
    fn test_guild_key_parse() {
        let key: GuildKey = "123:event tags".parse().unwrap();
        assert_eq!(key, GuildKey::new(123, "event tags"));
        assert_eq!(key.to_string(), "123:event tags");

        // only the first separator splits
        let key: GuildKey = "7:a:b".parse().unwrap();
        assert_eq!(key.name, "a:b");
    }

    #[test]
    fn test_guild_key_parse_errors() {
        assert!(matches!(
            "commands".parse::<GuildKey>(),
            Err(Error::MalformedGuildKey(_))
        ));
        assert!(matches!(
            "12:".parse::<GuildKey>(),
            Err(Error::MalformedGuildKey(_))
        ));
        assert!(matches!(
            "guild:commands".parse::<GuildKey>(),
            Err(Error::InvalidGuildId { .. })
        ));
        assert!(matches!(
            "-1:commands".parse::<GuildKey>(),
            Err(Error::InvalidGuildId { .. })
        ));
    }

    #[test]
    fn test_guild_key_ordering() {
        let mut keys = vec![
            GuildKey::new(2, "a"),
            GuildKey::new(1, "b"),
            GuildKey::new(1, "a"),
        ];
        keys.sort();
        assert_eq!(
            keys,
            vec![
                GuildKey::new(1, "a"),
                GuildKey::new(1, "b"),
                GuildKey::new(2, "a"),
            ]
        );
    }

    #[test]
    fn test_tree_is_created_once() {
        let scopes: ScopedTrees<u32> = ScopedTrees::new();
        let key = GuildKey::new(1, "commands");

        let first = scopes.tree(&key);
        let second = scopes.tree(&key);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(scopes.len(), 1);
    }

    #[test]
    fn test_scopes_are_isolated() {
        let scopes = ScopedTrees::new();
        scopes.tree(&GuildKey::new(1, "commands")).put("ping", 1);
        scopes.tree(&GuildKey::new(2, "commands")).put("ping", 2);
        scopes.tree(&GuildKey::new(1, "aliases")).put("p", 3);

        assert_eq!(scopes.resolve(&GuildKey::new(1, "commands"), "ping"), Some(1));
        assert_eq!(scopes.resolve(&GuildKey::new(2, "commands"), "ping"), Some(2));
        assert_eq!(scopes.resolve(&GuildKey::new(1, "aliases"), "ping"), None);
        assert_eq!(scopes.resolve(&GuildKey::new(3, "commands"), "ping"), None);
    }

    #[test]
    fn test_remove_guild() {
        let scopes: ScopedTrees<u32> = ScopedTrees::new();
        scopes.tree(&GuildKey::new(1, "commands"));
        scopes.tree(&GuildKey::new(1, "aliases"));
        scopes.tree(&GuildKey::new(2, "commands"));

        assert_eq!(scopes.remove_guild(1), 2);
        assert_eq!(scopes.remove_guild(1), 0);
        assert_eq!(scopes.keys(), vec![GuildKey::new(2, "commands")]);

        assert!(scopes.remove_tree(&GuildKey::new(2, "commands")));
        assert!(!scopes.remove_tree(&GuildKey::new(2, "commands")));
        assert!(scopes.is_empty());
    }
}
