//! # Word Path Tree
//!
//! A concurrent tree keyed by whitespace-separated word paths, built to resolve
//! multi-word command names such as `"event create"` to their handlers.
//!
//! ## Features
//!
//! - **Word-per-level paths**: each word of a path selects one level of the tree
//! - **Fallback lookup**: a path resolves to the value of its nearest enclosing
//!   registered path, so trailing words act as arguments
//! - **Shared concurrent access**: every node keeps its children in its own
//!   lock-striped map; all operations take `&self`
//! - **Path views**: list the sub-commands and values below any path
//! - **Guild scoping**: keep one tree per `(guild id, name)` pair
//!
//! ## Example
//!
//! ```rust
//! use word_path_tree::WordPathTree;
//!
//! let tree = WordPathTree::new();
//! tree.put("event create", "create");
//! tree.put("event", "list");
//!
//! assert_eq!(tree.get("event create tomorrow"), Some("create"));
//! assert_eq!(tree.get("event remove"), Some("list"));
//!
//! let found = tree.lookup("event create tomorrow").unwrap();
//! assert_eq!(found.path, "event create");
//! assert_eq!(found.rest, "tomorrow");
//! ```

mod guild;
mod node;
mod path_view;
#[cfg(feature = "serde")]
mod serde_impl;
mod tree;
mod util;

use std::num::ParseIntError;

// Re-export public types
pub use crate::guild::{GuildKey, ScopedTrees};
pub use crate::path_view::PathView;
pub use crate::tree::{Match, WordPathTree};

/// Errors produced by this crate.
///
/// Tree operations never fail; errors only come from parsing text forms.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A guild key is not of the form `<guild_id>:<name>`
    #[error("malformed guild key `{0}`, expected `<guild_id>:<name>`")]
    MalformedGuildKey(String),
    /// The guild id part of a guild key is not a number
    #[error("invalid guild id `{id}`")]
    InvalidGuildId {
        id: String,
        #[source]
        source: ParseIntError,
    },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
