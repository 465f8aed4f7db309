use std::collections::HashMap;

use quickcheck::{quickcheck, Arbitrary, Gen};
use word_path_tree::WordPathTree;

fn sorted<T: Ord>(mut values: Vec<T>) -> Vec<T> {
    values.sort();
    values
}

#[test]
fn test_unregistered_path_resolves_to_longest_registered_prefix() {
    let tree = WordPathTree::new();
    tree.put("config", 1);
    tree.put("config prefix set", 2);

    assert_eq!(tree.get("config prefix set !"), Some(2));
    assert_eq!(tree.get("config prefix"), Some(1));
    assert_eq!(tree.get("config prefix get"), Some(1));
    assert_eq!(tree.get("help config"), None);
}

#[test]
fn test_second_put_overwrites() {
    let tree = WordPathTree::new();
    assert!(!tree.put("p", "v1"));
    assert!(tree.put("p", "v2"));
    assert_eq!(tree.get("p"), Some("v2"));
}

#[test]
fn test_placeholder_is_not_a_value() {
    let tree = WordPathTree::new();
    tree.put("a b", 1);
    assert_eq!(tree.get("a"), None);

    tree.put("a", 2);
    assert_eq!(tree.get("a"), Some(2));
}

#[test]
fn test_remove_leaves_no_residue() {
    let tree = WordPathTree::new();
    tree.put("a b", 1);

    assert!(tree.remove("a b"));
    assert_eq!(tree.get("a b"), None);
    assert!(tree.get_values().is_empty());
    assert!(!tree.view("a").exists());
    assert!(!tree.put("a", 2));
}

#[test]
fn test_remove_parent_value_keeps_subtree() {
    let tree = WordPathTree::new();
    tree.put("a b", 1);
    tree.put("a", 2);

    assert!(tree.remove("a"));
    assert!(tree.view("a").exists());
    assert_eq!(tree.get("a b"), Some(1));
    assert_eq!(tree.get("a"), None);
}

#[test]
fn test_get_values_is_multiset_of_stored_values() {
    let tree = WordPathTree::new();
    tree.put("x", 1);
    tree.put("x y", 2);
    tree.put("x y z", 3);

    assert_eq!(sorted(tree.get_values()), vec![1, 2, 3]);

    tree.put("w", 2);
    assert_eq!(sorted(tree.get_values()), vec![1, 2, 2, 3]);
}

#[test]
fn test_lookup_never_looks_sideways() {
    let tree = WordPathTree::new();
    tree.put("a b c", 1);
    tree.put("a x", 2);

    // "a b" exists as a placeholder; its sibling "a x" is never consulted
    assert_eq!(tree.get("a b"), None);
    assert_eq!(tree.get("a b d"), None);
    assert_eq!(tree.get("a b c d"), Some(1));
}

#[test]
fn test_whitespace_is_collapsed() {
    let tree = WordPathTree::new();
    tree.put("  event \t create  ", 1);

    assert_eq!(tree.get("event create"), Some(1));
    assert!(tree.contains("event\ncreate"));
    assert_eq!(tree.paths(), vec![("event create".to_string(), 1)]);
    assert!(tree.remove("event   create"));
    assert!(tree.is_empty());
}

#[test]
fn test_view_lists_subcommands() {
    let tree: WordPathTree<&str> = vec![
        ("event", "event"),
        ("event create", "create"),
        ("event delete", "delete"),
        ("event delete all", "delete all"),
        ("role", "role"),
    ]
    .into_iter()
    .collect();

    let view = tree.view("event");
    assert_eq!(view.words(), vec!["create".to_string(), "delete".to_string()]);
    assert_eq!(view.len(), 4);
    assert_eq!(
        sorted(view.values()),
        vec!["create", "delete", "delete all", "event"]
    );
    assert!(tree.view("role").words().is_empty());
}

/// A path of one to three words over a tiny alphabet, so random operations
/// collide often.
#[derive(Debug, Clone)]
struct Path(Vec<&'static str>);

impl Path {
    fn text(&self) -> String {
        self.0.join(" ")
    }
}

impl Arbitrary for Path {
    fn arbitrary(g: &mut Gen) -> Self {
        let len = *g.choose(&[1usize, 2, 3]).unwrap();
        Path(
            (0..len)
                .map(|_| *g.choose(&["a", "b", "c"]).unwrap())
                .collect(),
        )
    }
}

#[derive(Debug, Clone)]
enum Op {
    Put(Path, u8),
    Remove(Path),
}

impl Arbitrary for Op {
    fn arbitrary(g: &mut Gen) -> Self {
        if bool::arbitrary(g) {
            Op::Put(Path::arbitrary(g), u8::arbitrary(g))
        } else {
            Op::Remove(Path::arbitrary(g))
        }
    }
}

/// Reference model: exact paths to values, lookup by longest prefix.
#[derive(Default)]
struct Model(HashMap<Vec<&'static str>, u8>);

impl Model {
    fn has_node(&self, path: &[&'static str]) -> bool {
        self.0.keys().any(|key| key.starts_with(path))
    }

    fn get(&self, path: &[&'static str]) -> Option<u8> {
        (1..=path.len())
            .rev()
            .find_map(|len| self.0.get(&path[..len]).copied())
    }
}

quickcheck! {
    fn prop_tree_matches_model(ops: Vec<Op>, probes: Vec<Path>) -> bool {
        let tree = WordPathTree::new();
        let mut model = Model::default();

        for op in &ops {
            match op {
                Op::Put(path, value) => {
                    let existed = model.has_node(&path.0);
                    if tree.put(&path.text(), *value) != existed {
                        return false;
                    }
                    model.0.insert(path.0.clone(), *value);
                }
                Op::Remove(path) => {
                    let had_value = model.0.remove(&path.0).is_some();
                    if tree.remove(&path.text()) != had_value {
                        return false;
                    }
                }
            }
        }

        let probes_agree = probes
            .iter()
            .chain(ops.iter().map(|op| match op {
                Op::Put(path, _) | Op::Remove(path) => path,
            }))
            .all(|path| tree.get(&path.text()) == model.get(&path.0));

        probes_agree
            && tree.len() == model.0.len()
            && sorted(tree.get_values()) == sorted(model.0.values().copied().collect())
    }

    fn prop_no_vacant_nodes_after_removal(paths: Vec<Path>) -> bool {
        let tree = WordPathTree::new();
        for path in &paths {
            tree.put(&path.text(), ());
        }
        for path in &paths {
            tree.remove(&path.text());
        }
        // every node is gone, so the first level holds no words
        tree.is_empty() && tree.view("").words().is_empty()
    }
}
