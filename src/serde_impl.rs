//! Serde support, enabled by the `serde` feature.
//!
//! A tree serializes as a map from path to value, sorted by path. The fallback
//! value is not part of the map. Guild keys serialize as their text form.

use std::fmt;
use std::marker::PhantomData;

use serde::de::{self, Deserialize, Deserializer, MapAccess, Visitor};
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::{GuildKey, WordPathTree};

impl<T: Clone + Serialize> Serialize for WordPathTree<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let paths = self.paths();
        let mut map = serializer.serialize_map(Some(paths.len()))?;
        for (path, value) in &paths {
            map.serialize_entry(path, value)?;
        }
        map.end()
    }
}

struct TreeVisitor<T>(PhantomData<T>);

impl<'de, T: Deserialize<'de>> Visitor<'de> for TreeVisitor<T> {
    type Value = WordPathTree<T>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map from word paths to values")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let tree = WordPathTree::new();
        while let Some((path, value)) = access.next_entry::<String, T>()? {
            if path.trim().is_empty() {
                return Err(de::Error::invalid_value(
                    de::Unexpected::Str(&path),
                    &"a non-empty word path",
                ));
            }
            tree.put(&path, value);
        }
        Ok(tree)
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for WordPathTree<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(TreeVisitor(PhantomData))
    }
}

impl Serialize for GuildKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for GuildKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(de::Error::custom)
    }
}
