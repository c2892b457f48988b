//! Ordered map types for nested objects and flattened output.
//!
//! - [`Map`]: the fields of a nested object, kept in declaration order. Field order
//!   decides traversal order, which in turn decides which key a conflict reports.
//! - [`FlatMap`]: the flattened result. Keys appear in commit order (root scalars
//!   first, then descent order) and no key is ever written twice.
//!
//! Both wrap [`IndexMap`] so iteration is deterministic.
//!
//! ## Examples
//!
//! ```rust
//! use serde_flat::{Map, Value};
//!
//! let mut map = Map::new();
//! map.insert("name".to_string(), Value::from("Alice"));
//! map.insert("age".to_string(), Value::from(30));
//!
//! let keys: Vec<_> = map.keys().cloned().collect();
//! assert_eq!(keys, vec!["name", "age"]);
//! ```

use crate::{Scalar, Value};
use indexmap::IndexMap;
use serde::{Serialize, Serializer};

/// An ordered map of field names to nested values.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Map(IndexMap<String, Value>);

impl Map {
    #[must_use]
    pub fn new() -> Self {
        Map(IndexMap::new())
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Map(IndexMap::with_capacity(capacity))
    }

    /// Inserts a field. Re-inserting an existing name replaces its value but
    /// keeps its original position.
    pub fn insert(&mut self, key: String, value: Value) -> Option<Value> {
        self.0.insert(key, value)
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keys(&self) -> indexmap::map::Keys<'_, String, Value> {
        self.0.keys()
    }

    pub fn values(&self) -> indexmap::map::Values<'_, String, Value> {
        self.0.values()
    }

    /// Returns an iterator over the fields, in declaration order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Value> {
        self.0.iter()
    }
}

impl IntoIterator for Map {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Map {
    type Item = (&'a String, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<(String, Value)> for Map {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        Map(IndexMap::from_iter(iter))
    }
}

/// The single-level output of flattening: compound keys mapped to scalars.
///
/// Only the flattener writes into a `FlatMap`, and it commits every key exactly
/// once. Equality compares entries, not order.
///
/// # Examples
///
/// ```rust
/// use serde_flat::{flatten, nested, Scalar};
///
/// let input = nested!({ "arr": ["a", "b"] });
/// let flat = flatten(input.as_object().unwrap()).unwrap();
///
/// assert_eq!(flat.get("arr_1"), Some(&Scalar::from("b")));
/// let keys: Vec<_> = flat.keys().map(String::as_str).collect();
/// assert_eq!(keys, vec!["arr_0", "arr_1"]);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FlatMap(IndexMap<String, Scalar>);

impl FlatMap {
    #[must_use]
    pub fn new() -> Self {
        FlatMap(IndexMap::new())
    }

    /// Commits a key the caller has already checked is unseen.
    pub(crate) fn commit(&mut self, key: String, value: Scalar) {
        debug_assert!(!self.0.contains_key(&key), "key {key} committed twice");
        self.0.insert(key, value);
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Scalar> {
        self.0.get(key)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the keys, in commit order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, String, Scalar> {
        self.0.keys()
    }

    pub fn values(&self) -> indexmap::map::Values<'_, String, Scalar> {
        self.0.values()
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Scalar> {
        self.0.iter()
    }

    #[must_use]
    pub fn into_inner(self) -> IndexMap<String, Scalar> {
        self.0
    }
}

impl IntoIterator for FlatMap {
    type Item = (String, Scalar);
    type IntoIter = indexmap::map::IntoIter<String, Scalar>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a FlatMap {
    type Item = (&'a String, &'a Scalar);
    type IntoIter = indexmap::map::Iter<'a, String, Scalar>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<K: Into<String>> FromIterator<(K, Scalar)> for FlatMap {
    fn from_iter<T: IntoIterator<Item = (K, Scalar)>>(iter: T) -> Self {
        FlatMap(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl Serialize for FlatMap {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_map(self.0.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_keeps_declaration_order() {
        let map: Map = vec![
            ("z".to_string(), Value::from(1)),
            ("a".to_string(), Value::from(2)),
            ("m".to_string(), Value::from(3)),
        ]
        .into_iter()
        .collect();

        let keys: Vec<_> = map.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
        assert!(map.contains_key("a"));
        assert!(!map.contains_key("b"));
    }

    #[test]
    fn test_flat_map_equality_ignores_order() {
        let left: FlatMap = vec![("a", Scalar::from(1)), ("b", Scalar::Null)]
            .into_iter()
            .collect();
        let right: FlatMap = vec![("b", Scalar::Null), ("a", Scalar::from(1))]
            .into_iter()
            .collect();
        assert_eq!(left, right);
    }

    #[test]
    fn test_commit_preserves_order() {
        let mut flat = FlatMap::new();
        flat.commit("id".to_string(), Scalar::from("400-5678"));
        flat.commit("quotes_term".to_string(), Scalar::from(20));

        let keys: Vec<_> = flat.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["id", "quotes_term"]);
        assert_eq!(flat.len(), 2);
    }
}
