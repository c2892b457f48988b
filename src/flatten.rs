//! The flattening algorithm.
//!
//! Flattening runs in two passes over the root object:
//!
//! 1. **Root pass.** Every scalar field of the root is committed under its bare
//!    name. A scalar declared at the root therefore always owns that name.
//! 2. **Descent pass.** Every array or object field of the root is walked depth
//!    first, in declaration order. Array elements extend the key with their
//!    index, object fields with their name, joined by the configured
//!    [`Delimiter`](crate::Delimiter).
//!
//! During descent:
//!
//! - A leaf whose key is also a field name on the root is skipped; the root owns it.
//! - A leaf whose key was already committed is a conflict.
//! - Empty arrays and objects contribute nothing.
//! - Before a compound child key is entered, a key that was already committed is
//!   a conflict, unless the root declares that exact name and the key is only two
//!   segments long. Deeper collisions are always fatal.
//!
//! The walk uses an explicit stack rather than recursion, so input depth is
//! bounded by memory rather than by the call stack. Children are pushed in
//! reverse and checked when popped, which visits keys in the same order a
//! recursive walk would and reports the same first conflicting key.

use crate::{Error, FlatMap, FlattenOptions, Map, Result, Scalar, Value};
use log::{debug, trace};
use std::collections::HashSet;

/// Flattens `root` using the default options (`_` delimiter).
///
/// # Examples
///
/// ```rust
/// use serde_flat::{flatten, nested, Scalar};
///
/// let input = nested!({
///     "id": "400-5678",
///     "quotes": { "initial": { "coverage": 100000 } },
///     "hello": ["world", "!"]
/// });
///
/// let flat = flatten(input.as_object().unwrap()).unwrap();
/// assert_eq!(flat.get("quotes_initial_coverage"), Some(&Scalar::from(100000)));
/// assert_eq!(flat.get("hello_1"), Some(&Scalar::from("!")));
/// assert_eq!(flat.len(), 4);
/// ```
///
/// # Errors
///
/// Returns [`Error::Conflict`] naming the first key that two paths generate.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn flatten(root: &Map) -> Result<FlatMap> {
    flatten_with_options(root, &FlattenOptions::default())
}

/// Flattens `root` with custom options.
///
/// # Errors
///
/// Returns [`Error::Conflict`] naming the first key that two paths generate.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn flatten_with_options(root: &Map, options: &FlattenOptions) -> Result<FlatMap> {
    let mut flattener = Flattener::new(root, options);
    flattener.commit_root_scalars();

    for (name, value) in root.iter().filter(|(_, value)| !value.is_scalar()) {
        flattener.descend(value, name.clone())?;
    }

    Ok(flattener.output)
}

/// Flattens any [`Value`], rejecting roots that are not objects.
///
/// # Examples
///
/// ```rust
/// use serde_flat::{flatten_value, Error, Value};
///
/// let err = flatten_value(&Value::Array(vec![])).unwrap_err();
/// assert_eq!(err, Error::RootNotObject("array"));
/// ```
///
/// # Errors
///
/// Returns [`Error::RootNotObject`] for a non-object root, otherwise the same
/// errors as [`flatten`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn flatten_value(root: &Value) -> Result<FlatMap> {
    match root {
        Value::Object(map) => flatten(map),
        other => Err(Error::RootNotObject(other.kind())),
    }
}

/// A pending node of the descent: the value and the key it was reached by.
struct Frame<'a> {
    value: &'a Value,
    key: String,
    /// Set for keys built from a parent key, which get the collision check.
    compound: bool,
}

struct Flattener<'a> {
    root: &'a Map,
    options: &'a FlattenOptions,
    seen: HashSet<String>,
    output: FlatMap,
}

impl<'a> Flattener<'a> {
    fn new(root: &'a Map, options: &'a FlattenOptions) -> Self {
        Flattener {
            root,
            options,
            seen: HashSet::with_capacity(root.len()),
            output: FlatMap::new(),
        }
    }

    fn commit_root_scalars(&mut self) {
        for (name, value) in self.root.iter() {
            if let Some(scalar) = value.to_scalar() {
                self.seen.insert(name.clone());
                self.output.commit(name.clone(), scalar);
            }
        }
    }

    fn descend(&mut self, value: &'a Value, key: String) -> Result<()> {
        let mut stack = vec![Frame {
            value,
            key,
            compound: false,
        }];

        while let Some(Frame {
            value,
            key,
            compound,
        }) = stack.pop()
        {
            if compound {
                self.check_child(&key)?;
            }

            match value {
                Value::Array(items) => {
                    stack.extend(items.iter().enumerate().rev().map(|(index, item)| Frame {
                        value: item,
                        key: self.options.join(&key, &index.to_string()),
                        compound: true,
                    }));
                }
                Value::Object(fields) => {
                    stack.extend(fields.iter().rev().map(|(name, field)| Frame {
                        value: field,
                        key: self.options.join(&key, name),
                        compound: true,
                    }));
                }
                leaf => self.commit_leaf(key, leaf)?,
            }
        }

        Ok(())
    }

    fn check_child(&self, key: &str) -> Result<()> {
        if !self.seen.contains(key) {
            return Ok(());
        }

        if self.root.contains_key(key) && self.options.segment_count(key) == 2 {
            trace!("{key} collides with a root field one level down, root value kept");
            return Ok(());
        }

        Err(self.conflict(key))
    }

    fn commit_leaf(&mut self, key: String, leaf: &Value) -> Result<()> {
        if self.root.contains_key(&key) {
            trace!("{key} is declared on the root, nested {} skipped", leaf.kind());
            return Ok(());
        }

        if self.seen.contains(&key) {
            return Err(self.conflict(&key));
        }

        let scalar = Scalar::try_from(leaf.clone())?;
        self.seen.insert(key.clone());
        self.output.commit(key, scalar);
        Ok(())
    }

    fn conflict(&self, key: &str) -> Error {
        debug!(
            "flatten aborted after {} keys: {key} generated twice",
            self.output.len()
        );
        Error::conflict(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{nested, Delimiter};

    fn object(value: Value) -> Map {
        match value {
            Value::Object(map) => map,
            other => panic!("Expected object, found {}", other.kind()),
        }
    }

    #[test]
    fn test_root_scalars_commit_first() {
        let root = object(nested!({
            "nested": { "a": 1 },
            "id": "x",
            "flag": true
        }));

        let flat = flatten(&root).unwrap();
        let keys: Vec<_> = flat.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["id", "flag", "nested_a"]);
    }

    #[test]
    fn test_descent_order_matches_declaration_order() {
        let root = object(nested!({
            "a": { "x": [1, { "y": 2 }], "z": 3 },
            "b": [[4]]
        }));

        let flat = flatten(&root).unwrap();
        let keys: Vec<_> = flat.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["a_x_0", "a_x_1_y", "a_z", "b_0_0"]);
    }

    #[test]
    fn test_generated_collision_without_root_field_is_fatal() {
        let root = object(nested!({
            "a": { "b_c": 1, "b": { "c": 2 } }
        }));

        let err = flatten(&root).unwrap_err();
        assert_eq!(err.conflicting_key(), Some("a_b_c"));
    }

    #[test]
    fn test_shallow_collision_with_container_child_is_tolerated() {
        let root = object(nested!({
            "a": { "b": { "c": 1 } },
            "a_b": 5
        }));

        let flat = flatten(&root).unwrap();
        let expected: FlatMap = vec![("a_b", Scalar::from(5)), ("a_b_c", Scalar::from(1))]
            .into_iter()
            .collect();
        assert_eq!(flat, expected);
    }

    #[test]
    fn test_leaf_under_root_container_name_is_skipped() {
        let root = object(nested!({
            "a": { "b": 1 },
            "a_b": { "c": 2 }
        }));

        let flat = flatten(&root).unwrap();
        assert_eq!(flat, vec![("a_b_c", Scalar::from(2))].into_iter().collect());
    }

    #[test]
    fn test_custom_delimiter_drives_depth_rule() {
        let options = FlattenOptions::new().with_delimiter(Delimiter::Dot);
        let root = object(nested!({
            "person": { "name": "John" },
            "person.name": "Direct"
        }));

        let flat = flatten_with_options(&root, &options).unwrap();
        assert_eq!(
            flat,
            vec![("person.name", Scalar::from("Direct"))]
                .into_iter()
                .collect()
        );
    }

    #[test]
    fn test_non_object_roots_rejected() {
        assert_eq!(
            flatten_value(&Value::from(1)).unwrap_err(),
            Error::RootNotObject("number")
        );
        assert!(flatten_value(&nested!({})).unwrap().is_empty());
    }

    #[test]
    fn test_very_deep_input_does_not_overflow() {
        let mut value = Value::from("leaf");
        for _ in 0..10_000 {
            let mut map = Map::new();
            map.insert("n".to_string(), value);
            value = Value::Object(map);
        }
        let mut root = Map::new();
        root.insert("root".to_string(), value);

        let flat = flatten(&root).unwrap();
        assert_eq!(flat.len(), 1);
        let key = flat.keys().next().unwrap();
        assert_eq!(key.len(), "root".len() + 10_000 * "_n".len());

        // Value's derived Drop recurses, so tear the tree down iteratively.
        let mut pending: Vec<Value> = root.into_iter().map(|(_, v)| v).collect();
        while let Some(value) = pending.pop() {
            if let Value::Object(map) = value {
                pending.extend(map.into_iter().map(|(_, v)| v));
            }
        }
    }
}
