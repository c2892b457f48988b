//! # serde_flat
//!
//! Flattens arbitrarily nested objects, arrays and scalars into a single-level
//! map whose keys are the traversed path joined with `_`.
//!
//! ```text
//! { "quotes": { "initial": { "coverage": 100000 } }, "hello": ["world", "!"] }
//!   => { "quotes_initial_coverage": 100000, "hello_0": "world", "hello_1": "!" }
//! ```
//!
//! ## Key Rules
//!
//! - **Root precedence**: a scalar declared directly on the root object always
//!   keeps its bare name, even if a nested path generates the same key.
//! - **Conflict detection**: two nested paths generating the same key are an
//!   error, never a silent overwrite. A collision one level below a root field of
//!   the same name is tolerated; collisions deeper than that are fatal.
//! - **Pruning**: empty arrays and objects contribute no keys. `null` and
//!   `undefined` leaves are kept.
//!
//! ## Quick Start
//!
//! ```rust
//! use serde_flat::{flatten, nested, Scalar};
//!
//! let input = nested!({
//!     "person": { "name": "John", "age": 30 },
//!     "person_name": "Direct",
//!     "person_age": 25
//! });
//!
//! let flat = flatten(input.as_object().unwrap()).unwrap();
//! assert_eq!(flat.len(), 2);
//! assert_eq!(flat.get("person_name"), Some(&Scalar::from("Direct")));
//! assert_eq!(flat.get("person_age"), Some(&Scalar::from(25)));
//! ```
//!
//! ### Flattening Rust Types
//!
//! ```rust
//! use serde::Serialize;
//! use serde_flat::to_flat_map;
//!
//! #[derive(Serialize)]
//! struct User { name: String, roles: Vec<String> }
//!
//! let user = User { name: "Jane".to_string(), roles: vec!["admin".to_string()] };
//! let flat = to_flat_map(&user).unwrap();
//! assert_eq!(flat.get("roles_0").and_then(|v| v.as_str()), Some("admin"));
//! ```
//!
//! ### Conflicts
//!
//! ```rust
//! use serde_flat::{flatten, nested};
//!
//! let input = nested!({
//!     "user": { "profile": { "data": "x" }, "profile_data": "y" },
//!     "user_profile": { "data": "z" },
//!     "user_profile_data": "top"
//! });
//!
//! let err = flatten(input.as_object().unwrap()).unwrap_err();
//! assert_eq!(err.conflicting_key(), Some("user_profile_data"));
//! ```
//!
//! ## Performance Characteristics
//!
//! - O(n) in the number of nodes, plus the cost of building each key
//! - Traversal uses an explicit stack, so deeply nested input cannot overflow
//!   the call stack
//! - Each call owns its seen-key set and output; nothing is shared between calls

pub mod error;
pub mod flatten;
pub mod macros;
pub mod map;
pub mod options;
pub mod ser;
pub mod value;

pub use error::{Error, Result};
pub use flatten::{flatten, flatten_value, flatten_with_options};
pub use map::{FlatMap, Map};
pub use options::{Delimiter, FlattenOptions};
pub use ser::{to_flat_map, to_value, ValueSerializer};
pub use value::{Number, Scalar, Value};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_already_flat_input_is_unchanged() {
        let input = nested!({ "a": 1, "b": "two", "c": null, "d": false });
        let flat = flatten_value(&input).unwrap();

        let expected: FlatMap = input
            .as_object()
            .unwrap()
            .iter()
            .map(|(k, v)| (k.clone(), v.to_scalar().unwrap()))
            .collect();
        assert_eq!(flat, expected);
    }

    #[test]
    fn test_each_call_starts_fresh() {
        let input = nested!({ "a": { "b": 1 } });
        let map = input.as_object().unwrap();
        assert_eq!(flatten(map).unwrap(), flatten(map).unwrap());
    }
}
