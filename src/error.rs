//! Error types for flattening and for the serde bridge.
//!
//! Flattening itself has exactly one failure mode: two distinct paths in the
//! input generate the same output key. That failure is reported as
//! [`Error::Conflict`] and aborts the whole call; no partial output is returned.
//!
//! The remaining variants come from the edges of the crate: handing a
//! non-object root to [`flatten_value`](crate::flatten_value), converting a
//! container into a [`Scalar`](crate::Scalar), or serde failures while turning
//! a Rust type into a [`Value`](crate::Value).
//!
//! ## Examples
//!
//! ```rust
//! use serde_flat::{flatten, nested, Error};
//!
//! let input = nested!({
//!     "users": [{ "profile": { "data": "x" } }],
//!     "users_0_profile_data": "y"
//! });
//!
//! let err = flatten(input.as_object().unwrap()).unwrap_err();
//! assert_eq!(err.conflicting_key(), Some("users_0_profile_data"));
//! assert_eq!(
//!     err.to_string(),
//!     "Conflicting field names: users_0_profile_data appears multiple times"
//! );
//! ```

use std::fmt;
use thiserror::Error;

/// Represents all possible errors produced by this crate.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Two paths in the input generate the same flattened key.
    #[error("Conflicting field names: {key} appears multiple times")]
    Conflict { key: String },

    /// The value handed to the flattener is not an object.
    #[error("Expected an object at the root, found {0}")]
    RootNotObject(&'static str),

    /// A container was used where a leaf value is required.
    #[error("Expected a scalar value, found {0}")]
    NotAScalar(&'static str),

    /// Unsupported type for conversion into a [`Value`](crate::Value)
    #[error("Unsupported type: {0}")]
    UnsupportedType(String),

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates a naming conflict error for the given flattened key.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_flat::Error;
    ///
    /// let err = Error::conflict("person_name");
    /// assert_eq!(
    ///     err.to_string(),
    ///     "Conflicting field names: person_name appears multiple times"
    /// );
    /// ```
    pub fn conflict(key: impl Into<String>) -> Self {
        Error::Conflict { key: key.into() }
    }

    /// Returns the colliding key if this is a [`Error::Conflict`].
    #[must_use]
    pub fn conflicting_key(&self) -> Option<&str> {
        match self {
            Error::Conflict { key } => Some(key),
            _ => None,
        }
    }

    /// Creates an unsupported type error for types that have no [`Value`](crate::Value) form.
    pub fn unsupported_type(msg: &str) -> Self {
        Error::UnsupportedType(msg.to_string())
    }

    /// Creates a custom error with a display message.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_flat::Error;
    ///
    /// let err = Error::custom("something went wrong");
    /// assert!(err.to_string().contains("something went wrong"));
    /// ```
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conflict_message_format() {
        let err = Error::conflict("user_profile_data");
        assert_eq!(
            err.to_string(),
            "Conflicting field names: user_profile_data appears multiple times"
        );
        assert_eq!(err.conflicting_key(), Some("user_profile_data"));
    }

    #[test]
    fn test_non_conflict_has_no_key() {
        let err = Error::RootNotObject("array");
        assert_eq!(err.conflicting_key(), None);
        assert_eq!(err.to_string(), "Expected an object at the root, found array");
    }
}
