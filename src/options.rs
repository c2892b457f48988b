//! Configuration options for flattening.
//!
//! - [`FlattenOptions`]: main configuration struct
//! - [`Delimiter`]: separator placed between path segments
//!
//! The delimiter also decides how deep a compound key is when the flattener
//! checks whether a collision with a root field can be tolerated, so a key is
//! always split on the same separator it was joined with.
//!
//! ## Examples
//!
//! ```rust
//! use serde_flat::{flatten_with_options, nested, Delimiter, FlattenOptions};
//!
//! let input = nested!({ "quotes": { "initial": { "term": 20 } } });
//! let options = FlattenOptions::new().with_delimiter(Delimiter::Dot);
//!
//! let flat = flatten_with_options(input.as_object().unwrap(), &options).unwrap();
//! assert!(flat.contains_key("quotes.initial.term"));
//! ```

/// Separator between path segments in a compound key.
///
/// # Examples
///
/// ```rust
/// use serde_flat::Delimiter;
///
/// assert_eq!(Delimiter::Underscore.as_str(), "_");
/// assert_eq!(Delimiter::Dot.as_str(), ".");
/// assert_eq!(Delimiter::Slash.as_str(), "/");
/// assert_eq!(Delimiter::Colon.as_str(), ":");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Delimiter {
    #[default]
    Underscore,
    Dot,
    Slash,
    Colon,
}

impl Delimiter {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Delimiter::Underscore => "_",
            Delimiter::Dot => ".",
            Delimiter::Slash => "/",
            Delimiter::Colon => ":",
        }
    }
}

/// Configuration options for flattening.
///
/// # Examples
///
/// ```rust
/// use serde_flat::{Delimiter, FlattenOptions};
///
/// let options = FlattenOptions::new();
/// assert_eq!(options.delimiter, Delimiter::Underscore);
///
/// let options = FlattenOptions::new().with_delimiter(Delimiter::Slash);
/// assert_eq!(options.delimiter.as_str(), "/");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FlattenOptions {
    pub delimiter: Delimiter,
}

impl FlattenOptions {
    /// Creates default options (underscore delimiter).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_delimiter(mut self, delimiter: Delimiter) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Joins a parent key and a child segment.
    pub(crate) fn join(&self, prefix: &str, segment: &str) -> String {
        let delimiter = self.delimiter.as_str();
        let mut key = String::with_capacity(prefix.len() + delimiter.len() + segment.len());
        key.push_str(prefix);
        key.push_str(delimiter);
        key.push_str(segment);
        key
    }

    /// Number of segments in `key` when split on the delimiter.
    pub(crate) fn segment_count(&self, key: &str) -> usize {
        key.split(self.delimiter.as_str()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_and_count() {
        let options = FlattenOptions::new();
        let key = options.join("quotes_initial", "coverage");
        assert_eq!(key, "quotes_initial_coverage");
        assert_eq!(options.segment_count(&key), 3);
        assert_eq!(options.segment_count("person_name"), 2);
        assert_eq!(options.segment_count("person"), 1);
    }

    #[test]
    fn test_count_uses_configured_delimiter() {
        let options = FlattenOptions::new().with_delimiter(Delimiter::Dot);
        assert_eq!(options.segment_count("person_name"), 1);
        assert_eq!(options.segment_count("person.name"), 2);
    }
}
