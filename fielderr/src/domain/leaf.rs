//! Leaf errors: the units a flattened tree enumerates.

use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use crate::domain::node::Fields;

/// Shared handle to a leaf error. Leaves are shared between a tree and the
/// flattened views taken from it, so they are reference counted.
pub type SharedError = Arc<dyn StdError + Send + Sync + 'static>;

/// Plain message error created by [`crate::new`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct Message(pub String);

/// A leaf re-rendered under a prefix during flattening.
///
/// Renders as `prefix: cause` and keeps the original leaf reachable through
/// `source()`.
#[derive(Debug, Clone)]
pub struct PrefixedError {
    prefix: String,
    cause: SharedError,
}

impl PrefixedError {
    pub fn new(prefix: impl Into<String>, cause: SharedError) -> Self {
        Self {
            prefix: prefix.into(),
            cause,
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Puts `prefix` in front of `error`. An error that is already prefixed
    /// gets the combined prefix, so a leaf carries at most one prefix layer.
    pub(crate) fn prepend(prefix: &str, error: &SharedError) -> SharedError {
        match error.downcast_ref::<PrefixedError>() {
            Some(prefixed) => Arc::new(Self::new(
                format!("{prefix}: {}", prefixed.prefix),
                Arc::clone(&prefixed.cause),
            )),
            None => Arc::new(Self::new(prefix, Arc::clone(error))),
        }
    }
}

impl fmt::Display for PrefixedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.prefix, self.cause)
    }
}

impl StdError for PrefixedError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        Some(&*self.cause)
    }
}

/// One entry of a flattened error tree: a leaf error and the fields visible
/// on the path from the root down to it.
#[derive(Debug, Clone)]
pub struct Leaf {
    pub(crate) error: SharedError,
    pub(crate) fields: Fields,
}

impl Leaf {
    /// Leaf without fields, as produced for an opaque error.
    pub(crate) fn bare(error: SharedError) -> Self {
        Self {
            error,
            fields: Fields::new(),
        }
    }

    pub fn error(&self) -> &(dyn StdError + Send + Sync + 'static) {
        &*self.error
    }

    /// Merged fields of this leaf. Empty, never absent, when nothing was attached.
    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    pub fn into_parts(self) -> (SharedError, Fields) {
        (self.error, self.fields)
    }
}

impl fmt::Display for Leaf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.error, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_prefixed_error_when_displayed_then_prefix_precedes_cause() {
        let cause: SharedError = Arc::new(Message("disk full".into()));
        let err = PrefixedError::new("write", cause);
        assert_eq!(err.to_string(), "write: disk full");
        assert_eq!(err.prefix(), "write");
    }

    #[test]
    fn given_prefixed_error_when_source_then_reaches_original_leaf() {
        let cause: SharedError = Arc::new(Message("disk full".into()));
        let err = PrefixedError::new("write", cause);
        let source = err.source().and_then(|s| s.downcast_ref::<Message>());
        assert_eq!(source, Some(&Message("disk full".into())));
    }

    #[test]
    fn given_prefixed_error_when_prepending_then_prefixes_combine_over_original() {
        let cause: SharedError = Arc::new(Message("disk full".into()));
        let once = PrefixedError::prepend("write", &cause);
        let twice = PrefixedError::prepend("save", &once);

        assert_eq!(twice.to_string(), "save: write: disk full");
        let source = twice.source().and_then(|s| s.downcast_ref::<Message>());
        assert_eq!(source, Some(&Message("disk full".into())));
    }

    #[test]
    fn given_bare_leaf_when_inspected_then_fields_are_empty() {
        let leaf = Leaf::bare(Arc::new(Message("boom".into())));
        assert!(leaf.fields().is_empty());
        assert_eq!(leaf.to_string(), "boom");
    }
}
