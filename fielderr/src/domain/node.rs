//! The composed error tree.

use std::collections::BTreeMap;
use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

use itertools::Itertools;
use serde_json::Value;

use crate::domain::leaf::{Leaf, Message};

/// Any error value accepted from the outside world.
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Structured key-value annotations attached to an error for logging.
pub type Fields = BTreeMap<String, Value>;

/// An error composed by this crate.
///
/// A core (one leaf, or an aggregate of independent errors) under a stack
/// of prefixes and field sets. Values are immutable: every composition step
/// consumes its input and returns a new value, so a finished `Error` can be
/// shared across threads.
///
/// Prefix and field annotations are stored flat, so chains of any length
/// render, flatten and drop without recursion. Aggregates nested inside
/// aggregates recurse once per level.
#[derive(Debug, Clone)]
pub struct Error {
    pub(crate) repr: Repr,
    /// Annotations, innermost first.
    pub(crate) layers: Vec<Layer>,
}

#[derive(Debug, Clone)]
pub(crate) enum Repr {
    /// Opaque error, or a leaf taken from a flattened tree.
    Plain(Leaf),
    /// Two or more independent errors, in argument order.
    Aggregate(Vec<Error>),
}

#[derive(Debug, Clone)]
pub(crate) enum Layer {
    Prefix(String),
    Fields(Fields),
}

impl Error {
    /// Creates a leaf error carrying only `message`.
    pub fn new(message: impl Into<String>) -> Self {
        Self::from_leaf(Leaf::bare(Arc::new(Message(message.into()))))
    }

    /// Adapts any error into the tree.
    ///
    /// An `Error` is recognised by its exact type and reused as is, also
    /// when it arrives as `Box<Error>` or `Arc<Error>`. Anything else,
    /// including an `Error` hidden behind another wrapper type, becomes an
    /// opaque leaf without fields.
    pub fn from_std<E>(err: E) -> Self
    where
        E: Into<BoxError>,
    {
        let boxed: BoxError = err.into();
        let boxed = match boxed.downcast::<Error>() {
            Ok(tree) => return *tree,
            Err(other) => other,
        };
        let boxed = match boxed.downcast::<Box<Error>>() {
            Ok(tree) => return **tree,
            Err(other) => other,
        };
        match boxed.downcast::<Arc<Error>>() {
            Ok(shared) => Arc::try_unwrap(*shared).unwrap_or_else(|shared| (*shared).clone()),
            Err(opaque) => Self::from_leaf(Leaf::bare(Arc::from(opaque))),
        }
    }

    /// Borrows the `Error` inside `err`, looking through `Box` and `Arc`.
    pub(crate) fn downcast_tree<'a>(err: &'a (dyn StdError + 'static)) -> Option<&'a Error> {
        err.downcast_ref::<Error>()
            .or_else(|| err.downcast_ref::<Box<Error>>().map(|tree| &**tree))
            .or_else(|| err.downcast_ref::<Arc<Error>>().map(|tree| &**tree))
    }

    pub(crate) fn from_leaf(leaf: Leaf) -> Self {
        Self {
            repr: Repr::Plain(leaf),
            layers: Vec::new(),
        }
    }

    pub(crate) fn aggregate(errors: Vec<Error>) -> Self {
        Self {
            repr: Repr::Aggregate(errors),
            layers: Vec::new(),
        }
    }

    /// Prefixes the rendered message with `prefix: `.
    pub fn wrap(mut self, prefix: impl Into<String>) -> Self {
        self.layers.push(Layer::Prefix(prefix.into()));
        self
    }

    /// Attaches one field. Fields already present deeper in the tree win on
    /// key collision.
    pub fn with_field(self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        let mut fields = Fields::new();
        fields.insert(key.into(), value.into());
        self.with_fields(fields)
    }

    pub fn with_fields(mut self, fields: Fields) -> Self {
        if !fields.is_empty() {
            self.layers.push(Layer::Fields(fields));
        }
        self
    }

    /// True when this error combines several independent errors, whether or
    /// not it was prefixed or annotated afterwards.
    pub fn is_aggregate(&self) -> bool {
        matches!(self.repr, Repr::Aggregate(_))
    }

    /// Direct children of an aggregate; empty for every other node.
    pub fn children(&self) -> &[Error] {
        match &self.repr {
            Repr::Aggregate(errors) => errors,
            Repr::Plain(_) => &[],
        }
    }

    /// Prefixes outermost first.
    pub(crate) fn prefixes(&self) -> impl Iterator<Item = &str> {
        self.layers.iter().rev().filter_map(|layer| match layer {
            Layer::Prefix(prefix) => Some(prefix.as_str()),
            Layer::Fields(_) => None,
        })
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for prefix in self.prefixes() {
            write!(f, "{prefix}: ")?;
        }
        match &self.repr {
            Repr::Plain(leaf) => fmt::Display::fmt(leaf, f),
            Repr::Aggregate(errors) => write!(f, "{}", errors.iter().join("\n")),
        }
    }
}

impl StdError for Error {
    /// The wrapped leaf error, past any prefixes and fields. Aggregates have
    /// several causes and report none here; use [`crate::chain::causes`] to
    /// reach them.
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match &self.repr {
            Repr::Plain(leaf) => Some(&*leaf.error),
            Repr::Aggregate(_) => None,
        }
    }
}
