//! Fluent construction and aggregation of errors.
//!
//! Every operation treats an absent error (`None`) as success and passes it
//! through without allocating anything.

use serde_json::Value;
use tracing::{debug, instrument};

use crate::chain::AsStdError;
use crate::domain::node::Repr;
use crate::domain::{BoxError, Error, Fields};

/// Fluent builder over an error that may be absent.
///
/// Methods consume the builder, so one builder is never shared between
/// threads; finished [`Error`] values are immutable and can be.
#[must_use]
#[derive(Debug, Default)]
pub struct Builder {
    err: Option<Error>,
}

impl Builder {
    /// Prefixes the message: `prefix: <message>`. No-op on an absent error.
    pub fn wrap(mut self, prefix: impl Into<String>) -> Self {
        self.err = self.err.map(|err| err.wrap(prefix));
        self
    }

    /// Attaches one field.
    ///
    /// Each call adds a node outside the previous ones, so for a key set
    /// twice on the same chain the first value wins.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.err = self.err.map(|err| err.with_field(key, value));
        self
    }

    pub fn with_fields(mut self, fields: Fields) -> Self {
        self.err = self.err.map(|err| err.with_fields(fields));
        self
    }

    /// The finished error, or `None` when the builder started from no error.
    pub fn build(self) -> Option<Error> {
        self.err
    }
}

impl From<Builder> for Option<Error> {
    fn from(builder: Builder) -> Self {
        builder.build()
    }
}

/// Starts a builder from a new message error.
pub fn new(message: impl Into<String>) -> Builder {
    Builder {
        err: Some(Error::new(message)),
    }
}

/// Starts a builder from an existing error; `None` yields an absent builder.
///
/// An [`Error`] is reused by exact type, also inside a `Box` or an `Arc`.
/// An `Error` hidden behind a foreign wrapper type is not unwrapped, the
/// wrapper is kept as an opaque leaf.
pub fn err<E>(err: Option<E>) -> Builder
where
    E: Into<BoxError>,
{
    Builder {
        err: err.map(Error::from_std),
    }
}

pub fn wrap<E>(prefix: impl Into<String>, err: Option<E>) -> Builder
where
    E: Into<BoxError>,
{
    self::err(err).wrap(prefix)
}

pub fn with_field<E>(err: Option<E>, key: impl Into<String>, value: impl Into<Value>) -> Builder
where
    E: Into<BoxError>,
{
    self::err(err).with_field(key, value)
}

pub fn with_fields<E>(err: Option<E>, fields: Fields) -> Builder
where
    E: Into<BoxError>,
{
    self::err(err).with_fields(fields)
}

/// Aggregates several errors into one.
///
/// Absent entries are dropped and an aggregate argument contributes its
/// children rather than itself. Zero survivors give `None`, a single
/// survivor is returned as is, anything more becomes one aggregate in
/// argument order.
#[instrument(level = "trace", skip_all)]
pub fn join<I, E>(errs: I) -> Option<Error>
where
    I: IntoIterator<Item = Option<E>>,
    E: Into<BoxError>,
{
    let mut survivors: Vec<Error> = Vec::new();
    for err in errs.into_iter().flatten() {
        match Error::from_std(err) {
            Error {
                repr: Repr::Aggregate(children),
                layers,
            } if layers.is_empty() => survivors.extend(children),
            other => survivors.push(other),
        }
    }
    debug!(survivors = survivors.len(), "joined errors");

    match survivors.len() {
        0 => None,
        1 => survivors.pop(),
        _ => Some(Error::aggregate(survivors)),
    }
}

pub use self::join as combine;

/// Replaces the contents of `into` with `join([into, err])`.
///
/// An absent `err` leaves `into` untouched.
#[instrument(level = "trace", skip_all)]
pub fn append_into<E>(into: &mut Option<Error>, err: Option<E>)
where
    E: Into<BoxError>,
{
    let Some(err) = err else {
        return;
    };
    let current = into.take().map(|e| Box::new(e) as BoxError);
    *into = join([current, Some(err.into())]);
}

/// Leaf errors of `err` in construction order; empty for an absent error.
///
/// Borrows an [`Error`]. For any other error value use [`into_errors`].
pub fn errors(err: Option<&Error>) -> Vec<Error> {
    err.map(Error::errors).unwrap_or_default()
}

/// Leaf errors of any error value, taking ownership of it.
///
/// An opaque error yields exactly one leaf: itself, without fields.
pub fn into_errors<E>(err: Option<E>) -> Vec<Error>
where
    E: Into<BoxError>,
{
    err.map(|err| Error::from_std(err).errors()).unwrap_or_default()
}

/// Merged fields of the first leaf of `err`.
///
/// Always a map: empty for an absent error, an opaque error, or an `Error`
/// hidden behind a foreign wrapper type. `Box<Error>` and `Arc<Error>` are
/// seen through.
pub fn fields_from_error<E>(err: Option<&E>) -> Fields
where
    E: AsStdError + ?Sized,
{
    err.and_then(|e| Error::downcast_tree(e.as_std_error()))
        .map(Error::fields)
        .unwrap_or_default()
}
