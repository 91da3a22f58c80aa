//! Error composition helpers for `Result`
//!
//! Provides an extension trait for annotating the error side of any result
//! without leaving `?`-style control flow.

use serde_json::Value;

use crate::domain::{BoxError, Error, Fields};

/// Extension trait for converting `Result<T, E>` into `Result<T, Error>` with context.
pub trait ResultExt<T> {
    /// Prefix the error message.
    ///
    /// # Example
    /// ```
    /// use fielderr::ResultExt;
    ///
    /// let read: Result<(), std::io::Error> = Err(std::io::Error::other("denied"));
    /// let err = read.wrap_err("read config").unwrap_err();
    /// assert_eq!(err.to_string(), "read config: denied");
    /// ```
    fn wrap_err(self, prefix: &str) -> Result<T, Error>;

    /// Attach one field to the error.
    fn with_err_field(self, key: &str, value: impl Into<Value>) -> Result<T, Error>;

    fn with_err_fields(self, fields: Fields) -> Result<T, Error>;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: Into<BoxError>,
{
    fn wrap_err(self, prefix: &str) -> Result<T, Error> {
        self.map_err(|e| Error::from_std(e).wrap(prefix))
    }

    fn with_err_field(self, key: &str, value: impl Into<Value>) -> Result<T, Error> {
        self.map_err(|e| Error::from_std(e).with_field(key, value))
    }

    fn with_err_fields(self, fields: Fields) -> Result<T, Error> {
        self.map_err(|e| Error::from_std(e).with_fields(fields))
    }
}
