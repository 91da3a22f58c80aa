//! Errors that carry a message chain, structured fields and aggregation.
//!
//! ```
//! use fielderr::{errors, fields, fields_from_error, join, new};
//!
//! let first = new("e1").with_field("k", "v1").wrap("p").build();
//! let second = new("e2").with_field("k", "v2").build();
//! let joined = join([first, second]);
//!
//! let err = joined.as_ref().unwrap();
//! assert_eq!(err.to_string(), "p: e1\ne2");
//! assert_eq!(fields_from_error(joined.as_ref()), fields! { "k" => "v1" });
//!
//! let leaves = errors(joined.as_ref());
//! assert_eq!(leaves.len(), 2);
//! assert_eq!(fields_from_error(Some(&leaves[1])), fields! { "k" => "v2" });
//! ```

#[macro_use]
mod macros;

pub mod builder;
pub mod chain;
pub mod config;
pub mod domain;
pub mod error_ext;
pub mod errors;
pub mod report;
pub mod tree_traits;
pub mod util;

pub use builder::{
    append_into, combine, err, errors, fields_from_error, into_errors, join, new, with_field,
    with_fields, wrap, Builder,
};
pub use chain::AsStdError;
pub use domain::{BoxError, Error, Fields, Leaf, Message};
pub use error_ext::ResultExt;
pub use serde_json::Value;
pub use tree_traits::TreeConvert;
