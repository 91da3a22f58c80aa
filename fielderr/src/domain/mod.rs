//! Domain layer: the error tree and its traversals
//!
//! This layer is independent of logging and configuration (no I/O).

pub mod flatten;
pub mod leaf;
pub mod node;

pub use leaf::{Leaf, Message, PrefixedError};
pub use node::{BoxError, Error, Fields};
