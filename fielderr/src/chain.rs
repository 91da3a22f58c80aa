//! Cause-chain inspection on top of `std::error::Error`.
//!
//! `std` only knows a single `source()`; aggregates built by this crate have
//! several causes, which [`causes`] exposes. [`find`] and [`is`] search the
//! whole cause tree, depth-first and in construction order.

use std::error::Error as StdError;

use crate::domain::Error;

/// Borrow anything error-like as a `'static` trait object.
pub trait AsStdError {
    fn as_std_error(&self) -> &(dyn StdError + 'static);
}

impl<E: StdError + 'static> AsStdError for E {
    fn as_std_error(&self) -> &(dyn StdError + 'static) {
        self
    }
}

impl AsStdError for dyn StdError + 'static {
    fn as_std_error(&self) -> &(dyn StdError + 'static) {
        self
    }
}

impl AsStdError for dyn StdError + Send + Sync + 'static {
    fn as_std_error(&self) -> &(dyn StdError + 'static) {
        self
    }
}

/// The single next cause, as reported by `source()`.
pub fn unwrap<'a>(err: &'a (dyn StdError + 'static)) -> Option<&'a (dyn StdError + 'static)> {
    err.source()
}

/// Every direct cause of `err`. An aggregate yields all of its children.
pub fn causes<'a>(err: &'a (dyn StdError + 'static)) -> Vec<&'a (dyn StdError + 'static)> {
    match Error::downcast_tree(err) {
        Some(tree) if tree.is_aggregate() => tree
            .children()
            .iter()
            .map(|child| child as &(dyn StdError + 'static))
            .collect(),
        _ => err.source().into_iter().collect(),
    }
}

/// First error of type `T` in the cause tree of `err`, `err` included.
pub fn find<'a, T>(err: &'a (dyn StdError + 'static)) -> Option<&'a T>
where
    T: StdError + 'static,
{
    if let Some(found) = err.downcast_ref::<T>() {
        return Some(found);
    }
    causes(err).into_iter().find_map(find::<T>)
}

/// True when the cause tree of `err` holds a value equal to `target`.
pub fn is<T>(err: &(dyn StdError + 'static), target: &T) -> bool
where
    T: StdError + PartialEq + 'static,
{
    if err.downcast_ref::<T>() == Some(target) {
        return true;
    }
    causes(err).into_iter().any(|cause| is(cause, target))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Message;

    #[test]
    fn given_aggregate_when_listing_causes_then_returns_every_child() {
        let err = Error::aggregate(vec![Error::new("a"), Error::new("b")]);
        let causes = causes(&err);
        assert_eq!(causes.len(), 2);
        assert_eq!(causes[1].to_string(), "b");
    }

    #[test]
    fn given_prefixed_error_when_unwrapping_then_reaches_wrapped_leaf() {
        let err = Error::new("a").wrap("p");
        let inner = unwrap(&err).map(ToString::to_string);
        assert_eq!(inner.as_deref(), Some("a"));
    }

    #[test]
    fn given_nested_aggregate_when_finding_then_searches_later_children() {
        let err = Error::aggregate(vec![Error::new("a"), Error::new("b").wrap("p")]);
        let found = find::<Message>(&err);
        assert_eq!(found, Some(&Message("a".into())));
        assert!(is(&err, &Message("b".into())));
        assert!(!is(&err, &Message("c".into())));
    }

    #[test]
    fn given_boxed_aggregate_when_walking_causes_then_children_borrow_from_the_box() {
        let boxed: Box<Error> = Box::new(Error::aggregate(vec![Error::new("a"), Error::new("b")]));
        let err: &(dyn StdError + 'static) = &boxed;

        let messages: Vec<String> = causes(err).iter().map(ToString::to_string).collect();
        assert_eq!(messages, vec!["a", "b"]);
        assert_eq!(find::<Message>(err), Some(&Message("a".into())));
        assert!(unwrap(err).is_none());
    }
}
