//! Flattening: an error tree to its ordered leaves with merged fields.

use itertools::Itertools;

use crate::domain::leaf::{Leaf, PrefixedError};
use crate::domain::node::{Error, Fields, Layer, Repr};

/// Merges two field maps. `inner` is nearer the leaf and wins on duplicated keys.
pub fn merge_fields(outer: &Fields, inner: Fields) -> Fields {
    if outer.is_empty() {
        return inner;
    }
    let mut merged = outer.clone();
    merged.extend(inner);
    merged
}

impl Error {
    /// Leaves of this tree in left-to-right, depth-first order, each with the
    /// fields visible on its own path from the root.
    ///
    /// Pure: flattening the same tree twice yields the same sequence.
    pub fn flatten(&self) -> Vec<Leaf> {
        let mut leaves = match &self.repr {
            Repr::Plain(leaf) => vec![leaf.clone()],
            Repr::Aggregate(errors) => errors.iter().flat_map(Error::flatten).collect(),
        };
        if self.layers.is_empty() {
            return leaves;
        }

        let prefix = self.prefixes().join(": ");
        let fields = self.layer_fields();
        for leaf in &mut leaves {
            if !prefix.is_empty() {
                leaf.error = PrefixedError::prepend(&prefix, &leaf.error);
            }
            let deeper = std::mem::take(&mut leaf.fields);
            leaf.fields = merge_fields(&fields, deeper);
        }
        leaves
    }

    /// Leaf errors of this tree, each still carrying its merged fields.
    pub fn errors(&self) -> Vec<Error> {
        self.flatten().into_iter().map(Error::from_leaf).collect()
    }

    /// Merged fields of the first leaf. Empty when nothing was attached.
    pub fn fields(&self) -> Fields {
        self.flatten()
            .into_iter()
            .next()
            .map(|leaf| leaf.fields)
            .unwrap_or_default()
    }

    /// Fields of this node's own layers; inner layers win.
    fn layer_fields(&self) -> Fields {
        let mut merged = Fields::new();
        for layer in self.layers.iter().rev() {
            if let Layer::Fields(fields) = layer {
                merged.extend(fields.iter().map(|(k, v)| (k.clone(), v.clone())));
            }
        }
        merged
    }
}
