use termtree::Tree;
use tracing::instrument;

use crate::domain::node::{Error, Layer, Repr};
use crate::report::fields_json;

/// Renders a structure as a printable tree, one line per node.
pub trait TreeConvert {
    fn to_tree_string(&self) -> Tree<String>;
}

impl TreeConvert for Error {
    #[instrument(level = "trace", skip(self))]
    fn to_tree_string(&self) -> Tree<String> {
        let mut tree = match &self.repr {
            Repr::Plain(leaf) if leaf.fields().is_empty() => Tree::new(leaf.to_string()),
            Repr::Plain(leaf) => Tree::new(format!("{} {}", leaf, fields_json(leaf.fields()))),
            Repr::Aggregate(errors) => Tree::new(format!("aggregate ({})", errors.len()))
                .with_leaves(errors.iter().map(TreeConvert::to_tree_string)),
        };
        for layer in &self.layers {
            let label = match layer {
                Layer::Prefix(prefix) => format!("prefix: {prefix}"),
                Layer::Fields(fields) => format!("fields: {}", fields_json(fields)),
            };
            tree = Tree::new(label).with_leaves([tree]);
        }
        tree
    }
}
