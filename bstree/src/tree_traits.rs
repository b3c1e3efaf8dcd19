use std::fmt;

use termtree::Tree;
use tracing::instrument;

use crate::arena::NodeRef;
use crate::tree::BinarySearchTree;

/// Marker printed in place of a missing child when its sibling exists.
pub const EMPTY_CHILD: &str = "·";

pub trait TreeDisplay {
    fn to_tree_string(&self) -> Tree<String>;
}

impl<T: fmt::Display> TreeDisplay for BinarySearchTree<T> {
    /// Renders the node structure, left child above right child.
    ///
    /// A lone child is paired with an `EMPTY_CHILD` placeholder so that its
    /// side stays visible.
    #[instrument(level = "debug", skip(self))]
    fn to_tree_string(&self) -> Tree<String> {
        fn build_tree<T: fmt::Display>(node: NodeRef<'_, T>, parent_tree: &mut Tree<String>) {
            let (left, right) = (node.left(), node.right());
            if left.is_none() && right.is_none() {
                return;
            }
            for child in [left, right] {
                match child {
                    Some(child) => {
                        let mut child_tree = Tree::new(child.value().to_string());
                        build_tree(child, &mut child_tree);
                        parent_tree.push(child_tree);
                    }
                    None => {
                        parent_tree.push(Tree::new(EMPTY_CHILD.to_string()));
                    }
                }
            }
        }

        match self.root() {
            Some(root) => {
                let mut tree = Tree::new(root.value().to_string());
                build_tree(root, &mut tree);
                tree
            }
            None => Tree::new("Empty tree".to_string()),
        }
    }
}
