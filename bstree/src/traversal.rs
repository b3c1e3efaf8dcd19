//! Depth-first and breadth-first traversals.
//!
//! Every order is driven by an explicit stack or queue, never by recursion,
//! so a degenerate tree produced by repeated inserts cannot exhaust the call
//! stack. Each order is offered three ways: a lazy iterator over node handles,
//! a visitor entry point (`*_with`) and a collecting entry point returning the
//! values.
use std::collections::VecDeque;

use generational_arena::{Arena, Index};
use tracing::instrument;

use crate::arena::{Node, NodeRef};
use crate::tree::BinarySearchTree;

/// Node, then left subtree, then right subtree.
pub struct PreOrderIterator<'a, T> {
    arena: &'a Arena<Node<T>>,
    stack: Vec<Index>,
}

impl<'a, T> PreOrderIterator<'a, T> {
    fn new(tree: &'a BinarySearchTree<T>) -> Self {
        Self {
            arena: tree.arena(),
            stack: tree.root_index().into_iter().collect(),
        }
    }
}

impl<'a, T> Iterator for PreOrderIterator<'a, T> {
    type Item = NodeRef<'a, T>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current) = self.stack.pop() {
            if let Some(node) = NodeRef::resolve(self.arena, current) {
                // right first so that left is popped first
                self.stack.extend(node.node().right);
                self.stack.extend(node.node().left);
                return Some(node);
            }
        }
        None
    }
}

/// Left subtree, then node, then right subtree: ascending value order.
pub struct InOrderIterator<'a, T> {
    arena: &'a Arena<Node<T>>,
    stack: Vec<Index>,
    current: Option<Index>,
}

impl<'a, T> InOrderIterator<'a, T> {
    fn new(tree: &'a BinarySearchTree<T>) -> Self {
        Self {
            arena: tree.arena(),
            stack: Vec::new(),
            current: tree.root_index(),
        }
    }
}

impl<'a, T> Iterator for InOrderIterator<'a, T> {
    type Item = NodeRef<'a, T>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current) = self.current {
            self.stack.push(current);
            self.current = self.arena.get(current).and_then(|node| node.left);
        }

        let top = self.stack.pop()?;
        let node = NodeRef::resolve(self.arena, top)?;
        self.current = node.node().right;
        Some(node)
    }
}

/// Left subtree, then right subtree, then node.
pub struct PostOrderIterator<'a, T> {
    arena: &'a Arena<Node<T>>,
    /// (node, children already pushed)
    stack: Vec<(Index, bool)>,
}

impl<'a, T> PostOrderIterator<'a, T> {
    fn new(tree: &'a BinarySearchTree<T>) -> Self {
        Self {
            arena: tree.arena(),
            stack: tree.root_index().map(|root| (root, false)).into_iter().collect(),
        }
    }
}

impl<'a, T> Iterator for PostOrderIterator<'a, T> {
    type Item = NodeRef<'a, T>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((current, expanded)) = self.stack.pop() {
            if let Some(node) = NodeRef::resolve(self.arena, current) {
                if expanded {
                    return Some(node);
                }
                self.stack.push((current, true));
                self.stack.extend(node.node().right.map(|idx| (idx, false)));
                self.stack.extend(node.node().left.map(|idx| (idx, false)));
            }
        }
        None
    }
}

/// Breadth-first, left to right within a level.
pub struct LevelOrderIterator<'a, T> {
    arena: &'a Arena<Node<T>>,
    queue: VecDeque<Index>,
}

impl<'a, T> LevelOrderIterator<'a, T> {
    fn new(tree: &'a BinarySearchTree<T>) -> Self {
        Self {
            arena: tree.arena(),
            queue: tree.root_index().into_iter().collect(),
        }
    }
}

impl<'a, T> Iterator for LevelOrderIterator<'a, T> {
    type Item = NodeRef<'a, T>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current) = self.queue.pop_front() {
            if let Some(node) = NodeRef::resolve(self.arena, current) {
                self.queue.extend(node.node().left);
                self.queue.extend(node.node().right);
                return Some(node);
            }
        }
        None
    }
}

impl<T> BinarySearchTree<T> {
    pub fn iter_preorder(&self) -> PreOrderIterator<'_, T> {
        PreOrderIterator::new(self)
    }

    pub fn iter_inorder(&self) -> InOrderIterator<'_, T> {
        InOrderIterator::new(self)
    }

    pub fn iter_postorder(&self) -> PostOrderIterator<'_, T> {
        PostOrderIterator::new(self)
    }

    pub fn iter_level_order(&self) -> LevelOrderIterator<'_, T> {
        LevelOrderIterator::new(self)
    }

    /// Values in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.iter_inorder().map(|node| node.value())
    }

    #[instrument(level = "trace", skip_all)]
    pub fn preorder_with<F>(&self, visit: F)
    where
        F: FnMut(NodeRef<'_, T>),
    {
        self.iter_preorder().for_each(visit);
    }

    #[instrument(level = "trace", skip_all)]
    pub fn inorder_with<F>(&self, visit: F)
    where
        F: FnMut(NodeRef<'_, T>),
    {
        self.iter_inorder().for_each(visit);
    }

    #[instrument(level = "trace", skip_all)]
    pub fn postorder_with<F>(&self, visit: F)
    where
        F: FnMut(NodeRef<'_, T>),
    {
        self.iter_postorder().for_each(visit);
    }

    #[instrument(level = "trace", skip_all)]
    pub fn level_order_with<F>(&self, visit: F)
    where
        F: FnMut(NodeRef<'_, T>),
    {
        self.iter_level_order().for_each(visit);
    }
}

impl<T: Clone> BinarySearchTree<T> {
    pub fn preorder(&self) -> Vec<T> {
        self.iter_preorder().map(|node| node.value().clone()).collect()
    }

    /// Values in ascending order.
    pub fn inorder(&self) -> Vec<T> {
        self.iter_inorder().map(|node| node.value().clone()).collect()
    }

    pub fn postorder(&self) -> Vec<T> {
        self.iter_postorder().map(|node| node.value().clone()).collect()
    }

    pub fn level_order(&self) -> Vec<T> {
        self.iter_level_order()
            .map(|node| node.value().clone())
            .collect()
    }
}
