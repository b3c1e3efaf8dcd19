use generational_arena::{Arena, Index};
use std::fmt;

/// Tree node stored in the arena.
///
/// Children are arena indices; a node never points back at its parent.
#[derive(Debug, Clone)]
pub struct Node<T> {
    /// Ordering key and payload of this node
    pub(crate) value: T,
    /// Index of the left child, None when absent
    pub(crate) left: Option<Index>,
    /// Index of the right child, None when absent
    pub(crate) right: Option<Index>,
}

impl<T> Node<T> {
    pub(crate) fn leaf(value: T) -> Self {
        Self {
            value,
            left: None,
            right: None,
        }
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn left(&self) -> Option<Index> {
        self.left
    }

    pub fn right(&self) -> Option<Index> {
        self.right
    }

    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

/// Borrowed handle to a live node.
///
/// Handed to traversal visitors and returned by `find`. The handle can walk to
/// its children, so visitors are not limited to the node's value.
pub struct NodeRef<'a, T> {
    arena: &'a Arena<Node<T>>,
    index: Index,
    node: &'a Node<T>,
}

// Manual impls: deriving would require `T: Clone`.
impl<T> Clone for NodeRef<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for NodeRef<'_, T> {}

impl<'a, T> NodeRef<'a, T> {
    pub(crate) fn resolve(arena: &'a Arena<Node<T>>, index: Index) -> Option<Self> {
        arena.get(index).map(|node| Self { arena, index, node })
    }

    /// Arena index of this node. Not stable across `rebalance`.
    pub fn index(&self) -> Index {
        self.index
    }

    pub fn value(&self) -> &'a T {
        &self.node.value
    }

    pub fn node(&self) -> &'a Node<T> {
        self.node
    }

    pub fn left(&self) -> Option<NodeRef<'a, T>> {
        self.node
            .left
            .and_then(|child| Self::resolve(self.arena, child))
    }

    pub fn right(&self) -> Option<NodeRef<'a, T>> {
        self.node
            .right
            .and_then(|child| Self::resolve(self.arena, child))
    }

    pub fn is_leaf(&self) -> bool {
        self.node.is_leaf()
    }
}

impl<T: fmt::Debug> fmt::Debug for NodeRef<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("index", &self.index)
            .field("value", &self.node.value)
            .finish()
    }
}

impl<T: fmt::Display> fmt::Display for NodeRef<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.node.value)
    }
}

/// Parent link that points at a node: the tree root or a child field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Slot {
    Root,
    Left(Index),
    Right(Index),
}
