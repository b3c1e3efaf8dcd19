use std::cmp::Ordering;
use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::mem;

use generational_arena::{Arena, Index};
use itertools::Itertools;
use tracing::{debug, instrument, trace};

use crate::arena::{Node, NodeRef, Slot};

/// Binary search tree over unique, totally ordered values.
///
/// Nodes live in a generational arena and are linked by index. The tree is
/// height-balanced after `build` and `rebalance`; `insert` and `delete` never
/// restructure, so repeated mutation can unbalance it.
#[derive(Debug, Clone)]
pub struct BinarySearchTree<T> {
    /// Arena storage for all live nodes
    arena: Arena<Node<T>>,
    /// Index of the root node, None for empty trees
    root: Option<Index>,
    len: usize,
}

/// Outcome of a root-to-leaf search.
struct Search {
    /// Slot holding the match, or the free slot where the value would attach
    slot: Slot,
    found: Option<Index>,
    /// Edges walked from the root
    depth: usize,
}

impl<T> Default for BinarySearchTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> BinarySearchTree<T> {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            root: None,
            len: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn root(&self) -> Option<NodeRef<'_, T>> {
        self.root.and_then(|idx| self.node_ref(idx))
    }

    pub fn clear(&mut self) {
        self.arena.clear();
        self.root = None;
        self.len = 0;
    }

    pub(crate) fn arena(&self) -> &Arena<Node<T>> {
        &self.arena
    }

    pub(crate) fn root_index(&self) -> Option<Index> {
        self.root
    }

    pub(crate) fn node_ref(&self, idx: Index) -> Option<NodeRef<'_, T>> {
        NodeRef::resolve(&self.arena, idx)
    }

    /// Height of the whole tree: -1 when empty, 0 for a single node.
    #[instrument(level = "trace", skip(self))]
    pub fn height(&self) -> i64 {
        self.height_of(self.root)
    }

    /// Height of the subtree rooted at `node`, -1 for an absent subtree.
    ///
    /// Breadth-first walk carrying the level of each node, so the cost in
    /// stack space does not depend on how degenerate the subtree is.
    #[instrument(level = "trace", skip(self))]
    pub fn height_of(&self, node: Option<Index>) -> i64 {
        let mut max_level: i64 = -1;
        let mut queue = VecDeque::new();
        if let Some(start) = node {
            queue.push_back((start, 0));
        }

        while let Some((idx, level)) = queue.pop_front() {
            if let Some(node) = self.arena.get(idx) {
                max_level = max_level.max(level);
                for child in [node.left, node.right].into_iter().flatten() {
                    queue.push_back((child, level + 1));
                }
            }
        }

        max_level
    }

    /// True when every node's left and right subtree heights differ by at
    /// most one. An empty tree is balanced.
    #[instrument(level = "debug", skip(self))]
    pub fn is_balanced(&self) -> bool {
        // post-order guarantees both children are measured before their parent
        let mut heights: HashMap<Index, i64> = HashMap::with_capacity(self.len);
        let height = |heights: &HashMap<Index, i64>, child: Option<Index>| {
            child
                .and_then(|idx| heights.get(&idx).copied())
                .unwrap_or(-1)
        };

        for node in self.iter_postorder() {
            let left = height(&heights, node.node().left);
            let right = height(&heights, node.node().right);
            if (left - right).abs() > 1 {
                trace!(index = ?node.index(), left, right, "unbalanced node");
                return false;
            }
            heights.insert(node.index(), 1 + left.max(right));
        }

        true
    }

    fn slot_target(&self, slot: Slot) -> Option<Index> {
        match slot {
            Slot::Root => self.root,
            Slot::Left(parent) => self.arena.get(parent).and_then(|node| node.left),
            Slot::Right(parent) => self.arena.get(parent).and_then(|node| node.right),
        }
    }

    fn set_slot(&mut self, slot: Slot, target: Option<Index>) {
        match slot {
            Slot::Root => self.root = target,
            Slot::Left(parent) => {
                if let Some(node) = self.arena.get_mut(parent) {
                    node.left = target;
                }
            }
            Slot::Right(parent) => {
                if let Some(node) = self.arena.get_mut(parent) {
                    node.right = target;
                }
            }
        }
    }

    /// Detaches the leftmost node below `slot` and returns its value.
    ///
    /// The leftmost node has no left child, so its right child (possibly
    /// absent) takes its place.
    fn take_min(&mut self, mut slot: Slot) -> Option<T> {
        let mut current = self.slot_target(slot)?;
        while let Some(left) = self.arena.get(current).and_then(|node| node.left) {
            slot = Slot::Left(current);
            current = left;
        }

        let right = self.arena.get(current).and_then(|node| node.right);
        self.set_slot(slot, right);
        self.arena.remove(current).map(|node| node.value)
    }

    /// Builds a height-balanced subtree from sorted, distinct values.
    ///
    /// Splits at the lower middle `(lo + hi) / 2` of the inclusive range,
    /// which for a slice is `(len - 1) / 2`.
    fn build_range(&mut self, values: &mut [Option<T>]) -> Option<Index> {
        if values.is_empty() {
            return None;
        }
        let mid = (values.len() - 1) / 2;
        let (lower, rest) = values.split_at_mut(mid);
        let (pivot, upper) = rest.split_first_mut()?;
        let value = pivot.take()?;

        let left = self.build_range(lower);
        let right = self.build_range(upper);
        let idx = self.arena.insert(Node { value, left, right });
        self.len += 1;
        Some(idx)
    }

    /// Replaces the current content with a balanced tree over `sorted`.
    fn fill_sorted(&mut self, sorted: Vec<T>) {
        self.clear();
        let mut values: Vec<Option<T>> = sorted.into_iter().map(Some).collect();
        self.root = self.build_range(&mut values);
    }
}

impl<T: Ord + fmt::Debug> BinarySearchTree<T> {
    /// Builds a balanced tree from an arbitrary collection.
    ///
    /// Duplicates are dropped and the values sorted before the midpoint
    /// partition, so the tree holds exactly the distinct input values.
    #[instrument(level = "debug", skip(values))]
    pub fn build<I>(values: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let sorted: Vec<T> = values.into_iter().sorted().dedup().collect();
        let mut tree = Self::new();
        tree.fill_sorted(sorted);
        debug!(len = tree.len, height = tree.height(), "built tree");
        tree
    }

    /// Walks from the root towards `value`.
    fn search(&self, value: &T) -> Search {
        let mut slot = Slot::Root;
        let mut depth = 0;

        while let Some(current) = self.slot_target(slot) {
            let Some(node) = self.arena.get(current) else {
                break;
            };
            slot = match value.cmp(&node.value) {
                Ordering::Less => Slot::Left(current),
                Ordering::Greater => Slot::Right(current),
                Ordering::Equal => {
                    return Search {
                        slot,
                        found: Some(current),
                        depth,
                    }
                }
            };
            depth += 1;
        }

        Search {
            slot,
            found: None,
            depth,
        }
    }

    /// Inserts `value` as a new leaf.
    ///
    /// Returns false and leaves the tree untouched if the value is already
    /// present. Never rebalances.
    #[instrument(level = "debug", skip(self))]
    pub fn insert(&mut self, value: T) -> bool {
        let Search { slot, found, depth } = self.search(&value);
        if found.is_some() {
            trace!("value already present");
            return false;
        }

        let idx = self.arena.insert(Node::leaf(value));
        self.set_slot(slot, Some(idx));
        self.len += 1;
        trace!(depth, "attached leaf");
        true
    }

    /// Removes `value` and returns it, or None if it was not present.
    ///
    /// A node with two children takes the value of its in-order successor,
    /// and the successor node is unlinked instead.
    #[instrument(level = "debug", skip(self))]
    pub fn delete(&mut self, value: &T) -> Option<T> {
        let Search { slot, found, .. } = self.search(value);
        let target = found?;
        let (left, right) = {
            let node = self.arena.get(target)?;
            (node.left, node.right)
        };

        let removed = match (left, right) {
            (None, _) => {
                self.set_slot(slot, right);
                self.arena.remove(target)?.value
            }
            (_, None) => {
                self.set_slot(slot, left);
                self.arena.remove(target)?.value
            }
            (Some(_), Some(_)) => {
                let successor = self.take_min(Slot::Right(target))?;
                let node = self.arena.get_mut(target)?;
                mem::replace(&mut node.value, successor)
            }
        };

        self.len -= 1;
        Some(removed)
    }

    pub fn find(&self, value: &T) -> Option<NodeRef<'_, T>> {
        self.search(value)
            .found
            .and_then(|idx| self.node_ref(idx))
    }

    pub fn contains(&self, value: &T) -> bool {
        self.search(value).found.is_some()
    }

    /// Number of edges from the root to the node holding `value`.
    pub fn depth(&self, value: &T) -> Option<usize> {
        let search = self.search(value);
        search.found.map(|_| search.depth)
    }

    pub fn min(&self) -> Option<&T> {
        let mut current = self.arena.get(self.root?)?;
        while let Some(left) = current.left.and_then(|idx| self.arena.get(idx)) {
            current = left;
        }
        Some(&current.value)
    }

    pub fn max(&self) -> Option<&T> {
        let mut current = self.arena.get(self.root?)?;
        while let Some(right) = current.right.and_then(|idx| self.arena.get(idx)) {
            current = right;
        }
        Some(&current.value)
    }

    /// Discards the current shape and rebuilds a balanced tree over the same
    /// values. Node indices are not preserved.
    #[instrument(level = "debug", skip(self))]
    pub fn rebalance(&mut self) {
        let before = self.height();
        let order: Vec<Index> = self.iter_inorder().map(|node| node.index()).collect();
        let values: Vec<T> = order
            .into_iter()
            .filter_map(|idx| self.arena.remove(idx))
            .map(|node| node.value)
            .collect();
        self.fill_sorted(values);
        debug!(before, after = self.height(), len = self.len, "rebalanced");
    }
}

impl<T: Ord + fmt::Debug> FromIterator<T> for BinarySearchTree<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::build(iter)
    }
}

impl<T: Ord + fmt::Debug> Extend<T> for BinarySearchTree<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}
