//! Binary search tree over unique ordered values.
//!
//! Nodes are stored in a generational arena and linked by index. The tree is
//! balanced when built and after an explicit `rebalance`; `insert` and
//! `delete` keep the search order but never restructure.
//!
//! ```
//! use bstree::BinarySearchTree;
//!
//! let mut tree = BinarySearchTree::build([5, 3, 8, 1, 4, 7, 9]);
//! assert_eq!(tree.inorder(), vec![1, 3, 4, 5, 7, 8, 9]);
//!
//! for value in [100, 101, 102] {
//!     tree.insert(value);
//! }
//! assert!(!tree.is_balanced());
//!
//! tree.rebalance();
//! assert!(tree.is_balanced());
//! ```

pub mod arena;
pub mod cli;
pub mod config;
pub mod errors;
pub mod exitcode;
pub mod sample;
pub mod traversal;
pub mod tree;
pub mod tree_traits;
pub mod util;

pub use arena::{Node, NodeRef};
pub use config::Settings;
pub use errors::{BstError, BstResult};
pub use tree::BinarySearchTree;
pub use tree_traits::TreeDisplay;
