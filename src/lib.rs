//! This crate exposes two ordered-key containers built on binary search trees: a plain,
//! unbalanced one and a self-balancing AVL tree. They share one operation surface,
//! [`OrderedSet`], so the balanced tree can be measured against the baseline.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree stores keys in `Node`s, each of which may have a left and a right child.
//! The most important invariants of a BST are:
//!
//! 1. For every `Node` in a BST, all the `Node`s in its left subtree have a
//!    key less than its own key.
//! 2. For every `Node` in a BST, all the `Node`s in its right subtree have a
//!    key greater than its own key.
//!
//! Keys are never duplicated: inserting a key that is already present does nothing.
//!
//! Searching for a key takes `O(height)` where `height` is the longest path from the root `Node`
//! to a leaf `Node`. An [`UnbalancedTree`] never reshapes itself so inserting keys in ascending
//! order grows a chain whose height is the number of keys. An [`AvlTree`] keeps the heights of
//! every `Node`'s two subtrees within one of each other, which limits its height to `O(lg N)`.
//!
//! Visiting the left subtree, then the subtree root, then the right subtree yields the keys in
//! ascending order. This is what [`OrderedSet::inorder`] returns.
//!
//! # Examples
//!
//! ```
//! use ordtree::{AvlTree, UnbalancedTree};
//!
//! let mut avl = AvlTree::new();
//! let mut unbalanced = UnbalancedTree::new();
//! for key in 1..=7 {
//!     avl.insert(key);
//!     unbalanced.insert(key);
//! }
//!
//! // Same keys...
//! assert_eq!(avl.inorder(), unbalanced.inorder());
//!
//! // ...different shapes.
//! assert_eq!(avl.height(), 3);
//! assert_eq!(unbalanced.height(), 7);
//! ```

#![deny(missing_docs)]
#![forbid(unsafe_code)]

pub mod avl;
mod error;
mod iter;
mod node;
pub mod unbalanced;

#[cfg(test)]
mod test;

pub use avl::AvlTree;
pub use error::InvariantViolation;
pub use unbalanced::UnbalancedTree;

/// The operations every tree in this crate supports. None of them can fail: inserting a key that
/// is already present and deleting or searching for one that is absent are all well defined.
pub trait OrderedSet<K: Ord> {
    /// Adds `key` if it isn't already present. Returns whether it was added.
    fn insert(&mut self, key: K) -> bool;

    /// Returns whether `key` is present.
    fn search(&self, key: &K) -> bool;

    /// Removes `key` if it is present. Returns whether it was removed.
    fn delete(&mut self, key: &K) -> bool;

    /// Returns every key in strictly ascending order.
    fn inorder(&self) -> Vec<K>
    where
        K: Clone;
}
