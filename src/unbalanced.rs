//! A plain Binary Search Tree with no rebalancing. Keys end up wherever the order of insertions
//! puts them, so inserting keys in ascending (or descending) order builds a chain as tall as the
//! number of keys. It is the baseline the [`AvlTree`](crate::AvlTree) is measured against.
//!
//! # Examples
//!
//! ```
//! use ordtree::UnbalancedTree;
//!
//! let mut tree = UnbalancedTree::new();
//!
//! // Nothing in here yet.
//! assert!(!tree.search(&1));
//!
//! assert!(tree.insert(1));
//! assert!(tree.search(&1));
//!
//! // Inserting the same key again does nothing.
//! assert!(!tree.insert(1));
//! assert_eq!(tree.len(), 1);
//!
//! assert!(tree.delete(&1));
//! assert!(!tree.search(&1));
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::mem;

use crate::node::{self, Link, TreeNode};
use crate::{InvariantViolation, OrderedSet};

/// An unbalanced Binary Search Tree of unique keys.
pub struct UnbalancedTree<K> {
    root: Link<Node<K>>,
    len: usize,
}

impl<K> Default for UnbalancedTree<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> Drop for UnbalancedTree<K> {
    /// A chain of boxes would be dropped recursively, one stack frame per key. Unlink the nodes
    /// onto a heap allocated stack instead.
    fn drop(&mut self) {
        let mut stack: Vec<Box<Node<K>>> = self.root.take().into_iter().collect();
        while let Some(mut node) = stack.pop() {
            stack.extend(node.left.take());
            stack.extend(node.right.take());
        }
    }
}

impl<K: Clone> Clone for UnbalancedTree<K> {
    /// Copies node by node, pairing each source node with the empty slot its copy goes into.
    fn clone(&self) -> Self {
        let mut root: Link<Node<K>> = None;
        let mut stack: Vec<(&Node<K>, &mut Link<Node<K>>)> = Vec::new();
        if let Some(node) = self.root.as_deref() {
            stack.push((node, &mut root));
        }
        while let Some((source, slot)) = stack.pop() {
            let copy = slot.insert(Box::new(Node {
                key: source.key.clone(),
                left: None,
                right: None,
            }));
            if let Some(left) = source.left.as_deref() {
                stack.push((left, &mut copy.left));
            }
            if let Some(right) = source.right.as_deref() {
                stack.push((right, &mut copy.right));
            }
        }

        Self {
            root,
            len: self.len,
        }
    }
}

impl<K: fmt::Debug> fmt::Debug for UnbalancedTree<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<K> UnbalancedTree<K> {
    /// Generates a new, empty `UnbalancedTree`.
    pub fn new() -> Self {
        Self { root: None, len: 0 }
    }

    /// The number of keys in the tree.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the tree holds no keys.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Removes every key.
    pub fn clear(&mut self) {
        *self = Self::new();
    }

    /// The key stored in the root node, if there is one.
    pub fn root(&self) -> Option<&K> {
        self.root.as_deref().map(|n| &n.key)
    }

    /// The number of nodes on the longest path from the root to a leaf. An empty tree has height
    /// 0.
    ///
    /// This walks the whole tree since nodes don't record their heights.
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut stack: Vec<(&Node<K>, usize)> =
            self.root.as_deref().map(|n| (n, 1)).into_iter().collect();
        while let Some((node, depth)) = stack.pop() {
            height = height.max(depth);
            stack.extend(node.left.as_deref().map(|n| (n, depth + 1)));
            stack.extend(node.right.as_deref().map(|n| (n, depth + 1)));
        }
        height
    }

    /// An iterator over the keys in ascending order.
    pub fn iter(&self) -> Iter<'_, K> {
        Iter(crate::iter::Iter::new(self.root.as_deref()))
    }
}

impl<K: Ord> UnbalancedTree<K> {
    /// Adds `key` as a new leaf if it isn't present already. Returns whether it was added.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordtree::UnbalancedTree;
    ///
    /// let mut tree = UnbalancedTree::new();
    ///
    /// assert!(tree.insert(2));
    /// assert!(tree.insert(1));
    /// assert!(!tree.insert(2));
    ///
    /// assert_eq!(tree.inorder(), [1, 2]);
    /// ```
    pub fn insert(&mut self, key: K) -> bool {
        let (root, inserted) = Node::insert_into(self.root.take(), key);
        self.root = Some(root);
        if inserted {
            self.len += 1;
        }
        inserted
    }

    /// Returns whether `key` is in the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordtree::UnbalancedTree;
    ///
    /// let tree: UnbalancedTree<_> = [3, 1, 2].into_iter().collect();
    ///
    /// assert!(tree.search(&1));
    /// assert!(!tree.search(&42));
    /// ```
    pub fn search(&self, key: &K) -> bool {
        node::search(self.root.as_deref(), key)
    }

    /// Removes `key` from the tree. Returns whether it was there to remove.
    pub fn delete(&mut self, key: &K) -> bool {
        self.take(key).is_some()
    }

    /// Removes `key` from the tree and returns the key that was stored for it, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordtree::UnbalancedTree;
    ///
    /// let mut tree: UnbalancedTree<_> = ["b", "a", "c"].into_iter().collect();
    ///
    /// assert_eq!(tree.take(&"b"), Some("b"));
    /// assert_eq!(tree.take(&"b"), None);
    /// assert_eq!(tree.inorder(), ["a", "c"]);
    /// ```
    pub fn take(&mut self, key: &K) -> Option<K> {
        let (root, removed) = Node::delete_from(self.root.take(), key);
        self.root = root;
        if removed.is_some() {
            self.len -= 1;
        }
        removed
    }

    /// Every key in ascending order.
    pub fn inorder(&self) -> Vec<K>
    where
        K: Clone,
    {
        self.iter().cloned().collect()
    }

    /// The smallest key.
    pub fn min(&self) -> Option<&K> {
        node::min(self.root.as_deref())
    }

    /// The largest key.
    pub fn max(&self) -> Option<&K> {
        node::max(self.root.as_deref())
    }

    /// Verifies the ordering invariant and the recorded key count.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        let counted = node::check_order(self.root.as_deref())?;
        if counted != self.len {
            return Err(InvariantViolation::WrongLength {
                counted,
                recorded: self.len,
            });
        }
        Ok(())
    }
}

impl<K: Ord> OrderedSet<K> for UnbalancedTree<K> {
    fn insert(&mut self, key: K) -> bool {
        UnbalancedTree::insert(self, key)
    }

    fn search(&self, key: &K) -> bool {
        UnbalancedTree::search(self, key)
    }

    fn delete(&mut self, key: &K) -> bool {
        UnbalancedTree::delete(self, key)
    }

    fn inorder(&self) -> Vec<K>
    where
        K: Clone,
    {
        UnbalancedTree::inorder(self)
    }
}

impl<K: Ord> FromIterator<K> for UnbalancedTree<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<K: Ord> Extend<K> for UnbalancedTree<K> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<'a, K> IntoIterator for &'a UnbalancedTree<K> {
    type Item = &'a K;
    type IntoIter = Iter<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An ascending iterator over the keys of an [`UnbalancedTree`].
pub struct Iter<'a, K>(crate::iter::Iter<'a, K, Node<K>>);

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next()
    }
}

/// A `Node` has a key and up to two children.
struct Node<K> {
    key: K,
    left: Link<Node<K>>,
    right: Link<Node<K>>,
}

impl<K> TreeNode<K> for Node<K> {
    fn key(&self) -> &K {
        &self.key
    }

    fn left(&self) -> Option<&Self> {
        self.left.as_deref()
    }

    fn right(&self) -> Option<&Self> {
        self.right.as_deref()
    }
}

impl<K: Ord> Node<K> {
    fn new(key: K) -> Box<Self> {
        Box::new(Self {
            key,
            left: None,
            right: None,
        })
    }

    /// Inserts `key` into the subtree at `link` and returns the subtree's root along with whether
    /// a node was added.
    fn insert_into(link: Link<Self>, key: K) -> (Box<Self>, bool) {
        match link {
            None => (Self::new(key), true),
            Some(node) => node.insert(key),
        }
    }

    fn insert(mut self: Box<Self>, key: K) -> (Box<Self>, bool) {
        let inserted = match key.cmp(&self.key) {
            Ordering::Less => {
                let (left, inserted) = Self::insert_into(self.left.take(), key);
                self.left = Some(left);
                inserted
            }
            Ordering::Equal => false,
            Ordering::Greater => {
                let (right, inserted) = Self::insert_into(self.right.take(), key);
                self.right = Some(right);
                inserted
            }
        };

        (self, inserted)
    }

    /// Deletes `key` from the subtree at `link`. Returns what's left of the subtree and the key
    /// that was removed, if it was found.
    fn delete_from(link: Link<Self>, key: &K) -> (Link<Self>, Option<K>) {
        match link {
            None => (None, None),
            Some(node) => node.delete(key),
        }
    }

    fn delete(mut self: Box<Self>, key: &K) -> (Link<Self>, Option<K>) {
        match key.cmp(&self.key) {
            Ordering::Less => {
                let (left, removed) = Self::delete_from(self.left.take(), key);
                self.left = left;
                (Some(self), removed)
            }
            Ordering::Greater => {
                let (right, removed) = Self::delete_from(self.right.take(), key);
                self.right = right;
                (Some(self), removed)
            }
            Ordering::Equal => match (self.left.take(), self.right.take()) {
                (None, None) => (None, Some(self.key)),
                (Some(child), None) | (None, Some(child)) => (Some(child), Some(self.key)),

                // With two children this node stays where it is and takes over the key of its
                // in-order successor. The successor has no left child so removing it from the
                // right subtree is one of the cases above.
                (Some(left), Some(right)) => {
                    let (successor, right) = right.delete_min();
                    self.left = Some(left);
                    self.right = right;
                    let removed = mem::replace(&mut self.key, successor);
                    (Some(self), Some(removed))
                }
            },
        }
    }

    /// Removes the leftmost node of this subtree. Returns its key and what's left of the subtree.
    fn delete_min(mut self: Box<Self>) -> (K, Link<Self>) {
        match self.left.take() {
            None => {
                let Self { key, right, .. } = *self;
                (key, right)
            }
            Some(left) => {
                let (min, left) = left.delete_min();
                self.left = left;
                (min, Some(self))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert() {
        let mut tree = UnbalancedTree::new();
        assert!(tree.insert(1));

        assert!(tree.search(&1));
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn test_insert_duplicate_is_noop() {
        let mut tree = UnbalancedTree::new();
        tree.insert(2);
        tree.insert(1);
        let before = tree.inorder();

        assert!(!tree.insert(2));
        assert_eq!(tree.inorder(), before);
        assert_eq!(tree.len(), 2);
    }

    #[test]
    fn test_delete_no_children() {
        let mut tree = UnbalancedTree::new();
        tree.insert(1);
        tree.insert(2);

        assert!(tree.delete(&2));
        assert!(tree.search(&1));
        assert!(!tree.search(&2));
        assert!(tree.root.as_ref().unwrap().right.is_none());
    }

    #[test]
    fn test_delete_no_left_child() {
        let mut tree = UnbalancedTree::new();
        tree.insert(1);
        tree.insert(2);

        assert!(tree.delete(&1));
        assert!(!tree.search(&1));
        assert_eq!(tree.root(), Some(&2));
    }

    #[test]
    fn test_delete_no_right_child() {
        let mut tree = UnbalancedTree::new();
        tree.insert(2);
        tree.insert(1);

        assert!(tree.delete(&2));
        assert!(!tree.search(&2));
        assert_eq!(tree.root(), Some(&1));
    }

    #[test]
    fn test_delete_two_children_promotes_successor() {
        //     5
        //    / \
        //   3   8
        //      / \
        //     6   9
        //      \
        //       7
        let mut tree: UnbalancedTree<_> = [5, 3, 8, 6, 9, 7].into_iter().collect();

        assert!(tree.delete(&5));

        // 6 was the smallest key to the right of 5 so it takes 5's place and its right child
        // moves up to replace it.
        assert_eq!(tree.root(), Some(&6));
        let eight = tree.root.as_ref().unwrap().right.as_ref().unwrap();
        assert_eq!(eight.key, 8);
        assert_eq!(eight.left.as_ref().map(|n| n.key), Some(7));
        assert_eq!(tree.inorder(), [3, 6, 7, 8, 9]);
        tree.check_invariants().unwrap();
    }

    #[test]
    fn test_delete_missing() {
        let mut tree: UnbalancedTree<_> = [2, 1, 3].into_iter().collect();

        assert!(!tree.delete(&4));
        assert_eq!(tree.inorder(), [1, 2, 3]);
        assert_eq!(tree.len(), 3);

        let mut empty = UnbalancedTree::<i32>::new();
        assert!(!empty.delete(&4));
        assert!(empty.is_empty());
    }

    #[test]
    fn test_ascending_inserts_build_a_chain() {
        let tree: UnbalancedTree<_> = (1..=7).collect();

        assert_eq!(tree.height(), 7);
        let mut node = tree.root.as_deref();
        for key in 1..=7 {
            let n = node.unwrap();
            assert_eq!(n.key, key);
            assert!(n.left.is_none());
            node = n.right.as_deref();
        }
        assert!(node.is_none());
    }

    #[test]
    fn test_min_max() {
        let tree: UnbalancedTree<_> = [4, 2, 6, 1, 7].into_iter().collect();
        assert_eq!(tree.min(), Some(&1));
        assert_eq!(tree.max(), Some(&7));

        let empty = UnbalancedTree::<i32>::new();
        assert_eq!(empty.min(), None);
        assert_eq!(empty.max(), None);
    }

    #[test]
    fn test_clone_keeps_shape() {
        let tree: UnbalancedTree<_> = [5, 3, 8, 1, 4].into_iter().collect();
        let clone = tree.clone();

        assert_eq!(clone.root(), Some(&5));
        assert_eq!(clone.height(), tree.height());
        assert_eq!(clone.inorder(), tree.inorder());
        assert_eq!(clone.len(), tree.len());
    }

    /// A right leaning chain of `0..len`, built without going through the recursive insert.
    fn long_chain(len: u32) -> UnbalancedTree<u32> {
        let mut tree = UnbalancedTree::new();
        let mut root: Link<Node<u32>> = None;
        for key in (0..len).rev() {
            root = Some(Box::new(Node {
                key,
                left: None,
                right: root,
            }));
        }
        tree.root = root;
        tree.len = len as usize;
        tree
    }

    #[test]
    fn test_long_chain_drops() {
        // Deep enough that a recursive drop would be at risk.
        let tree = long_chain(200_000);
        assert_eq!(tree.min(), Some(&0));
        drop(tree);
    }

    #[test]
    fn test_long_chain_clones() {
        let tree = long_chain(200_000);
        let clone = tree.clone();
        drop(tree);

        assert_eq!(clone.len(), 200_000);
        assert_eq!(clone.min(), Some(&0));
        assert_eq!(clone.max(), Some(&199_999));
        assert_eq!(clone.root(), Some(&0));
        assert!(clone.iter().copied().eq(0..200_000));
    }

    #[test]
    fn test_debug() {
        let tree: UnbalancedTree<_> = [2, 1, 3].into_iter().collect();
        assert_eq!(format!("{:?}", tree), "{1, 2, 3}");
    }
}
