//! A self-balancing Binary Search Tree (specifically, an AVL tree).
//!
//! Every node records its height. After a key is inserted or deleted, each node on the path back
//! up to the root recomputes its height and, if its subtrees' heights now differ by two, rotates
//! to restore the balance. This keeps the height of the tree `O(lg N)` no matter what order keys
//! arrive in.
//!
//! Each recursive step takes ownership of a subtree and hands back the (possibly different) root
//! of that subtree for its parent to reattach, so a rotation is nothing more than moving a few
//! boxes around.
//!
//! # Examples
//!
//! ```
//! use ordtree::AvlTree;
//!
//! let mut tree = AvlTree::new();
//!
//! // Ascending inserts would build a chain in an unbalanced tree.
//! for key in 1..=7 {
//!     tree.insert(key);
//! }
//!
//! assert_eq!(tree.root(), Some(&4));
//! assert_eq!(tree.height(), 3);
//! assert_eq!(tree.inorder(), [1, 2, 3, 4, 5, 6, 7]);
//!
//! tree.delete(&4);
//! assert!(!tree.search(&4));
//! assert!(tree.check_invariants().is_ok());
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::mem;

use crate::node::{self, Link, TreeNode};
use crate::{InvariantViolation, OrderedSet};

/// A self-balancing Binary Search Tree of unique keys.
#[derive(Clone)]
pub struct AvlTree<K> {
    root: Link<Node<K>>,
    len: usize,
}

impl<K> Default for AvlTree<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: fmt::Debug> fmt::Debug for AvlTree<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<K> AvlTree<K> {
    /// Generates a new, empty `AvlTree`.
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
    pub fn height(&self) -> usize {
        height(&self.root)
    }

    /// An iterator over the keys in ascending order.
    pub fn iter(&self) -> Iter<'_, K> {
        Iter(crate::iter::Iter::new(self.root.as_deref()))
    }
}

impl<K: Ord> AvlTree<K> {
    /// Adds `key` if it isn't present already, rebalancing on the way back up. Returns whether it
    /// was added.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordtree::AvlTree;
    ///
    /// let mut tree = AvlTree::new();
    ///
    /// assert!(tree.insert(3));
    /// assert!(tree.insert(2));
    /// assert!(tree.insert(1));
    /// assert!(!tree.insert(1));
    ///
    /// // 3 -> 2 -> 1 would have been a chain, so 2 was rotated up.
    /// assert_eq!(tree.root(), Some(&2));
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
    /// use ordtree::AvlTree;
    ///
    /// let tree: AvlTree<_> = [3, 1, 2].into_iter().collect();
    ///
    /// assert!(tree.search(&1));
    /// assert!(!tree.search(&42));
    /// ```
    pub fn search(&self, key: &K) -> bool {
        node::search(self.root.as_deref(), key)
    }

    /// Removes `key` from the tree, rebalancing on the way back up. Returns whether it was there to
    /// remove.
    pub fn delete(&mut self, key: &K) -> bool {
        self.take(key).is_some()
    }

    /// Removes `key` from the tree and returns the key that was stored for it, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordtree::AvlTree;
    ///
    /// let mut tree: AvlTree<_> = [20, 10, 30, 5, 15, 25, 35].into_iter().collect();
    ///
    /// assert_eq!(tree.take(&20), Some(20));
    /// assert_eq!(tree.take(&20), None);
    ///
    /// // 25 was the in-order successor of 20.
    /// assert_eq!(tree.root(), Some(&25));
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

    /// Verifies the ordering invariant, the recorded key count, and that every node's stored
    /// height is correct and within one of its sibling's.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordtree::AvlTree;
    ///
    /// let tree: AvlTree<_> = (0..100).rev().collect();
    /// assert_eq!(tree.check_invariants(), Ok(()));
    /// ```
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        let counted = node::check_order(self.root.as_deref())?;
        if counted != self.len {
            return Err(InvariantViolation::WrongLength {
                counted,
                recorded: self.len,
            });
        }
        if let Some(root) = self.root.as_deref() {
            root.check_heights()?;
        }
        Ok(())
    }
}

impl<K: Ord> OrderedSet<K> for AvlTree<K> {
    fn insert(&mut self, key: K) -> bool {
        AvlTree::insert(self, key)
    }

    fn search(&self, key: &K) -> bool {
        AvlTree::search(self, key)
    }

    fn delete(&mut self, key: &K) -> bool {
        AvlTree::delete(self, key)
    }

    fn inorder(&self) -> Vec<K>
    where
        K: Clone,
    {
        AvlTree::inorder(self)
    }
}

impl<K: Ord> FromIterator<K> for AvlTree<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<K: Ord> Extend<K> for AvlTree<K> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<'a, K> IntoIterator for &'a AvlTree<K> {
    type Item = &'a K;
    type IntoIter = Iter<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An ascending iterator over the keys of an [`AvlTree`].
pub struct Iter<'a, K>(crate::iter::Iter<'a, K, Node<K>>);

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next()
    }
}

/// Height of the subtree at `link`. Empty subtrees have height 0.
fn height<K>(link: &Link<Node<K>>) -> usize {
    link.as_ref().map_or(0, |n| n.height)
}

/// A `Node` has a key and up to two children.
#[derive(Clone)]
struct Node<K> {
    key: K,
    left: Link<Node<K>>,
    right: Link<Node<K>>,

    /// How many levels are in the subtree rooted at this node.
    /// A node with no children has a height of 1.
    height: usize,
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

impl<K> Node<K> {
    fn new(key: K) -> Box<Self> {
        Box::new(Self {
            key,
            left: None,
            right: None,
            height: 1,
        })
    }

    /// Adjusts the height of `self` to be the max of its children's heights + 1.
    fn fix_height(&mut self) {
        self.height = height(&self.left).max(height(&self.right)) + 1;
    }

    /// The height of the left subtree minus the height of the right subtree. Positive when the
    /// node leans left. See [the Wikipedia page][wiki] for more details.
    ///
    /// [wiki]: https://en.wikipedia.org/wiki/AVL_tree#Balance_factor
    fn balance_factor(&self) -> isize {
        height(&self.left) as isize - height(&self.right) as isize
    }

    /// Recomputes this node's height from its children's and rotates if they differ by more than
    /// one. The children must already be balanced with correct heights. Returns the new root of
    /// this subtree.
    ///
    /// See https://en.wikipedia.org/wiki/AVL_tree#Rebalancing for terminology.
    fn rebalance(mut self: Box<Self>) -> Box<Self> {
        self.fix_height();
        let balance = self.balance_factor();

        let new_root = if balance > 1 {
            let left = self.left.take().expect("Left heavy => left child");
            self.left = Some(if left.balance_factor() < 0 {
                left.rotate_left()
            } else {
                left
            });
            self.rotate_right()
        } else if balance < -1 {
            let right = self.right.take().expect("Right heavy => right child");
            self.right = Some(if right.balance_factor() > 0 {
                right.rotate_right()
            } else {
                right
            });
            self.rotate_left()
        } else {
            self
        };

        if cfg!(debug_assertions) {
            let left_height = height(&new_root.left);
            let right_height = height(&new_root.right);
            assert_eq!(new_root.height, left_height.max(right_height) + 1);
            assert!(left_height.abs_diff(right_height) <= 1);
        }
        new_root
    }

    /// Rotate self to the right. This moves the left child up vertically and self down vertically.
    /// Used to rebalance the tree when the left child is too tall.
    ///
    /// ## Panics
    ///
    /// When called on a node without a left child.
    ///
    /// # Diagram
    ///
    /// ```text
    ///        old_root               new_root
    ///        /      \               /      \
    ///    new_root    z   rotate -> x    old_root
    ///     /   \                          /    \
    ///    x     y                        y      z
    /// ```
    fn rotate_right(mut self: Box<Self>) -> Box<Self> {
        let mut new_root = self.left.take().expect("Rotate right => left child");
        self.left = new_root.right.take();
        self.fix_height();

        new_root.right = Some(self);
        new_root.fix_height();

        #[cfg(feature = "tracing")]
        tracing::trace!(height = new_root.height, "rotate_right");

        new_root
    }

    /// Rotate self to the left. The mirror image of [`Node::rotate_right`], used when the right
    /// child is too tall.
    ///
    /// ## Panics
    ///
    /// When called on a node without a right child.
    fn rotate_left(mut self: Box<Self>) -> Box<Self> {
        let mut new_root = self.right.take().expect("Rotate left => right child");
        self.right = new_root.left.take();
        self.fix_height();

        new_root.left = Some(self);
        new_root.fix_height();

        #[cfg(feature = "tracing")]
        tracing::trace!(height = new_root.height, "rotate_left");

        new_root
    }

    /// Removes the leftmost node of this subtree, rebalancing each node on the way back up.
    /// Returns its key and what's left of the subtree.
    fn delete_min(mut self: Box<Self>) -> (K, Link<Self>) {
        match self.left.take() {
            None => {
                let Self { key, right, .. } = *self;
                (key, right)
            }
            Some(left) => {
                let (min, left) = left.delete_min();
                self.left = left;
                (min, Some(self.rebalance()))
            }
        }
    }

    /// Checks stored heights and balance factors below and including this node. Returns this
    /// node's height.
    fn check_heights(&self) -> Result<usize, InvariantViolation> {
        let left_height = self.left.as_deref().map_or(Ok(0), Self::check_heights)?;
        let right_height = self.right.as_deref().map_or(Ok(0), Self::check_heights)?;

        let expected = left_height.max(right_height) + 1;
        if self.height != expected {
            return Err(InvariantViolation::WrongHeight {
                stored: self.height,
                expected,
            });
        }

        let balance = left_height as isize - right_height as isize;
        if balance.abs() > 1 {
            return Err(InvariantViolation::Unbalanced { balance });
        }

        Ok(expected)
    }
}

impl<K: Ord> Node<K> {
    /// Inserts `key` into the subtree at `link` and returns the subtree's new root along with
    /// whether a node was added.
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

        // Nothing below changed shape so there's nothing to rebalance.
        if !inserted {
            return (self, false);
        }
        (self.rebalance(), true)
    }

    /// Deletes `key` from the subtree at `link`. Returns the subtree's new root and the key that
    /// was removed, if it was found.
    fn delete_from(link: Link<Self>, key: &K) -> (Link<Self>, Option<K>) {
        match link {
            None => (None, None),
            Some(node) => node.delete(key),
        }
    }

    fn delete(mut self: Box<Self>, key: &K) -> (Link<Self>, Option<K>) {
        let removed = match key.cmp(&self.key) {
            Ordering::Less => {
                let (left, removed) = Self::delete_from(self.left.take(), key);
                self.left = left;
                removed
            }
            Ordering::Greater => {
                let (right, removed) = Self::delete_from(self.right.take(), key);
                self.right = right;
                removed
            }
            Ordering::Equal => match (self.left.take(), self.right.take()) {
                // A node with at most one child is replaced by that child, which is already
                // balanced.
                (None, None) => return (None, Some(self.key)),
                (Some(child), None) | (None, Some(child)) => return (Some(child), Some(self.key)),

                // With two children this node stays where it is and takes over the key of its
                // in-order successor, the smallest key in its right subtree.
                (Some(left), Some(right)) => {
                    let (successor, right) = right.delete_min();
                    self.left = Some(left);
                    self.right = right;
                    Some(mem::replace(&mut self.key, successor))
                }
            },
        };

        match removed {
            Some(_) => (Some(self.rebalance()), removed),
            None => (Some(self), None),
        }
    }
}
