//! Pieces shared by the node types of every tree in this crate.

use std::cmp::Ordering;

/// An exclusively owned, possibly empty, subtree.
pub(crate) type Link<N> = Option<Box<N>>;

/// Read access to a node's key and children. Both tree variants implement this so traversal and
/// searching can be written once.
pub(crate) trait TreeNode<K>: Sized {
    fn key(&self) -> &K;
    fn left(&self) -> Option<&Self>;
    fn right(&self) -> Option<&Self>;
}

/// Walks down from `node` comparing against `key` until it is found or a nil slot is reached.
pub(crate) fn search<K, N>(mut node: Option<&N>, key: &K) -> bool
where
    K: Ord,
    N: TreeNode<K>,
{
    while let Some(n) = node {
        node = match key.cmp(n.key()) {
            Ordering::Less => n.left(),
            Ordering::Equal => return true,
            Ordering::Greater => n.right(),
        };
    }

    false
}

/// The leftmost (smallest) key of a subtree.
pub(crate) fn min<K, N: TreeNode<K>>(node: Option<&N>) -> Option<&K> {
    let mut node = node?;
    while let Some(left) = node.left() {
        node = left;
    }
    Some(node.key())
}

/// The rightmost (largest) key of a subtree.
pub(crate) fn max<K, N: TreeNode<K>>(node: Option<&N>) -> Option<&K> {
    let mut node = node?;
    while let Some(right) = node.right() {
        node = right;
    }
    Some(node.key())
}

/// Walks every node checking the ordering invariant and returns how many nodes there are.
pub(crate) fn check_order<K, N>(root: Option<&N>) -> Result<usize, crate::InvariantViolation>
where
    K: Ord,
    N: TreeNode<K>,
{
    let mut counted = 0;
    let mut previous: Option<&K> = None;
    for key in crate::iter::Iter::<K, N>::new(root) {
        if previous.map_or(false, |p| p >= key) {
            return Err(crate::InvariantViolation::Unordered);
        }
        previous = Some(key);
        counted += 1;
    }

    Ok(counted)
}
