//! Inorder traversal shared by both trees.
//!
//! The traversal keeps an explicit stack of the ancestors whose keys haven't been yielded yet so
//! iterating never recurses, even over the long chains an unbalanced tree can grow.

use std::marker::PhantomData;

use crate::node::TreeNode;

/// Yields the keys of a subtree in ascending order.
pub(crate) struct Iter<'a, K, N> {
    stack: Vec<&'a N>,
    _key: PhantomData<&'a K>,
}

impl<'a, K, N> Iter<'a, K, N>
where
    N: TreeNode<K>,
{
    pub(crate) fn new(root: Option<&'a N>) -> Self {
        let mut iter = Self {
            stack: Vec::new(),
            _key: PhantomData,
        };
        iter.push_left_spine(root);
        iter
    }

    /// Pushes `node` and all of its left descendants. The last pushed is the next to be yielded.
    fn push_left_spine(&mut self, mut node: Option<&'a N>) {
        while let Some(n) = node {
            self.stack.push(n);
            node = n.left();
        }
    }
}

impl<'a, K: 'a, N> Iterator for Iter<'a, K, N>
where
    N: TreeNode<K>,
{
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right());
        Some(node.key())
    }
}
