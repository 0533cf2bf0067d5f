/// A broken structural invariant found by `check_invariants`. None of these can be produced
/// through the public API; seeing one means there is a bug in the tree.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvariantViolation {
    /// An inorder walk found a key that wasn't strictly greater than the one before it.
    #[error("keys are not in strictly ascending order")]
    Unordered,
    /// A node's stored height doesn't match its children's heights.
    #[error("node stores height {stored} but its children give {expected}")]
    WrongHeight {
        /// The height the node recorded.
        stored: usize,
        /// One more than the taller child's height.
        expected: usize,
    },
    /// A node's children differ in height by more than one.
    #[error("node has balance factor {balance}")]
    Unbalanced {
        /// `height(left) - height(right)` of the offending node.
        balance: isize,
    },
    /// The tree's key count doesn't match the number of nodes.
    #[error("tree records {recorded} keys but holds {counted} nodes")]
    WrongLength {
        /// Number of nodes actually reachable from the root.
        counted: usize,
        /// The length the tree had recorded.
        recorded: usize,
    },
}
