//! Errors reported by the trees in this crate.

use thiserror::Error;

/// Returned when the smallest or largest element of an empty tree is requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("tree is empty")]
pub struct Underflow;

/// A broken invariant found by [`AvlTree::check_balance`][crate::avl::AvlTree::check_balance].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    /// A node's subtrees differ in height by more than one.
    #[error("subtree heights {left} and {right} differ by more than one")]
    Unbalanced {
        /// Actual height of the left subtree.
        left: isize,
        /// Actual height of the right subtree.
        right: isize,
    },

    /// A node caches a height that doesn't match its subtrees.
    #[error("stored height {stored} but subtree is {actual} high")]
    StaleHeight {
        /// The height cached in the node.
        stored: isize,
        /// The height computed from the node's children.
        actual: isize,
    },

    /// An in-order walk found two neighbours that aren't strictly ascending.
    #[error("elements out of order at in-order position {position}")]
    OutOfOrder {
        /// Zero-based in-order index of the later element of the pair.
        position: usize,
    },
}
