//! This crate exposes a self-balancing Binary Search Tree (an AVL tree), an unbalanced
//! Binary Search Tree to compare it against, and a small harness that times both on a dataset.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored records. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` will typically store
//! some sort of value (the value that was inserted, for example) and will
//! sometimes have child `Node`s. The most important invariants of a BST are:
//!
//! 1. For every `Node` in a BST, all the `Node`s in its left subtree have a
//!    value less than its own value.
//! 2. For every `Node` in a BST, all the `Node`s in its right subtree have a
//!    value greater than its own value.
//!
//! > Note that some `Node`s have no children. These `Node`s are called "leaf nodes".
//!
//! Searching for values in the tree takes `O(height)` (where `height` is defined as the longest
//! path from the root `Node` to a leaf `Node`). Inserted in sorted order, a plain BST
//! degenerates into a list whose height is `N`. An AVL tree additionally keeps, for every
//! `Node`, the heights of its two subtrees within one of each other by rotating `Node`s after
//! each insert and delete, which limits the height to `O(lg N)`. Both support sorted iteration
//! by visiting the left subtree, then the subtree root, then the right subtree.

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

pub mod avl;
pub mod error;
pub mod harness;
pub mod unbalanced;
mod util;

pub use avl::AvlTree;
pub use error::{InvariantViolation, Underflow};
