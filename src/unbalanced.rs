//! A plain Binary Search Tree with no balancing at all. It exists as a baseline to measure
//! [`AvlTree`][crate::avl::AvlTree] against: fed sorted input it degenerates into a linked
//! list, so every operation here is iterative to keep deep trees from overflowing the stack.
//!
//! # Examples
//!
//! ```
//! use avl::unbalanced::Tree;
//!
//! let mut tree = Tree::new();
//! for x in 0..10_000 {
//!     tree.insert(x);
//! }
//!
//! assert_eq!(tree.len(), 10_000);
//! assert_eq!(tree.find(&9_999), Some(&9_999));
//! assert!(!tree.contains(&10_000));
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::iter::FusedIterator;

use tracing::debug;

use crate::util::{BinaryNode, InOrder};

type Link<T> = Option<Box<Node<T>>>;

/// An unbalanced Binary Search Tree holding a set of elements.
pub struct Tree<T> {
    root: Link<T>,
    len: usize,
}

impl<T> Default for Tree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for Tree<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T> Tree<T> {
    /// Generate a new, empty `Tree`.
    pub fn new() -> Self {
        Self { root: None, len: 0 }
    }

    /// Inserts `element` below the first empty link on its search path. Duplicates are ignored.
    pub fn insert(&mut self, element: T)
    where
        T: Ord,
    {
        let mut link = &mut self.root;
        while let Some(node) = link {
            link = match element.cmp(&node.element) {
                Ordering::Less => &mut node.left,
                Ordering::Equal => return,
                Ordering::Greater => &mut node.right,
            };
        }
        *link = Some(Box::new(Node {
            element,
            left: None,
            right: None,
        }));
        self.len += 1;
    }

    /// Potentially finds the stored element equal to `element`.
    pub fn find(&self, element: &T) -> Option<&T>
    where
        T: Ord,
    {
        let mut node = self.root.as_deref();
        while let Some(n) = node {
            node = match element.cmp(&n.element) {
                Ordering::Less => n.left.as_deref(),
                Ordering::Equal => return Some(&n.element),
                Ordering::Greater => n.right.as_deref(),
            };
        }
        None
    }

    /// Returns `true` if the tree stores an element equal to `element`.
    pub fn contains(&self, element: &T) -> bool
    where
        T: Ord,
    {
        self.find(element).is_some()
    }

    /// The number of elements in the tree.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the tree stores no elements.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Removes every element. Nodes are freed from an explicit stack rather than by the
    /// recursive `Drop` of `Box`, which a list-shaped tree would overflow.
    pub fn clear(&mut self) {
        if self.len > 0 {
            debug!(len = self.len, "clearing unbalanced tree");
        }
        let mut stack: Vec<Box<Node<T>>> = self.root.take().into_iter().collect();
        while let Some(mut node) = stack.pop() {
            stack.extend(node.left.take());
            stack.extend(node.right.take());
        }
        self.len = 0;
    }

    /// Iterates over the elements in ascending order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter(InOrder::new(self.root.as_deref(), self.len))
    }
}

impl<T: Ord> FromIterator<T> for Tree<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        for element in iter {
            tree.insert(element);
        }
        tree
    }
}

impl<'a, T> IntoIterator for &'a Tree<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: fmt::Debug> fmt::Debug for Tree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// An iterator over the elements of a [`Tree`] in ascending order.
pub struct Iter<'a, T>(InOrder<'a, Node<T>>);

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

pub(crate) struct Node<T> {
    element: T,
    left: Link<T>,
    right: Link<T>,
}

impl<T> BinaryNode for Node<T> {
    type Element = T;

    fn element(&self) -> &T {
        &self.element
    }

    fn left(&self) -> Option<&Self> {
        self.left.as_deref()
    }

    fn right(&self) -> Option<&Self> {
        self.right.as_deref()
    }
}
