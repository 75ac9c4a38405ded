//! A self-balancing ordered set (specifically, an AVL tree).
//!
//! Nodes own their children through `Box`es and never point back at their parents. Every
//! mutating operation descends recursively, taking ownership of the subtree it visits and
//! handing back the (possibly new) subtree root, which the caller links in where the old root
//! was. Rebalancing happens on the way back up, so no parent pointers are needed.
//!
//! # Examples
//!
//! ```
//! use avl::avl::AvlTree;
//!
//! let mut tree = AvlTree::new();
//!
//! // Nothing in here yet.
//! assert!(tree.is_empty());
//! assert!(tree.find_min().is_err());
//!
//! for x in [5, 3, 8, 1, 4, 7, 9] {
//!     tree.insert(x);
//! }
//! assert_eq!(tree.find_min(), Ok(&1));
//! assert_eq!(tree.find_max(), Ok(&9));
//!
//! // Inserting a duplicate changes nothing.
//! tree.insert(5);
//! assert_eq!(tree.len(), 7);
//!
//! tree.remove(&5);
//! assert!(!tree.contains(&5));
//! assert_eq!(tree.iter().copied().collect::<Vec<_>>(), [1, 3, 4, 7, 8, 9]);
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::iter::FusedIterator;

use tracing::{debug, trace};

use crate::error::{InvariantViolation, Underflow};
use crate::util::{BinaryNode, InOrder};

/// How much taller one subtree of a node may be than the other.
const ALLOWED_IMBALANCE: isize = 1;

type Link<T> = Option<Box<Node<T>>>;

/// Height of a possibly absent subtree. An absent subtree is `-1` high so a leaf is `0` high.
fn height<T>(link: &Link<T>) -> isize {
    link.as_ref().map_or(-1, |n| n.height)
}

/// An ordered set of elements kept in a height balanced binary search tree. Lookups, inserts,
/// and removals are `O(lg N)` regardless of the order elements arrive in.
#[derive(Clone)]
pub struct AvlTree<T> {
    root: Link<T>,
    len: usize,
}

impl<T> Default for AvlTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> AvlTree<T> {
    /// Generate a new, empty `AvlTree`.
    pub fn new() -> Self {
        Self { root: None, len: 0 }
    }

    /// Inserts `element` into the tree. If an equal element is already stored, nothing happens.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl::avl::AvlTree;
    ///
    /// let mut tree = AvlTree::new();
    ///
    /// tree.insert("a");
    /// tree.insert("a");
    ///
    /// assert!(tree.contains(&"a"));
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn insert(&mut self, element: T)
    where
        T: Ord,
    {
        let mut inserted = false;
        self.root = Some(Node::insert(self.root.take(), element, &mut inserted));
        if inserted {
            self.len += 1;
        }
    }

    /// Removes the element equal to `element` from the tree. If the tree holds no such element,
    /// nothing happens.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl::avl::AvlTree;
    ///
    /// let mut tree: AvlTree<_> = (1..=7).collect();
    /// tree.remove(&4);
    /// tree.remove(&42);
    ///
    /// assert_eq!(tree.iter().copied().collect::<Vec<_>>(), [1, 2, 3, 5, 6, 7]);
    /// ```
    pub fn remove(&mut self, element: &T)
    where
        T: Ord,
    {
        let mut removed = false;
        self.root = Node::remove(self.root.take(), element, &mut removed);
        if removed {
            self.len -= 1;
        }
    }

    /// Returns `true` if the tree stores an element equal to `element`.
    pub fn contains(&self, element: &T) -> bool
    where
        T: Ord,
    {
        self.find(element).is_some()
    }

    /// Potentially finds the stored element equal to `element`. If there is none, `None` is
    /// returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl::avl::AvlTree;
    ///
    /// let mut tree = AvlTree::new();
    /// tree.insert(1);
    ///
    /// assert_eq!(tree.find(&1), Some(&1));
    /// assert_eq!(tree.find(&42), None);
    /// ```
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

    /// Returns the smallest element in the tree.
    ///
    /// # Errors
    ///
    /// Returns [`Underflow`] if the tree is empty.
    pub fn find_min(&self) -> Result<&T, Underflow> {
        let mut node = self.root.as_deref().ok_or(Underflow)?;
        while let Some(left) = node.left.as_deref() {
            node = left;
        }
        Ok(&node.element)
    }

    /// Returns the largest element in the tree.
    ///
    /// # Errors
    ///
    /// Returns [`Underflow`] if the tree is empty.
    pub fn find_max(&self) -> Result<&T, Underflow> {
        let mut node = self.root.as_deref().ok_or(Underflow)?;
        while let Some(right) = node.right.as_deref() {
            node = right;
        }
        Ok(&node.element)
    }

    /// Returns `true` if the tree stores no elements.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Removes every element from the tree.
    pub fn make_empty(&mut self) {
        debug!(len = self.len, "emptying tree");
        self.root = None;
        self.len = 0;
    }

    /// The number of elements in the tree.
    pub fn len(&self) -> usize {
        self.len
    }

    /// How many edges are on the longest path from the root to a leaf. A tree with a single
    /// element has a height of `0` and an empty tree has a height of `-1`.
    pub fn height(&self) -> isize {
        height(&self.root)
    }

    /// Iterates over the elements in ascending order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter(InOrder::new(self.root.as_deref(), self.len))
    }

    /// Walks the whole tree and checks that every node is balanced, that every cached height is
    /// correct, and that the elements are strictly ascending.
    ///
    /// This is meant for tests and debugging. Every public operation already maintains these
    /// invariants.
    ///
    /// # Errors
    ///
    /// Returns the first [`InvariantViolation`] found.
    pub fn check_balance(&self) -> Result<(), InvariantViolation>
    where
        T: Ord,
    {
        if let Some(root) = self.root.as_deref() {
            root.check_balance()?;
        }

        let mut elements = self.iter();
        if let Some(mut previous) = elements.next() {
            for (position, element) in elements.enumerate() {
                if previous >= element {
                    return Err(InvariantViolation::OutOfOrder {
                        position: position + 1,
                    });
                }
                previous = element;
            }
        }
        Ok(())
    }
}

impl<T: Ord> FromIterator<T> for AvlTree<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<T: Ord> Extend<T> for AvlTree<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for element in iter {
            self.insert(element);
        }
    }
}

impl<'a, T> IntoIterator for &'a AvlTree<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: fmt::Debug> fmt::Debug for AvlTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// Prints the elements in sorted order, one per line.
impl<T: fmt::Display> fmt::Display for AvlTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return writeln!(f, "Empty tree");
        }
        for element in self {
            writeln!(f, "{element}")?;
        }
        Ok(())
    }
}

/// An iterator over the elements of an [`AvlTree`] in ascending order.
///
/// Created by [`AvlTree::iter`].
pub struct Iter<'a, T>(InOrder<'a, Node<T>>);

impl<'a, T> Clone for Iter<'a, T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

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

#[derive(Clone)]
pub(crate) struct Node<T> {
    element: T,
    left: Link<T>,
    right: Link<T>,

    /// Edges on the longest path down to a leaf. A node with no children has a height of 0.
    height: isize,
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

impl<T> Node<T> {
    fn new_boxed(element: T) -> Box<Self> {
        Box::new(Self {
            element,
            left: None,
            right: None,
            height: 0,
        })
    }

    /// Inserts `element` into the subtree rooted at `link` and returns the new, balanced, root of
    /// that subtree. `inserted` is set if a node was allocated.
    fn insert(link: Link<T>, element: T, inserted: &mut bool) -> Box<Self>
    where
        T: Ord,
    {
        let Some(mut node) = link else {
            *inserted = true;
            return Self::new_boxed(element);
        };

        match element.cmp(&node.element) {
            Ordering::Less => node.left = Some(Self::insert(node.left.take(), element, inserted)),
            Ordering::Equal => return node,
            Ordering::Greater => {
                node.right = Some(Self::insert(node.right.take(), element, inserted))
            }
        }
        node.balance()
    }

    /// Removes `element` from the subtree rooted at `link` and returns what is left of it.
    /// `removed` is set if a node was found.
    fn remove(link: Link<T>, element: &T, removed: &mut bool) -> Link<T>
    where
        T: Ord,
    {
        let mut node = link?;

        match element.cmp(&node.element) {
            Ordering::Less => node.left = Self::remove(node.left.take(), element, removed),
            Ordering::Greater => node.right = Self::remove(node.right.take(), element, removed),
            Ordering::Equal => {
                *removed = true;
                match (node.left.take(), node.right.take()) {
                    (None, None) => return None,
                    // A lone child of an AVL node is a leaf so it is already balanced.
                    (Some(child), None) | (None, Some(child)) => return Some(child),

                    // With two children, the successor (the smallest element on the right) takes
                    // this node's place and its own node is unlinked from the right subtree.
                    (Some(left), Some(right)) => {
                        let (successor, new_right) = right.take_min();
                        node.element = successor;
                        node.left = Some(left);
                        node.right = new_right;
                    }
                }
            }
        }
        Some(node.balance())
    }

    /// Unlinks the leftmost node of this subtree. Returns its element and the rebalanced
    /// remainder of the subtree.
    fn take_min(mut self: Box<Self>) -> (T, Link<T>) {
        match self.left.take() {
            Some(left) => {
                let (min, new_left) = left.take_min();
                self.left = new_left;
                (min, Some(self.balance()))
            }
            None => {
                let Node { element, right, .. } = *self;
                (element, right)
            }
        }
    }

    /// Sets the height to one more than the taller child.
    fn fix_height(&mut self) {
        self.height = height(&self.left).max(height(&self.right)) + 1;
    }

    /// The difference in height between the right and left subtrees. See [the Wikipedia
    /// page][wiki] for more details.
    ///
    /// [wiki]: https://en.wikipedia.org/wiki/AVL_tree#Balance_factor
    fn balance_factor(&self) -> isize {
        height(&self.right) - height(&self.left)
    }

    /// Restores the AVL invariant for a node whose subtrees differ in height by at most two and
    /// refreshes its height. Returns the root of the balanced subtree.
    ///
    /// See https://en.wikipedia.org/wiki/AVL_tree#Rebalancing for terminology.
    fn balance(mut self: Box<Self>) -> Box<Self> {
        let balanced = match self.balance_factor() {
            n if n < -ALLOWED_IMBALANCE => {
                // Ties take the single rotation. A balanced left child only happens after a
                // removal.
                if self.left.as_ref().map_or(0, |left| left.balance_factor()) <= 0 {
                    trace!("rotating with left child");
                    self.rotate_with_left_child()
                } else {
                    trace!("double rotating with left child");
                    self.double_with_left_child()
                }
            }
            n if n > ALLOWED_IMBALANCE => {
                if self.right.as_ref().map_or(0, |right| right.balance_factor()) >= 0 {
                    trace!("rotating with right child");
                    self.rotate_with_right_child()
                } else {
                    trace!("double rotating with right child");
                    self.double_with_right_child()
                }
            }
            _ => {
                self.fix_height();
                self
            }
        };

        if cfg!(debug_assertions) {
            let left_height = height(&balanced.left);
            let right_height = height(&balanced.right);
            assert_eq!(balanced.height, left_height.max(right_height) + 1);
            assert!((left_height - right_height).abs() <= ALLOWED_IMBALANCE);
        }
        balanced
    }

    /// Rotates the left child up to become the root of this subtree. Used when the left child is
    /// too tall, so a node without a left child is returned unchanged.
    ///
    /// ```text
    ///        k2               k1
    ///       /  \             /  \
    ///      k1   z  rotate-> x    k2
    ///     /  \                  /  \
    ///    x    y                y    z
    /// ```
    fn rotate_with_left_child(mut self: Box<Self>) -> Box<Self> {
        let Some(mut new_root) = self.left.take() else {
            return self;
        };

        // Children before parents: `self` sits below `new_root` after the rotation.
        self.left = new_root.right.take();
        self.fix_height();

        new_root.right = Some(self);
        new_root.fix_height();
        new_root
    }

    /// Mirror image of [`Node::rotate_with_left_child`].
    fn rotate_with_right_child(mut self: Box<Self>) -> Box<Self> {
        let Some(mut new_root) = self.right.take() else {
            return self;
        };

        self.right = new_root.left.take();
        self.fix_height();

        new_root.left = Some(self);
        new_root.fix_height();
        new_root
    }

    /// Rotates the left child with its own right child, then this node with its new left child.
    fn double_with_left_child(mut self: Box<Self>) -> Box<Self> {
        if let Some(left) = self.left.take() {
            self.left = Some(left.rotate_with_right_child());
        }
        self.rotate_with_left_child()
    }

    /// Rotates the right child with its own left child, then this node with its new right child.
    fn double_with_right_child(mut self: Box<Self>) -> Box<Self> {
        if let Some(right) = self.right.take() {
            self.right = Some(right.rotate_with_left_child());
        }
        self.rotate_with_right_child()
    }

    /// Recomputes the heights of this subtree from scratch, checking them against the cached
    /// ones. Returns the real height of the subtree.
    fn check_balance(&self) -> Result<isize, InvariantViolation> {
        let left = self.left.as_deref().map_or(Ok(-1), Node::check_balance)?;
        let right = self.right.as_deref().map_or(Ok(-1), Node::check_balance)?;

        if (left - right).abs() > ALLOWED_IMBALANCE {
            return Err(InvariantViolation::Unbalanced { left, right });
        }
        let actual = left.max(right) + 1;
        if self.height != actual {
            return Err(InvariantViolation::StaleHeight {
                stored: self.height,
                actual,
            });
        }
        Ok(actual)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Assert the heights of the root, left child, and right child of a tree.
    macro_rules! assert_heights {
        ($tree:ident, $height:expr, $left_height:expr, $right_height:expr) => {{
            match $tree.root.as_deref() {
                Some(n) => {
                    assert_eq!(n.height, $height);
                    assert_eq!(height(&n.left), $left_height);
                    assert_eq!(height(&n.right), $right_height);
                }
                None => assert_eq!(-1, $height),
            }
        }};
    }

    fn root_element<T: Copy>(tree: &AvlTree<T>) -> Option<T> {
        tree.root.as_ref().map(|n| n.element)
    }

    fn elements<T: Copy>(tree: &AvlTree<T>) -> Vec<T> {
        tree.iter().copied().collect()
    }

    #[test]
    fn ascending_inserts_stay_balanced() {
        let mut tree = AvlTree::new();
        for x in 1..=7 {
            tree.insert(x);
            tree.check_balance().unwrap();
        }

        assert_eq!(elements(&tree), [1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(tree.height(), 2);
        assert_eq!(root_element(&tree), Some(4));
        assert_heights!(tree, 2, 1, 1);
    }

    #[test]
    fn descending_inserts_stay_balanced() {
        let keys = [10, 9, 8, 7, 6, 5, 4, 3, 2, 1];
        let mut inserted = Vec::new();

        let mut tree = AvlTree::new();
        assert!(!tree.contains(&10));

        for key in keys {
            tree.insert(key);
            inserted.push(key);
            tree.check_balance().unwrap();
            for inserted in &inserted {
                assert!(tree.contains(inserted));
            }
        }
        assert_eq!(tree.height(), 3);
    }

    #[test]
    fn min_and_max() {
        let mut tree = AvlTree::new();
        for x in [5, 3, 8, 1, 4, 7, 9] {
            tree.insert(x);
        }

        assert_eq!(tree.find_min(), Ok(&1));
        assert_eq!(tree.find_max(), Ok(&9));
    }

    #[test]
    fn min_and_max_of_empty_tree_underflow() {
        let tree: AvlTree<i32> = AvlTree::new();

        assert_eq!(tree.find_min(), Err(Underflow));
        assert_eq!(tree.find_max(), Err(Underflow));
    }

    #[test]
    fn duplicates_are_ignored() {
        let mut tree = AvlTree::new();
        tree.insert('a');
        tree.insert('a');

        assert!(tree.contains(&'a'));
        assert_eq!(elements(&tree), ['a']);
        assert_eq!(tree.len(), 1);
        assert_heights!(tree, 0, -1, -1);
    }

    #[test]
    fn test_left_right_rebalance() {
        let mut tree = AvlTree::new();

        tree.insert(0);
        tree.insert(-2);
        tree.insert(-1);

        assert_heights!(tree, 1, 0, 0);
        assert_eq!(root_element(&tree), Some(-1));
    }

    #[test]
    fn test_right_left_rebalance() {
        let mut tree = AvlTree::new();

        tree.insert(0);
        tree.insert(2);
        tree.insert(1);

        assert_heights!(tree, 1, 0, 0);
        assert_eq!(root_element(&tree), Some(1));
    }

    #[test]
    fn remove_root_with_two_children_promotes_successor() {
        let mut tree: AvlTree<_> = (1..=7).collect();
        tree.remove(&4);

        assert_eq!(root_element(&tree), Some(5));
        assert_eq!(elements(&tree), [1, 2, 3, 5, 6, 7]);
        assert_eq!(tree.len(), 6);
        tree.check_balance().unwrap();
    }

    #[test]
    fn remove_with_no_children() {
        let mut tree: AvlTree<_> = [5, 3, 7].into_iter().collect();
        tree.remove(&7);

        assert!(!tree.contains(&7));
        assert_eq!(elements(&tree), [3, 5]);
        assert_heights!(tree, 1, 0, -1);
    }

    #[test]
    fn remove_with_only_right_child() {
        let mut tree: AvlTree<_> = [5, 3, 7, 9].into_iter().collect();
        tree.remove(&7);

        assert_eq!(elements(&tree), [3, 5, 9]);
        tree.check_balance().unwrap();
    }

    #[test]
    fn remove_with_only_left_child() {
        let mut tree: AvlTree<_> = [5, 3, 7, 6].into_iter().collect();
        tree.remove(&7);

        assert_eq!(elements(&tree), [3, 5, 6]);
        tree.check_balance().unwrap();
    }

    #[test]
    fn remove_with_deeper_successor() {
        let mut tree: AvlTree<_> = [5, 3, 8, 2, 6, 9, 7].into_iter().collect();
        tree.remove(&5);

        assert_eq!(root_element(&tree), Some(6));
        assert_eq!(elements(&tree), [2, 3, 6, 7, 8, 9]);
        tree.check_balance().unwrap();
    }

    #[test]
    fn remove_rebalances_ancestors() {
        // Once 1 and 3 are gone the root's left subtree is two shorter than its right.
        let mut tree: AvlTree<_> = [4, 2, 6, 1, 3, 5, 8, 7, 9].into_iter().collect();
        tree.remove(&1);
        tree.remove(&3);

        tree.check_balance().unwrap();
        assert_eq!(root_element(&tree), Some(6));
        assert_eq!(elements(&tree), [2, 4, 5, 6, 7, 8, 9]);
    }

    #[test]
    fn remove_missing_is_a_no_op() {
        let mut tree: AvlTree<_> = (1..=3).collect();
        tree.remove(&42);

        assert_eq!(elements(&tree), [1, 2, 3]);
        assert_eq!(tree.len(), 3);

        let mut empty: AvlTree<i32> = AvlTree::new();
        empty.remove(&1);
        assert!(empty.is_empty());
    }

    #[test]
    fn removing_last_element_empties_tree() {
        let mut tree = AvlTree::new();
        tree.insert(5);
        tree.remove(&5);

        assert!(tree.is_empty());
        assert_eq!(tree.len(), 0);
        assert_eq!(tree.height(), -1);
    }

    #[test]
    fn make_empty_drops_everything() {
        let mut tree: AvlTree<_> = (0..100).collect();
        tree.make_empty();

        assert!(tree.is_empty());
        assert_eq!(tree.len(), 0);
        assert!((0..100).all(|x| !tree.contains(&x)));
        assert_eq!(tree.iter().next(), None);
    }

    #[test]
    fn iteration_is_restartable() {
        let tree: AvlTree<_> = [3, 1, 2].into_iter().collect();
        let mut iter = tree.iter();

        assert_eq!(iter.len(), 3);
        assert_eq!(iter.next(), Some(&1));
        assert_eq!(iter.len(), 2);
        assert_eq!(elements(&tree), [1, 2, 3]);
    }

    #[test]
    fn display_prints_one_element_per_line() {
        let mut tree = AvlTree::new();
        assert_eq!(tree.to_string(), "Empty tree\n");

        tree.extend([2, 1, 3]);
        assert_eq!(tree.to_string(), "1\n2\n3\n");
        assert_eq!(format!("{tree:?}"), "{1, 2, 3}");
    }

    #[test]
    fn check_balance_catches_stale_height() {
        let mut tree: AvlTree<_> = (1..=3).collect();
        if let Some(root) = tree.root.as_mut() {
            root.height = 5;
        }

        assert_eq!(
            tree.check_balance(),
            Err(InvariantViolation::StaleHeight {
                stored: 5,
                actual: 1
            })
        );
    }

    #[test]
    fn check_balance_catches_lopsided_tree() {
        let leaf = Node::new_boxed(3);
        let mut middle = Node::new_boxed(2);
        middle.right = Some(leaf);
        middle.height = 1;
        let mut root = Node::new_boxed(1);
        root.right = Some(middle);
        root.height = 2;
        let tree = AvlTree {
            root: Some(root),
            len: 3,
        };

        assert_eq!(
            tree.check_balance(),
            Err(InvariantViolation::Unbalanced { left: -1, right: 1 })
        );
    }

    #[test]
    fn check_balance_catches_misordered_elements() {
        let mut root = Node::new_boxed(1);
        root.left = Some(Node::new_boxed(2));
        root.height = 1;
        let tree = AvlTree {
            root: Some(root),
            len: 2,
        };

        assert_eq!(
            tree.check_balance(),
            Err(InvariantViolation::OutOfOrder { position: 1 })
        );
    }

    #[test]
    fn quickcheck_found_invalid_height_after_deletion() {
        let mut tree = AvlTree::new();
        for x in [77, -22, 0, -127, 5, 109, -58, -105, -65, -86, 45, -11, -39] {
            tree.insert(x);
        }
        tree.remove(&0);
        tree.check_balance().unwrap();
        tree.remove(&-122);
        tree.check_balance().unwrap();
    }
}
