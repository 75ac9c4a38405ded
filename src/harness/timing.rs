//! Timing batches of inserts and searches against any [`SearchTree`].

use std::hint::black_box;
use std::time::{Duration, Instant};

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, info};

use crate::avl::AvlTree;
use crate::unbalanced;

/// The operations the harness needs from a tree.
pub trait SearchTree<T> {
    /// Adds `element`, ignoring duplicates.
    fn insert(&mut self, element: T);

    /// Whether an element equal to `element` is stored.
    fn contains(&self, element: &T) -> bool;

    /// The number of stored elements.
    fn len(&self) -> usize;
}

impl<T: Ord> SearchTree<T> for AvlTree<T> {
    fn insert(&mut self, element: T) {
        AvlTree::insert(self, element);
    }

    fn contains(&self, element: &T) -> bool {
        AvlTree::contains(self, element)
    }

    fn len(&self) -> usize {
        AvlTree::len(self)
    }
}

impl<T: Ord> SearchTree<T> for unbalanced::Tree<T> {
    fn insert(&mut self, element: T) {
        unbalanced::Tree::insert(self, element);
    }

    // The baseline's lookup is `find`; going through it keeps the timing comparable.
    fn contains(&self, element: &T) -> bool {
        self.find(element).is_some()
    }

    fn len(&self) -> usize {
        unbalanced::Tree::len(self)
    }
}

/// Inserts every element of `data` into `tree` in order and returns how long it took.
pub fn time_inserts<T, S>(tree: &mut S, data: &[T]) -> Duration
where
    T: Clone,
    S: SearchTree<T>,
{
    let start = Instant::now();
    for element in data {
        tree.insert(element.clone());
    }
    start.elapsed()
}

/// Looks up every element of `data` in `tree` and returns how long it took.
pub fn time_searches<T, S>(tree: &S, data: &[T]) -> Duration
where
    S: SearchTree<T>,
{
    let start = Instant::now();
    let hits = data.iter().filter(|element| tree.contains(element)).count();
    let elapsed = start.elapsed();

    black_box(hits);
    debug!(hits, probes = data.len(), stored = tree.len(), "searched tree");
    elapsed
}

/// The time taken by each batch of one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timings {
    /// How many records were fed to each tree.
    pub n: usize,
    /// Inserting the ascending ordering into the unbalanced tree.
    pub bst_insert_sorted: Duration,
    /// Inserting the shuffled ordering into the unbalanced tree.
    pub bst_insert_shuffled: Duration,
    /// Inserting the ascending ordering into the AVL tree.
    pub avl_insert_sorted: Duration,
    /// Inserting the shuffled ordering into the AVL tree.
    pub avl_insert_shuffled: Duration,
    /// Searching the unbalanced tree built from the ascending ordering.
    pub bst_find_sorted: Duration,
    /// Searching the unbalanced tree built from the shuffled ordering.
    pub bst_find_shuffled: Duration,
    /// Searching the AVL tree built from the ascending ordering.
    pub avl_find_sorted: Duration,
    /// Searching the AVL tree built from the shuffled ordering.
    pub avl_find_shuffled: Duration,
}

/// Builds an unbalanced tree and an AVL tree from both an ascending and a shuffled ordering of
/// `base`, then probes each of the four trees with every record of `base` in its original
/// order.
///
/// `n` in the result is `base.len()`.
pub fn run<T, R>(base: &[T], rng: &mut R) -> Timings
where
    T: Ord,
    R: Rng + ?Sized,
{
    let original: Vec<&T> = base.iter().collect();
    let mut sorted = original.clone();
    sorted.sort();
    let mut shuffled = original.clone();
    shuffled.shuffle(rng);

    info!(n = base.len(), "timing inserts");
    let mut bst_sorted = unbalanced::Tree::new();
    let mut bst_shuffled = unbalanced::Tree::new();
    let mut avl_sorted = AvlTree::new();
    let mut avl_shuffled = AvlTree::new();

    let bst_insert_sorted = time_inserts(&mut bst_sorted, &sorted);
    let bst_insert_shuffled = time_inserts(&mut bst_shuffled, &shuffled);
    let avl_insert_sorted = time_inserts(&mut avl_sorted, &sorted);
    let avl_insert_shuffled = time_inserts(&mut avl_shuffled, &shuffled);
    debug!(
        avl_sorted_height = avl_sorted.height(),
        avl_shuffled_height = avl_shuffled.height(),
        "built trees"
    );

    info!(n = base.len(), "timing searches");
    Timings {
        n: base.len(),
        bst_insert_sorted,
        bst_insert_shuffled,
        avl_insert_sorted,
        avl_insert_shuffled,
        bst_find_sorted: time_searches(&bst_sorted, &original),
        bst_find_shuffled: time_searches(&bst_shuffled, &original),
        avl_find_sorted: time_searches(&avl_sorted, &original),
        avl_find_shuffled: time_searches(&avl_shuffled, &original),
    }
}
