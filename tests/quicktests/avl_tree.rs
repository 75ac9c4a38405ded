use avl::AvlTree;

use std::collections::HashSet;

use crate::Op;

/// Applies a set of operations to a tree and a hashset, checking the tree's invariants after
/// every single step. This way we can ensure that after a random smattering of inserts
/// and removes we have the same set of elements in both.
fn do_ops<T>(ops: &[Op<T>], tree: &mut AvlTree<T>, set: &mut HashSet<T>) -> bool
where
    T: std::hash::Hash + Eq + Clone + Ord,
{
    for op in ops {
        match op {
            Op::Insert(x) => {
                tree.insert(x.clone());
                set.insert(x.clone());
            }
            Op::Remove(x) => {
                tree.remove(x);
                set.remove(x);
            }
        }
        if tree.check_balance().is_err() {
            return false;
        }
    }
    true
}

quickcheck::quickcheck! {
    fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
        let mut tree = AvlTree::new();
        let mut set = HashSet::new();

        do_ops(&ops, &mut tree, &mut set)
            && tree.len() == set.len()
            && set.iter().all(|x| tree.contains(x))
            && (i8::MIN..=i8::MAX).filter(|x| !set.contains(x)).all(|x| !tree.contains(&x))
    }

    fn contains(xs: Vec<i8>) -> bool {
        let tree: AvlTree<_> = xs.iter().copied().collect();

        xs.iter().all(|x| tree.find(x) == Some(x))
    }

    fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
        let tree: AvlTree<_> = xs.iter().copied().collect();
        let added: HashSet<_> = xs.into_iter().collect();
        let nots: HashSet<_> = nots.into_iter().collect();
        let mut nots = nots.difference(&added);

        nots.all(|x| tree.find(x).is_none())
    }

    fn with_deletions(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
        let mut tree: AvlTree<_> = xs.iter().copied().collect();
        for delete in &deletes {
            tree.remove(delete);
        }

        let mut still_present = xs;
        for delete in &deletes {
            // We may have inserted the same value multiple times - delete each one.
            while let Some(pos) = still_present.iter().position(|x| x == delete) {
                still_present.swap_remove(pos);
            }
        }

        deletes.iter().all(|x| !tree.contains(x))
            && still_present.iter().all(|x| tree.contains(x))
    }

    fn iteration_is_sorted_and_unique(xs: Vec<i32>) -> bool {
        let tree: AvlTree<_> = xs.iter().copied().collect();
        let elements: Vec<_> = tree.iter().copied().collect();

        elements.windows(2).all(|pair| pair[0] < pair[1]) && elements.len() == tree.len()
    }

    fn duplicate_inserts_are_idempotent(xs: Vec<i8>, repeats: u8) -> bool {
        let once: AvlTree<_> = xs.iter().copied().collect();
        let mut many = AvlTree::new();
        for _ in 0..=(repeats % 4) {
            many.extend(xs.iter().copied());
        }

        once.iter().eq(many.iter())
    }

    fn min_and_max_match_iteration(xs: Vec<i16>) -> bool {
        let tree: AvlTree<_> = xs.iter().copied().collect();

        tree.find_min().ok() == tree.iter().next() && tree.find_max().ok() == tree.iter().last()
    }
}

#[test]
fn make_empty_forgets_everything() {
    let mut tree: AvlTree<_> = (0..1_000).collect();
    tree.make_empty();

    assert!(tree.is_empty());
    assert!((0..1_000).all(|x| !tree.contains(&x)));
    assert!(tree.find_max().is_err());
}

#[test]
fn sorted_insertion_keeps_logarithmic_height() {
    let tree: AvlTree<_> = (0..(1 << 16) - 1).collect();

    // Sorted inserts fill the tree perfectly.
    assert_eq!(tree.height(), 15);
    tree.check_balance().unwrap();
}
