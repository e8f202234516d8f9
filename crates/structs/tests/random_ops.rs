//! Randomized conformance checks against `BTreeSet` plus invariant sweeps,
//! the safety net for the rebalancing casework.

use std::collections::BTreeSet;

use proptest::collection::vec;
use proptest::prelude::*;

use medley_structs::{AvlTree, BinarySearchTree, MaxHeap, MinHeap, RedBlackTree};
use medley_util::cmp::ascend;
use medley_util::fuzzer::Fuzzer;
use medley_util::sort::insertion_sort_by;

proptest! {
    #[test]
    fn trees_agree_with_btreeset(ops in vec((any::<bool>(), -40i8..40), 0..120)) {
        let mut bst = BinarySearchTree::new();
        let mut avl = AvlTree::new();
        let mut rb = RedBlackTree::new();
        let mut reference = BTreeSet::new();

        for (is_insert, value) in ops {
            if is_insert {
                let expected = reference.insert(value);
                prop_assert_eq!(bst.insert(value), expected);
                prop_assert_eq!(avl.insert(value), expected);
                prop_assert_eq!(rb.insert(value), expected);
            } else {
                let expected = reference.remove(&value);
                prop_assert_eq!(bst.remove(&value), expected);
                prop_assert_eq!(avl.remove(&value), expected);
                prop_assert_eq!(rb.remove(&value), expected);
            }

            prop_assert_eq!(bst.len(), reference.len());
            prop_assert_eq!(avl.len(), reference.len());
            prop_assert_eq!(rb.len(), reference.len());

            prop_assert!(bst.assert_valid().is_ok());
            prop_assert!(avl.assert_valid().is_ok());
            prop_assert!(rb.assert_valid().is_ok());
        }

        let expected: Vec<i8> = reference.iter().copied().collect();
        prop_assert_eq!(bst.iter().copied().collect::<Vec<_>>(), expected.clone());
        prop_assert_eq!(avl.iter().copied().collect::<Vec<_>>(), expected.clone());
        prop_assert_eq!(rb.iter().copied().collect::<Vec<_>>(), expected);
    }

    #[test]
    fn in_order_matches_an_independent_sort(values in vec(any::<i32>(), 0..64)) {
        let mut tree = AvlTree::new();
        let mut accepted: Vec<i32> = Vec::new();
        for value in values {
            if tree.insert(value) {
                accepted.push(value);
            }
        }
        insertion_sort_by(&mut accepted, ascend);
        prop_assert_eq!(tree.iter().copied().collect::<Vec<_>>(), accepted);
    }

    #[test]
    fn min_heap_drains_ascending(values in vec(any::<i32>(), 0..128)) {
        let mut heap = MinHeap::from_vec(values.clone());
        prop_assert!(heap.assert_valid().is_ok());
        prop_assert_eq!(heap.len(), values.len());

        let drained: Vec<i32> = heap.drain().collect();
        let mut expected = values;
        expected.sort();
        prop_assert_eq!(drained, expected);
        prop_assert!(heap.is_empty());
    }

    #[test]
    fn max_heap_peek_is_the_maximum(values in vec(any::<i32>(), 1..64)) {
        let heap: MaxHeap<i32> = values.iter().copied().collect();
        prop_assert_eq!(heap.peek(), values.iter().max());
        prop_assert!(heap.assert_valid().is_ok());
    }
}

#[test]
fn fuzzed_soak_keeps_every_invariant() {
    let fuzzer = Fuzzer::new(None);
    let mut bst = BinarySearchTree::new();
    let mut avl = AvlTree::new();
    let mut rb = RedBlackTree::new();
    let mut reference = BTreeSet::new();

    for round in 0..2000 {
        let value = fuzzer.random_int(-128, 128);
        if fuzzer.random_bool(0.6) {
            let expected = reference.insert(value);
            assert_eq!(bst.insert(value), expected, "seed {:?}", fuzzer.seed);
            assert_eq!(avl.insert(value), expected, "seed {:?}", fuzzer.seed);
            assert_eq!(rb.insert(value), expected, "seed {:?}", fuzzer.seed);
        } else {
            let expected = reference.remove(&value);
            assert_eq!(bst.remove(&value), expected, "seed {:?}", fuzzer.seed);
            assert_eq!(avl.remove(&value), expected, "seed {:?}", fuzzer.seed);
            assert_eq!(rb.remove(&value), expected, "seed {:?}", fuzzer.seed);
        }

        if round % 50 == 0 {
            for result in [bst.assert_valid(), avl.assert_valid(), rb.assert_valid()] {
                result.unwrap_or_else(|violation| {
                    panic!("seed {:?}: {violation}", fuzzer.seed);
                });
            }
        }
    }

    let expected: Vec<i64> = reference.iter().copied().collect();
    assert_eq!(bst.iter().copied().collect::<Vec<_>>(), expected);
    assert_eq!(avl.iter().copied().collect::<Vec<_>>(), expected);
    assert_eq!(rb.iter().copied().collect::<Vec<_>>(), expected);

    // the balanced flavors must also honor their height guarantees
    let len = reference.len();
    if len > 0 {
        let avl_bound = (1.44 * ((len + 2) as f64).log2()).floor() as usize;
        let rb_bound = (2.0 * ((len + 1) as f64).log2()).floor() as usize;
        assert!(avl.height() <= avl_bound, "seed {:?}", fuzzer.seed);
        assert!(rb.height() <= rb_bound, "seed {:?}", fuzzer.seed);
    }
}
