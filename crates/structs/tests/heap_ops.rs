use medley_structs::{Heap, MaxHeap, MinHeap};
use medley_util::cmp::{ascend_by, descend_by};

#[test]
fn max_heap_readme_example() {
    let mut heap = MaxHeap::new();
    for value in [4, 1, 3, 5, 2] {
        heap.push(value);
    }
    assert_eq!(heap.peek(), Some(&5));
    assert_eq!(heap.pop(), Some(5));
    assert_eq!(heap.drain().collect::<Vec<_>>(), [4, 3, 2, 1]);
    assert!(heap.is_empty());
    assert_eq!(heap.iter().next(), None);
}

#[test]
fn min_heap_readme_example() {
    let mut heap: MinHeap<i32> = [4, 1, 3, 5, 2].into_iter().collect();
    assert_eq!(heap.peek(), Some(&1));
    assert_eq!(heap.pop(), Some(1));
    assert_eq!(heap.drain().collect::<Vec<_>>(), [2, 3, 4, 5]);
    assert!(heap.is_empty());
}

#[test]
fn custom_comparator_orders_by_derived_key() {
    let mut words = Heap::new(descend_by(|word: &&str| word.len()));
    for word in ["truck", "car", "helicopter", "tank"] {
        words.push(word);
    }
    assert_eq!(words.peek(), Some(&"helicopter"));
    assert_eq!(words.pop(), Some("helicopter"));
    assert_eq!(words.drain().collect::<Vec<_>>(), ["truck", "tank", "car"]);
}

#[test]
fn containers_pop_in_id_order() {
    #[derive(Debug, Clone, PartialEq)]
    struct Container {
        id: i32,
        values: Vec<i32>,
    }

    let mut heap = Heap::new(ascend_by(|container: &Container| container.id));
    let ids = [-10, 9, -1, 100, 1, 0, -100, 10, -9];

    for (i, id) in ids.into_iter().enumerate() {
        let i = i as i32;
        let pushed = heap.push(Container {
            id,
            values: vec![i - 1, i, i + 1],
        });
        assert_eq!(pushed, i as usize + 1);
        assert_eq!(heap.len(), i as usize + 1);
    }

    let expected_ids = [-100, -10, -9, -1, 0, 1, 9, 10, 100];
    let expected_mid = [6, 0, 8, 2, 5, 4, 1, 7, 3];
    for (i, (id, mid)) in expected_ids.into_iter().zip(expected_mid).enumerate() {
        assert_eq!(heap.len(), ids.len() - i);
        let expected = Container {
            id,
            values: vec![mid - 1, mid, mid + 1],
        };
        assert_eq!(heap.peek(), Some(&expected));
        assert_eq!(heap.pop(), Some(expected));
    }

    assert_eq!(heap.len(), 0);
}

#[test]
fn empty_heap_returns_none() {
    let mut heap = MinHeap::<i32>::new();
    assert_eq!(heap.peek(), None);
    assert_eq!(heap.pop(), None);
    assert_eq!(heap.len(), 0);
    assert_eq!(heap.height(), 0);
}

#[test]
fn push_and_pop_move_the_length_by_one() {
    let mut heap = MinHeap::new();
    assert_eq!(heap.push(7), 1);
    assert_eq!(heap.push(3), 2);
    assert_eq!(heap.push(9), 3);
    assert_eq!(heap.pop(), Some(3));
    assert_eq!(heap.len(), 2);
    heap.assert_valid().unwrap();
}

#[test]
fn height_counts_the_implicit_levels() {
    let mut heap = MinHeap::new();
    for (len, expected) in [(1, 1), (2, 2), (3, 2), (4, 3), (7, 3), (8, 4)] {
        while heap.len() < len {
            heap.push(heap.len() as i32);
        }
        assert_eq!(heap.height(), expected, "height at {len} elements");
    }
}

#[test]
fn clone_skips_the_rebuild_but_stays_valid() {
    let heap: MaxHeap<i32> = (0..50).collect();
    let copy = heap.clone();
    copy.assert_valid().unwrap();
    assert_eq!(copy.iter().collect::<Vec<_>>(), heap.iter().collect::<Vec<_>>());

    let mut copy = copy;
    let mut heap = heap;
    assert_eq!(copy.drain().collect::<Vec<_>>(), heap.drain().collect::<Vec<_>>());
}

#[test]
fn from_heapified_trusts_the_given_order() {
    let heap = Heap::from_heapified(medley_util::cmp::ascend::<i32>, vec![1, 2, 3, 4]);
    heap.assert_valid().unwrap();
    assert_eq!(heap.peek(), Some(&1));
}

#[test]
fn default_iteration_is_storage_order() {
    let mut heap = MinHeap::new();
    for value in [4, 1, 3, 5, 2] {
        heap.push(value);
    }
    let storage: Vec<i32> = heap.iter().copied().collect();
    assert_eq!(storage.len(), 5);
    assert_eq!(storage[0], 1);
    assert_eq!((&heap).into_iter().copied().collect::<Vec<_>>(), storage);
    assert_eq!(heap.into_iter().collect::<Vec<_>>(), storage);
}

#[test]
fn drain_can_be_abandoned_midway() {
    let mut heap: MinHeap<i32> = (0..10).collect();
    {
        let mut drain = heap.drain();
        assert_eq!(drain.next(), Some(0));
        assert_eq!(drain.next(), Some(1));
    }
    assert_eq!(heap.len(), 8);
    heap.assert_valid().unwrap();
}
