use medley_structs::RedBlackTree;

fn height_bound(len: usize) -> usize {
    (2.0 * ((len + 1) as f64).log2()) as usize
}

#[test]
fn removal_keeps_the_color_rules() {
    let mut tree: RedBlackTree<i32> = [5, 3, 8, 1, 4, 7, 9].into_iter().collect();
    assert!(tree.remove(&5));
    assert!(!tree.has(&5));
    assert_eq!(
        tree.lnr_values().copied().collect::<Vec<_>>(),
        [1, 3, 4, 7, 8, 9]
    );
    // assert_valid covers the black root rule
    tree.assert_valid().unwrap();
}

#[test]
fn ascending_ladder_stays_balanced() {
    let mut tree = RedBlackTree::new();
    for i in 0..200 {
        assert!(tree.insert(i));
        tree.assert_valid().unwrap();
    }
    assert_eq!(tree.len(), 200);
    assert!(tree.height() <= height_bound(200));

    for i in (0..200).step_by(2) {
        assert!(tree.remove(&i));
        tree.assert_valid().unwrap();
    }
    assert_eq!(tree.len(), 100);

    for i in 0..200 {
        assert_eq!(tree.has(&i), i % 2 == 1);
    }
}

#[test]
fn descending_ladder_stays_balanced() {
    let mut tree = RedBlackTree::new();
    for i in (0..200).rev() {
        assert!(tree.insert(i));
        tree.assert_valid().unwrap();
    }
    assert!(tree.height() <= height_bound(200));

    for i in 0..200 {
        assert!(tree.remove(&i));
        tree.assert_valid().unwrap();
    }
    assert!(tree.is_empty());
    assert_eq!(tree.min(), None);
}

#[test]
fn mixed_insertions_and_removals() {
    let mut tree = RedBlackTree::new();
    for value in [41, 38, 31, 12, 19, 8, 45, 27, 33, 15, 1, 36] {
        assert!(tree.insert(value));
        tree.assert_valid().unwrap();
    }
    for value in [8, 12, 19, 31, 38, 41] {
        assert!(tree.remove(&value));
        tree.assert_valid().unwrap();
    }
    assert_eq!(
        tree.lnr_values().copied().collect::<Vec<_>>(),
        [1, 15, 27, 33, 36, 45]
    );
}

#[test]
fn duplicate_insert_and_absent_remove_are_no_ops() {
    let mut tree: RedBlackTree<i32> = [5, 3, 8].into_iter().collect();
    assert!(!tree.insert(3));
    assert_eq!(tree.len(), 3);
    assert!(!tree.remove(&42));
    assert_eq!(tree.len(), 3);
    tree.assert_valid().unwrap();
}

#[test]
fn removing_the_root_repeatedly_drains_the_tree() {
    let mut tree: RedBlackTree<i32> = (0..32).collect();
    while let Some(&min) = tree.min() {
        assert!(tree.remove(&min));
        tree.assert_valid().unwrap();
    }
    assert!(tree.is_empty());
}

#[test]
fn traversals_and_clone() {
    let tree: RedBlackTree<i32> = [6, 2, 9, 1, 4, 8, 11].into_iter().collect();
    assert_eq!(
        tree.lnr_values().copied().collect::<Vec<_>>(),
        [1, 2, 4, 6, 8, 9, 11]
    );
    assert_eq!(
        tree.rnl_values().copied().collect::<Vec<_>>(),
        [11, 9, 8, 6, 4, 2, 1]
    );

    let copy = tree.clone();
    assert_eq!(
        tree.nlr_values().collect::<Vec<_>>(),
        copy.nlr_values().collect::<Vec<_>>()
    );
    copy.assert_valid().unwrap();
}
