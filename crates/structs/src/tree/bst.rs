use std::fmt::{self, Debug, Formatter};

use medley_util::cmp;

use crate::error::InvariantViolation;

use super::engine::{BalancePolicy, BinaryTreeCore};
use super::iter::{IntoIter, LnrIter, LrnIter, LvlIter, NlrIter, RnlIter};
use super::link;
use super::node::BstNode;
use super::{print, validate};

/// Plain policy: attach and splice with no rebalancing.
pub(crate) struct BstPolicy;

impl<T> BalancePolicy<T, BstNode<T>> for BstPolicy {
    fn attach_left(
        arena: &mut [BstNode<T>],
        root: Option<u32>,
        node: u32,
        parent: u32,
    ) -> Option<u32> {
        link::set_l(arena, parent, Some(node));
        link::set_p(arena, node, Some(parent));
        root
    }

    fn attach_right(
        arena: &mut [BstNode<T>],
        root: Option<u32>,
        node: u32,
        parent: u32,
    ) -> Option<u32> {
        link::set_r(arena, parent, Some(node));
        link::set_p(arena, node, Some(parent));
        root
    }

    fn detach(arena: &mut [BstNode<T>], root: Option<u32>, node: u32) -> Option<u32> {
        let mut root = root;

        // A node with two children first trades places with its in-order
        // successor, which cannot have a left child; after the exchange the
        // node has at most one child and the splice below covers it.
        if link::get_l(arena, node).is_some() && link::get_r(arena, node).is_some() {
            let right = link::get_r(arena, node).expect("checked above");
            let successor = link::first(arena, Some(right)).expect("subtree is non-empty");
            let old_root = root.expect("a node with children implies a root");
            root = Some(link::swap(arena, old_root, node, successor));
        }

        let parent = link::get_p(arena, node);
        let child = link::get_l(arena, node).or(link::get_r(arena, node));
        if let Some(child) = child {
            link::set_p(arena, child, parent);
        }
        match parent {
            Some(parent) => {
                if link::get_l(arena, parent) == Some(node) {
                    link::set_l(arena, parent, child);
                } else {
                    link::set_r(arena, parent, child);
                }
            }
            None => root = child,
        }
        link::clear(arena, node);
        root
    }
}

/// An unbalanced binary search tree.
///
/// Values are unique under the tree's comparator; inserting an equal value
/// is a rejected no-op. With adversarial insertion orders the tree
/// degenerates to a list, so lookups run in O(height):
///
/// | Method   | Average  | Worst |
/// |----------|----------|-------|
/// | `has`    | O(log n) | O(n)  |
/// | `insert` | O(log n) | O(n)  |
/// | `remove` | O(log n) | O(n)  |
///
/// Use [`AvlTree`](super::AvlTree) or [`RedBlackTree`](super::RedBlackTree)
/// when the insertion order is out of your hands.
pub struct BinarySearchTree<T, C = fn(&T, &T) -> i32>
where
    C: Fn(&T, &T) -> i32,
{
    core: BinaryTreeCore<T, BstNode<T>, BstPolicy, C>,
}

impl<T: PartialOrd> BinarySearchTree<T> {
    /// Creates an empty tree ordered ascending.
    pub fn new() -> Self {
        Self::with_comparator(cmp::ascend::<T>)
    }
}

impl<T: PartialOrd> Default for BinarySearchTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, C> BinarySearchTree<T, C>
where
    C: Fn(&T, &T) -> i32,
{
    /// Creates an empty tree ordered by `comparator`.
    pub fn with_comparator(comparator: C) -> Self {
        Self {
            core: BinaryTreeCore::with_comparator(comparator),
        }
    }

    /// Builds a tree by inserting every value of `values` in turn.
    pub fn from_iter_with<I>(values: I, comparator: C) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut tree = Self::with_comparator(comparator);
        tree.extend(values);
        tree
    }

    /// Inserts `value`; returns `false` (leaving the tree untouched) when an
    /// equal value is already present.
    pub fn insert(&mut self, value: T) -> bool {
        self.core.insert(value)
    }

    /// Removes the value equal to `value`; returns `false` when absent.
    pub fn remove(&mut self, value: &T) -> bool {
        self.core.remove(value)
    }

    pub fn has(&self, value: &T) -> bool {
        self.core.has(value)
    }

    /// Smallest value under the comparator.
    pub fn min(&self) -> Option<&T> {
        self.core.min()
    }

    /// Largest value under the comparator.
    pub fn max(&self) -> Option<&T> {
        self.core.max()
    }

    pub fn len(&self) -> usize {
        self.core.len()
    }

    pub fn is_empty(&self) -> bool {
        self.core.is_empty()
    }

    /// Drops every value and releases the arena.
    pub fn clear(&mut self) {
        self.core.clear();
    }

    /// Longest root-to-leaf node count; 0 for an empty tree.
    pub fn height(&self) -> usize {
        self.core.height()
    }

    /// In-order traversal, same as [`lnr_values`](Self::lnr_values).
    pub fn iter(&self) -> LnrIter<'_, T, BstNode<T>> {
        self.core.lnr()
    }

    /// In-order (left, node, right): ascending.
    pub fn lnr_values(&self) -> LnrIter<'_, T, BstNode<T>> {
        self.core.lnr()
    }

    /// Reverse in-order (right, node, left): descending.
    pub fn rnl_values(&self) -> RnlIter<'_, T, BstNode<T>> {
        self.core.rnl()
    }

    /// Pre-order (node, left, right).
    pub fn nlr_values(&self) -> NlrIter<'_, T, BstNode<T>> {
        self.core.nlr()
    }

    /// Post-order (left, right, node).
    pub fn lrn_values(&self) -> LrnIter<'_, T, BstNode<T>> {
        self.core.lrn()
    }

    /// Level order (breadth first, left to right).
    pub fn lvl_values(&self) -> LvlIter<'_, T, BstNode<T>> {
        self.core.lvl()
    }

    /// Walks the whole tree checking links and ordering.
    pub fn assert_valid(&self) -> Result<(), InvariantViolation> {
        validate::check_search_tree(self.core.arena(), self.core.root(), self.core.comparator())
    }

    /// Box-drawing dump of the tree shape, for debugging.
    pub fn to_tree_string(&self) -> String
    where
        T: Debug,
    {
        print::render(self.core.arena(), self.core.root(), "BinarySearchTree")
    }
}

impl<T, C> Clone for BinarySearchTree<T, C>
where
    T: Clone,
    C: Fn(&T, &T) -> i32 + Clone,
{
    /// Structural clone: the copy reproduces the exact node topology, not
    /// just the value set.
    fn clone(&self) -> Self {
        Self {
            core: self.core.clone(),
        }
    }
}

impl<T, C> Debug for BinarySearchTree<T, C>
where
    T: Debug,
    C: Fn(&T, &T) -> i32,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T: PartialOrd> FromIterator<T> for BinarySearchTree<T> {
    fn from_iter<I: IntoIterator<Item = T>>(values: I) -> Self {
        let mut tree = Self::new();
        tree.extend(values);
        tree
    }
}

impl<T, C> Extend<T> for BinarySearchTree<T, C>
where
    C: Fn(&T, &T) -> i32,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, values: I) {
        for value in values {
            self.insert(value);
        }
    }
}

impl<'a, T, C> IntoIterator for &'a BinarySearchTree<T, C>
where
    C: Fn(&T, &T) -> i32,
{
    type Item = &'a T;
    type IntoIter = LnrIter<'a, T, BstNode<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T, C> IntoIterator for BinarySearchTree<T, C>
where
    C: Fn(&T, &T) -> i32,
{
    type Item = T;
    type IntoIter = IntoIter<T, BstNode<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.core.into_lnr()
    }
}
