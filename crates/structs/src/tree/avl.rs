use std::fmt::{self, Debug, Formatter};

use medley_util::cmp;

use crate::error::InvariantViolation;

use super::engine::{BalancePolicy, BinaryTreeCore};
use super::iter::{IntoIter, LnrIter, LrnIter, LvlIter, NlrIter, RnlIter};
use super::link::{self, Direction};
use super::node::AvlNode;
use super::{print, validate};

/// Rotates `node` left and repairs the two balance factors involved.
/// Returns the risen right child.
fn rotate_left<T>(arena: &mut [AvlNode<T>], node: u32) -> u32 {
    let child = link::get_r(arena, node).expect("left rotation requires a right child");
    let child_bf = arena[child as usize].bf();
    link::rotate(arena, node, Direction::Left);
    let node_bf = arena[node as usize].bf() + 1 - child_bf.min(0);
    arena[node as usize].set_bf(node_bf);
    arena[child as usize].set_bf(child_bf + 1 + node_bf.max(0));
    child
}

/// Rotates `node` right and repairs the two balance factors involved.
/// Returns the risen left child.
fn rotate_right<T>(arena: &mut [AvlNode<T>], node: u32) -> u32 {
    let child = link::get_l(arena, node).expect("right rotation requires a left child");
    let child_bf = arena[child as usize].bf();
    link::rotate(arena, node, Direction::Right);
    let node_bf = arena[node as usize].bf() - 1 - child_bf.max(0);
    arena[node as usize].set_bf(node_bf);
    arena[child as usize].set_bf(child_bf - 1 + node_bf.min(0));
    child
}

/// Left-right double rotation for a left-heavy node whose left child leans
/// right. Returns the risen grandchild.
fn rotate_left_right<T>(arena: &mut [AvlNode<T>], node: u32) -> u32 {
    let left = link::get_l(arena, node).expect("double rotation requires a left child");
    rotate_left(arena, left);
    rotate_right(arena, node)
}

/// Right-left double rotation for a right-heavy node whose right child
/// leans left. Returns the risen grandchild.
fn rotate_right_left<T>(arena: &mut [AvlNode<T>], node: u32) -> u32 {
    let right = link::get_r(arena, node).expect("double rotation requires a right child");
    rotate_right(arena, right);
    rotate_left(arena, node)
}

/// The subtree rooted at `node` grew one level after an insert; walk the
/// ancestors adjusting balance factors, rotating once where a factor
/// reaches ±2. `child` is the node's child on the insertion path. A single
/// rotation restores the pre-insert height, so the walk stops there.
fn grow<T>(arena: &mut [AvlNode<T>], root: u32, node: u32, child: u32) -> u32 {
    let Some(parent) = link::get_p(arena, node) else {
        return root;
    };
    let from_left = link::get_l(arena, parent) == Some(node);
    let parent_bf = arena[parent as usize].bf() + if from_left { 1 } else { -1 };
    arena[parent as usize].set_bf(parent_bf);

    match parent_bf {
        0 => root,
        -1 | 1 => grow(arena, root, parent, node),
        _ => {
            let child_left = link::get_l(arena, node) == Some(child);
            let top = match (from_left, child_left) {
                (true, true) => rotate_right(arena, parent),
                (true, false) => rotate_left_right(arena, parent),
                (false, true) => rotate_right_left(arena, parent),
                (false, false) => rotate_left(arena, parent),
            };
            if link::get_p(arena, top).is_some() {
                root
            } else {
                top
            }
        }
    }
}

/// The left subtree of `node` shrank one level after a removal; repair
/// balance factors climbing toward the root. Returns the root that holds
/// afterwards.
fn shrink_left<T>(arena: &mut [AvlNode<T>], root: Option<u32>, node: u32) -> Option<u32> {
    let bf = arena[node as usize].bf() - 1;
    arena[node as usize].set_bf(bf);
    if bf == -1 {
        // the right subtree still carries the height, nothing above changes
        return root;
    }

    let mut node = node;
    if bf < -1 {
        let pivot = link::get_r(arena, node).expect("right-heavy node has a right child");
        let pivot_bf = arena[pivot as usize].bf();
        if pivot_bf <= 0 {
            node = rotate_left(arena, node);
            if pivot_bf == 0 {
                // rotation kept the subtree height, stop here
                return if link::get_p(arena, node).is_some() {
                    root
                } else {
                    Some(node)
                };
            }
        } else {
            node = rotate_right_left(arena, node);
        }
    }

    let Some(parent) = link::get_p(arena, node) else {
        return Some(node);
    };
    if link::get_l(arena, parent) == Some(node) {
        shrink_left(arena, root, parent)
    } else {
        shrink_right(arena, root, parent)
    }
}

/// Mirror of [`shrink_left`] for a removal out of the right subtree.
fn shrink_right<T>(arena: &mut [AvlNode<T>], root: Option<u32>, node: u32) -> Option<u32> {
    let bf = arena[node as usize].bf() + 1;
    arena[node as usize].set_bf(bf);
    if bf == 1 {
        return root;
    }

    let mut node = node;
    if bf > 1 {
        let pivot = link::get_l(arena, node).expect("left-heavy node has a left child");
        let pivot_bf = arena[pivot as usize].bf();
        if pivot_bf >= 0 {
            node = rotate_right(arena, node);
            if pivot_bf == 0 {
                return if link::get_p(arena, node).is_some() {
                    root
                } else {
                    Some(node)
                };
            }
        } else {
            node = rotate_left_right(arena, node);
        }
    }

    let Some(parent) = link::get_p(arena, node) else {
        return Some(node);
    };
    if link::get_l(arena, parent) == Some(node) {
        shrink_left(arena, root, parent)
    } else {
        shrink_right(arena, root, parent)
    }
}

/// Height-balancing policy.
pub(crate) struct AvlPolicy;

impl<T> BalancePolicy<T, AvlNode<T>> for AvlPolicy {
    fn attach_left(
        arena: &mut [AvlNode<T>],
        root: Option<u32>,
        node: u32,
        parent: u32,
    ) -> Option<u32> {
        link::set_l(arena, parent, Some(node));
        link::set_p(arena, node, Some(parent));
        let parent_bf = arena[parent as usize].bf() + 1;
        arena[parent as usize].set_bf(parent_bf);
        let root = root.expect("attaching under a parent implies a root");
        if link::get_r(arena, parent).is_some() {
            // the new leaf filled the shorter side, heights above are unchanged
            Some(root)
        } else {
            Some(grow(arena, root, parent, node))
        }
    }

    fn attach_right(
        arena: &mut [AvlNode<T>],
        root: Option<u32>,
        node: u32,
        parent: u32,
    ) -> Option<u32> {
        link::set_r(arena, parent, Some(node));
        link::set_p(arena, node, Some(parent));
        let parent_bf = arena[parent as usize].bf() - 1;
        arena[parent as usize].set_bf(parent_bf);
        let root = root.expect("attaching under a parent implies a root");
        if link::get_l(arena, parent).is_some() {
            Some(root)
        } else {
            Some(grow(arena, root, parent, node))
        }
    }

    fn detach(arena: &mut [AvlNode<T>], root: Option<u32>, node: u32) -> Option<u32> {
        let mut root = root;

        if link::get_l(arena, node).is_some() && link::get_r(arena, node).is_some() {
            let right = link::get_r(arena, node).expect("checked above");
            let successor = link::first(arena, Some(right)).expect("subtree is non-empty");
            // balance factors describe positions, so they trade places too
            let node_bf = arena[node as usize].bf();
            arena[node as usize].set_bf(arena[successor as usize].bf());
            arena[successor as usize].set_bf(node_bf);
            let old_root = root.expect("a node with children implies a root");
            root = Some(link::swap(arena, old_root, node, successor));
        }

        let parent = link::get_p(arena, node);
        let child = link::get_l(arena, node).or(link::get_r(arena, node));
        if let Some(child) = child {
            link::set_p(arena, child, parent);
        }
        let Some(parent) = parent else {
            link::clear(arena, node);
            return child;
        };
        let from_left = link::get_l(arena, parent) == Some(node);
        if from_left {
            link::set_l(arena, parent, child);
        } else {
            link::set_r(arena, parent, child);
        }
        link::clear(arena, node);
        if from_left {
            shrink_left(arena, root, parent)
        } else {
            shrink_right(arena, root, parent)
        }
    }
}

/// A height-balanced search tree.
///
/// Every node carries the height difference of its subtrees and each
/// mutation rotates just enough to keep that difference within ±1, which
/// bounds the height by 1.44·log2(n + 2):
///
/// | Method   | Average  | Worst    |
/// |----------|----------|----------|
/// | `has`    | O(log n) | O(log n) |
/// | `insert` | O(log n) | O(log n) |
/// | `remove` | O(log n) | O(log n) |
pub struct AvlTree<T, C = fn(&T, &T) -> i32>
where
    C: Fn(&T, &T) -> i32,
{
    core: BinaryTreeCore<T, AvlNode<T>, AvlPolicy, C>,
}

impl<T: PartialOrd> AvlTree<T> {
    /// Creates an empty tree ordered ascending.
    pub fn new() -> Self {
        Self::with_comparator(cmp::ascend::<T>)
    }
}

impl<T: PartialOrd> Default for AvlTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, C> AvlTree<T, C>
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

    pub fn min(&self) -> Option<&T> {
        self.core.min()
    }

    pub fn max(&self) -> Option<&T> {
        self.core.max()
    }

    pub fn len(&self) -> usize {
        self.core.len()
    }

    pub fn is_empty(&self) -> bool {
        self.core.is_empty()
    }

    pub fn clear(&mut self) {
        self.core.clear();
    }

    /// Longest root-to-leaf node count; 0 for an empty tree.
    pub fn height(&self) -> usize {
        self.core.height()
    }

    /// In-order traversal, same as [`lnr_values`](Self::lnr_values).
    pub fn iter(&self) -> LnrIter<'_, T, AvlNode<T>> {
        self.core.lnr()
    }

    /// In-order (left, node, right): ascending.
    pub fn lnr_values(&self) -> LnrIter<'_, T, AvlNode<T>> {
        self.core.lnr()
    }

    /// Reverse in-order (right, node, left): descending.
    pub fn rnl_values(&self) -> RnlIter<'_, T, AvlNode<T>> {
        self.core.rnl()
    }

    /// Pre-order (node, left, right).
    pub fn nlr_values(&self) -> NlrIter<'_, T, AvlNode<T>> {
        self.core.nlr()
    }

    /// Post-order (left, right, node).
    pub fn lrn_values(&self) -> LrnIter<'_, T, AvlNode<T>> {
        self.core.lrn()
    }

    /// Level order (breadth first, left to right).
    pub fn lvl_values(&self) -> LvlIter<'_, T, AvlNode<T>> {
        self.core.lvl()
    }

    /// Walks the whole tree checking links, ordering, and that every stored
    /// balance factor matches the measured subtree heights.
    pub fn assert_valid(&self) -> Result<(), InvariantViolation> {
        validate::check_search_tree(self.core.arena(), self.core.root(), self.core.comparator())?;
        validate::check_balance_factors(self.core.arena(), self.core.root())
    }

    /// Box-drawing dump of the tree shape, for debugging.
    pub fn to_tree_string(&self) -> String
    where
        T: Debug,
    {
        print::render(self.core.arena(), self.core.root(), "AvlTree")
    }
}

impl<T, C> Clone for AvlTree<T, C>
where
    T: Clone,
    C: Fn(&T, &T) -> i32 + Clone,
{
    fn clone(&self) -> Self {
        Self {
            core: self.core.clone(),
        }
    }
}

impl<T, C> Debug for AvlTree<T, C>
where
    T: Debug,
    C: Fn(&T, &T) -> i32,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T: PartialOrd> FromIterator<T> for AvlTree<T> {
    fn from_iter<I: IntoIterator<Item = T>>(values: I) -> Self {
        let mut tree = Self::new();
        tree.extend(values);
        tree
    }
}

impl<T, C> Extend<T> for AvlTree<T, C>
where
    C: Fn(&T, &T) -> i32,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, values: I) {
        for value in values {
            self.insert(value);
        }
    }
}

impl<'a, T, C> IntoIterator for &'a AvlTree<T, C>
where
    C: Fn(&T, &T) -> i32,
{
    type Item = &'a T;
    type IntoIter = LnrIter<'a, T, AvlNode<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T, C> IntoIterator for AvlTree<T, C>
where
    C: Fn(&T, &T) -> i32,
{
    type Item = T;
    type IntoIter = IntoIter<T, AvlNode<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.core.into_lnr()
    }
}
