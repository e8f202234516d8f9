use std::fmt::{self, Debug, Formatter};

use medley_util::cmp;

use crate::error::InvariantViolation;

use super::engine::{BalancePolicy, BinaryTreeCore};
use super::iter::{IntoIter, LnrIter, LrnIter, LvlIter, NlrIter, RnlIter};
use super::link::{self, Direction};
use super::node::RbNode;
use super::{print, validate};

#[inline]
fn is_black<T>(arena: &[RbNode<T>], i: u32) -> bool {
    arena[i as usize].is_black()
}

#[inline]
fn set_black<T>(arena: &mut [RbNode<T>], i: u32, black: bool) {
    arena[i as usize].set_black(black);
}

/// Insert repair for a red `node` hanging left of a red `parent` under
/// `grand`. Returns the topmost node touched; the caller re-derives the
/// root from its parent link.
fn repair_left<T>(arena: &mut [RbNode<T>], node: u32, parent: u32, grand: u32) -> u32 {
    let zigzag = link::get_r(arena, grand) == Some(parent);
    let uncle = if zigzag {
        link::get_l(arena, grand)
    } else {
        link::get_r(arena, grand)
    };
    let uncle_black = uncle.map_or(true, |u| is_black(arena, u));
    if uncle_black {
        set_black(arena, grand, false);
        if zigzag {
            // right-left: the new node rises over parent and grandparent
            link::rotate(arena, parent, Direction::Right);
            link::rotate(arena, grand, Direction::Left);
            set_black(arena, node, true);
            return node;
        }
        set_black(arena, parent, true);
        link::rotate(arena, grand, Direction::Right);
        return parent;
    }
    recolor(arena, parent, grand, uncle)
}

/// Mirror of [`repair_left`] for a `node` hanging right of its parent.
fn repair_right<T>(arena: &mut [RbNode<T>], node: u32, parent: u32, grand: u32) -> u32 {
    let zigzag = link::get_l(arena, grand) == Some(parent);
    let uncle = if zigzag {
        link::get_r(arena, grand)
    } else {
        link::get_l(arena, grand)
    };
    let uncle_black = uncle.map_or(true, |u| is_black(arena, u));
    if uncle_black {
        set_black(arena, grand, false);
        if zigzag {
            // left-right: the new node rises over parent and grandparent
            link::rotate(arena, parent, Direction::Left);
            link::rotate(arena, grand, Direction::Right);
            set_black(arena, node, true);
            return node;
        }
        set_black(arena, parent, true);
        link::rotate(arena, grand, Direction::Left);
        return parent;
    }
    recolor(arena, parent, grand, uncle)
}

/// Red uncle case: push the blackness down from the grandparent and keep
/// climbing while the climb hits another red-red pair.
fn recolor<T>(arena: &mut [RbNode<T>], parent: u32, grand: u32, uncle: Option<u32>) -> u32 {
    set_black(arena, parent, true);
    if let Some(uncle) = uncle {
        set_black(arena, uncle, true);
    }

    let Some(great) = link::get_p(arena, grand) else {
        set_black(arena, grand, true);
        return grand;
    };
    set_black(arena, grand, false);
    if is_black(arena, great) {
        return grand;
    }
    let Some(ancestor) = link::get_p(arena, great) else {
        set_black(arena, great, true);
        return great;
    };
    if link::get_l(arena, great) == Some(grand) {
        repair_left(arena, grand, great, ancestor)
    } else {
        repair_right(arena, grand, great, ancestor)
    }
}

/// Rebuilds the black count on the path through `node`, whose subtree just
/// lost one black node. `node` may be the still-attached node about to be
/// unlinked or the child spliced into its place. Returns the root that
/// holds afterwards.
fn correct_double_black<T>(
    arena: &mut [RbNode<T>],
    mut root: Option<u32>,
    mut node: u32,
) -> Option<u32> {
    loop {
        let Some(parent) = link::get_p(arena, node) else {
            // the deficit reached the root and vanishes
            return Some(node);
        };
        let node_is_left = link::get_l(arena, parent) == Some(node);
        let sibling = if node_is_left {
            link::get_r(arena, parent)
        } else {
            link::get_l(arena, parent)
        };
        let sibling = sibling.expect("a double-black node has a sibling");

        if !is_black(arena, sibling) {
            // red sibling: rotate it over the parent and retry against the
            // black sibling that emerges
            set_black(arena, sibling, true);
            set_black(arena, parent, false);
            let dir = if node_is_left {
                Direction::Left
            } else {
                Direction::Right
            };
            link::rotate(arena, parent, dir);
            if link::get_p(arena, sibling).is_none() {
                root = Some(sibling);
            }
            continue;
        }

        let sl = link::get_l(arena, sibling);
        let sr = link::get_r(arena, sibling);
        let sl_black = sl.map_or(true, |i| is_black(arena, i));
        let sr_black = sr.map_or(true, |i| is_black(arena, i));

        if sl_black && sr_black {
            set_black(arena, sibling, false);
            if !is_black(arena, parent) {
                // the red parent absorbs the deficit
                set_black(arena, parent, true);
                return root;
            }
            node = parent;
            continue;
        }

        let (far_black, near) = if node_is_left {
            (sr_black, sl)
        } else {
            (sl_black, sr)
        };

        let sibling = if far_black {
            // red near child: rotate it over the sibling so the red lands far
            let near = near.expect("one sibling child is red");
            set_black(arena, near, true);
            set_black(arena, sibling, false);
            let dir = if node_is_left {
                Direction::Right
            } else {
                Direction::Left
            };
            link::rotate(arena, sibling, dir);
            near
        } else {
            sibling
        };

        // terminal: the sibling takes over the parent's color and position
        let parent_black = is_black(arena, parent);
        set_black(arena, sibling, parent_black);
        set_black(arena, parent, true);
        let far = if node_is_left {
            link::get_r(arena, sibling)
        } else {
            link::get_l(arena, sibling)
        };
        let far = far.expect("the terminal case has a red far child");
        set_black(arena, far, true);
        let dir = if node_is_left {
            Direction::Left
        } else {
            Direction::Right
        };
        link::rotate(arena, parent, dir);
        return if link::get_p(arena, sibling).is_some() {
            root
        } else {
            Some(sibling)
        };
    }
}

/// Color-balancing policy.
pub(crate) struct RbPolicy;

impl<T> BalancePolicy<T, RbNode<T>> for RbPolicy {
    fn attach_root(arena: &mut [RbNode<T>], node: u32) -> Option<u32> {
        set_black(arena, node, true);
        Some(node)
    }

    fn attach_left(
        arena: &mut [RbNode<T>],
        root: Option<u32>,
        node: u32,
        parent: u32,
    ) -> Option<u32> {
        let grand = link::get_p(arena, parent);
        link::set_l(arena, parent, Some(node));
        link::set_p(arena, node, Some(parent));
        if is_black(arena, parent) {
            return root;
        }
        let Some(grand) = grand else {
            return root;
        };
        let top = repair_left(arena, node, parent, grand);
        if link::get_p(arena, top).is_some() {
            root
        } else {
            Some(top)
        }
    }

    fn attach_right(
        arena: &mut [RbNode<T>],
        root: Option<u32>,
        node: u32,
        parent: u32,
    ) -> Option<u32> {
        let grand = link::get_p(arena, parent);
        link::set_r(arena, parent, Some(node));
        link::set_p(arena, node, Some(parent));
        if is_black(arena, parent) {
            return root;
        }
        let Some(grand) = grand else {
            return root;
        };
        let top = repair_right(arena, node, parent, grand);
        if link::get_p(arena, top).is_some() {
            root
        } else {
            Some(top)
        }
    }

    fn detach(arena: &mut [RbNode<T>], root: Option<u32>, node: u32) -> Option<u32> {
        let mut root = root;
        let mut spliced = node;

        let child = if let Some(right) = link::get_r(arena, node) {
            let successor = link::first(arena, Some(right)).expect("subtree is non-empty");
            spliced = successor;
            link::get_r(arena, successor)
        } else if link::get_p(arena, node).is_none() {
            // root without a right subtree: promote the left child, if any
            let left = link::get_l(arena, node);
            if let Some(left) = left {
                set_black(arena, left, true);
                link::set_p(arena, left, None);
            }
            link::clear(arena, node);
            return left;
        } else {
            link::get_l(arena, node)
        };

        if spliced != node {
            // colors describe positions, so they trade places with the links
            let node_black = is_black(arena, node);
            let spliced_black = is_black(arena, spliced);
            set_black(arena, node, spliced_black);
            set_black(arena, spliced, node_black);
            let old_root = root.expect("a node with a successor implies a root");
            root = Some(link::swap(arena, old_root, node, spliced));
        }

        // `node` is now the position leaving the tree, with at most one child
        if let Some(child) = child {
            let parent = link::get_p(arena, node).expect("a spliced node keeps its parent");
            link::set_p(arena, child, Some(parent));
            if link::get_l(arena, parent) == Some(node) {
                link::set_l(arena, parent, Some(child));
            } else {
                link::set_r(arena, parent, Some(child));
            }
            if !is_black(arena, child) {
                // a red child absorbs the black this path lost
                set_black(arena, child, true);
            } else {
                root = correct_double_black(arena, root, child);
            }
        } else {
            if is_black(arena, node) {
                root = correct_double_black(arena, root, node);
            }
            let parent = link::get_p(arena, node).expect("a childless non-root keeps its parent");
            if link::get_l(arena, parent) == Some(node) {
                link::set_l(arena, parent, None);
            } else {
                link::set_r(arena, parent, None);
            }
        }
        link::clear(arena, node);
        root
    }
}

/// A red-black search tree.
///
/// Each node carries one color bit; recoloring plus at most a few rotations
/// per mutation keep the red-black rules, bounding the height by
/// 2·log2(n + 1):
///
/// | Method   | Average  | Worst    |
/// |----------|----------|----------|
/// | `has`    | O(log n) | O(log n) |
/// | `insert` | O(log n) | O(log n) |
/// | `remove` | O(log n) | O(log n) |
///
/// Compared to [`AvlTree`](super::AvlTree) the balance is looser, trading
/// slightly deeper lookups for fewer rotations on mutation.
pub struct RedBlackTree<T, C = fn(&T, &T) -> i32>
where
    C: Fn(&T, &T) -> i32,
{
    core: BinaryTreeCore<T, RbNode<T>, RbPolicy, C>,
}

impl<T: PartialOrd> RedBlackTree<T> {
    /// Creates an empty tree ordered ascending.
    pub fn new() -> Self {
        Self::with_comparator(cmp::ascend::<T>)
    }
}

impl<T: PartialOrd> Default for RedBlackTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, C> RedBlackTree<T, C>
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
    pub fn iter(&self) -> LnrIter<'_, T, RbNode<T>> {
        self.core.lnr()
    }

    /// In-order (left, node, right): ascending.
    pub fn lnr_values(&self) -> LnrIter<'_, T, RbNode<T>> {
        self.core.lnr()
    }

    /// Reverse in-order (right, node, left): descending.
    pub fn rnl_values(&self) -> RnlIter<'_, T, RbNode<T>> {
        self.core.rnl()
    }

    /// Pre-order (node, left, right).
    pub fn nlr_values(&self) -> NlrIter<'_, T, RbNode<T>> {
        self.core.nlr()
    }

    /// Post-order (left, right, node).
    pub fn lrn_values(&self) -> LrnIter<'_, T, RbNode<T>> {
        self.core.lrn()
    }

    /// Level order (breadth first, left to right).
    pub fn lvl_values(&self) -> LvlIter<'_, T, RbNode<T>> {
        self.core.lvl()
    }

    /// Walks the whole tree checking links, ordering, and the red-black
    /// color rules.
    pub fn assert_valid(&self) -> Result<(), InvariantViolation> {
        validate::check_search_tree(self.core.arena(), self.core.root(), self.core.comparator())?;
        validate::check_colors(self.core.arena(), self.core.root())
    }

    /// Box-drawing dump of the tree shape, for debugging.
    pub fn to_tree_string(&self) -> String
    where
        T: Debug,
    {
        print::render(self.core.arena(), self.core.root(), "RedBlackTree")
    }
}

impl<T, C> Clone for RedBlackTree<T, C>
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

impl<T, C> Debug for RedBlackTree<T, C>
where
    T: Debug,
    C: Fn(&T, &T) -> i32,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T: PartialOrd> FromIterator<T> for RedBlackTree<T> {
    fn from_iter<I: IntoIterator<Item = T>>(values: I) -> Self {
        let mut tree = Self::new();
        tree.extend(values);
        tree
    }
}

impl<T, C> Extend<T> for RedBlackTree<T, C>
where
    C: Fn(&T, &T) -> i32,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, values: I) {
        for value in values {
            self.insert(value);
        }
    }
}

impl<'a, T, C> IntoIterator for &'a RedBlackTree<T, C>
where
    C: Fn(&T, &T) -> i32,
{
    type Item = &'a T;
    type IntoIter = LnrIter<'a, T, RbNode<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T, C> IntoIterator for RedBlackTree<T, C>
where
    C: Fn(&T, &T) -> i32,
{
    type Item = T;
    type IntoIter = IntoIter<T, RbNode<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.core.into_lnr()
    }
}
