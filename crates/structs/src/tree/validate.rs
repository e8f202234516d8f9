//! Structure checkers backing the `assert_valid` methods.
//!
//! Each checker walks the whole tree, so they are meant for tests and
//! debugging sessions rather than production paths.

use crate::error::InvariantViolation;

use super::link;
use super::node::{AvlNode, Node, RbNode, ValueNode};

/// Checks parent links, slot occupancy, and strict in-order ascent under
/// `compare`. Every flavor must pass this.
pub(crate) fn check_search_tree<T, N, C>(
    arena: &[N],
    root: Option<u32>,
    compare: &C,
) -> Result<(), InvariantViolation>
where
    N: ValueNode<T>,
    C: Fn(&T, &T) -> i32,
{
    let Some(root) = root else {
        return Ok(());
    };

    if arena[root as usize].p().is_some() {
        return Err(InvariantViolation::RootHasParent { index: root });
    }
    check_links(arena, root)?;

    let mut prev: Option<u32> = None;
    let mut curr = link::first(arena, Some(root));
    while let Some(i) = curr {
        if let Some(p) = prev {
            if compare(arena[p as usize].value(), arena[i as usize].value()) >= 0 {
                return Err(InvariantViolation::OrderViolation { index: i });
            }
        }
        prev = Some(i);
        curr = link::next(arena, i);
    }

    Ok(())
}

fn check_links<T, N: ValueNode<T>>(arena: &[N], node: u32) -> Result<(), InvariantViolation> {
    if arena[node as usize].is_vacant() {
        return Err(InvariantViolation::VacantSlotLinked { index: node });
    }
    for child in [arena[node as usize].l(), arena[node as usize].r()] {
        if let Some(child) = child {
            if arena[child as usize].p() != Some(node) {
                return Err(InvariantViolation::BrokenParentLink {
                    parent: node,
                    child,
                });
            }
            check_links(arena, child)?;
        }
    }
    Ok(())
}

/// Checks that every stored balance factor matches the measured subtree
/// heights and stays within ±1.
pub(crate) fn check_balance_factors<T>(
    arena: &[AvlNode<T>],
    root: Option<u32>,
) -> Result<(), InvariantViolation> {
    measure(arena, root).map(|_| ())
}

fn measure<T>(arena: &[AvlNode<T>], node: Option<u32>) -> Result<usize, InvariantViolation> {
    let Some(i) = node else {
        return Ok(0);
    };
    let left = measure(arena, arena[i as usize].l())?;
    let right = measure(arena, arena[i as usize].r())?;

    let actual = left as i64 - right as i64;
    let stored = arena[i as usize].bf();
    if i64::from(stored) != actual {
        return Err(InvariantViolation::StaleBalanceFactor {
            index: i,
            stored,
            actual,
        });
    }
    if !(-1..=1).contains(&actual) {
        return Err(InvariantViolation::HeightImbalance { index: i });
    }

    Ok(1 + left.max(right))
}

/// Checks the red-black rules: black root, no red node with a red child,
/// and a uniform black count along every root-to-null path.
pub(crate) fn check_colors<T>(
    arena: &[RbNode<T>],
    root: Option<u32>,
) -> Result<(), InvariantViolation> {
    let Some(root) = root else {
        return Ok(());
    };
    if !arena[root as usize].is_black() {
        return Err(InvariantViolation::RedRoot { index: root });
    }
    black_height(arena, Some(root)).map(|_| ())
}

fn black_height<T>(
    arena: &[RbNode<T>],
    node: Option<u32>,
) -> Result<usize, InvariantViolation> {
    let Some(i) = node else {
        return Ok(0);
    };
    let l = arena[i as usize].l();
    let r = arena[i as usize].r();

    if !arena[i as usize].is_black() {
        for child in [l, r].into_iter().flatten() {
            if !arena[child as usize].is_black() {
                return Err(InvariantViolation::RedRedViolation { index: i });
            }
        }
    }

    let left = black_height(arena, l)?;
    let right = black_height(arena, r)?;
    if left != right {
        return Err(InvariantViolation::BlackHeightMismatch {
            index: i,
            left,
            right,
        });
    }

    Ok(left + usize::from(arena[i as usize].is_black()))
}
