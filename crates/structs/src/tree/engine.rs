//! The arena engine every tree flavor runs on.

use std::marker::PhantomData;

use super::iter::{IntoIter, LnrIter, LrnIter, LvlIter, NlrIter, RnlIter};
use super::link;
use super::node::ValueNode;

/// Flavor hooks invoked by [`BinaryTreeCore`] around the shared comparator
/// descent. The attach hooks wire a fresh leaf under `parent` and run the
/// flavor's rebalancing pass; `detach` unlinks `node` from the tree,
/// leaving its slot cleared. Every hook returns the root index that holds
/// after any rotations.
pub trait BalancePolicy<T, N: ValueNode<T>> {
    fn attach_root(_arena: &mut [N], node: u32) -> Option<u32> {
        Some(node)
    }

    fn attach_left(arena: &mut [N], root: Option<u32>, node: u32, parent: u32) -> Option<u32>;

    fn attach_right(arena: &mut [N], root: Option<u32>, node: u32, parent: u32) -> Option<u32>;

    fn detach(arena: &mut [N], root: Option<u32>, node: u32) -> Option<u32>;
}

/// Arena-backed search tree core.
///
/// Nodes live in a `Vec` arena and address each other through `Option<u32>`
/// indices. Removal vacates a slot and parks its index on `free`; the next
/// insert recycles it, so a long-lived tree never grows past its high-water
/// mark. Duplicate values are rejected during the descent, before a slot is
/// ever allocated.
pub struct BinaryTreeCore<T, N, P, C>
where
    N: ValueNode<T>,
    P: BalancePolicy<T, N>,
    C: Fn(&T, &T) -> i32,
{
    arena: Vec<N>,
    free: Vec<u32>,
    root: Option<u32>,
    len: usize,
    comparator: C,
    _policy: PhantomData<(T, P)>,
}

impl<T, N, P, C> BinaryTreeCore<T, N, P, C>
where
    N: ValueNode<T>,
    P: BalancePolicy<T, N>,
    C: Fn(&T, &T) -> i32,
{
    pub fn with_comparator(comparator: C) -> Self {
        Self {
            arena: Vec::new(),
            free: Vec::new(),
            root: None,
            len: 0,
            comparator,
            _policy: PhantomData,
        }
    }

    pub fn arena(&self) -> &[N] {
        &self.arena
    }

    pub fn root(&self) -> Option<u32> {
        self.root
    }

    pub fn comparator(&self) -> &C {
        &self.comparator
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn clear(&mut self) {
        self.arena.clear();
        self.free.clear();
        self.root = None;
        self.len = 0;
    }

    fn alloc(&mut self, value: T) -> u32 {
        match self.free.pop() {
            Some(slot) => {
                self.arena[slot as usize].reset(value);
                slot
            }
            None => {
                self.arena.push(N::new(value));
                (self.arena.len() - 1) as u32
            }
        }
    }

    /// Inserts `value`, rejecting it when an equal value is already present.
    pub fn insert(&mut self, value: T) -> bool {
        let Some(mut curr) = self.root else {
            let node = self.alloc(value);
            self.root = P::attach_root(&mut self.arena, node);
            self.len = 1;
            return true;
        };

        loop {
            let ordering = (self.comparator)(&value, self.arena[curr as usize].value());
            if ordering == 0 {
                return false;
            }
            let child = if ordering < 0 {
                self.arena[curr as usize].l()
            } else {
                self.arena[curr as usize].r()
            };
            match child {
                Some(child) => curr = child,
                None => {
                    let node = self.alloc(value);
                    self.root = if ordering < 0 {
                        P::attach_left(&mut self.arena, self.root, node, curr)
                    } else {
                        P::attach_right(&mut self.arena, self.root, node, curr)
                    };
                    self.len += 1;
                    return true;
                }
            }
        }
    }

    /// Removes the node holding a value equal to `value`, if any.
    pub fn remove(&mut self, value: &T) -> bool {
        let Some(node) = self.find(value) else {
            return false;
        };
        self.root = P::detach(&mut self.arena, self.root, node);
        let _ = self.arena[node as usize].take_value();
        self.free.push(node);
        self.len -= 1;
        true
    }

    pub fn find(&self, value: &T) -> Option<u32> {
        let mut curr = self.root;
        while let Some(i) = curr {
            let ordering = (self.comparator)(value, self.arena[i as usize].value());
            if ordering == 0 {
                return Some(i);
            }
            curr = if ordering < 0 {
                self.arena[i as usize].l()
            } else {
                self.arena[i as usize].r()
            };
        }
        None
    }

    pub fn has(&self, value: &T) -> bool {
        self.find(value).is_some()
    }

    pub fn min(&self) -> Option<&T> {
        link::first(&self.arena, self.root).map(|i| self.arena[i as usize].value())
    }

    pub fn max(&self) -> Option<&T> {
        link::last(&self.arena, self.root).map(|i| self.arena[i as usize].value())
    }

    pub fn height(&self) -> usize {
        link::height(&self.arena, self.root)
    }

    pub fn lnr(&self) -> LnrIter<'_, T, N> {
        LnrIter::new(&self.arena, self.root)
    }

    pub fn rnl(&self) -> RnlIter<'_, T, N> {
        RnlIter::new(&self.arena, self.root)
    }

    pub fn nlr(&self) -> NlrIter<'_, T, N> {
        NlrIter::new(&self.arena, self.root)
    }

    pub fn lrn(&self) -> LrnIter<'_, T, N> {
        LrnIter::new(&self.arena, self.root)
    }

    pub fn lvl(&self) -> LvlIter<'_, T, N> {
        LvlIter::new(&self.arena, self.root)
    }

    pub fn into_lnr(self) -> IntoIter<T, N> {
        IntoIter::new(self.arena, self.root)
    }
}

impl<T, N, P, C> Clone for BinaryTreeCore<T, N, P, C>
where
    N: ValueNode<T> + Clone,
    P: BalancePolicy<T, N>,
    C: Fn(&T, &T) -> i32 + Clone,
{
    /// Structural clone: the arena is duplicated slot for slot, so the copy
    /// has the exact node topology of the original.
    fn clone(&self) -> Self {
        Self {
            arena: self.arena.clone(),
            free: self.free.clone(),
            root: self.root,
            len: self.len,
            comparator: self.comparator.clone(),
            _policy: PhantomData,
        }
    }
}
