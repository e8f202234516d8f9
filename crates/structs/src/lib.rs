//! medley-structs - ordered in-memory containers.
//!
//! Every container here is keyed by a three-way comparator
//! (`Fn(&T, &T) -> i32`, see [`medley_util::cmp`]) and owns its values
//! outright. Nothing blocks, nothing allocates outside the backing
//! storage, and none of the types synchronize internally; wrap a container
//! in a lock if it must be shared across threads.
//!
//! # Module layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`tree`] | [`BinarySearchTree`], [`AvlTree`], [`RedBlackTree`] over a shared arena engine |
//! | [`heap`] | [`Heap`] plus the [`MinHeap`] / [`MaxHeap`] specializations |
//! | [`error`] | [`InvariantViolation`] reported by the structure checkers |

pub mod error;
pub mod heap;
pub mod tree;

pub use error::InvariantViolation;
pub use heap::{Heap, MaxHeap, MinHeap};
pub use tree::{AvlTree, BinarySearchTree, RedBlackTree};
