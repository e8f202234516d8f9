//! Comparator-keyed search trees over a shared arena engine.
//!
//! All three flavors run the same descent, iteration and validation
//! machinery; they differ only in their node payload and in the balance
//! policy hooks that fire around each attach and detach. Node links are
//! `Option<u32>` indices into a per-tree arena, so rotations and splices
//! are index reassignments rather than pointer surgery.

pub mod avl;
pub mod bst;
pub mod iter;
pub mod node;
pub mod red_black;

pub(crate) mod engine;
pub(crate) mod link;
pub(crate) mod print;
pub(crate) mod validate;

pub use avl::AvlTree;
pub use bst::BinarySearchTree;
pub use red_black::RedBlackTree;
