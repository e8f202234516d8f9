//! medley-util - Collaborator utilities for the medley containers
//!
//! Small leaf helpers consumed by the container crates: the three-way
//! comparator contract, an insertion sort over that contract, and a seeded
//! fuzzer for randomized testing.

pub mod cmp;
pub mod fuzzer;
pub mod sort;

// Re-exports for convenience
pub use cmp::{ascend, ascend_by, descend, descend_by, Comparator};
pub use fuzzer::Fuzzer;
pub use sort::{insertion_sort, insertion_sort_by};
