use thiserror::Error;

/// Structural defects reported by the container checkers.
///
/// The checkers exist for tests and debugging; no regular operation
/// produces these. Indices refer to arena slots for trees and to backing
/// array positions for heaps.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    #[error("root node {index} has a parent link")]
    RootHasParent { index: u32 },
    #[error("node {child} does not link back to its parent {parent}")]
    BrokenParentLink { parent: u32, child: u32 },
    #[error("vacant arena slot {index} is still linked into the tree")]
    VacantSlotLinked { index: u32 },
    #[error("node {index} does not order strictly after its in-order predecessor")]
    OrderViolation { index: u32 },
    #[error("node {index} stores balance factor {stored} but subtree heights give {actual}")]
    StaleBalanceFactor { index: u32, stored: i8, actual: i64 },
    #[error("subtree heights at node {index} differ by more than one")]
    HeightImbalance { index: u32 },
    #[error("root node {index} is red")]
    RedRoot { index: u32 },
    #[error("red node {index} has a red child")]
    RedRedViolation { index: u32 },
    #[error("black height at node {index} is {left} on the left but {right} on the right")]
    BlackHeightMismatch { index: u32, left: usize, right: usize },
    #[error("heap entry {parent} does not order at or before its child {child}")]
    HeapOrderViolation { parent: usize, child: usize },
}
