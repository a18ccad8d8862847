//! Common traits for priority queue data structures
//!
//! This module provides the small trait surface shared by the queue flavours
//! in this crate:
//!
//! - [`Heap`]: Base trait with a `BinaryHeap`-like API (`push`/`pop`/`peek`)
//! - [`MergeableHeap`]: Adds `merge` for folding one queue into another
//!
//! It also defines [`StructureError`], the report produced when an internal
//! tree invariant is found broken by
//! [`BstPriorityQueue::verify_structure`](crate::BstPriorityQueue::verify_structure).

use std::fmt;

use crate::bst_queue::Priority;

/// Error type describing a broken tree invariant
///
/// None of the queue operations fail; this type only surfaces through the
/// structure check used by tests and debugging tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StructureError {
    /// A tier sits on the wrong side of one of its ancestors
    OrderViolation {
        /// Priority of the misplaced tier
        priority: Priority,
    },
    /// Two tiers in the tree share a priority
    DuplicatePriority {
        /// The repeated priority
        priority: Priority,
    },
    /// A tier is present in the tree with no payloads chained to it
    EmptyChain {
        /// Priority of the empty tier
        priority: Priority,
    },
    /// A child's parent link does not point back at the tier holding it
    ParentMismatch {
        /// Priority of the child whose back link is wrong
        priority: Priority,
    },
    /// The root tier still carries a parent link
    RootHasParent,
    /// The cached length disagrees with the payloads found in the tree
    LengthMismatch {
        /// Length reported by `len()`
        expected: usize,
        /// Payloads actually counted
        actual: usize,
    },
    /// The arena holds tiers that cannot be reached from the root
    UnreachableTier {
        /// Tiers reachable from the root
        reachable: usize,
        /// Tiers stored in the arena
        stored: usize,
    },
}

impl fmt::Display for StructureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StructureError::OrderViolation { priority } => {
                write!(f, "tier {priority} violates search-tree ordering")
            }
            StructureError::DuplicatePriority { priority } => {
                write!(f, "priority {priority} is held by more than one tier")
            }
            StructureError::EmptyChain { priority } => {
                write!(f, "tier {priority} has an empty payload chain")
            }
            StructureError::ParentMismatch { priority } => {
                write!(f, "tier {priority} has a parent link that does not match its parent")
            }
            StructureError::RootHasParent => write!(f, "root tier has a parent link"),
            StructureError::LengthMismatch { expected, actual } => {
                write!(f, "queue reports {expected} payloads but holds {actual}")
            }
            StructureError::UnreachableTier { reachable, stored } => {
                write!(
                    f,
                    "{} of {stored} stored tiers are unreachable from the root",
                    stored - reachable
                )
            }
        }
    }
}

impl std::error::Error for StructureError {}

/// Base trait for heap/priority queue data structures
///
/// This trait provides a simple API similar to Rust's `BinaryHeap`:
/// - `push` inserts an element
/// - `pop` removes and returns the minimum
/// - `peek` returns the minimum without removing it
///
/// Unlike `BinaryHeap` which stores values directly (using `Ord`), these queues
/// store (priority, item) pairs to separate the ordering key from the data.
///
/// # Example
///
/// ```rust
/// use bst_priority_queue::{BstPriorityQueue, Heap};
///
/// let mut queue: BstPriorityQueue<&str> = Heap::new();
/// queue.push(3, "three");
/// queue.push(1, "one");
/// queue.push(1, "uno");
///
/// assert_eq!(Heap::peek(&queue), Some((&1, &"one")));
/// assert_eq!(Heap::pop(&mut queue), Some((1, "one")));
/// assert_eq!(Heap::pop(&mut queue), Some((1, "uno")));
/// ```
pub trait Heap<T, P: Ord> {
    /// Creates a new empty heap
    fn new() -> Self;

    /// Returns true if the heap is empty
    fn is_empty(&self) -> bool;

    /// Returns the number of elements in the heap
    fn len(&self) -> usize;

    /// Inserts an element with the given priority
    fn push(&mut self, priority: P, item: T);

    /// Returns the minimum priority and associated item without removing it
    ///
    /// Note that `BinaryHeap` is a max-heap, while these queues are min-queues.
    fn peek(&self) -> Option<(&P, &T)>;

    /// Removes and returns the minimum priority and associated item
    ///
    /// Among equal priorities the oldest element is returned first.
    fn pop(&mut self) -> Option<(P, T)>;
}

/// Heaps that can absorb another heap of the same type
pub trait MergeableHeap<T, P: Ord>: Heap<T, P> {
    /// Merges another heap into this one, consuming the other heap
    fn merge(&mut self, other: Self);
}
