//! Binary-search-tree priority queue for Rust
//!
//! This crate provides [`BstPriorityQueue`], a min-priority queue stored as an
//! unbalanced binary search tree keyed by integer priority. Values sharing a
//! priority are not stored as duplicate tree nodes: they are chained, in
//! arrival order, under a single node (a *tier*). Dequeue therefore returns
//! the lowest priority first and, within a priority, the oldest value first.
//!
//! # Features
//!
//! - **FIFO ties**: equal priorities dequeue in enqueue order
//! - **Restartable traversal**: [`BstPriorityQueue::iter`] returns an
//!   independent iterator in dequeue order; any number may coexist
//! - **Deep copy and structural equality**: clones reproduce the exact tree
//!   shape, and `==` compares shape, priorities and chains
//! - **Rendering**: `Display` prints one `"<ordinal> value: <value>"` line per
//!   payload, numbering tiers from 1
//! - **Pluggable arenas**: tiers live in a [`storage::NodeStorage`] arena,
//!   either `slotmap`-based (default) or a `Vec` free list
//!
//! The tree is never rebalanced; sorted insertion yields a list-shaped tree
//! with O(n) operations.
//!
//! # Example
//!
//! ```rust
//! use bst_priority_queue::BstPriorityQueue;
//!
//! let mut queue = BstPriorityQueue::new();
//! queue.enqueue("Gwen", 3);
//! queue.enqueue("Ben", 1);
//! queue.enqueue("Jen", 2);
//! queue.enqueue("Sven", 2);
//!
//! assert_eq!(queue.len(), 4);
//! assert_eq!(queue.peek(), Some(&"Ben"));
//! print!("{queue}");
//! // 1 value: Ben
//! // 2 value: Jen
//! // 2 value: Sven
//! // 3 value: Gwen
//!
//! let copy = queue.clone();
//! assert_eq!(copy, queue);
//!
//! assert_eq!(queue.dequeue(), Some("Ben"));
//! assert_eq!(queue.dequeue(), Some("Jen"));
//! assert_eq!(copy.len(), 4);
//! ```

pub mod bst_queue;
pub mod chain;
pub mod iter;
pub mod storage;
pub mod traits;

pub use bst_queue::{BstPriorityQueue, KeyNode, Priority, VecBstPriorityQueue};
pub use chain::PayloadChain;
pub use iter::{Iter, Tiers};
pub use traits::{Heap, MergeableHeap, StructureError};
