//! In-order traversal of a [`BstPriorityQueue`]
//!
//! [`Tiers`] walks the search tree in ascending priority order, one tier at
//! a time. [`Iter`] flattens that walk into `(priority, &value)` pairs,
//! yielding each tier's chain oldest first, which is exactly the order
//! repeated `dequeue` calls would produce.
//!
//! Moving between tiers follows the in-order successor: the leftmost tier of
//! the right subtree if there is one, otherwise the nearest ancestor reached
//! from its left side. Iterators borrow the queue, so any number of them can
//! run side by side and none can observe a mutation mid-walk.
//!
//! # Example
//!
//! ```rust
//! use bst_priority_queue::BstPriorityQueue;
//!
//! let mut queue = BstPriorityQueue::new();
//! queue.enqueue("Jen", 2);
//! queue.enqueue("Ben", 1);
//! queue.enqueue("Sven", 2);
//!
//! let mut outer = queue.iter();
//! assert_eq!(outer.next(), Some((1, &"Ben")));
//!
//! // A second traversal starts from the beginning, unaffected by `outer`.
//! let all: Vec<_> = queue.iter().collect();
//! assert_eq!(all, vec![(1, &"Ben"), (2, &"Jen"), (2, &"Sven")]);
//!
//! assert_eq!(outer.next(), Some((2, &"Jen")));
//! assert_eq!(outer.next(), Some((2, &"Sven")));
//! assert_eq!(outer.next(), None);
//! ```

use std::iter::FusedIterator;

use crate::bst_queue::{BstPriorityQueue, KeyNode, Priority};
use crate::chain::{ChainIter, PayloadChain};
use crate::storage::{NodeKey, NodeStorage, SlotMapStorage};

/// Iterator over the tiers of a queue in ascending priority order
///
/// Yields each tier's priority together with its payload chain.
pub struct Tiers<'a, T, K = NodeKey, S = SlotMapStorage<KeyNode<T, K>>> {
    queue: &'a BstPriorityQueue<T, K, S>,
    next: Option<K>,
    remaining: usize,
}

impl<'a, T, K, S> Tiers<'a, T, K, S>
where
    K: Copy + Eq,
    S: NodeStorage<KeyNode<T, K>, Key = K>,
{
    pub(crate) fn new(queue: &'a BstPriorityQueue<T, K, S>) -> Self {
        Self {
            queue,
            next: queue.first_tier(),
            remaining: queue.tier_count(),
        }
    }
}

impl<T, K: Copy, S> Clone for Tiers<'_, T, K, S> {
    fn clone(&self) -> Self {
        Self {
            queue: self.queue,
            next: self.next,
            remaining: self.remaining,
        }
    }
}

impl<'a, T, K, S> Iterator for Tiers<'a, T, K, S>
where
    K: Copy + Eq,
    S: NodeStorage<KeyNode<T, K>, Key = K>,
{
    type Item = (Priority, &'a PayloadChain<T>);

    fn next(&mut self) -> Option<Self::Item> {
        let key = self.next?;
        let queue = self.queue;
        let node = queue.tier(key);
        self.next = queue.successor(key);
        self.remaining -= 1;
        Some((node.priority(), node.chain()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T, K, S> ExactSizeIterator for Tiers<'_, T, K, S>
where
    K: Copy + Eq,
    S: NodeStorage<KeyNode<T, K>, Key = K>,
{
}

impl<T, K, S> FusedIterator for Tiers<'_, T, K, S>
where
    K: Copy + Eq,
    S: NodeStorage<KeyNode<T, K>, Key = K>,
{
}

/// Iterator over `(priority, &value)` pairs in dequeue order
///
/// Created by [`BstPriorityQueue::iter`]. Calling `iter` again starts a new,
/// independent traversal.
pub struct Iter<'a, T, K = NodeKey, S = SlotMapStorage<KeyNode<T, K>>> {
    tiers: Tiers<'a, T, K, S>,
    current: Option<(Priority, ChainIter<'a, T>)>,
    remaining: usize,
}

impl<'a, T, K, S> Iter<'a, T, K, S>
where
    K: Copy + Eq,
    S: NodeStorage<KeyNode<T, K>, Key = K>,
{
    pub(crate) fn new(queue: &'a BstPriorityQueue<T, K, S>) -> Self {
        Self {
            tiers: Tiers::new(queue),
            current: None,
            remaining: queue.len(),
        }
    }
}

impl<T, K: Copy, S> Clone for Iter<'_, T, K, S> {
    fn clone(&self) -> Self {
        Self {
            tiers: self.tiers.clone(),
            current: self.current.clone(),
            remaining: self.remaining,
        }
    }
}

impl<'a, T, K, S> Iterator for Iter<'a, T, K, S>
where
    K: Copy + Eq,
    S: NodeStorage<KeyNode<T, K>, Key = K>,
{
    type Item = (Priority, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some((priority, chain)) = &mut self.current {
                if let Some(value) = chain.next() {
                    self.remaining -= 1;
                    return Some((*priority, value));
                }
            }
            let (priority, chain) = self.tiers.next()?;
            self.current = Some((priority, chain.iter()));
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T, K, S> ExactSizeIterator for Iter<'_, T, K, S>
where
    K: Copy + Eq,
    S: NodeStorage<KeyNode<T, K>, Key = K>,
{
}

impl<T, K, S> FusedIterator for Iter<'_, T, K, S>
where
    K: Copy + Eq,
    S: NodeStorage<KeyNode<T, K>, Key = K>,
{
}
