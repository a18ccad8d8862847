//! Priority queue on an unbalanced binary search tree
//!
//! Each distinct priority present in the queue is a *tier*: one node of a
//! binary search tree keyed by priority. Values enqueued with a priority that
//! already has a tier are appended to that tier's [`PayloadChain`] instead of
//! becoming new tree nodes, so equal priorities dequeue in arrival order.
//!
//! The tree is never rebalanced. Inserting priorities in sorted order builds
//! a degenerate, list-shaped tree; that worst case is part of the design.
//!
//! # Time Complexity
//!
//! | Operation  | Complexity   |
//! |------------|--------------|
//! | `enqueue`  | O(h + m)     |
//! | `dequeue`  | O(h)         |
//! | `peek`     | O(h)         |
//! | `len`      | O(1)         |
//! | `iter`     | O(n + t·h)   |
//! | `clone`    | O(n · (h + m)) |
//! | `eq`       | O(n)         |
//!
//! Where h is the tree height (at most the number of tiers t), m is the
//! length of the chain being appended to and n the number of payloads.
//!
//! # Example
//!
//! ```rust
//! use bst_priority_queue::BstPriorityQueue;
//!
//! let mut queue = BstPriorityQueue::new();
//! queue.enqueue("A", 2);
//! queue.enqueue("B", 1);
//! queue.enqueue("C", 2);
//! queue.enqueue("D", 1);
//!
//! assert_eq!(queue.to_string(), "1 value: B\n1 value: D\n2 value: A\n2 value: C\n");
//! assert_eq!(queue.dequeue(), Some("B"));
//! assert_eq!(queue.dequeue(), Some("D"));
//! assert_eq!(queue.dequeue(), Some("A"));
//! assert_eq!(queue.dequeue(), Some("C"));
//! assert_eq!(queue.dequeue(), None);
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::marker::PhantomData;

use tracing::trace;

use crate::chain::PayloadChain;
use crate::iter::{Iter, Tiers};
use crate::storage::{NodeKey, NodeStorage, SlotIndex, SlotMapStorage, VecStorage};
use crate::traits::{Heap, MergeableHeap, StructureError};

/// Priority type used to order the queue; lower values dequeue first
pub type Priority = i32;

/// One tier of the search tree
///
/// A tier holds every payload enqueued with its priority. `left` and `right`
/// are owned by the tier; `parent` is a navigation link only.
pub struct KeyNode<T, K> {
    pub(crate) priority: Priority,
    pub(crate) chain: PayloadChain<T>,
    pub(crate) parent: Option<K>,
    pub(crate) left: Option<K>,
    pub(crate) right: Option<K>,
}

impl<T, K> KeyNode<T, K> {
    /// Priority shared by every payload of this tier
    pub fn priority(&self) -> Priority {
        self.priority
    }

    /// The tier's payloads, oldest first
    pub fn chain(&self) -> &PayloadChain<T> {
        &self.chain
    }
}

/// A min-priority queue backed by a binary search tree with FIFO tie chains
///
/// `K` and `S` select the arena holding the tiers; the defaults use
/// [`SlotMapStorage`]. See [`VecBstPriorityQueue`] for the `Vec` arena.
pub struct BstPriorityQueue<T, K = NodeKey, S = SlotMapStorage<KeyNode<T, K>>> {
    storage: S,
    root: Option<K>,
    len: usize,
    _phantom: PhantomData<T>,
}

/// [`BstPriorityQueue`] storing its tiers in a [`VecStorage`]
pub type VecBstPriorityQueue<T> =
    BstPriorityQueue<T, SlotIndex, VecStorage<KeyNode<T, SlotIndex>>>;

impl<T> BstPriorityQueue<T> {
    /// Creates an empty queue using the default slotmap arena
    pub fn new() -> Self {
        Self::with_storage(SlotMapStorage::default())
    }
}

impl<T, K, S> BstPriorityQueue<T, K, S>
where
    K: Copy + Eq,
    S: NodeStorage<KeyNode<T, K>, Key = K>,
{
    /// Creates an empty queue on top of the given arena
    ///
    /// Anything already stored in `storage` is discarded; its capacity is kept.
    pub fn with_storage(mut storage: S) -> Self {
        storage.clear();
        Self {
            storage,
            root: None,
            len: 0,
            _phantom: PhantomData,
        }
    }

    /// Number of payloads in the queue
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the queue holds no payloads
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of distinct priorities in the queue
    pub fn tier_count(&self) -> usize {
        self.storage.len()
    }

    /// Priority of the root tier
    pub fn root_priority(&self) -> Option<Priority> {
        self.root.map(|root| self.tier(root).priority)
    }

    /// Inserts `value` with the given priority
    ///
    /// A value whose priority already has a tier is queued behind every
    /// earlier value of that priority.
    pub fn enqueue(&mut self, value: T, priority: Priority) {
        self.len += 1;

        let Some(mut current) = self.root else {
            self.root = Some(self.create_tier(value, priority, None));
            return;
        };

        loop {
            let node = self.storage.node_mut(current);
            match priority.cmp(&node.priority) {
                Ordering::Equal => {
                    node.chain.push_back(value);
                    return;
                }
                Ordering::Less => match node.left {
                    Some(left) => current = left,
                    None => {
                        let leaf = self.create_tier(value, priority, Some(current));
                        self.storage.node_mut(current).left = Some(leaf);
                        return;
                    }
                },
                Ordering::Greater => match node.right {
                    Some(right) => current = right,
                    None => {
                        let leaf = self.create_tier(value, priority, Some(current));
                        self.storage.node_mut(current).right = Some(leaf);
                        return;
                    }
                },
            }
        }
    }

    /// Removes and returns the oldest value of the lowest priority
    ///
    /// Returns `None` if the queue is empty.
    pub fn dequeue(&mut self) -> Option<T> {
        self.dequeue_with_priority().map(|(_, value)| value)
    }

    /// Removes the oldest value of the lowest priority, along with that priority
    pub fn dequeue_with_priority(&mut self) -> Option<(Priority, T)> {
        let min = self.leftmost(self.root?);
        let node = self.storage.node_mut(min);
        let priority = node.priority;
        let value = node.chain.pop_front()?;
        self.len -= 1;

        if node.chain.is_empty() {
            self.excise_min(min);
        }

        Some((priority, value))
    }

    /// Returns the value the next `dequeue` would remove
    pub fn peek(&self) -> Option<&T> {
        self.peek_with_priority().map(|(_, value)| value)
    }

    /// Returns the value the next `dequeue` would remove, with its priority
    pub fn peek_with_priority(&self) -> Option<(Priority, &T)> {
        let node = self.tier(self.first_tier()?);
        node.chain.front().map(|value| (node.priority, value))
    }

    /// Iterates over `(priority, value)` pairs in dequeue order
    ///
    /// Each call starts a fresh, independent traversal.
    pub fn iter(&self) -> Iter<'_, T, K, S> {
        Iter::new(self)
    }

    /// Iterates over tiers in ascending priority order
    pub fn tiers(&self) -> Tiers<'_, T, K, S> {
        Tiers::new(self)
    }

    /// Removes every payload, leaving the queue empty
    pub fn clear(&mut self) {
        if self.root.is_none() {
            return;
        }
        trace!(len = self.len, tiers = self.storage.len(), "clearing queue");
        self.storage.clear();
        self.root = None;
        self.len = 0;
    }

    /// Replaces the contents of `self` with a deep copy of `other`
    ///
    /// Tiers are re-enqueued parents first, so the copy has the same tree
    /// shape and chain order as `other` and compares equal to it.
    pub fn assign_from<K2, S2>(&mut self, other: &BstPriorityQueue<T, K2, S2>)
    where
        T: Clone,
        K2: Copy + Eq,
        S2: NodeStorage<KeyNode<T, K2>, Key = K2>,
    {
        self.clear();

        let mut pending: Vec<K2> = other.root.into_iter().collect();
        while let Some(key) = pending.pop() {
            let node = other.tier(key);
            for value in &node.chain {
                self.enqueue(value.clone(), node.priority);
            }
            pending.extend(node.right);
            pending.extend(node.left);
        }
    }

    /// Height of the tree in tiers; 0 for an empty queue
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut pending: Vec<(K, usize)> = self.root.map(|root| (root, 1)).into_iter().collect();
        while let Some((key, depth)) = pending.pop() {
            height = height.max(depth);
            let node = self.tier(key);
            for child in [node.left, node.right].into_iter().flatten() {
                pending.push((child, depth + 1));
            }
        }
        height
    }

    /// Checks the tree invariants, reporting the first violation found
    ///
    /// Verified: search-tree ordering with unique priorities, non-empty
    /// chains, parent links matching child links, a parentless root, the
    /// cached length, and that every stored tier is reachable.
    pub fn verify_structure(&self) -> Result<(), StructureError> {
        let Some(root) = self.root else {
            if self.len != 0 {
                return Err(StructureError::LengthMismatch {
                    expected: self.len,
                    actual: 0,
                });
            }
            if !self.storage.is_empty() {
                return Err(StructureError::UnreachableTier {
                    reachable: 0,
                    stored: self.storage.len(),
                });
            }
            return Ok(());
        };

        if self.tier(root).parent.is_some() {
            return Err(StructureError::RootHasParent);
        }

        let mut payloads = 0;
        let mut reachable = 0;
        // Exclusive priority bounds inherited from ancestors
        let mut pending: Vec<(K, Option<Priority>, Option<Priority>)> = vec![(root, None, None)];

        while let Some((key, lower, upper)) = pending.pop() {
            let node = self.tier(key);
            let priority = node.priority;

            if lower == Some(priority) || upper == Some(priority) {
                return Err(StructureError::DuplicatePriority { priority });
            }
            if lower.is_some_and(|lo| priority < lo) || upper.is_some_and(|hi| priority > hi) {
                return Err(StructureError::OrderViolation { priority });
            }
            if node.chain.is_empty() {
                return Err(StructureError::EmptyChain { priority });
            }

            payloads += node.chain.len();
            reachable += 1;

            let children = [
                (node.left, lower, Some(priority)),
                (node.right, Some(priority), upper),
            ];
            for (child, lo, hi) in children {
                let Some(child) = child else { continue };
                let child_node = self.tier(child);
                if child_node.parent != Some(key) {
                    return Err(StructureError::ParentMismatch {
                        priority: child_node.priority,
                    });
                }
                pending.push((child, lo, hi));
            }
        }

        if payloads != self.len {
            return Err(StructureError::LengthMismatch {
                expected: self.len,
                actual: payloads,
            });
        }
        if reachable != self.storage.len() {
            return Err(StructureError::UnreachableTier {
                reachable,
                stored: self.storage.len(),
            });
        }
        Ok(())
    }

    pub(crate) fn tier(&self, key: K) -> &KeyNode<T, K> {
        self.storage.node(key)
    }

    /// Tier holding the lowest priority
    pub(crate) fn first_tier(&self) -> Option<K> {
        self.root.map(|root| self.leftmost(root))
    }

    /// In-order successor: the tier with the next greater priority
    pub(crate) fn successor(&self, key: K) -> Option<K> {
        let node = self.tier(key);
        if let Some(right) = node.right {
            return Some(self.leftmost(right));
        }

        // No right subtree: climb until we arrive from a left child.
        let mut child = key;
        let mut parent = node.parent;
        while let Some(up) = parent {
            let up_node = self.tier(up);
            if up_node.left == Some(child) {
                return Some(up);
            }
            child = up;
            parent = up_node.parent;
        }
        None
    }

    fn leftmost(&self, mut key: K) -> K {
        while let Some(left) = self.tier(key).left {
            key = left;
        }
        key
    }

    fn create_tier(&mut self, value: T, priority: Priority, parent: Option<K>) -> K {
        trace!(priority, tiers = self.storage.len() + 1, "created tier");
        self.storage.insert(KeyNode {
            priority,
            chain: PayloadChain::new(value),
            parent,
            left: None,
            right: None,
        })
    }

    /// Unlinks the minimum tier once its chain has drained
    fn excise_min(&mut self, key: K) {
        let Some(node) = self.storage.remove(key) else {
            return;
        };
        debug_assert!(node.left.is_none(), "minimum tier has a left child");

        if let Some(right) = node.right {
            self.storage.node_mut(right).parent = node.parent;
        }
        match node.parent {
            Some(parent) => self.storage.node_mut(parent).left = node.right,
            None => self.root = node.right,
        }
        trace!(priority = node.priority, tiers = self.storage.len(), "excised tier");
    }
}

impl<T, K, S> Default for BstPriorityQueue<T, K, S>
where
    K: Copy + Eq,
    S: NodeStorage<KeyNode<T, K>, Key = K>,
{
    fn default() -> Self {
        Self::with_storage(S::default())
    }
}

impl<T, K, S> Clone for BstPriorityQueue<T, K, S>
where
    T: Clone,
    K: Copy + Eq,
    S: NodeStorage<KeyNode<T, K>, Key = K>,
{
    fn clone(&self) -> Self {
        let mut copy = Self::with_storage(S::with_capacity(self.tier_count()));
        copy.assign_from(self);
        copy
    }

    fn clone_from(&mut self, source: &Self) {
        self.assign_from(source);
    }
}

/// Structural equality: same tree shape, and at every position the same
/// priority and the same chained values in the same order.
impl<T, K, S, K2, S2> PartialEq<BstPriorityQueue<T, K2, S2>> for BstPriorityQueue<T, K, S>
where
    T: PartialEq,
    K: Copy + Eq,
    S: NodeStorage<KeyNode<T, K>, Key = K>,
    K2: Copy + Eq,
    S2: NodeStorage<KeyNode<T, K2>, Key = K2>,
{
    fn eq(&self, other: &BstPriorityQueue<T, K2, S2>) -> bool {
        if self.len != other.len || self.tier_count() != other.tier_count() {
            return false;
        }

        let mut pending = vec![(self.root, other.root)];
        while let Some(pair) = pending.pop() {
            match pair {
                (None, None) => {}
                (Some(a), Some(b)) => {
                    let (a, b) = (self.tier(a), other.tier(b));
                    if a.priority != b.priority || a.chain != b.chain {
                        return false;
                    }
                    pending.push((a.left, b.left));
                    pending.push((a.right, b.right));
                }
                _ => return false,
            }
        }
        true
    }
}

impl<T, K, S> Eq for BstPriorityQueue<T, K, S>
where
    T: Eq,
    K: Copy + Eq,
    S: NodeStorage<KeyNode<T, K>, Key = K>,
{
}

/// Renders one line per payload as `"<ordinal> value: <value>"`, where the
/// ordinal counts tiers from 1 in ascending priority order.
impl<T, K, S> fmt::Display for BstPriorityQueue<T, K, S>
where
    T: fmt::Display,
    K: Copy + Eq,
    S: NodeStorage<KeyNode<T, K>, Key = K>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (ordinal, (_, chain)) in (1usize..).zip(self.tiers()) {
            for value in chain {
                writeln!(f, "{ordinal} value: {value}")?;
            }
        }
        Ok(())
    }
}

impl<T, K, S> fmt::Debug for BstPriorityQueue<T, K, S>
where
    T: fmt::Debug,
    K: Copy + Eq,
    S: NodeStorage<KeyNode<T, K>, Key = K>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.tiers()).finish()
    }
}

impl<T, K, S> Extend<(Priority, T)> for BstPriorityQueue<T, K, S>
where
    K: Copy + Eq,
    S: NodeStorage<KeyNode<T, K>, Key = K>,
{
    fn extend<I: IntoIterator<Item = (Priority, T)>>(&mut self, iter: I) {
        for (priority, value) in iter {
            self.enqueue(value, priority);
        }
    }
}

impl<T, K, S> FromIterator<(Priority, T)> for BstPriorityQueue<T, K, S>
where
    K: Copy + Eq,
    S: NodeStorage<KeyNode<T, K>, Key = K>,
{
    fn from_iter<I: IntoIterator<Item = (Priority, T)>>(iter: I) -> Self {
        let mut queue = Self::default();
        queue.extend(iter);
        queue
    }
}

impl<'a, T, K, S> IntoIterator for &'a BstPriorityQueue<T, K, S>
where
    K: Copy + Eq,
    S: NodeStorage<KeyNode<T, K>, Key = K>,
{
    type Item = (Priority, &'a T);
    type IntoIter = Iter<'a, T, K, S>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T, K, S> Heap<T, Priority> for BstPriorityQueue<T, K, S>
where
    K: Copy + Eq,
    S: NodeStorage<KeyNode<T, K>, Key = K>,
{
    fn new() -> Self {
        Self::default()
    }

    fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn len(&self) -> usize {
        self.len
    }

    fn push(&mut self, priority: Priority, item: T) {
        self.enqueue(item, priority);
    }

    fn peek(&self) -> Option<(&Priority, &T)> {
        let node = self.tier(self.first_tier()?);
        node.chain.front().map(|value| (&node.priority, value))
    }

    fn pop(&mut self) -> Option<(Priority, T)> {
        self.dequeue_with_priority()
    }
}

impl<T, K, S> MergeableHeap<T, Priority> for BstPriorityQueue<T, K, S>
where
    K: Copy + Eq,
    S: NodeStorage<KeyNode<T, K>, Key = K>,
{
    fn merge(&mut self, mut other: Self) {
        // Drain in dequeue order so ties from `other` keep their FIFO order
        // behind the values already queued here.
        while let Some((priority, value)) = other.dequeue_with_priority() {
            self.enqueue(value, priority);
        }
    }
}
