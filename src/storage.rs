//! Pluggable arena backends for tier storage
//!
//! Tiers of a [`BstPriorityQueue`](crate::BstPriorityQueue) live in an arena
//! and refer to each other by key rather than by pointer. Child links are
//! keys owned by the parent tier; the parent link is a plain key used only
//! for navigation. The arena is the single owner of every tier.
//!
//! - [`SlotMapStorage`]: Default backend using `slotmap`. Generational keys
//!   make stale lookups detectable.
//! - [`VecStorage`]: A `Vec` of slots with a free list, addressed by a plain
//!   index. Smaller keys, no generation check.
//!
//! # Design
//!
//! The [`NodeStorage`] trait abstracts over how tiers are allocated, accessed
//! and freed. `node`/`node_mut` panic on a vacant key just as `SlotMap`
//! indexing does; the queue only ever holds keys of live tiers.
//!
//! # Example
//!
//! ```rust
//! use bst_priority_queue::storage::{NodeStorage, VecStorage};
//! use bst_priority_queue::VecBstPriorityQueue;
//!
//! let mut queue = VecBstPriorityQueue::with_storage(VecStorage::with_capacity(16));
//! queue.enqueue("low", 1);
//! assert_eq!(queue.dequeue(), Some("low"));
//! ```

use std::fmt;
use std::hash::Hash;
use std::ops::{Index, IndexMut};

use slotmap::{new_key_type, SlotMap};

/// Trait for node storage backends
///
/// Keys are `Copy` handles into the arena. A key stays valid until the node
/// it names is removed.
pub trait NodeStorage<N>: Default {
    /// Key type used to reference stored nodes
    type Key: Copy + Eq + Hash + fmt::Debug;

    /// Creates an empty arena with room for `capacity` nodes
    fn with_capacity(capacity: usize) -> Self;

    /// Insert a node, returning a key to reference it
    fn insert(&mut self, node: N) -> Self::Key;

    /// Remove a node by key, returning the node if it existed
    fn remove(&mut self, key: Self::Key) -> Option<N>;

    /// Get an immutable reference to a node
    fn get(&self, key: Self::Key) -> Option<&N>;

    /// Get a mutable reference to a node
    fn get_mut(&mut self, key: Self::Key) -> Option<&mut N>;

    /// Reference to a live node
    ///
    /// # Panics
    /// Panics if `key` does not name a live node.
    fn node(&self, key: Self::Key) -> &N;

    /// Mutable reference to a live node
    ///
    /// # Panics
    /// Panics if `key` does not name a live node.
    fn node_mut(&mut self, key: Self::Key) -> &mut N;

    /// Number of live nodes
    fn len(&self) -> usize;

    /// Returns true if no nodes are stored
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops every stored node
    fn clear(&mut self);
}

// ============================================================================
// SlotMapStorage - default arena
// ============================================================================

new_key_type! {
    /// SlotMap key type for tier storage
    pub struct NodeKey;
}

/// SlotMap-based arena storage
///
/// # Characteristics
/// - Contiguous memory allocation (better cache locality than boxed nodes)
/// - Generational keys detect stale references
/// - Requires explicit removal (no automatic cleanup)
#[derive(Debug, Clone)]
pub struct SlotMapStorage<N> {
    nodes: SlotMap<NodeKey, N>,
}

impl<N> Default for SlotMapStorage<N> {
    fn default() -> Self {
        Self {
            nodes: SlotMap::with_key(),
        }
    }
}

impl<N> NodeStorage<N> for SlotMapStorage<N> {
    type Key = NodeKey;

    fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: SlotMap::with_capacity_and_key(capacity),
        }
    }

    fn insert(&mut self, node: N) -> Self::Key {
        self.nodes.insert(node)
    }

    fn remove(&mut self, key: Self::Key) -> Option<N> {
        self.nodes.remove(key)
    }

    fn get(&self, key: Self::Key) -> Option<&N> {
        self.nodes.get(key)
    }

    fn get_mut(&mut self, key: Self::Key) -> Option<&mut N> {
        self.nodes.get_mut(key)
    }

    fn node(&self, key: Self::Key) -> &N {
        &self.nodes[key]
    }

    fn node_mut(&mut self, key: Self::Key) -> &mut N {
        &mut self.nodes[key]
    }

    fn len(&self) -> usize {
        self.nodes.len()
    }

    fn clear(&mut self) {
        self.nodes.clear();
    }
}

impl<N> Index<NodeKey> for SlotMapStorage<N> {
    type Output = N;

    fn index(&self, key: NodeKey) -> &N {
        self.node(key)
    }
}

impl<N> IndexMut<NodeKey> for SlotMapStorage<N> {
    fn index_mut(&mut self, key: NodeKey) -> &mut N {
        self.node_mut(key)
    }
}

// ============================================================================
// VecStorage - free-list arena
// ============================================================================

/// Plain index into a [`VecStorage`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotIndex(u32);

impl SlotIndex {
    /// Position of the slot in the backing vector
    pub fn get(self) -> usize {
        self.0 as usize
    }
}

/// `Vec`-backed arena with a free list
///
/// Freed slots are reused in LIFO order. Keys carry no generation, so a key
/// kept past the removal of its node may alias a later node.
#[derive(Debug, Clone)]
pub struct VecStorage<N> {
    slots: Vec<Option<N>>,
    free: Vec<u32>,
    len: usize,
}

impl<N> Default for VecStorage<N> {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            len: 0,
        }
    }
}

impl<N> NodeStorage<N> for VecStorage<N> {
    type Key = SlotIndex;

    fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
            len: 0,
        }
    }

    fn insert(&mut self, node: N) -> Self::Key {
        self.len += 1;
        match self.free.pop() {
            Some(slot) => {
                self.slots[slot as usize] = Some(node);
                SlotIndex(slot)
            }
            None => {
                let slot = u32::try_from(self.slots.len()).unwrap_or_else(|_| {
                    panic!("VecStorage cannot address more than {} nodes", u32::MAX)
                });
                self.slots.push(Some(node));
                SlotIndex(slot)
            }
        }
    }

    fn remove(&mut self, key: Self::Key) -> Option<N> {
        let node = self.slots.get_mut(key.get())?.take()?;
        self.free.push(key.0);
        self.len -= 1;
        Some(node)
    }

    fn get(&self, key: Self::Key) -> Option<&N> {
        self.slots.get(key.get())?.as_ref()
    }

    fn get_mut(&mut self, key: Self::Key) -> Option<&mut N> {
        self.slots.get_mut(key.get())?.as_mut()
    }

    fn node(&self, key: Self::Key) -> &N {
        match self.get(key) {
            Some(node) => node,
            None => panic!("vacant VecStorage slot {key:?}"),
        }
    }

    fn node_mut(&mut self, key: Self::Key) -> &mut N {
        match self.get_mut(key) {
            Some(node) => node,
            None => panic!("vacant VecStorage slot {key:?}"),
        }
    }

    fn len(&self) -> usize {
        self.len
    }

    fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.len = 0;
    }
}

impl<N> Index<SlotIndex> for VecStorage<N> {
    type Output = N;

    fn index(&self, key: SlotIndex) -> &N {
        self.node(key)
    }
}

impl<N> IndexMut<SlotIndex> for VecStorage<N> {
    fn index_mut(&mut self, key: SlotIndex) -> &mut N {
        self.node_mut(key)
    }
}
