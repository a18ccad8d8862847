//! FIFO payload chains
//!
//! Every tier of the queue anchors a singly linked list of the values that
//! were enqueued with its priority, oldest first. The tier owns the head
//! entry and each entry owns its successor.
//!
//! # Time Complexity
//!
//! | Operation   | Complexity |
//! |-------------|------------|
//! | `push_back` | O(m)       |
//! | `pop_front` | O(1)       |
//! | `front`     | O(1)       |
//! | `len`       | O(1)       |
//!
//! Where m is the number of payloads already in the chain: appends walk to
//! the last entry.

use std::fmt;
use std::iter::FusedIterator;

struct Payload<T> {
    value: T,
    next: Option<Box<Payload<T>>>,
}

/// Singly linked list of payloads sharing one priority
///
/// A chain held by a tier in the tree is never empty.
pub struct PayloadChain<T> {
    head: Option<Box<Payload<T>>>,
    len: usize,
}

impl<T> PayloadChain<T> {
    /// Creates a chain holding a single value
    pub(crate) fn new(first: T) -> Self {
        Self {
            head: Some(Box::new(Payload {
                value: first,
                next: None,
            })),
            len: 1,
        }
    }

    /// Appends a value after the newest payload
    pub(crate) fn push_back(&mut self, value: T) {
        let mut slot = &mut self.head;
        while let Some(entry) = slot {
            slot = &mut entry.next;
        }
        *slot = Some(Box::new(Payload { value, next: None }));
        self.len += 1;
    }

    /// Removes and returns the oldest payload
    pub(crate) fn pop_front(&mut self) -> Option<T> {
        let head = self.head.take()?;
        let Payload { value, next } = *head;
        self.head = next;
        self.len -= 1;
        Some(value)
    }

    /// Returns the oldest payload
    pub fn front(&self) -> Option<&T> {
        self.head.as_ref().map(|entry| &entry.value)
    }

    /// Number of payloads in the chain
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the chain holds no payloads
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Iterates over the payloads, oldest first
    pub fn iter(&self) -> ChainIter<'_, T> {
        ChainIter {
            next: self.head.as_deref(),
            remaining: self.len,
        }
    }
}

impl<T> Drop for PayloadChain<T> {
    fn drop(&mut self) {
        // Unlink one entry at a time; the default recursive drop would use
        // one stack frame per payload.
        let mut next = self.head.take();
        while let Some(mut entry) = next {
            next = entry.next.take();
        }
    }
}

impl<T: PartialEq> PartialEq for PayloadChain<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for PayloadChain<T> {}

impl<T: fmt::Debug> fmt::Debug for PayloadChain<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<'a, T> IntoIterator for &'a PayloadChain<T> {
    type Item = &'a T;
    type IntoIter = ChainIter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the payloads of one chain
pub struct ChainIter<'a, T> {
    next: Option<&'a Payload<T>>,
    remaining: usize,
}

impl<T> Clone for ChainIter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            next: self.next,
            remaining: self.remaining,
        }
    }
}

impl<'a, T> Iterator for ChainIter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.next?;
        self.next = entry.next.as_deref();
        self.remaining -= 1;
        Some(&entry.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for ChainIter<'_, T> {}

impl<T> FusedIterator for ChainIter<'_, T> {}
