//! Slot arena for trie nodes.
//!
//! Nodes live in a single `Vec` and refer to each other by [`NodeId`]. Freed
//! slots go on a free list and are handed out again by the next allocation,
//! so a long run of inserts and deletes does not grow the arena unbounded.

use std::ops::{Index, IndexMut};

/// A 32-bit index into a [`NodeArena`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct NodeId(u32);

impl NodeId {
    /// Create an id from a slot index.
    ///
    /// # Panics
    /// Panics if the index does not fit in 32 bits.
    pub fn from_usize(index: usize) -> Self {
        assert!(index < u32::MAX as usize, "arena index too large");
        Self(index as u32)
    }

    /// Get the slot index.
    pub fn as_usize(self) -> usize {
        self.0 as usize
    }
}

/// Slot storage with a free list.
pub struct NodeArena<T> {
    slots: Vec<Option<T>>,
    free: Vec<NodeId>,
}

impl<T> NodeArena<T> {
    /// Create an empty arena.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create an empty arena with room for `capacity` slots.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
        }
    }

    /// Store `value`, reusing a freed slot when one is available.
    pub fn alloc(&mut self, value: T) -> NodeId {
        match self.free.pop() {
            Some(id) => {
                debug_assert!(self.slots[id.as_usize()].is_none());
                self.slots[id.as_usize()] = Some(value);
                id
            }
            None => {
                let id = NodeId::from_usize(self.slots.len());
                self.slots.push(Some(value));
                id
            }
        }
    }

    /// Take the value out of a slot and put the slot on the free list.
    ///
    /// # Panics
    /// Panics if the slot is already free.
    pub fn release(&mut self, id: NodeId) -> T {
        match self.slots[id.as_usize()].take() {
            Some(value) => {
                self.free.push(id);
                value
            }
            None => panic!("released a free arena slot {id:?}"),
        }
    }

    /// Get a live slot.
    pub fn get(&self, id: NodeId) -> Option<&T> {
        self.slots.get(id.as_usize()).and_then(Option::as_ref)
    }

    /// Get a live slot mutably.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut T> {
        self.slots.get_mut(id.as_usize()).and_then(Option::as_mut)
    }

    /// Number of live slots.
    pub fn len(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    /// Check if no slot is live.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Total slots, live or free.
    #[cfg(test)]
    pub(crate) fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Iterate over live slots.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &T)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|v| (NodeId::from_usize(i), v)))
    }
}

impl<T> Default for NodeArena<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for NodeArena<T> {
    fn clone(&self) -> Self {
        Self {
            slots: self.slots.clone(),
            free: self.free.clone(),
        }
    }
}

impl<T> Index<NodeId> for NodeArena<T> {
    type Output = T;

    fn index(&self, id: NodeId) -> &T {
        match self.get(id) {
            Some(value) => value,
            None => panic!("dangling node id {id:?}"),
        }
    }
}

impl<T> IndexMut<NodeId> for NodeArena<T> {
    fn index_mut(&mut self, id: NodeId) -> &mut T {
        match self.get_mut(id) {
            Some(value) => value,
            None => panic!("dangling node id {id:?}"),
        }
    }
}
