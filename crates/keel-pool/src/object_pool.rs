//! Fixed-capacity object pool with hole-skipping iteration.
//!
//! An [`ObjectPool`] stores one type of engine object — a "clump" of
//! scene objects, a table of render states, a batch of animation players —
//! in a buffer whose capacity is fixed at construction. Unlike
//! [`FreeListPool`](crate::free_list::FreeListPool) it places no `Copy`
//! bound on its elements: objects are dropped in place when removed or
//! when the pool is reset, and iteration can visit them through a caller
//! closure (the seam where the engine's reflection-driven visitors plug
//! in).
//!
//! Pools must be sized up front; allocation fails with
//! [`PoolError::CapacityExceeded`] rather than growing.

use crate::error::PoolError;
use crate::slot::{self, free_chain, release_sorted, Slot, NONE};

/// Fixed-capacity pool of droppable objects with an intrusive sorted
/// free list.
#[derive(Debug)]
pub struct ObjectPool<T> {
    slots: Vec<Slot<T>>,
    /// Head of the free chain, kept sorted by ascending index.
    first_free: u32,
    live: u32,
}

impl<T> ObjectPool<T> {
    /// Create a pool with `capacity` slots, all free.
    ///
    /// Fails with [`PoolError::CapacityTooLarge`] if `capacity` cannot be
    /// addressed by a `u32` index (the all-ones value is the free-list
    /// terminator).
    pub fn with_capacity(capacity: usize) -> Result<Self, PoolError> {
        if capacity >= NONE as usize {
            return Err(PoolError::CapacityTooLarge {
                requested: capacity,
                max: NONE as usize - 1,
            });
        }
        Ok(Self {
            slots: free_chain(0, capacity).collect(),
            first_free: if capacity == 0 { NONE } else { 0 },
            live: 0,
        })
    }

    /// Number of live objects.
    pub fn live_count(&self) -> usize {
        self.live as usize
    }

    /// Total number of slots.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Whether no objects are live.
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Whether every slot is live.
    pub fn is_full(&self) -> bool {
        self.first_free == NONE
    }

    /// Number of free slots left.
    pub fn free_count(&self) -> usize {
        self.capacity() - self.live_count()
    }

    /// Store `value` in the lowest free slot.
    ///
    /// Fails with [`PoolError::CapacityExceeded`] when the pool is full —
    /// fixed-capacity pools never grow.
    pub fn insert(&mut self, value: T) -> Result<u32, PoolError> {
        if self.first_free == NONE {
            return Err(PoolError::CapacityExceeded {
                capacity: self.capacity(),
            });
        }
        let index = self.first_free;
        self.first_free = self.slots[index as usize].free_next();
        self.slots[index as usize] = Slot::Live(value);
        self.live += 1;
        Ok(index)
    }

    /// Remove and return the object at `index`, freeing its slot.
    ///
    /// Fails with [`PoolError::OutOfBounds`] or [`PoolError::DoubleFree`]
    /// without touching the pool.
    pub fn remove(&mut self, index: u32) -> Result<T, PoolError> {
        match self.slots.get(index as usize) {
            None => {
                return Err(PoolError::OutOfBounds {
                    index,
                    capacity: self.capacity(),
                })
            }
            Some(Slot::Free { .. }) => return Err(PoolError::DoubleFree { index }),
            Some(Slot::Live(_)) => {}
        }
        let value = release_sorted(&mut self.slots, &mut self.first_free, index);
        self.live -= 1;
        Ok(value)
    }

    /// Borrow the object at `index`, if that slot is live.
    pub fn get(&self, index: u32) -> Option<&T> {
        self.slots.get(index as usize)?.as_live()
    }

    /// Mutably borrow the object at `index`, if that slot is live.
    pub fn get_mut(&mut self, index: u32) -> Option<&mut T> {
        self.slots.get_mut(index as usize)?.as_live_mut()
    }

    /// Visit every live object in ascending slot order.
    ///
    /// This is the update-loop entry point: scene systems pass the visitor
    /// that ticks, renders, or serialises each object. Holes are skipped
    /// in a single O(capacity) pass.
    pub fn visit(&mut self, mut visitor: impl FnMut(u32, &mut T)) {
        for (index, value) in slot::IterMut::new(&mut self.slots, self.first_free) {
            visitor(index, value);
        }
    }

    /// Iterate over `(index, &object)` for every live object, in
    /// ascending slot order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &T)> {
        slot::Iter::new(&self.slots, self.first_free)
    }

    /// Drop every live object and rebuild the free chain.
    ///
    /// The backing buffer is kept for reuse; dropping the pool itself
    /// releases it.
    pub fn reset(&mut self) {
        let capacity = self.slots.len();
        self.slots.clear();
        self.slots.extend(free_chain(0, capacity));
        self.first_free = if capacity == 0 { NONE } else { 0 };
        self.live = 0;
    }
}
