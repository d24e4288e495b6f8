//! Generation-checked slot table over a caller-owned dense array.
//!
//! A [`HandleTable`] maps opaque [`Handle`]s to indices into a dense,
//! gap-free array of items that the *caller* owns (a texture table, a
//! mesh list, a physics-body array). The table keeps the dense array
//! gap-free with swap-on-delete: releasing a handle moves the last dense
//! item into the vacated position and fixes up the moved item's slot, so
//! every other outstanding handle stays valid.
//!
//! Callers that would rather not manage the dense array themselves should
//! use [`DensePool`](crate::dense::DensePool), which packages a table with
//! its `Vec<T>`.

use keel_core::Handle;

use crate::error::PoolError;
use crate::slot::NONE;

/// Maximum number of slots a table can hold: handle indices are 16 bits.
pub const MAX_SLOTS: usize = 1 << 16;

/// What a slot currently stands for.
#[derive(Clone, Copy, Debug)]
enum SlotState {
    /// The slot is issued; `dense` is the item's position in the caller's
    /// dense array.
    Live { dense: u32 },
    /// The slot is free; `next` is the next free slot, or [`NONE`].
    Free { next: u32 },
}

/// One sparse slot: its current role plus the version counter that
/// outlives any individual allocation of the slot.
#[derive(Clone, Copy, Debug)]
struct Slot {
    state: SlotState,
    /// Incremented every time the slot is released. Wraps at 2^16; a
    /// handle that survives 65 536 reuses of its slot will alias the
    /// wrong incarnation (accepted limitation).
    version: u16,
}

/// The two dense indices touched by [`HandleTable::release`].
///
/// The caller must mirror the move in its own dense array; for a
/// `Vec<T>` that is exactly `items.swap_remove(removed as usize)` (which
/// also covers the `moved == removed` case, where the released item was
/// the last one and nothing had to move).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[must_use]
pub struct SwapRemove {
    /// Dense index that was vacated (and refilled if `moved` differs).
    pub removed: u32,
    /// Dense index the refilling item previously occupied. Equal to
    /// `removed` when the released item was already last.
    pub moved: u32,
}

/// Fixed-capacity generational slot table.
///
/// Capacity is set at construction and never grows; allocation fails with
/// [`PoolError::CapacityExceeded`] once every slot is live. All handle
/// lookups are O(1), and [`release`](HandleTable::release) is O(1) thanks
/// to an internal dense→slot back map.
#[derive(Clone, Debug)]
pub struct HandleTable {
    /// Sparse slot array, length fixed at capacity.
    slots: Vec<Slot>,
    /// Back map: dense index → owning slot. Length equals the live count.
    dense_to_slot: Vec<u16>,
    /// Head of the free chain threaded through free slots.
    first_free: u32,
}

impl HandleTable {
    /// Create a table with `capacity` slots, all free.
    ///
    /// Fails with [`PoolError::CapacityTooLarge`] if `capacity` exceeds
    /// [`MAX_SLOTS`] — handle indices are 16 bits and cannot address more.
    pub fn with_capacity(capacity: usize) -> Result<Self, PoolError> {
        if capacity > MAX_SLOTS {
            return Err(PoolError::CapacityTooLarge {
                requested: capacity,
                max: MAX_SLOTS,
            });
        }
        let slots = (0..capacity)
            .map(|i| Slot {
                state: SlotState::Free {
                    next: if i + 1 < capacity { (i + 1) as u32 } else { NONE },
                },
                version: 0,
            })
            .collect();
        Ok(Self {
            slots,
            dense_to_slot: Vec::with_capacity(capacity),
            first_free: if capacity == 0 { NONE } else { 0 },
        })
    }

    /// Number of live handles.
    pub fn len(&self) -> usize {
        self.dense_to_slot.len()
    }

    /// Whether no handles are live.
    pub fn is_empty(&self) -> bool {
        self.dense_to_slot.is_empty()
    }

    /// Total number of slots.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of slots available for allocation.
    pub fn free_count(&self) -> usize {
        self.capacity() - self.len()
    }

    /// Issue a handle for the next dense index.
    ///
    /// The new item's dense index is `self.len() - 1` after this returns:
    /// the caller pushes the item onto the end of its dense array. Fails
    /// with [`PoolError::CapacityExceeded`] when the table is full.
    pub fn alloc(&mut self) -> Result<Handle, PoolError> {
        if self.first_free == NONE {
            return Err(PoolError::CapacityExceeded {
                capacity: self.capacity(),
            });
        }
        let index = self.first_free;
        let slot = &mut self.slots[index as usize];
        self.first_free = match slot.state {
            SlotState::Free { next } => next,
            SlotState::Live { .. } => unreachable!("free-chain head points at a live slot"),
        };
        let dense = self.dense_to_slot.len() as u32;
        slot.state = SlotState::Live { dense };
        self.dense_to_slot.push(index as u16);
        Ok(Handle::new(index as u16, slot.version))
    }

    /// Whether `handle` names a currently-live slot incarnation.
    ///
    /// True for every handle returned by [`alloc`](HandleTable::alloc)
    /// until its slot is released; false afterwards, false for handles of
    /// other tables that happen to be out of range, and false for forged
    /// handles to never-issued slots.
    pub fn contains(&self, handle: Handle) -> bool {
        self.dense_index(handle).is_some()
    }

    /// The dense index `handle` currently resolves to, if it is valid.
    pub fn dense_index(&self, handle: Handle) -> Option<u32> {
        let slot = self.slots.get(handle.index() as usize)?;
        if slot.version != handle.version() {
            return None;
        }
        match slot.state {
            SlotState::Live { dense } => Some(dense),
            SlotState::Free { .. } => None,
        }
    }

    /// Resolve `handle` to a reference into the caller's dense array.
    ///
    /// Returns `None` if the handle is stale or if the caller's array has
    /// fallen out of sync with the table (shorter than the live count).
    pub fn get_in<'a, T>(&self, handle: Handle, items: &'a [T]) -> Option<&'a T> {
        items.get(self.dense_index(handle)? as usize)
    }

    /// Mutable counterpart of [`get_in`](HandleTable::get_in).
    pub fn get_in_mut<'a, T>(&self, handle: Handle, items: &'a mut [T]) -> Option<&'a mut T> {
        items.get_mut(self.dense_index(handle)? as usize)
    }

    /// Reconstruct the live handle that owns dense index `dense`.
    pub fn handle_at(&self, dense: u32) -> Option<Handle> {
        let slot_index = *self.dense_to_slot.get(dense as usize)?;
        let slot = &self.slots[slot_index as usize];
        Some(Handle::new(slot_index, slot.version))
    }

    /// Release `handle`, invalidating it and keeping the dense array
    /// gap-free by swap-on-delete.
    ///
    /// On success the caller must mirror the move in its dense array:
    /// `items.swap_remove(result.removed as usize)`. Any side tables
    /// keyed by dense index must be fixed up with the returned pair.
    /// Fails with [`PoolError::StaleHandle`] if the handle is invalid;
    /// the table is unchanged in that case.
    pub fn release(&mut self, handle: Handle) -> Result<SwapRemove, PoolError> {
        let removed = self
            .dense_index(handle)
            .ok_or(PoolError::StaleHandle { handle })?;
        let moved = self.dense_to_slot.len() as u32 - 1;

        // Swap-on-delete: the last dense item takes the vacated position,
        // and its slot is repointed at the new, lower index.
        let moved_slot = self.dense_to_slot[moved as usize];
        self.dense_to_slot.swap_remove(removed as usize);
        if moved != removed {
            self.slots[moved_slot as usize].state = SlotState::Live { dense: removed };
        }

        // Invalidating the released slot is the version bump alone.
        let slot = &mut self.slots[handle.index() as usize];
        slot.version = slot.version.wrapping_add(1);
        slot.state = SlotState::Free {
            next: self.first_free,
        };
        self.first_free = u32::from(handle.index());

        Ok(SwapRemove { removed, moved })
    }
}
