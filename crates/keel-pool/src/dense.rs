//! A [`HandleTable`] packaged with the dense array it addresses.
//!
//! [`DensePool`] is the convenience most call sites want: insert an item,
//! get back a [`Handle`], and let the pool do the swap-on-delete
//! relocation internally. Systems that keep side tables keyed by dense
//! index (GPU upload lists, dirty flags) still need the raw
//! [`HandleTable`] so they can react to the swap themselves.
//!
//! Items stay contiguous and gap-free, so bulk passes over
//! [`values`](DensePool::values) touch memory linearly regardless of how
//! many handles have come and gone.

use keel_core::Handle;

use crate::error::PoolError;
use crate::handle_table::HandleTable;

/// A gap-free array of `T` addressed through stable generational handles.
#[derive(Clone, Debug)]
pub struct DensePool<T> {
    table: HandleTable,
    items: Vec<T>,
}

impl<T> DensePool<T> {
    /// Create a pool with room for `capacity` items.
    ///
    /// Fails with [`PoolError::CapacityTooLarge`] if `capacity` exceeds
    /// what a handle can address.
    pub fn with_capacity(capacity: usize) -> Result<Self, PoolError> {
        Ok(Self {
            table: HandleTable::with_capacity(capacity)?,
            items: Vec::with_capacity(capacity),
        })
    }

    /// Number of live items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the pool holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total number of slots.
    pub fn capacity(&self) -> usize {
        self.table.capacity()
    }

    /// Store `value` and return a handle to it.
    ///
    /// Fails with [`PoolError::CapacityExceeded`] when the pool is full.
    pub fn insert(&mut self, value: T) -> Result<Handle, PoolError> {
        let handle = self.table.alloc()?;
        self.items.push(value);
        Ok(handle)
    }

    /// Remove and return the item `handle` refers to.
    ///
    /// Fails with [`PoolError::StaleHandle`] if the handle is invalid;
    /// all other handles stay valid across the removal.
    pub fn remove(&mut self, handle: Handle) -> Result<T, PoolError> {
        let result = self.table.release(handle)?;
        Ok(self.items.swap_remove(result.removed as usize))
    }

    /// Whether `handle` still refers to a live item.
    pub fn contains(&self, handle: Handle) -> bool {
        self.table.contains(handle)
    }

    /// Borrow the item `handle` refers to, if it is still live.
    pub fn get(&self, handle: Handle) -> Option<&T> {
        self.table.get_in(handle, &self.items)
    }

    /// Mutably borrow the item `handle` refers to, if it is still live.
    pub fn get_mut(&mut self, handle: Handle) -> Option<&mut T> {
        self.table.get_in_mut(handle, &mut self.items)
    }

    /// Iterate over `(handle, &item)` pairs in dense (allocation-packed)
    /// order.
    ///
    /// The order is not insertion order: swap-on-delete moves the last
    /// item into vacated positions.
    pub fn iter(&self) -> impl Iterator<Item = (Handle, &T)> {
        self.items.iter().enumerate().map(|(dense, item)| {
            let handle = self
                .table
                .handle_at(dense as u32)
                .expect("every dense index has an owning slot");
            (handle, item)
        })
    }

    /// The live items as a contiguous slice, dense order.
    pub fn values(&self) -> &[T] {
        &self.items
    }

    /// Mutable counterpart of [`values`](DensePool::values).
    pub fn values_mut(&mut self) -> &mut [T] {
        &mut self.items
    }
}
