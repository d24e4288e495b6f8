//! Growable free-list pool of plain-old-data records.
//!
//! A [`FreeListPool`] hands out raw `u32` slot indices with O(1) insert
//! and remove, growing its backing array to the next power of two when the
//! free list runs dry. Indices are *not* generation-checked — they are for
//! callers that already control the lifetime of what they store (render
//! state blocks, particle records, queued draw data). Use
//! [`HandleTable`](crate::handle_table::HandleTable) or
//! [`DensePool`](crate::dense::DensePool) when stale references must be
//! detectable.
//!
//! Records must be `Copy`: the pool is meant for small bitwise-copyable
//! structs, and removal hands the record back by value.

use crate::error::PoolError;
use crate::slot::{self, free_chain, release_sorted, Slot, NONE};

/// Growable pool of `Copy` records with an intrusive sorted free list.
///
/// Live records keep their index across any sequence of inserts, removes,
/// and growth. Iteration yields the live records in ascending index order
/// and skips holes in a single O(capacity) pass.
#[derive(Clone, Debug)]
pub struct FreeListPool<T> {
    slots: Vec<Slot<T>>,
    /// Head of the free chain, kept sorted by ascending index.
    first_free: u32,
    live: u32,
}

impl<T: Copy> FreeListPool<T> {
    /// Create an empty pool with no slots.
    ///
    /// The first [`insert`](FreeListPool::insert) grows it.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            first_free: NONE,
            live: 0,
        }
    }

    /// Create a pool with `reserved` slots, all free.
    ///
    /// Fails with [`PoolError::CapacityTooLarge`] if `reserved` cannot be
    /// addressed by a `u32` index (the all-ones value is the free-list
    /// terminator).
    pub fn with_capacity(reserved: usize) -> Result<Self, PoolError> {
        if reserved >= NONE as usize {
            return Err(PoolError::CapacityTooLarge {
                requested: reserved,
                max: NONE as usize - 1,
            });
        }
        Ok(Self {
            slots: free_chain(0, reserved).collect(),
            first_free: if reserved == 0 { NONE } else { 0 },
            live: 0,
        })
    }

    /// Number of live records.
    pub fn live_count(&self) -> usize {
        self.live as usize
    }

    /// Total number of slots (live + free).
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Whether no records are live.
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Number of free slots left before the next insert has to grow the
    /// pool.
    pub fn free_count(&self) -> usize {
        self.capacity() - self.live_count()
    }

    /// Store `value` in the lowest free slot, growing if the pool is full.
    ///
    /// Returns the record's index, stable until [`remove`](FreeListPool::remove).
    pub fn insert(&mut self, value: T) -> u32 {
        if self.first_free == NONE {
            self.grow();
        }
        match self.insert_within_capacity(value) {
            Ok(index) => index,
            Err(_) => unreachable!("grow() always leaves at least one free slot"),
        }
    }

    /// Store `value` in the lowest free slot without growing.
    ///
    /// Hands `value` back if every slot is live, leaving the pool
    /// untouched.
    pub fn insert_within_capacity(&mut self, value: T) -> Result<u32, T> {
        if self.first_free == NONE {
            return Err(value);
        }
        let index = self.first_free;
        self.first_free = self.slots[index as usize].free_next();
        self.slots[index as usize] = Slot::Live(value);
        self.live += 1;
        Ok(index)
    }

    /// Remove and return the record at `index`, freeing its slot.
    ///
    /// The slot is re-linked into the free chain at its sorted position
    /// (linear in the number of free slots in front of it). Fails with
    /// [`PoolError::OutOfBounds`] or [`PoolError::DoubleFree`] without
    /// touching the pool.
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

    /// Borrow the record at `index`, if that slot is live.
    pub fn get(&self, index: u32) -> Option<&T> {
        self.slots.get(index as usize)?.as_live()
    }

    /// Mutably borrow the record at `index`, if that slot is live.
    pub fn get_mut(&mut self, index: u32) -> Option<&mut T> {
        self.slots.get_mut(index as usize)?.as_live_mut()
    }

    /// Iterate over `(index, &record)` for every live record, in
    /// ascending index order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &T)> {
        slot::Iter::new(&self.slots, self.first_free)
    }

    /// Mutable counterpart of [`iter`](FreeListPool::iter).
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (u32, &mut T)> {
        slot::IterMut::new(&mut self.slots, self.first_free)
    }

    /// Double the slot array to the next power of two and chain the new
    /// slots into the (empty) free list.
    ///
    /// Existing records keep their index and contents; `Vec` reallocation
    /// either completes or aborts the process, so no partial growth is
    /// observable.
    fn grow(&mut self) {
        debug_assert_eq!(self.first_free, NONE, "grow called with free slots left");
        let old = self.slots.len();
        let new = (old + 1).next_power_of_two();
        self.slots.extend(free_chain(old, new));
        self.first_free = old as u32;
    }
}

impl<T: Copy> Default for FreeListPool<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn growth_doubles_and_preserves_records() {
        let mut pool = FreeListPool::with_capacity(2).unwrap();
        assert_eq!(pool.free_count(), 2);
        assert_eq!(pool.insert(10u64), 0);
        assert_eq!(pool.insert(20), 1);
        assert_eq!(pool.capacity(), 2);
        assert_eq!(pool.free_count(), 0);

        // Third insert triggers growth to the next power of two.
        assert_eq!(pool.insert(30), 2);
        assert_eq!(pool.capacity(), 4);
        assert_eq!(pool.free_count(), 1);
        assert_eq!(pool.get(0), Some(&10));
        assert_eq!(pool.get(1), Some(&20));
        assert_eq!(pool.get(2), Some(&30));
    }

    #[test]
    fn empty_pool_grows_from_zero() {
        let mut pool = FreeListPool::new();
        assert_eq!(pool.capacity(), 0);
        assert_eq!(pool.insert(1u8), 0);
        assert_eq!(pool.capacity(), 1);
        assert_eq!(pool.insert(2), 1);
        assert_eq!(pool.capacity(), 2);
    }

    #[test]
    fn oversized_capacity_is_rejected() {
        let err = FreeListPool::<u8>::with_capacity(u32::MAX as usize).unwrap_err();
        assert_eq!(
            err,
            PoolError::CapacityTooLarge {
                requested: u32::MAX as usize,
                max: u32::MAX as usize - 1,
            }
        );
    }

    #[test]
    fn insert_within_capacity_returns_value_when_full() {
        let mut pool = FreeListPool::with_capacity(1).unwrap();
        assert_eq!(pool.insert_within_capacity(5u32), Ok(0));
        assert_eq!(pool.insert_within_capacity(6), Err(6));
        assert_eq!(pool.capacity(), 1, "no growth on the non-growing path");
    }

    #[test]
    fn freed_slot_is_reused_lowest_first() {
        let mut pool = FreeListPool::with_capacity(4).unwrap();
        for i in 0..4 {
            pool.insert(i);
        }
        pool.remove(2).unwrap();
        pool.remove(0).unwrap();
        // Sorted free list: lowest index comes back first.
        assert_eq!(pool.insert(100), 0);
        assert_eq!(pool.insert(101), 2);
    }

    #[test]
    fn remove_rejects_double_free_and_bad_index() {
        let mut pool = FreeListPool::with_capacity(2).unwrap();
        let index = pool.insert(7u16);
        assert_eq!(pool.remove(index), Ok(7));
        assert_eq!(pool.remove(index), Err(PoolError::DoubleFree { index }));
        assert_eq!(
            pool.remove(9),
            Err(PoolError::OutOfBounds { index: 9, capacity: 2 })
        );
        assert_eq!(pool.live_count(), 0);
        assert_eq!(pool.free_count(), 2);
    }

    #[test]
    fn iteration_yields_live_records_in_order() {
        let mut pool = FreeListPool::with_capacity(6).unwrap();
        for i in 0..6u32 {
            pool.insert(i * 10);
        }
        pool.remove(1).unwrap();
        pool.remove(4).unwrap();
        pool.remove(0).unwrap();

        let seen: Vec<(u32, u32)> = pool.iter().map(|(i, v)| (i, *v)).collect();
        assert_eq!(seen, vec![(2, 20), (3, 30), (5, 50)]);
    }

    #[test]
    fn iter_mut_updates_in_place() {
        let mut pool = FreeListPool::with_capacity(3).unwrap();
        for i in 0..3u32 {
            pool.insert(i);
        }
        pool.remove(1).unwrap();
        for (_, v) in pool.iter_mut() {
            *v += 1;
        }
        let seen: Vec<u32> = pool.iter().map(|(_, v)| *v).collect();
        assert_eq!(seen, vec![1, 3]);
    }

    #[test]
    fn growth_while_iterating_later_sees_new_records() {
        let mut pool = FreeListPool::with_capacity(1).unwrap();
        pool.insert(1u32);
        pool.insert(2);
        pool.insert(3);
        assert_eq!(pool.live_count(), 3);
        assert_eq!(pool.iter().count(), 3);
    }

    #[cfg(not(miri))]
    mod proptests {
        use super::*;
        use std::collections::BTreeMap;

        use proptest::prelude::*;

        #[derive(Debug, Clone)]
        enum Op {
            Insert(u32),
            Remove(usize),
        }

        fn op_strategy() -> impl Strategy<Value = Op> {
            prop_oneof![
                any::<u32>().prop_map(Op::Insert),
                any::<usize>().prop_map(Op::Remove),
            ]
        }

        proptest! {
            #[test]
            fn matches_btreemap_model(
                ops in proptest::collection::vec(op_strategy(), 1..300),
            ) {
                let mut pool = FreeListPool::with_capacity(0).unwrap();
                let mut model: BTreeMap<u32, u32> = BTreeMap::new();

                for op in ops {
                    match op {
                        Op::Insert(value) => {
                            let index = pool.insert(value);
                            prop_assert!(model.insert(index, value).is_none(),
                                "index {} handed out twice", index);
                        }
                        Op::Remove(pick) => {
                            if model.is_empty() {
                                continue;
                            }
                            let &index = model.keys().nth(pick % model.len()).unwrap();
                            let expected = model.remove(&index).unwrap();
                            prop_assert_eq!(pool.remove(index), Ok(expected));
                        }
                    }
                }

                prop_assert_eq!(pool.live_count(), model.len());
                let seen: Vec<(u32, u32)> = pool.iter().map(|(i, v)| (i, *v)).collect();
                let expected: Vec<(u32, u32)> =
                    model.iter().map(|(&i, &v)| (i, v)).collect();
                // Same records, same ascending order.
                prop_assert_eq!(seen, expected);
            }

            #[test]
            fn growth_never_moves_live_records(
                churn in proptest::collection::vec(any::<u32>(), 1..100),
            ) {
                let mut pool = FreeListPool::with_capacity(0).unwrap();
                let mut placed: Vec<(u32, u32)> = Vec::new();
                for value in churn {
                    let index = pool.insert(value);
                    placed.push((index, value));
                    for &(i, v) in &placed {
                        prop_assert_eq!(pool.get(i), Some(&v));
                    }
                }
            }
        }
    }
}
