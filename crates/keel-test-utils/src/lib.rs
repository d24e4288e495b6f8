//! Test utilities and reference models for Keel development.
//!
//! Provides [`ModelPool`], an obviously-correct reference implementation
//! of handle-addressed storage used to cross-check [`DensePool`], and
//! deterministic churn scripts (see [`fixtures`]) for driving pools
//! through realistic alloc/free interleavings in tests and benches.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use indexmap::IndexMap;

use keel_core::Handle;
use keel_pool::DensePool;

/// Reference model of handle-addressed storage.
///
/// Backed by an `IndexMap<Handle, T>` so test code can pick the n-th live
/// handle deterministically. Makes no attempt at being fast; it exists to
/// be trivially correct.
pub struct ModelPool<T> {
    live: IndexMap<Handle, T>,
}

impl<T> ModelPool<T> {
    pub fn new() -> Self {
        Self {
            live: IndexMap::new(),
        }
    }

    /// Record a freshly issued handle and its value.
    ///
    /// # Panics
    ///
    /// Panics if the handle was already recorded — a pool that reissues a
    /// live handle is broken.
    pub fn record_insert(&mut self, handle: Handle, value: T) {
        let previous = self.live.insert(handle, value);
        assert!(previous.is_none(), "handle {handle} issued twice");
    }

    /// Remove and return the n-th live entry (by insertion order).
    pub fn remove_nth(&mut self, n: usize) -> Option<(Handle, T)> {
        if self.live.is_empty() {
            return None;
        }
        let index = n % self.live.len();
        self.live.swap_remove_index(index)
    }

    /// The n-th live handle (by insertion order).
    pub fn nth_handle(&self, n: usize) -> Option<Handle> {
        if self.live.is_empty() {
            return None;
        }
        self.live.get_index(n % self.live.len()).map(|(&h, _)| h)
    }

    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    pub fn get(&self, handle: Handle) -> Option<&T> {
        self.live.get(&handle)
    }

    pub fn handles(&self) -> impl Iterator<Item = Handle> + '_ {
        self.live.keys().copied()
    }
}

impl<T> Default for ModelPool<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: PartialEq + std::fmt::Debug> ModelPool<T> {
    /// Assert that `pool` agrees with this model: same live count, every
    /// model entry resolvable with an equal value, and pool iteration
    /// covering exactly the model's handle set.
    ///
    /// # Panics
    ///
    /// Panics with a descriptive message on the first disagreement.
    pub fn assert_matches(&self, pool: &DensePool<T>) {
        assert_eq!(pool.len(), self.live.len(), "live counts disagree");
        for (handle, value) in &self.live {
            assert_eq!(
                pool.get(*handle),
                Some(value),
                "model entry {handle} missing or wrong in pool"
            );
        }
        let mut pool_handles: Vec<Handle> = pool.iter().map(|(h, _)| h).collect();
        let mut model_handles: Vec<Handle> = self.live.keys().copied().collect();
        pool_handles.sort_unstable();
        model_handles.sort_unstable();
        assert_eq!(pool_handles, model_handles, "iteration sets disagree");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_tracks_a_dense_pool() {
        let mut pool = DensePool::with_capacity(8).unwrap();
        let mut model = ModelPool::new();

        for value in 0..5u32 {
            let handle = pool.insert(value).unwrap();
            model.record_insert(handle, value);
        }
        model.assert_matches(&pool);

        let (handle, expected) = model.remove_nth(2).unwrap();
        assert_eq!(pool.remove(handle), Ok(expected));
        model.assert_matches(&pool);
    }

    #[test]
    #[should_panic(expected = "issued twice")]
    fn duplicate_handle_is_rejected() {
        let mut model = ModelPool::new();
        model.record_insert(Handle::new(0, 0), 1u8);
        model.record_insert(Handle::new(0, 0), 2u8);
    }
}
