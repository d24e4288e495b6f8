//! Deterministic churn scripts and pre-fragmented pool fixtures.
//!
//! Benches and stress tests need realistic alloc/free interleavings that
//! are identical from run to run. A [`ChurnScript`] is generated from a
//! seeded [`ChaCha8Rng`], so two runs with the same seed drive the exact
//! same operations.

use keel_pool::ObjectPool;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// One step of a churn workload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChurnOp {
    /// Insert the given payload.
    Insert(u64),
    /// Remove the n-th live entry (modulo the current live count).
    RemoveNth(usize),
}

/// A reproducible sequence of [`ChurnOp`]s.
#[derive(Clone, Debug)]
pub struct ChurnScript {
    pub ops: Vec<ChurnOp>,
}

impl ChurnScript {
    /// Generate `len` operations that hover around `live_target` live
    /// entries: below the target the script mostly inserts, at or above
    /// it the mix is even.
    pub fn generate(len: usize, live_target: usize, seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        let mut ops = Vec::with_capacity(len);
        let mut live_estimate = 0usize;
        for _ in 0..len {
            let insert = if live_estimate < live_target {
                rng.random_range(0..4) != 0 // 75% inserts while filling up
            } else {
                rng.random_bool(0.5)
            };
            if insert {
                ops.push(ChurnOp::Insert(rng.random()));
                live_estimate += 1;
            } else {
                ops.push(ChurnOp::RemoveNth(rng.random::<u64>() as usize));
                live_estimate = live_estimate.saturating_sub(1);
            }
        }
        Self { ops }
    }
}

/// Build an [`ObjectPool`] of `capacity` slots where every `stride`-th
/// slot has been freed, leaving a predictable pattern of holes for
/// iteration benchmarks.
///
/// # Panics
///
/// Panics if `stride` is zero or `capacity` exceeds what a `u32` index
/// can address.
pub fn object_pool_with_holes(capacity: usize, stride: usize) -> ObjectPool<u64> {
    assert!(stride > 0, "stride must be nonzero");
    let mut pool = ObjectPool::with_capacity(capacity).expect("capacity fits u32 indexing");
    for i in 0..capacity {
        pool.insert(i as u64).expect("pool sized to hold every insert");
    }
    for i in (0..capacity).step_by(stride) {
        pool.remove(i as u32).expect("slot was inserted above");
    }
    pool
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripts_are_deterministic() {
        let a = ChurnScript::generate(200, 50, 42);
        let b = ChurnScript::generate(200, 50, 42);
        assert_eq!(a.ops, b.ops);
    }

    #[test]
    fn different_seeds_differ() {
        let a = ChurnScript::generate(200, 50, 1);
        let b = ChurnScript::generate(200, 50, 2);
        assert_ne!(a.ops, b.ops);
    }

    #[test]
    fn holes_follow_the_stride() {
        let pool = object_pool_with_holes(16, 4);
        assert_eq!(pool.live_count(), 12);
        assert_eq!(pool.get(0), None);
        assert_eq!(pool.get(4), None);
        assert_eq!(pool.get(5), Some(&5));
    }

    #[test]
    fn script_hovers_near_target() {
        let script = ChurnScript::generate(1000, 100, 7);
        let inserts = script
            .ops
            .iter()
            .filter(|op| matches!(op, ChurnOp::Insert(_)))
            .count();
        // More inserts than removals overall, but not all inserts.
        assert!(inserts > 400 && inserts < 900, "insert count {inserts}");
    }
}
