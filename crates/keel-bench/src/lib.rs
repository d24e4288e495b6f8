//! Benchmark profiles for the Keel object subsystem.
//!
//! Provides pre-sized churn profiles shared by the bench targets:
//!
//! - [`reference_profile`]: 4K slots, the typical per-subsystem pool size
//! - [`stress_profile`]: 64K slots, the handle layout's addressing limit

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use keel_test_utils::fixtures::ChurnScript;

/// Sizing and workload parameters for a churn benchmark.
#[derive(Clone, Copy, Debug)]
pub struct ChurnProfile {
    /// Pool capacity in slots.
    pub capacity: usize,
    /// Live count the workload hovers around.
    pub live_target: usize,
    /// Number of operations per script.
    pub ops: usize,
    /// Script seed.
    pub seed: u64,
}

impl ChurnProfile {
    /// Generate the deterministic operation script for this profile.
    pub fn script(&self) -> ChurnScript {
        ChurnScript::generate(self.ops, self.live_target, self.seed)
    }
}

/// Reference profile: 4 096 slots at 50% occupancy.
///
/// Matches the typical size of a per-subsystem resource table (textures,
/// meshes, render states).
pub fn reference_profile() -> ChurnProfile {
    ChurnProfile {
        capacity: 4096,
        live_target: 2048,
        ops: 10_000,
        seed: 42,
    }
}

/// Stress profile: the full 65 536 slots a handle can address.
pub fn stress_profile() -> ChurnProfile {
    ChurnProfile {
        capacity: 1 << 16,
        live_target: 1 << 15,
        ops: 100_000,
        seed: 42,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profiles_fit_their_pools() {
        for profile in [reference_profile(), stress_profile()] {
            assert!(profile.live_target <= profile.capacity);
            assert!(profile.capacity <= keel_pool::MAX_SLOTS);
        }
    }

    #[test]
    fn scripts_are_reproducible() {
        let a = reference_profile().script();
        let b = reference_profile().script();
        assert_eq!(a.ops, b.ops);
    }
}
