//! Keel: object pools and generational handle tables for real-time 3D
//! games.
//!
//! This is the facade crate for the Keel object subsystem. It re-exports
//! the public API of the sub-crates; for most users adding `keel` as a
//! single dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use keel::prelude::*;
//!
//! // A pool of loaded meshes, addressed by stable handles.
//! let mut meshes: DensePool<String> = DensePool::with_capacity(1024)?;
//!
//! let cube = meshes.insert("cube.mesh".to_string())?;
//! let ship = meshes.insert("ship.mesh".to_string())?;
//!
//! // Handles survive any number of other insertions and removals.
//! meshes.remove(cube)?;
//! assert_eq!(meshes.get(ship).map(String::as_str), Some("ship.mesh"));
//!
//! // A stale handle is rejected, never misresolved.
//! assert!(meshes.get(cube).is_none());
//! assert!(matches!(meshes.remove(cube), Err(PoolError::StaleHandle { .. })));
//! # Ok::<(), PoolError>(())
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `keel-core` | The packed [`prelude::Handle`] type |
//! | [`pool`] | `keel-pool` | `HandleTable`, `FreeListPool`, `ObjectPool`, `DensePool` |
//!
//! # Choosing a pool
//!
//! - [`prelude::DensePool`] — handle-addressed storage with gap-free
//!   items; the default choice for assets and resources.
//! - [`pool::HandleTable`] — the same addressing scheme when the caller
//!   must own the dense array (side tables keyed by dense index).
//! - [`prelude::FreeListPool`] — growable raw-index pool of `Copy`
//!   records; no staleness detection.
//! - [`prelude::ObjectPool`] — fixed-capacity pool of droppable objects
//!   with visitor iteration, for scene-object clumps.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core handle types (`keel-core`).
pub use keel_core as types;

/// Pools and handle tables (`keel-pool`).
pub use keel_pool as pool;

/// Common imports for typical usage.
///
/// ```rust
/// use keel::prelude::*;
/// ```
pub mod prelude {
    pub use keel_core::Handle;
    pub use keel_pool::{DensePool, FreeListPool, HandleTable, ObjectPool, PoolError, SwapRemove};
}
