//! Free-list allocation and generational handle tables for the Keel engine.
//!
//! Every long-lived engine object — loaded assets, render resources, scene
//! objects, physics bodies — lives in one of the pools defined here and is
//! addressed through a stable index or a generation-tagged [`Handle`].
//! The pools are three specialisations of the same idea (a free list
//! threaded through unused slots of a contiguous store) with different
//! trade-offs:
//!
//! ```text
//! HandleTable      sparse slots → dense indices, generation-checked,
//!                  fixed capacity; the caller owns the dense item array
//! FreeListPool<T>  growable pool of Copy records, raw u32 indices
//! ObjectPool<T>    fixed-capacity pool of droppable objects, visitor
//!                  iteration for scene-object clumps
//! DensePool<T>     HandleTable paired with its dense Vec<T>, packaged
//! ```
//!
//! # Safety model
//!
//! None of the pools is thread-safe; each instance is owned and driven by
//! one subsystem (external synchronisation if shared). All fallible
//! operations return [`PoolError`] — stale handles and double frees are
//! rejected, never undefined behaviour.
//!
//! [`Handle`]: keel_core::Handle

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod dense;
pub mod error;
pub mod free_list;
pub mod handle_table;
pub mod object_pool;
mod slot;

pub use dense::DensePool;
pub use error::PoolError;
pub use free_list::FreeListPool;
pub use handle_table::{HandleTable, SwapRemove, MAX_SLOTS};
pub use object_pool::ObjectPool;
