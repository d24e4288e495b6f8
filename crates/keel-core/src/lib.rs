//! Core handle types for the Keel engine object subsystem.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! packed [`Handle`] type that every subsystem uses to refer to pooled
//! objects and resources: render-resource tables, the asset cache, scene
//! object storage, and physics bodies all hold `Handle`s rather than
//! indices or pointers.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod handle;

pub use handle::Handle;
