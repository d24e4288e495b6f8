//! Packed generational handles.
//!
//! A [`Handle`] is an opaque 32-bit reference to a pooled object. It packs
//! a slot index into the low 16 bits and a version counter into the high
//! 16 bits. The version lets a table detect use of a handle whose slot has
//! since been freed and reissued, without a lookup table.
//!
//! The 16/16 split is a hard contract: pools are capped at 65 536 slots,
//! and a slot's version wraps after 65 536 reuses (an accepted aliasing
//! window — a handle that survives that many reuse cycles of its own slot
//! will validate against the wrong incarnation).

use std::fmt;

/// Number of bits used for the slot index.
const INDEX_BITS: u32 = 16;
/// Mask covering the slot index in the packed form.
const INDEX_MASK: u32 = (1 << INDEX_BITS) - 1;

/// An opaque 32-bit reference to a pooled object: `{index: 16, version: 16}`.
///
/// Handles are issued by `keel-pool` tables and stay valid until the slot
/// they name is released. A stale handle (released slot, or slot reissued
/// to a new object) is rejected by validity checks rather than resolving
/// to the wrong object.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[must_use]
pub struct Handle(u32);

impl Handle {
    /// The sentinel "points at nothing" handle (all bits set).
    ///
    /// Its index is out of range for every table, so it never validates.
    pub const NONE: Handle = Handle(u32::MAX);

    /// Largest slot index a handle can address.
    pub const MAX_INDEX: u16 = u16::MAX;

    /// Pack an index/version pair into a handle.
    pub fn new(index: u16, version: u16) -> Self {
        Self((u32::from(version) << INDEX_BITS) | u32::from(index))
    }

    /// The slot index this handle addresses.
    pub fn index(self) -> u16 {
        (self.0 & INDEX_MASK) as u16
    }

    /// The version the slot had when this handle was issued.
    pub fn version(self) -> u16 {
        (self.0 >> INDEX_BITS) as u16
    }

    /// The packed 32-bit form.
    ///
    /// Stable across process runs; suitable for stuffing into GPU-side
    /// per-draw data or script-side integers.
    pub fn bits(self) -> u32 {
        self.0
    }

    /// Rebuild a handle from its packed form.
    ///
    /// Accepts any bit pattern — a forged or corrupted value is caught by
    /// the owning table's validity check, not here.
    pub fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// Whether this is the [`Handle::NONE`] sentinel.
    pub fn is_none(self) -> bool {
        self.0 == u32::MAX
    }

    /// Whether this is anything other than the [`Handle::NONE`] sentinel.
    pub fn is_some(self) -> bool {
        !self.is_none()
    }
}

impl Default for Handle {
    fn default() -> Self {
        Handle::NONE
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_none() {
            write!(f, "Handle(none)")
        } else {
            write!(f, "Handle(index={}, version={})", self.index(), self.version())
        }
    }
}
