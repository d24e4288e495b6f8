//! Pool-specific error types.

use std::error::Error;
use std::fmt;

use keel_core::Handle;

/// Errors that can occur during pool and handle-table operations.
///
/// All variants are recoverable by the caller: a full pool can be grown
/// differently or reported as a load failure, and a stale handle or double
/// free indicates the caller's bookkeeping is wrong without corrupting the
/// pool's own state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PoolError {
    /// The pool is full — every slot is live.
    CapacityExceeded {
        /// Total number of slots in the pool.
        capacity: usize,
    },
    /// A requested capacity exceeds what the handle layout can address.
    CapacityTooLarge {
        /// Number of slots requested.
        requested: usize,
        /// Largest supported slot count.
        max: usize,
    },
    /// A handle whose slot has been released (or reissued) since the
    /// handle was created.
    StaleHandle {
        /// The offending handle.
        handle: Handle,
    },
    /// An index that names a slot which is already free.
    DoubleFree {
        /// The offending slot index.
        index: u32,
    },
    /// An index past the end of the pool's slot array.
    OutOfBounds {
        /// The offending index.
        index: u32,
        /// Number of slots in the pool.
        capacity: usize,
    },
}

impl fmt::Display for PoolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CapacityExceeded { capacity } => {
                write!(f, "pool is full: all {capacity} slots are live")
            }
            Self::CapacityTooLarge { requested, max } => {
                write!(
                    f,
                    "requested capacity {requested} exceeds the addressable maximum {max}"
                )
            }
            Self::StaleHandle { handle } => {
                write!(f, "stale handle: {handle}")
            }
            Self::DoubleFree { index } => {
                write!(f, "slot {index} is already free")
            }
            Self::OutOfBounds { index, capacity } => {
                write!(f, "index {index} is out of bounds for a pool of {capacity} slots")
            }
        }
    }
}

impl Error for PoolError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_capacity() {
        let e = PoolError::CapacityExceeded { capacity: 4 };
        assert_eq!(e.to_string(), "pool is full: all 4 slots are live");
    }

    #[test]
    fn display_stale_handle() {
        let e = PoolError::StaleHandle {
            handle: Handle::new(3, 1),
        };
        assert_eq!(e.to_string(), "stale handle: Handle(index=3, version=1)");
    }

    #[test]
    fn display_double_free() {
        let e = PoolError::DoubleFree { index: 9 };
        assert_eq!(e.to_string(), "slot 9 is already free");
    }
}
