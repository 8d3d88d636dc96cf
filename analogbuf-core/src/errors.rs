//! Error Types for Capacity Changes
//!
//! ## Design Philosophy
//!
//! Capacity validation is the only fallible operation on the buffer, so the
//! error surface is a single small enum:
//!
//! 1. **Small Size**: every variant carries at most two bytes of payload.
//!
//! 2. **No Heap Allocation**: no strings, no boxed sources. Errors can be
//!    returned from firmware without an allocator.
//!
//! 3. **Copy Semantics**: errors are `Copy` so callers can log them and still
//!    match on them afterwards.
//!
//! The public `resize` API reports failure as a plain `bool` for callers that
//! only care whether the change happened. `try_resize` returns the reason.
//!
//! ```rust
//! use analogbuf_core::{Capacity, CapacityError};
//!
//! match Capacity::new(5) {
//!     Ok(capacity) => { let _ = capacity.get(); }
//!     Err(CapacityError::NotPowerOfTwo { set_bits, .. }) => assert_eq!(set_bits, 2),
//!     Err(_) => unreachable!(),
//! }
//! ```

use thiserror_no_std::Error;

/// Result type for capacity operations
pub type CapacityResult<T> = Result<T, CapacityError>;

/// Reasons a requested buffer capacity was rejected
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum CapacityError {
    /// Requested capacity is smaller than the supported minimum
    #[error("Capacity {requested} below minimum {min}")]
    BelowMinimum {
        /// The capacity that was asked for
        requested: u8,
        /// Smallest accepted capacity
        min: u8,
    },

    /// Requested capacity is larger than the backing storage
    #[error("Capacity {requested} above maximum {max}")]
    AboveMaximum {
        /// The capacity that was asked for
        requested: u8,
        /// Largest accepted capacity
        max: u8,
    },

    /// Requested capacity has more than one bit set
    #[error("Capacity {requested} is not a power of two ({set_bits} bits set)")]
    NotPowerOfTwo {
        /// The capacity that was asked for
        requested: u8,
        /// Number of set bits found in `requested`
        set_bits: u32,
    },
}

impl CapacityError {
    /// The capacity value that was rejected
    pub fn requested(&self) -> u8 {
        match *self {
            Self::BelowMinimum { requested, .. }
            | Self::AboveMaximum { requested, .. }
            | Self::NotPowerOfTwo { requested, .. } => requested,
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for CapacityError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::BelowMinimum { requested, min } => {
                defmt::write!(fmt, "Capacity {} below minimum {}", requested, min)
            }
            Self::AboveMaximum { requested, max } => {
                defmt::write!(fmt, "Capacity {} above maximum {}", requested, max)
            }
            Self::NotPowerOfTwo {
                requested,
                set_bits,
            } => defmt::write!(
                fmt,
                "Capacity {} is not a power of two ({} bits set)",
                requested,
                set_bits
            ),
        }
    }
}
