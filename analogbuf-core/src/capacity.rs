//! Validated buffer capacity
//!
//! A [`Capacity`] can only be built from a value that is a power of two
//! inside `[MIN_CAPACITY, MAX_CAPACITY]`. Holding one is proof that index
//! arithmetic on the ring is in range, so the buffer never re-checks it.
//!
//! ## Power-of-two test
//!
//! The check counts set bits by repeatedly clearing the lowest one
//! (`v &= v - 1`) until the value reaches zero. A power of two needs exactly
//! one clearing step. This is Kernighan's method and runs in as many
//! iterations as there are set bits, at most eight for a `u8`.
//!
//! ```text
//! 12 = 0b1100 → 0b1000 → 0b0000   two steps, rejected
//!  8 = 0b1000 → 0b0000            one step, accepted
//! ```
//!
//! ## Wrap-around
//!
//! Because the capacity is a power of two, `(i + 1) % capacity` and
//! `(i + 1) & (capacity - 1)` agree for every `i < capacity`. [`Capacity::wrap`]
//! uses the mask.

use crate::constants::{DEFAULT_CAPACITY, MAX_CAPACITY, MIN_CAPACITY};
use crate::errors::{CapacityError, CapacityResult};

/// Count the set bits of `value` by clearing the lowest one per iteration
pub const fn set_bit_count(value: u8) -> u32 {
    let mut remaining = value;
    let mut count = 0;
    while remaining != 0 {
        remaining &= remaining - 1;
        count += 1;
    }
    count
}

/// Check whether `value` would be accepted as a buffer capacity
pub const fn is_valid_capacity(value: u8) -> bool {
    value >= Capacity::MIN.get() && value <= Capacity::MAX.get() && set_bit_count(value) == 1
}

/// Logical capacity of a sample buffer
///
/// Always a power of two within `[MIN_CAPACITY, MAX_CAPACITY]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Capacity(u8);

impl Capacity {
    /// Capacity used by freshly constructed buffers
    pub const DEFAULT: Self = Self(DEFAULT_CAPACITY);

    /// Smallest accepted capacity
    pub const MIN: Self = Self(MIN_CAPACITY);

    /// Largest accepted capacity
    pub const MAX: Self = Self(MAX_CAPACITY);

    /// Validate a requested capacity
    ///
    /// Range is checked before the bit count so that `0` and `1` report
    /// `BelowMinimum` rather than a bit-count failure.
    pub const fn new(value: u8) -> CapacityResult<Self> {
        if value > MAX_CAPACITY {
            return Err(CapacityError::AboveMaximum {
                requested: value,
                max: MAX_CAPACITY,
            });
        }
        if value < MIN_CAPACITY {
            return Err(CapacityError::BelowMinimum {
                requested: value,
                min: MIN_CAPACITY,
            });
        }

        let set_bits = set_bit_count(value);
        if set_bits != 1 {
            return Err(CapacityError::NotPowerOfTwo {
                requested: value,
                set_bits,
            });
        }

        Ok(Self(value))
    }

    /// Raw capacity value
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Bit mask equivalent to `% capacity`
    pub const fn mask(self) -> u8 {
        self.0 - 1
    }

    /// Index that follows `index` on the ring
    pub const fn wrap(self, index: u8) -> u8 {
        index.wrapping_add(1) & self.mask()
    }
}

impl Default for Capacity {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<u8> for Capacity {
    type Error = CapacityError;

    fn try_from(value: u8) -> CapacityResult<Self> {
        Self::new(value)
    }
}

impl From<Capacity> for u8 {
    fn from(capacity: Capacity) -> u8 {
        capacity.get()
    }
}

impl core::fmt::Display for Capacity {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Capacity {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "Capacity({})", self.0)
    }
}
