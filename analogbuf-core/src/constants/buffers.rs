//! Buffer Capacity Bounds
//!
//! This module defines the capacity limits for the sample ring buffer.
//! All three values are fixed at compile time; the storage array is always
//! `MAX_CAPACITY` slots long and the logical capacity selects a prefix of it.

// ===== CAPACITY LIMITS =====

/// Largest logical capacity a buffer may be resized to.
///
/// Sized for 8-bit AVR class parts:
/// - 128 samples × 4 bytes/sample = 512 bytes of storage
/// - Still addressable with a `u8` index
/// - Covers ~1.3 s of history at 100 Hz sampling
pub const MAX_CAPACITY: u8 = 128;

/// Smallest logical capacity a buffer may be resized to.
///
/// A one-slot ring has no history to speak of, so two is the floor.
pub const MIN_CAPACITY: u8 = 2;

/// Capacity a freshly constructed buffer starts with.
///
/// - 32 samples × 4 bytes/sample = 128 bytes in use
/// - A good default window for running averages on noisy ADC pins
pub const DEFAULT_CAPACITY: u8 = 32;

/// Length of the backing storage array.
pub const STORAGE_LEN: usize = MAX_CAPACITY as usize;
