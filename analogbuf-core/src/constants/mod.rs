//! Constants for analogbuf
//!
//! Centralised compile-time configuration. The buffer has no runtime
//! configuration file; firmware picks a capacity at construction or
//! through `resize`, bounded by the values defined here.

/// Buffer sizes and capacity bounds.
pub mod buffers;

pub use buffers::{DEFAULT_CAPACITY, MAX_CAPACITY, MIN_CAPACITY, STORAGE_LEN};
