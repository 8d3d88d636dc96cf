//! Buffered analog reads for microcontroller firmware
//!
//! Keeps the most recent N readings from an analog input in a fixed-size
//! ring and tells an observer about every change, so averages and filters
//! can be maintained incrementally on top of it.
//!
//! Key constraints:
//! - No heap allocation, storage is a fixed 128-slot array
//! - Capacity is a power of two in `[2, 128]`, changeable at runtime
//! - Every operation is synchronous and bounded
//!
//! ```no_run
//! use analogbuf_core::{CircularSampleBuffer, sampler::MockSampler};
//!
//! let mut buffer = CircularSampleBuffer::new(MockSampler::<16>::from_slice(&[512, 515, 509]));
//!
//! // Call once per loop iteration
//! let value = buffer.read();
//!
//! if !buffer.resize(16) {
//!     // Capacity rejected, buffer unchanged
//! }
//! ```

#![cfg_attr(not(any(feature = "std", test)), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

#[macro_use]
mod macros;

pub mod buffer;
pub mod capacity;
pub mod constants;
pub mod errors;
pub mod sampler;
pub mod traits;

/// A single raw analog reading
pub type Sample = i32;

// Public API
pub use buffer::{BufferStatus, CircularSampleBuffer, FillState};
pub use capacity::{is_valid_capacity, set_bit_count, Capacity};
pub use errors::{CapacityError, CapacityResult};
pub use traits::{BufferObserver, NoopObserver, SamplePrimitive};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
