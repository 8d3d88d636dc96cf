//! Buffer Lifecycle Notifications
//!
//! Derived statistics (running sums, min/max trackers, filters) live outside
//! the buffer. They implement [`BufferObserver`] and get told about every
//! mutation as it happens, so they can update incrementally instead of
//! rescanning the ring.
//!
//! ## Ordering
//!
//! Hooks run synchronously, after storage has been updated and before the
//! mutating call returns:
//!
//! ```text
//! read()/push()  → on_new_value      (fill phase)
//!                → on_replace_value  (overwrite phase)
//! clear()/resize → on_reset, then on_flush
//! ```
//!
//! ## Example
//!
//! ```rust
//! use analogbuf_core::{Sample, traits::BufferObserver};
//!
//! #[derive(Default)]
//! struct RunningSum {
//!     total: i64,
//! }
//!
//! impl BufferObserver for RunningSum {
//!     fn on_new_value(&mut self, value: Sample, _index: u8) {
//!         self.total += value as i64;
//!     }
//!
//!     fn on_replace_value(&mut self, old: Sample, new: Sample, _index: u8) {
//!         self.total += new as i64 - old as i64;
//!     }
//!
//!     fn on_reset(&mut self) {
//!         self.total = 0;
//!     }
//! }
//! ```

use crate::Sample;

/// Receiver for buffer mutation events
///
/// Every method defaults to a no-op; implement only what you track.
///
/// An observer is owned by the buffer and only ever sees `&mut self`, so it
/// cannot call back into the buffer mid-mutation. Indices passed to the hooks
/// are physical slot positions, the same values `head_index()` reports.
pub trait BufferObserver {
    /// Slot contents were discarded and zeroed
    fn on_flush(&mut self) {}

    /// A sample landed in a slot that was empty (fill phase)
    fn on_new_value(&mut self, _value: Sample, _index: u8) {}

    /// A sample evicted an older one (overwrite phase)
    fn on_replace_value(&mut self, _old_value: Sample, _new_value: Sample, _index: u8) {}

    /// Count and head returned to zero
    fn on_reset(&mut self) {}
}

/// Observer that ignores every event
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoopObserver;

impl BufferObserver for NoopObserver {}

impl<T: BufferObserver + ?Sized> BufferObserver for &mut T {
    fn on_flush(&mut self) {
        (**self).on_flush()
    }

    fn on_new_value(&mut self, value: Sample, index: u8) {
        (**self).on_new_value(value, index)
    }

    fn on_replace_value(&mut self, old_value: Sample, new_value: Sample, index: u8) {
        (**self).on_replace_value(old_value, new_value, index)
    }

    fn on_reset(&mut self) {
        (**self).on_reset()
    }
}
