//! Fixed-Capacity Circular Buffer for Analog Samples
//!
//! ## Overview
//!
//! [`CircularSampleBuffer`] wraps a [`SamplePrimitive`] and keeps the most
//! recent `capacity` readings it produced. Every mutation is reported to a
//! [`BufferObserver`], which is where running averages and other derived
//! values belong. The buffer itself only stores and notifies.
//!
//! Storage is a fixed `[Sample; MAX_CAPACITY]` array embedded in the struct.
//! The logical capacity selects a prefix of it and can be changed at runtime
//! with [`resize`](CircularSampleBuffer::resize); no allocation ever happens.
//!
//! ## Fill and Overwrite Phases
//!
//! While the ring is filling, writes are plain appends and `head` tracks
//! `count - 1`. Once `count == capacity` the ring is full and every write
//! moves `head` forward one slot (wrapping) and evicts what was there:
//!
//! ```text
//! capacity 4, after 4 appends          after a 5th append (value E)
//! ┌───┬───┬───┬───┐                    ┌───┬───┬───┬───┐
//! │ A │ B │ C │ D │                    │ E │ B │ C │ D │
//! └───┴───┴───┴───┘                    └───┴───┴───┴───┘
//!               ↑ head = 3               ↑ head = 0, on_replace_value(A, E, 0)
//! ```
//!
//! Early readings are never evicted before the ring is full, and the phase
//! check is a single comparison against the capacity.
//!
//! ## State Machine
//!
//! ```text
//!  Empty ──append──► Filling ──append (count reaches capacity)──► Full
//!    ▲                  │ ▲                                        │ ▲
//!    │                  └─┘ append                         append  └─┘
//!    └──────────────── clear() / resize() from any state ◄──────────┘
//! ```
//!
//! ## Usage Example
//!
//! ```rust
//! use analogbuf_core::{CircularSampleBuffer, sampler::MockSampler};
//!
//! let sampler = MockSampler::<8>::from_slice(&[10, 20, 30]);
//! let mut buffer = CircularSampleBuffer::with_capacity(sampler, 2).unwrap();
//!
//! assert_eq!(buffer.read(), 10);
//! assert_eq!(buffer.read(), 20);
//! assert_eq!(buffer.read(), 30); // evicts 10
//!
//! assert_eq!(buffer.latest(), Some(30));
//! assert!(buffer.iter().eq([20, 30]));
//! ```

use heapless::Vec;

use crate::capacity::Capacity;
use crate::constants::STORAGE_LEN;
use crate::errors::CapacityResult;
use crate::traits::{BufferObserver, NoopObserver, SamplePrimitive};
use crate::Sample;

/// Where the buffer sits in its fill cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FillState {
    /// No samples stored
    Empty,
    /// Some slots populated, still appending
    Filling,
    /// Every slot populated, overwriting the oldest on each write
    Full,
}

/// Point-in-time summary of buffer bookkeeping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BufferStatus {
    /// Current logical capacity
    pub capacity: u8,
    /// Populated slots
    pub count: u8,
    /// Index of the most recent write
    pub head: u8,
    /// Derived fill state
    pub state: FillState,
}

/// Ring buffer of analog samples layered on a sampling primitive
///
/// ## Type Parameters
///
/// - `S`: the [`SamplePrimitive`] that produces readings
/// - `O`: the [`BufferObserver`] notified of mutations, [`NoopObserver`]
///   unless one is attached with [`with_observer`](Self::with_observer)
///
/// ## Internal Invariants
///
/// - `capacity` is a power of two in `[MIN_CAPACITY, MAX_CAPACITY]`
/// - `count <= capacity`
/// - `head < capacity`, and `head == count - 1` during the fill phase
/// - slots at or beyond `count` hold zero
///
/// ## Thread Safety
///
/// Designed for a single cooperative main loop. Share it across interrupt
/// contexts only behind a critical section.
#[derive(Debug, Clone)]
pub struct CircularSampleBuffer<S, O = NoopObserver> {
    storage: [Sample; STORAGE_LEN],
    capacity: Capacity,
    count: u8,
    head: u8,
    sampler: S,
    observer: O,
}

impl<S> CircularSampleBuffer<S, NoopObserver> {
    /// Create an empty buffer at `DEFAULT_CAPACITY`
    pub fn new(sampler: S) -> Self {
        Self::from_parts(sampler, NoopObserver, Capacity::DEFAULT)
    }

    /// Create an empty buffer with a specific capacity
    ///
    /// Fails for the same inputs [`resize`](Self::resize) rejects.
    pub fn with_capacity(sampler: S, capacity: u8) -> CapacityResult<Self> {
        let capacity = Capacity::new(capacity)?;
        Ok(Self::from_parts(sampler, NoopObserver, capacity))
    }
}

impl<S, O> CircularSampleBuffer<S, O> {
    /// Assemble an empty buffer from a sampler, an observer and a capacity
    ///
    /// No notifications fire during construction.
    pub fn from_parts(sampler: S, observer: O, capacity: Capacity) -> Self {
        Self {
            storage: [0; STORAGE_LEN],
            capacity,
            count: 0,
            head: 0,
            sampler,
            observer,
        }
    }

    /// Attach an observer, replacing the current one
    ///
    /// Buffered samples are kept. The new observer only hears about
    /// mutations from now on, so attach it before the first read if it
    /// tracks totals.
    pub fn with_observer<P>(self, observer: P) -> CircularSampleBuffer<S, P> {
        CircularSampleBuffer {
            storage: self.storage,
            capacity: self.capacity,
            count: self.count,
            head: self.head,
            sampler: self.sampler,
            observer,
        }
    }

    /// Swap in an observer of the same type, returning the old one
    pub fn set_observer(&mut self, observer: O) -> O {
        core::mem::replace(&mut self.observer, observer)
    }

    /// Current logical capacity
    pub fn buffer_capacity(&self) -> u8 {
        self.capacity.get()
    }

    /// Current logical capacity as a validated value
    pub fn capacity(&self) -> Capacity {
        self.capacity
    }

    /// Number of populated slots
    pub fn count(&self) -> u8 {
        self.count
    }

    /// Index of the most recently written slot
    ///
    /// Zero on an empty buffer. Observers receive the same index in their
    /// hooks; comparing a cached `head_index()` against a later one is only
    /// meaningful between mutations.
    pub fn head_index(&self) -> u8 {
        self.head
    }

    /// True when no samples are stored
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// True once every slot has been written
    pub fn is_full(&self) -> bool {
        self.count == self.capacity.get()
    }

    /// Position in the fill cycle
    pub fn state(&self) -> FillState {
        if self.is_empty() {
            FillState::Empty
        } else if self.is_full() {
            FillState::Full
        } else {
            FillState::Filling
        }
    }

    /// Snapshot of capacity, count, head and state
    pub fn status(&self) -> BufferStatus {
        BufferStatus {
            capacity: self.capacity.get(),
            count: self.count,
            head: self.head,
            state: self.state(),
        }
    }

    /// Sample at physical slot `index`
    ///
    /// `None` for slots that have not been written since the last reset.
    pub fn get(&self, index: u8) -> Option<Sample> {
        if index < self.count {
            Some(self.storage[index as usize])
        } else {
            None
        }
    }

    /// Populated slots in physical order
    ///
    /// During the fill phase this is also chronological. Once full, the
    /// oldest sample sits just after `head_index()`; use [`iter`](Self::iter)
    /// for chronological order.
    pub fn samples(&self) -> &[Sample] {
        &self.storage[..self.count as usize]
    }

    /// Most recent sample
    pub fn latest(&self) -> Option<Sample> {
        if self.is_empty() {
            return None;
        }
        Some(self.storage[self.head as usize])
    }

    /// Oldest sample still held
    pub fn oldest(&self) -> Option<Sample> {
        self.iter().next()
    }

    /// Iterate from oldest to newest
    pub fn iter(&self) -> Iter<'_> {
        // Full: the slot after head is the oldest. Filling: data starts at 0.
        let start = if self.is_full() {
            self.capacity.wrap(self.head)
        } else {
            0
        };

        Iter {
            storage: &self.storage,
            mask: self.capacity.mask(),
            start,
            position: 0,
            len: self.count,
        }
    }

    /// Copy the samples out in chronological order
    pub fn to_vec(&self) -> Vec<Sample, STORAGE_LEN> {
        self.iter().collect()
    }

    /// Sampling primitive
    pub fn sampler(&self) -> &S {
        &self.sampler
    }

    /// Sampling primitive, mutably (e.g. to enable or disable it)
    pub fn sampler_mut(&mut self) -> &mut S {
        &mut self.sampler
    }

    /// Attached observer
    pub fn observer(&self) -> &O {
        &self.observer
    }

    /// Attached observer, mutably
    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    /// Take the sampler and observer back out
    pub fn into_parts(self) -> (S, O) {
        (self.sampler, self.observer)
    }
}

impl<S, O: BufferObserver> CircularSampleBuffer<S, O> {
    /// Store a sample that was obtained elsewhere
    ///
    /// Runs the append-or-overwrite step without touching the sampler.
    pub fn push(&mut self, value: Sample) {
        let capacity = self.capacity.get();

        if self.count < capacity {
            self.head = self.count;
            self.count += 1;
            self.storage[self.head as usize] = value;

            if self.count == capacity {
                log_trace!("sample buffer full at capacity {}", capacity);
            }

            self.observer.on_new_value(value, self.head);
            return;
        }

        self.head = self.capacity.wrap(self.head);
        let old_value = core::mem::replace(&mut self.storage[self.head as usize], value);

        self.observer.on_replace_value(old_value, value, self.head);
    }

    /// Empty the buffer, keeping the current capacity
    ///
    /// Equivalent to resizing to the current capacity.
    pub fn clear(&mut self) {
        log_debug!("clearing sample buffer at capacity {}", self.capacity);
        self.reinitialize(self.capacity);
    }

    /// Change the capacity, discarding all samples
    ///
    /// Returns `false` and leaves the buffer untouched when `new_capacity`
    /// is out of range or not a power of two.
    pub fn resize(&mut self, new_capacity: u8) -> bool {
        self.try_resize(new_capacity).is_ok()
    }

    /// Change the capacity, reporting why a request was rejected
    pub fn try_resize(&mut self, new_capacity: u8) -> CapacityResult<()> {
        let capacity = Capacity::new(new_capacity).inspect_err(|err| {
            log_warn!("rejected sample buffer capacity {}", err.requested());
        })?;

        log_debug!("resizing sample buffer {} -> {}", self.capacity, capacity);
        self.reinitialize(capacity);
        Ok(())
    }

    fn reinitialize(&mut self, capacity: Capacity) {
        self.capacity = capacity;

        self.count = 0;
        self.head = 0;
        self.observer.on_reset();

        // Zero the whole array so a later grow never exposes stale data
        self.storage = [0; STORAGE_LEN];
        self.observer.on_flush();
    }
}

impl<S: SamplePrimitive, O: BufferObserver> CircularSampleBuffer<S, O> {
    /// Take a reading and buffer it
    ///
    /// When the sampler is disabled this returns its last value and the
    /// buffer is left alone: no append, no notification.
    pub fn read(&mut self) -> Sample {
        if !self.sampler.is_enabled() {
            return self.sampler.last_value();
        }

        let value = self.sampler.read();
        self.push(value);
        value
    }
}

/// Chronological iterator over buffered samples
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    storage: &'a [Sample; STORAGE_LEN],
    mask: u8,
    start: u8,
    position: u8,
    len: u8,
}

impl<'a> Iterator for Iter<'a> {
    type Item = Sample;

    fn next(&mut self) -> Option<Self::Item> {
        if self.position >= self.len {
            return None;
        }

        let index = self.start.wrapping_add(self.position) & self.mask;
        self.position += 1;
        Some(self.storage[index as usize])
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.len - self.position) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl<'a, S, O> IntoIterator for &'a CircularSampleBuffer<S, O> {
    type Item = Sample;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sampler::MockSampler;
    use std::vec::Vec as StdVec;

    #[derive(Debug, Clone, PartialEq)]
    enum Note {
        Flush,
        New(Sample, u8),
        Replace(Sample, Sample, u8),
        Reset,
    }

    #[derive(Default)]
    struct Recorder {
        notes: StdVec<Note>,
    }

    impl BufferObserver for Recorder {
        fn on_flush(&mut self) {
            self.notes.push(Note::Flush);
        }

        fn on_new_value(&mut self, value: Sample, index: u8) {
            self.notes.push(Note::New(value, index));
        }

        fn on_replace_value(&mut self, old_value: Sample, new_value: Sample, index: u8) {
            self.notes.push(Note::Replace(old_value, new_value, index));
        }

        fn on_reset(&mut self) {
            self.notes.push(Note::Reset);
        }
    }

    fn recording(capacity: u8) -> CircularSampleBuffer<MockSampler<4>, Recorder> {
        CircularSampleBuffer::with_capacity(MockSampler::new(), capacity)
            .unwrap()
            .with_observer(Recorder::default())
    }

    #[test]
    fn empty_buffer() {
        let buffer = CircularSampleBuffer::new(MockSampler::<4>::new());

        assert_eq!(buffer.buffer_capacity(), 32);
        assert_eq!(buffer.count(), 0);
        assert_eq!(buffer.head_index(), 0);
        assert_eq!(buffer.state(), FillState::Empty);
        assert!(buffer.latest().is_none());
        assert!(buffer.oldest().is_none());
        assert!(buffer.samples().is_empty());
    }

    #[test]
    fn fill_phase_appends_in_order() {
        let mut buffer = recording(4);

        for value in [7, 8, 9] {
            buffer.push(value);
            assert_eq!(buffer.head_index(), buffer.count() - 1);
        }

        assert_eq!(buffer.samples(), &[7, 8, 9]);
        assert_eq!(buffer.state(), FillState::Filling);
        assert_eq!(
            buffer.observer().notes,
            [Note::New(7, 0), Note::New(8, 1), Note::New(9, 2)]
        );
    }

    #[test]
    fn scenario_default_capacity_wraps_to_slot_zero() {
        let mut buffer = CircularSampleBuffer::new(MockSampler::<4>::new())
            .with_observer(Recorder::default());

        for value in 0..32 {
            buffer.push(value);
        }

        assert!(buffer.samples().iter().copied().eq(0..32));
        assert_eq!(buffer.head_index(), 31);
        assert_eq!(buffer.count(), 32);
        assert_eq!(buffer.state(), FillState::Full);

        buffer.push(100);

        assert_eq!(buffer.get(0), Some(100));
        assert_eq!(buffer.head_index(), 0);
        assert_eq!(buffer.count(), 32);
        assert_eq!(
            buffer.observer().notes.last(),
            Some(&Note::Replace(0, 100, 0))
        );
    }

    #[test]
    fn overwrite_phase_evicts_oldest() {
        let mut buffer = recording(2);
        for value in 1..=5 {
            buffer.push(value);
        }

        assert_eq!(buffer.count(), 2);
        assert_eq!(buffer.to_vec().as_slice(), &[4, 5]);
        assert_eq!(buffer.oldest(), Some(4));
        assert_eq!(buffer.latest(), Some(5));
        assert_eq!(
            buffer.observer().notes,
            [
                Note::New(1, 0),
                Note::New(2, 1),
                Note::Replace(1, 3, 0),
                Note::Replace(2, 4, 1),
                Note::Replace(3, 5, 0),
            ]
        );
    }

    #[test]
    fn clear_zeroes_and_notifies_reset_then_flush() {
        let mut buffer = recording(4);
        for value in 1..=6 {
            buffer.push(value);
        }
        buffer.observer_mut().notes.clear();

        buffer.clear();

        assert_eq!(buffer.buffer_capacity(), 4);
        assert_eq!(
            buffer.status(),
            BufferStatus {
                capacity: 4,
                count: 0,
                head: 0,
                state: FillState::Empty,
            }
        );
        assert!(buffer.storage.iter().all(|&slot| slot == 0));
        assert_eq!(buffer.observer().notes, [Note::Reset, Note::Flush]);
    }

    #[test]
    fn resize_accepts_powers_of_two() {
        let mut buffer = recording(4);
        buffer.push(42);

        assert!(buffer.resize(64));
        assert_eq!(buffer.buffer_capacity(), 64);
        assert!(buffer.is_empty());
        assert_eq!(buffer.get(0), None);
    }

    #[test]
    fn resize_zeroes_every_slot_and_notifies_reset_then_flush() {
        let mut buffer = recording(128);
        for value in 1..=128 {
            buffer.push(value);
        }
        assert_eq!(buffer.state(), FillState::Full);
        buffer.observer_mut().notes.clear();

        assert!(buffer.resize(4));
        assert_eq!(buffer.observer().notes, [Note::Reset, Note::Flush]);

        assert!(buffer.resize(128));
        assert_eq!(buffer.capacity(), Capacity::MAX);
        assert!(buffer.is_empty());
        assert!(buffer.storage.iter().all(|&s| s == 0));
        assert_eq!(
            buffer.observer().notes,
            [Note::Reset, Note::Flush, Note::Reset, Note::Flush]
        );
    }

    #[test]
    fn rejected_resize_leaves_buffer_untouched() {
        let mut buffer = recording(4);
        for value in 1..=5 {
            buffer.push(value);
        }
        let before = buffer.status();
        let contents = buffer.to_vec();
        let notes = buffer.observer().notes.len();

        for request in [0, 1, 3, 5, 129, 255] {
            assert!(
                !buffer.resize(request),
                "capacity {request} should be rejected"
            );
        }

        assert_eq!(buffer.status(), before);
        assert_eq!(buffer.to_vec(), contents);
        assert_eq!(buffer.observer().notes.len(), notes);
    }

    #[test]
    fn disabled_sampler_returns_last_value_without_buffering() {
        let sampler = MockSampler::<4>::from_slice(&[11, 22]);
        let mut buffer = CircularSampleBuffer::with_capacity(sampler, 4)
            .unwrap()
            .with_observer(Recorder::default());

        assert_eq!(buffer.read(), 11);
        buffer.sampler_mut().disable();

        assert_eq!(buffer.read(), 11);
        assert_eq!(buffer.count(), 1);
        assert_eq!(buffer.observer().notes, [Note::New(11, 0)]);
        assert_eq!(buffer.sampler().reads(), 1);

        buffer.sampler_mut().enable();
        assert_eq!(buffer.read(), 22);
        assert_eq!(buffer.count(), 2);
    }

    #[test]
    fn set_observer_returns_previous() {
        let mut buffer = recording(2);
        buffer.push(1);

        let old = buffer.set_observer(Recorder::default());
        buffer.push(2);

        assert_eq!(old.notes, [Note::New(1, 0)]);
        assert_eq!(buffer.observer().notes, [Note::New(2, 1)]);
    }

    #[test]
    fn into_parts_hands_back_collaborators() {
        let sampler = MockSampler::<4>::from_slice(&[3, 4]);
        let mut buffer = CircularSampleBuffer::with_capacity(sampler, 2)
            .unwrap()
            .with_observer(Recorder::default());
        buffer.read();

        let (sampler, observer) = buffer.into_parts();
        assert_eq!(sampler.remaining(), 1);
        assert_eq!(observer.notes, [Note::New(3, 0)]);
    }

    #[test]
    fn iterator_reports_exact_length() {
        let mut buffer = recording(8);
        for value in 0..11 {
            buffer.push(value);
        }

        let iter = buffer.iter();
        assert_eq!(iter.len(), 8);
        assert!((&buffer).into_iter().eq(3..11));
    }
}
