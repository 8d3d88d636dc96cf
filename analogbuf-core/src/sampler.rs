//! Sampling primitives
//!
//! Ready-made [`SamplePrimitive`] implementations:
//!
//! - [`BlockingSampler`] - turns a non-blocking [`Conversion`] (an ADC
//!   channel, typically) into a primitive by spinning until the result is
//!   ready
//! - [`MockSampler`] - replays a scripted sequence; for host tests and demos

use heapless::Deque;

use crate::traits::{Conversion, SamplePrimitive};
use crate::Sample;

/// Adapts a [`Conversion`] into a [`SamplePrimitive`]
///
/// Each `read()` polls the conversion with `nb::block!`. A peripheral error
/// is counted and logged, and the previous value is returned in place of a
/// fresh one, so the buffer keeps running on flaky hardware.
///
/// ```rust
/// use analogbuf_core::{CircularSampleBuffer, sampler::{BlockingSampler, conversion_fn}};
///
/// let mut next = 0;
/// let adc = conversion_fn(move || -> nb::Result<i32, ()> {
///     next += 1;
///     Ok(next)
/// });
///
/// let mut buffer = CircularSampleBuffer::new(BlockingSampler::new(adc));
/// assert_eq!(buffer.read(), 1);
/// assert_eq!(buffer.read(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct BlockingSampler<C> {
    conversion: C,
    enabled: bool,
    last: Sample,
    failures: u32,
}

impl<C> BlockingSampler<C> {
    /// Wrap a conversion; sampling starts enabled with a last value of zero
    pub fn new(conversion: C) -> Self {
        Self {
            conversion,
            enabled: true,
            last: 0,
            failures: 0,
        }
    }

    /// Resume sampling
    pub fn enable(&mut self) {
        self.enabled = true;
    }

    /// Stop sampling; reads return the last value
    pub fn disable(&mut self) {
        self.enabled = false;
    }

    /// Set the enable flag
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Number of conversions that ended in a peripheral error
    pub fn failures(&self) -> u32 {
        self.failures
    }

    /// Underlying conversion
    pub fn conversion_mut(&mut self) -> &mut C {
        &mut self.conversion
    }

    /// Unwrap the conversion
    pub fn into_inner(self) -> C {
        self.conversion
    }
}

impl<C: Conversion> SamplePrimitive for BlockingSampler<C> {
    fn read(&mut self) -> Sample {
        match nb::block!(self.conversion.poll_conversion()) {
            Ok(sample) => {
                self.last = sample;
            }
            Err(_) => {
                self.failures = self.failures.saturating_add(1);
                log_warn!("analog conversion failed, holding last value {}", self.last);
            }
        }
        self.last
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn last_value(&self) -> Sample {
        self.last
    }
}

/// [`Conversion`] backed by a closure, see [`conversion_fn`]
#[derive(Debug, Clone)]
pub struct FnConversion<F>(F);

/// Build a [`Conversion`] from a polling closure
pub fn conversion_fn<F, E>(poll: F) -> FnConversion<F>
where
    F: FnMut() -> nb::Result<Sample, E>,
{
    FnConversion(poll)
}

impl<F, E> Conversion for FnConversion<F>
where
    F: FnMut() -> nb::Result<Sample, E>,
{
    type Error = E;

    fn poll_conversion(&mut self) -> nb::Result<Sample, Self::Error> {
        (self.0)()
    }
}

/// Scripted sampler holding up to `N` pending samples
///
/// `read()` pops the next scripted value. Once the script runs dry it keeps
/// returning the last value produced.
#[derive(Debug, Clone)]
pub struct MockSampler<const N: usize> {
    script: Deque<Sample, N>,
    enabled: bool,
    last: Sample,
    reads: u32,
}

impl<const N: usize> MockSampler<N> {
    /// Empty script, enabled, last value zero
    pub fn new() -> Self {
        Self {
            script: Deque::new(),
            enabled: true,
            last: 0,
            reads: 0,
        }
    }

    /// Script the given samples; anything past `N` is dropped
    pub fn from_slice(samples: &[Sample]) -> Self {
        let mut sampler = Self::new();
        for &sample in samples.iter().take(N) {
            // take(N) keeps this within capacity
            let _ = sampler.script.push_back(sample);
        }
        sampler
    }

    /// Queue another sample, handing it back if the script is full
    pub fn queue(&mut self, sample: Sample) -> Result<(), Sample> {
        self.script.push_back(sample)
    }

    /// Samples still waiting to be read
    pub fn remaining(&self) -> usize {
        self.script.len()
    }

    /// Number of times `read()` was called
    pub fn reads(&self) -> u32 {
        self.reads
    }

    /// Resume sampling
    pub fn enable(&mut self) {
        self.enabled = true;
    }

    /// Stop sampling
    pub fn disable(&mut self) {
        self.enabled = false;
    }
}

impl<const N: usize> Default for MockSampler<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> SamplePrimitive for MockSampler<N> {
    fn read(&mut self) -> Sample {
        self.reads += 1;
        if let Some(sample) = self.script.pop_front() {
            self.last = sample;
        }
        self.last
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn last_value(&self) -> Sample {
        self.last
    }
}
