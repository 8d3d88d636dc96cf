//! Sampling Capability Traits
//!
//! The buffer never touches hardware. It is generic over a
//! [`SamplePrimitive`] that performs the actual analog read, reports
//! whether sampling is enabled, and remembers the last value it produced.
//!
//! Peripherals that start a conversion and finish it later can implement the
//! lower-level [`Conversion`] trait instead and be wrapped in
//! [`BlockingSampler`](crate::sampler::BlockingSampler).

use crate::Sample;

/// Source of raw analog readings
///
/// ## Contract
///
/// - `read()` performs one sample and must leave `last_value()` equal to
///   the value it returned
/// - `read()` is never called by the buffer while `is_enabled()` is false
/// - Failures are the implementation's concern; `read()` always yields a
///   value, typically the previous one when the hardware misbehaves
///
/// ## Example Implementation
///
/// ```rust
/// use analogbuf_core::{Sample, traits::SamplePrimitive};
///
/// struct ThermistorPin {
///     enabled: bool,
///     last: Sample,
/// }
///
/// impl SamplePrimitive for ThermistorPin {
///     fn read(&mut self) -> Sample {
///         // Trigger the ADC and wait for the result here
///         self.last = 512;
///         self.last
///     }
///
///     fn is_enabled(&self) -> bool {
///         self.enabled
///     }
///
///     fn last_value(&self) -> Sample {
///         self.last
///     }
/// }
/// ```
pub trait SamplePrimitive {
    /// Take one reading from the hardware
    fn read(&mut self) -> Sample;

    /// Whether sampling is currently enabled
    fn is_enabled(&self) -> bool;

    /// Most recent value produced by `read()`
    fn last_value(&self) -> Sample;
}

impl<T: SamplePrimitive + ?Sized> SamplePrimitive for &mut T {
    fn read(&mut self) -> Sample {
        (**self).read()
    }

    fn is_enabled(&self) -> bool {
        (**self).is_enabled()
    }

    fn last_value(&self) -> Sample {
        (**self).last_value()
    }
}

/// Non-blocking analog conversion
///
/// Mirrors the usual ADC flow: the first poll starts a conversion and
/// returns `WouldBlock` until the result is ready.
///
/// - `Ok(sample)` - conversion finished
/// - `Err(nb::Error::WouldBlock)` - still converting, poll again
/// - `Err(nb::Error::Other(e))` - peripheral fault
pub trait Conversion {
    /// Peripheral error type
    type Error;

    /// Poll the running conversion, starting one if idle
    fn poll_conversion(&mut self) -> nb::Result<Sample, Self::Error>;
}
