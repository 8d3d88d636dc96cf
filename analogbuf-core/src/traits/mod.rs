//! Core Traits and Abstractions
//!
//! The buffer sits between two collaborators and talks to both through
//! traits:
//!
//! - [`sampler`] - where samples come from ([`SamplePrimitive`], [`Conversion`])
//! - [`observer`] - who hears about mutations ([`BufferObserver`])
//!
//! Both are static-dispatch type parameters on the buffer, so a firmware
//! build monomorphises to direct calls with no vtables.

pub mod observer;
pub mod sampler;

pub use observer::{BufferObserver, NoopObserver};
pub use sampler::{Conversion, SamplePrimitive};
