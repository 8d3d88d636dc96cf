//! Shared observers and fixtures for integration tests
//!
//! - `EventLog` records every notification in order
//! - `RunningSum` keeps an incremental total, the way an averaging reader
//!   built on top of the buffer would

#![allow(dead_code)]

use analogbuf_core::{sampler::MockSampler, traits::BufferObserver, CircularSampleBuffer, Sample};

/// One recorded notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Flush,
    New { value: Sample, index: u8 },
    Replace { old: Sample, new: Sample, index: u8 },
    Reset,
}

/// Observer that keeps every event it receives
#[derive(Debug, Default)]
pub struct EventLog {
    pub events: Vec<Event>,
}

impl EventLog {
    pub fn take(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }
}

impl BufferObserver for EventLog {
    fn on_flush(&mut self) {
        self.events.push(Event::Flush);
    }

    fn on_new_value(&mut self, value: Sample, index: u8) {
        self.events.push(Event::New { value, index });
    }

    fn on_replace_value(&mut self, old: Sample, new: Sample, index: u8) {
        self.events.push(Event::Replace { old, new, index });
    }

    fn on_reset(&mut self) {
        self.events.push(Event::Reset);
    }
}

/// Incremental sum over the buffered window
#[derive(Debug, Default)]
pub struct RunningSum {
    pub total: i64,
    pub samples: u32,
}

impl RunningSum {
    pub fn mean(&self) -> Option<f64> {
        if self.samples == 0 {
            return None;
        }
        Some(self.total as f64 / self.samples as f64)
    }
}

impl BufferObserver for RunningSum {
    fn on_new_value(&mut self, value: Sample, _index: u8) {
        self.total += value as i64;
        self.samples += 1;
    }

    fn on_replace_value(&mut self, old: Sample, new: Sample, _index: u8) {
        self.total += new as i64 - old as i64;
    }

    fn on_reset(&mut self) {
        self.total = 0;
        self.samples = 0;
    }
}

/// Buffer over a scripted sampler with an event log attached
pub fn logged_buffer(
    capacity: u8,
    script: &[Sample],
) -> CircularSampleBuffer<MockSampler<256>, EventLog> {
    CircularSampleBuffer::with_capacity(MockSampler::from_slice(script), capacity)
        .expect("valid capacity")
        .with_observer(EventLog::default())
}
