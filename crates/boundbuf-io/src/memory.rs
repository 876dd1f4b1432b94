//! In-memory sources and sinks.
//!
//! Used by tests and benches to drive a buffer without touching a terminal.

use std::collections::VecDeque;
use std::io;

use boundbuf_core::{Sink, Source};

/// Hands out a fixed sequence of elements, optionally in bursts of at most
/// `burst` per call (a terminal delivering one line at a time).
#[derive(Debug, Clone)]
pub struct SliceSource<T> {
    items: VecDeque<T>,
    burst: usize,
}

impl<T: Clone> SliceSource<T> {
    pub fn new(items: impl Into<Vec<T>>) -> Self {
        let items: Vec<T> = items.into();
        Self {
            items: VecDeque::from(items),
            burst: usize::MAX,
        }
    }

    pub fn with_burst(mut self, burst: usize) -> Self {
        self.burst = burst.max(1);
        self
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl SliceSource<char> {
    pub fn from_text(text: &str) -> Self {
        Self::new(text.chars().collect::<Vec<_>>())
    }
}

impl<T: Clone> Source<T> for SliceSource<T> {
    fn read_into(&mut self, region: &mut [T]) -> io::Result<usize> {
        let n = region.len().min(self.burst).min(self.items.len());
        for (slot, item) in region.iter_mut().zip(self.items.drain(..n)) {
            *slot = item;
        }
        Ok(n)
    }
}

/// Collects everything written to it. `capacity` bounds the total it will
/// accept; `calls` counts `write_from` invocations.
#[derive(Debug, Clone)]
pub struct VecSink<T> {
    items: Vec<T>,
    capacity: usize,
    calls: usize,
}

impl<T: Clone> VecSink<T> {
    pub fn new() -> Self {
        Self::bounded(usize::MAX)
    }

    pub fn bounded(capacity: usize) -> Self {
        Self {
            items: Vec::new(),
            capacity,
            calls: 0,
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn calls(&self) -> usize {
        self.calls
    }

    pub fn into_inner(self) -> Vec<T> {
        self.items
    }
}

impl<T: Clone> Default for VecSink<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl VecSink<char> {
    pub fn text(&self) -> String {
        self.items.iter().collect()
    }
}

impl<T: Clone> Sink<T> for VecSink<T> {
    fn write_from(&mut self, region: &[T]) -> io::Result<usize> {
        if region.len() > self.acceptance() {
            return Err(io::Error::new(
                io::ErrorKind::WriteZero,
                format!(
                    "sink full: {} offered, {} accepted",
                    region.len(),
                    self.acceptance()
                ),
            ));
        }
        self.items.extend_from_slice(region);
        self.calls += 1;
        Ok(region.len())
    }

    fn acceptance(&self) -> usize {
        self.capacity - self.items.len()
    }
}
