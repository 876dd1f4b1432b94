//! Sinks over `std::io` writers.

use std::io::{self, Write};
use std::num::NonZeroUsize;

use boundbuf_core::Sink;

/// Byte sink over any writer. Every region is written in full and flushed, so
/// a console sees each chunk as soon as it is transferred.
pub struct WriterSink<W: Write> {
    inner: W,
}

impl<W: Write> WriterSink<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> Sink<u8> for WriterSink<W> {
    fn write_from(&mut self, region: &[u8]) -> io::Result<usize> {
        self.inner.write_all(region)?;
        self.inner.flush()?;
        Ok(region.len())
    }
}

/// Char sink that UTF-8 encodes into a writer.
pub struct Utf8Sink<W: Write> {
    inner: W,
    scratch: String,
}

impl<W: Write> Utf8Sink<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            scratch: String::new(),
        }
    }

    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> Sink<char> for Utf8Sink<W> {
    fn write_from(&mut self, region: &[char]) -> io::Result<usize> {
        self.scratch.clear();
        self.scratch.extend(region.iter());
        self.inner.write_all(self.scratch.as_bytes())?;
        self.inner.flush()?;
        Ok(region.len())
    }
}

/// Caps how many elements the wrapped sink is offered per call.
pub struct ChunkedSink<S> {
    inner: S,
    chunk: NonZeroUsize,
}

impl<S> ChunkedSink<S> {
    pub fn new(inner: S, chunk: NonZeroUsize) -> Self {
        Self { inner, chunk }
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<T, S: Sink<T>> Sink<T> for ChunkedSink<S> {
    fn write_from(&mut self, region: &[T]) -> io::Result<usize> {
        self.inner.write_from(region)
    }

    fn acceptance(&self) -> usize {
        self.inner.acceptance().min(self.chunk.get())
    }
}
