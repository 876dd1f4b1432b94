//! Fixed-capacity buffer with position/limit/mark cursors.
//!
//! Cursor protocol, in one place:
//!
//! ```text
//!   0 <= mark <= position <= limit <= capacity
//! ```
//!
//! Writing advances `position` towards `limit`. `flip` turns what was written
//! into the readable window `[0, old position)`. `clear` goes back to the
//! write-ready state without touching the stored elements, so stale data stays
//! physically present until overwritten. Every failing call leaves the cursors
//! exactly as they were.

use std::fmt;
use std::io;

use boundbuf_core::{Backing, BufferConfig, CursorState, Sink, Source};

use crate::error::{Error, Result};

#[derive(Debug, Clone)]
pub struct BoundedBuffer<T> {
    storage: Box<[T]>,
    position: usize,
    limit: usize,
    mark: Option<usize>,
    backing: Backing,
}

impl<T: Clone + Default> BoundedBuffer<T> {
    /// Allocate a buffer of `capacity` default-initialized elements on the
    /// managed heap.
    pub fn new(capacity: usize) -> Result<Self> {
        Self::with_backing(capacity, Backing::Managed)
    }

    /// Allocate with an explicit backing hint. The hint is recorded but has no
    /// behavioral effect.
    pub fn with_backing(capacity: usize, backing: Backing) -> Result<Self> {
        if capacity == 0 {
            return Err(Error::InvalidCapacity(capacity));
        }
        let storage = vec![T::default(); capacity].into_boxed_slice();
        let buf = Self {
            storage,
            position: 0,
            limit: capacity,
            mark: None,
            backing,
        };
        buf.trace_state("allocate");
        Ok(buf)
    }

    pub fn from_config(cfg: &BufferConfig) -> Result<Self> {
        cfg.validate()?;
        Self::with_backing(cfg.capacity, cfg.backing)
    }
}

impl<T> BoundedBuffer<T> {
    pub fn capacity(&self) -> usize {
        self.storage.len()
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn mark(&self) -> Option<usize> {
        self.mark
    }

    pub fn backing(&self) -> Backing {
        self.backing
    }

    /// Elements between `position` and `limit`.
    pub fn remaining(&self) -> usize {
        self.limit - self.position
    }

    pub fn has_remaining(&self) -> bool {
        self.remaining() > 0
    }

    /// Bytes of element storage held by this buffer.
    pub fn storage_bytes(&self) -> usize {
        self.capacity() * std::mem::size_of::<T>()
    }

    /// Switch from accumulating writes to exposing them for reading.
    pub fn flip(&mut self) {
        self.limit = self.position;
        self.position = 0;
        self.mark = None;
        self.trace_state("flip");
    }

    /// Re-expose `[0, limit)` for another read pass.
    pub fn rewind(&mut self) {
        self.position = 0;
        self.mark = None;
        self.trace_state("rewind");
    }

    /// Back to the write-ready state. Stored elements are left in place.
    pub fn clear(&mut self) {
        self.position = 0;
        self.limit = self.capacity();
        self.mark = None;
        self.trace_state("clear");
    }

    pub fn mark_position(&mut self) {
        self.mark = Some(self.position);
        self.trace_state("mark");
    }

    /// Restore `position` to the saved mark.
    pub fn reset(&mut self) -> Result<()> {
        let mark = self.mark.ok_or(Error::InvalidMark)?;
        self.position = mark;
        self.trace_state("reset");
        Ok(())
    }

    /// Move the cursor inside `[0, limit]`. A mark past the new position is
    /// discarded.
    pub fn set_position(&mut self, position: usize) -> Result<()> {
        if position > self.limit {
            return Err(Error::InvalidCursor {
                cursor: "position",
                value: position,
                bound: self.limit,
            });
        }
        self.position = position;
        if self.mark.is_some_and(|m| m > position) {
            self.mark = None;
        }
        self.trace_state("set_position");
        Ok(())
    }

    /// Move the limit inside `[0, capacity]`, pulling `position` and the mark
    /// back if they end up past it.
    pub fn set_limit(&mut self, limit: usize) -> Result<()> {
        if limit > self.capacity() {
            return Err(Error::InvalidCursor {
                cursor: "limit",
                value: limit,
                bound: self.capacity(),
            });
        }
        self.limit = limit;
        if self.position > limit {
            self.position = limit;
        }
        if self.mark.is_some_and(|m| m > limit) {
            self.mark = None;
        }
        self.trace_state("set_limit");
        Ok(())
    }

    /// Move the unread window `[position, limit)` to the front and get ready
    /// to write after it.
    pub fn compact(&mut self) {
        let unread = self.remaining();
        self.storage[..self.limit].rotate_left(self.position);
        self.position = unread;
        self.limit = self.capacity();
        self.mark = None;
        self.trace_state("compact");
    }

    /// The data region `[position, limit)`.
    pub fn readable(&self) -> &[T] {
        &self.storage[self.position..self.limit]
    }

    /// The whole backing array, stale elements included.
    pub fn storage(&self) -> &[T] {
        &self.storage
    }

    pub fn snapshot(&self) -> CursorState {
        CursorState {
            position: self.position,
            limit: self.limit,
            capacity: self.capacity(),
            mark: self.mark,
        }
    }

    /// Drain `[position, limit)` into `sink`, one chunk per call, each sized to
    /// what the sink says it accepts.
    ///
    /// The cursor only moves once the whole region is delivered. On failure
    /// `position` is restored, though chunks the sink already took cannot be
    /// recalled from it. A sink that accepts nothing while data remains is an
    /// overflow.
    pub fn transfer_into<S>(&mut self, sink: &mut S) -> Result<usize>
    where
        S: Sink<T> + ?Sized,
    {
        let start = self.position;
        let mut cursor = start;
        while cursor < self.limit {
            let left = self.limit - cursor;
            let chunk = sink.acceptance().min(left);
            if chunk == 0 {
                return Err(Error::Overflow {
                    requested: left,
                    remaining: 0,
                });
            }
            let end = cursor + chunk;
            let written = sink.write_from(&self.storage[cursor..end])?;
            if written != chunk {
                return Err(Error::Io(io::Error::new(
                    io::ErrorKind::WriteZero,
                    format!("sink accepted {written} of {chunk} elements"),
                )));
            }
            cursor = end;
        }
        self.position = cursor;
        self.trace_state("transfer_into");
        Ok(cursor - start)
    }

    /// Ask `source` for up to `remaining()` elements and write them at
    /// `position`. Returns 0 at end of input, or when there is no room.
    pub fn fill_from<S>(&mut self, source: &mut S) -> Result<usize>
    where
        S: Source<T> + ?Sized,
    {
        let room = self.remaining();
        if room == 0 {
            return Ok(0);
        }
        let n = source.read_into(&mut self.storage[self.position..self.limit])?;
        if n > room {
            return Err(Error::Io(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("source reported {n} elements for a region of {room}"),
            )));
        }
        self.position += n;
        self.trace_state("fill_from");
        Ok(n)
    }

    #[cfg(feature = "tracing")]
    fn trace_state(&self, op: &'static str) {
        tracing::trace!(
            op,
            position = self.position,
            limit = self.limit,
            capacity = self.storage.len(),
            mark = ?self.mark,
            "buffer cursor"
        );
    }

    #[cfg(not(feature = "tracing"))]
    fn trace_state(&self, _op: &'static str) { /* no-op */
    }
}

impl<T: Clone> BoundedBuffer<T> {
    /// Copy `items` in at `position`.
    pub fn put(&mut self, items: &[T]) -> Result<()> {
        let room = self.remaining();
        if items.len() > room {
            return Err(Error::Overflow {
                requested: items.len(),
                remaining: room,
            });
        }
        let end = self.position + items.len();
        self.storage[self.position..end].clone_from_slice(items);
        self.position = end;
        self.trace_state("put");
        Ok(())
    }

    /// Copy out `count` elements from `position` and advance past them.
    pub fn get(&mut self, count: usize) -> Result<Vec<T>> {
        let out = self.peek(count)?;
        self.position += count;
        self.trace_state("get");
        Ok(out)
    }

    /// Like [`BoundedBuffer::get`] without moving the cursor.
    pub fn peek(&self, count: usize) -> Result<Vec<T>> {
        let room = self.remaining();
        if count > room {
            return Err(Error::Underflow {
                requested: count,
                remaining: room,
            });
        }
        Ok(self.storage[self.position..self.position + count].to_vec())
    }
}

impl BoundedBuffer<char> {
    /// `put` for text. The length checked is the number of chars.
    pub fn append(&mut self, text: &str) -> Result<()> {
        let needed = text.chars().count();
        let room = self.remaining();
        if needed > room {
            return Err(Error::Overflow {
                requested: needed,
                remaining: room,
            });
        }
        for (slot, ch) in self.storage[self.position..].iter_mut().zip(text.chars()) {
            *slot = ch;
        }
        self.position += needed;
        self.trace_state("append");
        Ok(())
    }

    /// The readable window as a `String`, without moving the cursor.
    pub fn readable_string(&self) -> String {
        self.readable().iter().collect()
    }
}

impl BoundedBuffer<u8> {
    /// `put` for raw bytes.
    pub fn append(&mut self, bytes: &[u8]) -> Result<()> {
        self.put(bytes)
    }
}

impl<T> fmt::Display for BoundedBuffer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.snapshot(), f)
    }
}

/// A buffer accepts as much as it has room for, like a second `CharBuffer`
/// handed to `read`.
impl<T: Clone> Sink<T> for BoundedBuffer<T> {
    fn write_from(&mut self, region: &[T]) -> io::Result<usize> {
        self.put(region)
            .map_err(|e| io::Error::new(io::ErrorKind::WriteZero, e.to_string()))?;
        Ok(region.len())
    }

    fn acceptance(&self) -> usize {
        self.remaining()
    }
}

/// Reading from a buffer hands out its readable window; an exhausted buffer
/// reports end of input.
impl<T: Clone> Source<T> for BoundedBuffer<T> {
    fn read_into(&mut self, region: &mut [T]) -> io::Result<usize> {
        let n = region.len().min(self.remaining());
        region[..n].clone_from_slice(&self.storage[self.position..self.position + n]);
        self.position += n;
        self.trace_state("read_into");
        Ok(n)
    }
}
