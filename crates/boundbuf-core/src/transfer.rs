//! Collaborator contracts for bulk transfer in and out of a buffer.
//!
//! Concrete implementations live in `boundbuf-io`. Both traits speak
//! `std::io::Result` so failures of the outside world propagate unchanged.

use std::io;

/// Something a buffer can be filled from (a terminal, a socket, a slice).
pub trait Source<T> {
    /// Copy up to `region.len()` elements into the front of `region`.
    ///
    /// Returns the number of elements written. `Ok(0)` for a non-empty region
    /// means end of input. May block; the buffer never retries on its own.
    fn read_into(&mut self, region: &mut [T]) -> io::Result<usize>;
}

/// Something a buffer can be drained into (a console writer, another buffer).
pub trait Sink<T> {
    /// Consume every element of `region`.
    ///
    /// Implementations must either accept the whole region and return its
    /// length, or fail. A shorter count is treated as a write failure.
    fn write_from(&mut self, region: &[T]) -> io::Result<usize>;

    /// How many elements the next `write_from` call may carry.
    fn acceptance(&self) -> usize {
        usize::MAX
    }
}

impl<T, S: Source<T> + ?Sized> Source<T> for &mut S {
    fn read_into(&mut self, region: &mut [T]) -> io::Result<usize> {
        (**self).read_into(region)
    }
}

impl<T, S: Sink<T> + ?Sized> Sink<T> for &mut S {
    fn write_from(&mut self, region: &[T]) -> io::Result<usize> {
        (**self).write_from(region)
    }

    fn acceptance(&self) -> usize {
        (**self).acceptance()
    }
}
