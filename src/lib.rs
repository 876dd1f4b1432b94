#![forbid(unsafe_code)]
//! boundbuf: a fixed-capacity buffer with position/limit/mark cursors.
//!
//! Re-exports the workspace crates so applications can depend on one name.

pub use boundbuf_io as io;
pub use boundbuf_mem as mem;

pub use boundbuf_core::{Backing, BufferConfig, CursorState, Sink, Source};
pub use boundbuf_mem::{BoundedBuffer, BufferAllocator, Error, Result};
