#![forbid(unsafe_code)]
//! boundbuf-io: concrete `Source`/`Sink` implementations.
//!
//! - `source`: byte and UTF-8 char sources over `std::io` readers.
//! - `sink`: byte and UTF-8 char sinks over `std::io` writers, plus a chunking
//!   adapter that caps how much a sink takes per call.
//! - `memory`: in-memory collaborators for tests and demos.
//! - `pump`: the fill / flip / drain / clear loop.

pub mod memory;
pub mod pump;
pub mod sink;
pub mod source;

pub use memory::{SliceSource, VecSink};
pub use pump::{pump, PumpStats};
pub use sink::{ChunkedSink, Utf8Sink, WriterSink};
pub use source::{ReaderSource, Utf8Source};
