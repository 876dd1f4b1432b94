#![forbid(unsafe_code)]
//! boundbuf-mem: the bounded buffer and its allocation ledger.
//!
//! [`BoundedBuffer`] is a fixed-capacity, array-backed container driven by
//! four cursors (`mark <= position <= limit <= capacity`). The same storage
//! alternates between being written and being read via `flip`/`clear`, with
//! no copying in between.
//!
//! Buffers that should be accounted for are allocated through
//! [`BufferAllocator`], which charges their storage bytes against an
//! [`AllocationLedger`] and returns them on drop.
//!
//! No I/O lives here. Sources and sinks come from `boundbuf-io`.

pub mod buffer;
pub mod error;
pub mod ledger;
pub mod tracking;

pub use buffer::BoundedBuffer;
pub use error::{Error, Result};
pub use ledger::{
    AllocationLedger, BufferAllocator, LedgerGuard, LedgerUsage, TrackedBuffer,
};
pub use tracking::PeakTracker;
