use std::io;

use thiserror::Error;

/// Result type local to boundbuf-mem.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("buffer overflow: {requested} elements requested, {remaining} remaining")]
    Overflow { requested: usize, remaining: usize },

    #[error("buffer underflow: {requested} elements requested, {remaining} remaining")]
    Underflow { requested: usize, remaining: usize },

    #[error("reset called without a mark")]
    InvalidMark,

    #[error("capacity must be positive, got {0}")]
    InvalidCapacity(usize),

    #[error("invalid {cursor} {value}: bound is {bound}")]
    InvalidCursor {
        cursor: &'static str,
        value: usize,
        bound: usize,
    },

    #[error("ledger cap exceeded for tag '{tag}': requested {requested} bytes, capacity {capacity}, used {used}")]
    BudgetExceeded {
        tag: &'static str,
        requested: usize,
        capacity: usize,
        used: usize,
    },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Config(#[from] boundbuf_core::Error),
}
