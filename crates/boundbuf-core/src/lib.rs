#![forbid(unsafe_code)]
//! boundbuf-core: shared vocabulary for the boundbuf workspace.
//!
//! Holds the configuration types, the cursor snapshot, and the `Source`/`Sink`
//! collaborator traits. The buffer itself lives in `boundbuf-mem`; concrete
//! sources and sinks live in `boundbuf-io`.

pub mod config;
pub mod error;
pub mod state;
pub mod transfer;

pub use config::{Backing, BufferConfig};
pub use error::{Error, Result};
pub use state::CursorState;
pub use transfer::{Sink, Source};
