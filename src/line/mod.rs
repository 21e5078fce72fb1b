//! Newline-delimited record reading.
//!
//! This module provides:
//! - `LineBuffer`: The pending-tail state shared by every reader
//! - `LineHandler` / `LineEvent`: How `line` and `end` events are observed
//! - `BlockingLineReader`: Reader over `std::io::Read`
//! - `LineStreamReader`: Reader over `tokio::io::AsyncRead` (feature `async`)

mod blocking;
mod buffer;
mod handler;

pub use blocking::{BlockingEvents, BlockingLineReader};
pub use buffer::{LineBuffer, NEWLINE};
pub use handler::{CountOnly, FnHandler, LineCollector, LineEvent, LineHandler};

/// Default number of bytes requested from the source per read.
pub const DEFAULT_CHUNK_SIZE: usize = 16 * 1024;

#[cfg(feature = "async")]
mod reader;

#[cfg(feature = "async")]
pub use reader::{LineStream, LineStreamReader};
