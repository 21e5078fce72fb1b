//! Where chunks come from.
//!
//! A provider names a source and opens a fresh stream over it on every call.
//! Readers are bound to what `open` returns; the provider itself can be
//! reopened for another pass.

use std::fmt::Debug;
use std::io::{self, Read};

mod local;
mod memory;

pub use local::{FileInput, STDIN_ARG, StdinInput};
pub use memory::{ChunkedReader, InMemorySource};

#[cfg(feature = "async")]
pub use local::resolve_arg;

/// A source that can be opened for blocking reads.
pub trait InputProvider: Send + Sync + Debug {
    /// Name used in errors and log events: the path for files, `-` for stdin.
    fn id(&self) -> &str;

    /// Open a new stream positioned at the first byte.
    fn open(&self) -> io::Result<Box<dyn Read + Send>>;
}

/// A source that can also be opened for async reads.
#[cfg(feature = "async")]
#[async_trait::async_trait]
pub trait AsyncInputProvider: InputProvider {
    async fn open_async(&self) -> io::Result<Box<dyn tokio::io::AsyncRead + Unpin + Send>>;
}
