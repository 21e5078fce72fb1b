//! Configuration types for readers and import runs.
//!
//! This module provides:
//! - `ReaderOptions`: Chunk size and trailing-fragment policy of a reader
//! - `TrailingFragment`: Whether an unterminated last line is dropped or emitted
//! - `ImportConfig`: Configuration for a complete import run
//! - `InputSpec`: A resolved input source (feature `async`)

mod import;
mod options;

pub use import::{ConfigError, ImportConfig, InputConfig};
pub use options::{ReaderOptions, TrailingFragment};

#[cfg(feature = "async")]
mod input;

#[cfg(feature = "async")]
pub use input::InputSpec;
