//! # tsvstream
//!
//! Streaming reader for newline-delimited TSV mock-data files, plus the
//! offer model and importer that consume its records.
//!
//! ## Overview
//!
//! tsvstream provides:
//! - **Chunk-boundary-safe line reading**: records are reassembled across
//!   arbitrary chunk boundaries, byte for byte
//! - **Event delivery**: `line` and `end` events through a `LineHandler`, or
//!   a `LineStream` of `LineEvent`s
//! - **Sync and Async**: `BlockingLineReader` over `std::io::Read`,
//!   `LineStreamReader` over `tokio::io::AsyncRead`
//! - **Offer import**: typed decoding of the 18-column offer TSV layout
//! - **Error handling**: configurable error policies (FastFail or Accumulate)
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use tsvstream::{LineCollector, LineStreamReader};
//!
//! async fn run() -> Result<(), tsvstream::LineReadError> {
//!     let reader = LineStreamReader::from_path("mocks/offers.tsv").await?;
//!     let mut lines = LineCollector::new();
//!     let count = reader.read(&mut lines).await?;
//!     assert_eq!(Some(count), lines.end);
//!     Ok(())
//! }
//! ```
//!
//! ## Reading semantics
//!
//! - Every `line` payload ends with `\n`, exactly as it appeared in the source.
//! - `end` fires once, last, with the number of `line` events.
//! - Bytes after the last `\n` are dropped by default
//!   (`TrailingFragment::Drop`); opt into `TrailingFragment::Emit` to receive
//!   them as a final, unterminated record.
//! - A source error fails the read and no `end` event is delivered.
//!
//! ## Features
//!
//! - `async` - Tokio-based reader, engine and builder (enabled by default)
//! - `json` / `yaml` - Config file formats (enabled by default)
//! - `miette` - Pretty error reporting with miette
//! - `cli` - The `tsvstream-import` binary

pub mod config;
pub mod error;
pub mod import;
pub mod io;
pub mod line;
pub mod offer;

#[cfg(feature = "cli")]
pub mod cli;

// Async modules (feature-gated)
#[cfg(feature = "async")]
pub mod builder;
#[cfg(feature = "async")]
pub mod engine;

// Re-exports for convenience
pub use config::{ImportConfig, InputConfig, ReaderOptions, TrailingFragment};
pub use error::{AggregateError, ErrorPolicy, HandlerError, LineReadError, Stage};
pub use import::{ImportSummary, OfferImporter, OfferLineError};
pub use io::{FileInput, InMemorySource, InputProvider, STDIN_ARG, StdinInput};
pub use line::{
    BlockingLineReader, CountOnly, DEFAULT_CHUNK_SIZE, FnHandler, LineBuffer, LineCollector,
    LineEvent, LineHandler,
};
pub use offer::{Offer, OfferParseError};

// Async re-exports
#[cfg(feature = "async")]
pub use builder::ImportBuilder;
#[cfg(feature = "async")]
pub use config::InputSpec;
#[cfg(feature = "async")]
pub use engine::{ImportEngine, InputReport};
#[cfg(feature = "async")]
pub use io::AsyncInputProvider;
#[cfg(feature = "async")]
pub use line::{LineStream, LineStreamReader};

/// Build an ImportEngine from an ImportConfig.
#[cfg(feature = "async")]
pub fn build_engine_from_config(config: ImportConfig) -> Result<ImportEngine, AggregateError> {
    ImportBuilder::from_config(config)?.build()
}

/// Build an ImportEngine from an ImportConfig, allowing the caller to
/// further customize the ImportBuilder before it is built.
#[cfg(feature = "async")]
pub fn build_engine_from_config_with<F>(
    config: ImportConfig,
    customize: F,
) -> Result<ImportEngine, AggregateError>
where
    F: FnOnce(ImportBuilder) -> ImportBuilder,
{
    let builder = ImportBuilder::from_config(config)?;
    customize(builder).build()
}

// Miette re-exports
#[cfg(feature = "miette")]
pub use error::ReadDiagnostic;
