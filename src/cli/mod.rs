//! Command-line arguments of the `tsvstream-import` binary.
//!
//! # Example
//!
//! ```rust,ignore
//! use clap::Parser;
//! use tsvstream::cli::ImportArgs;
//!
//! let args = ImportArgs::parse();
//! let engine = args.builder()?.build()?;
//! ```

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::builder::ImportBuilder;
use crate::config::{ConfigError, ImportConfig, TrailingFragment};
use crate::engine::InputReport;
use crate::error::{AggregateError, ErrorPolicy};

#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Parser)]
#[command(
    name = "tsvstream-import",
    about = "Stream offers out of TSV mock-data files",
    version,
    long_about = None
)]
pub struct ImportArgs {
    /// Input TSV files. Use "-" for stdin.
    pub inputs: Vec<String>,

    /// YAML or JSON import configuration.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Stop at the first malformed record or failing input.
    #[arg(long)]
    pub fail_fast: bool,

    /// Emit an unterminated last line instead of dropping it.
    #[arg(long)]
    pub emit_trailing: bool,

    /// Bytes requested from the source per read.
    #[arg(long)]
    pub chunk_size: Option<usize>,

    /// Log output format (text or json).
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Import(#[from] AggregateError),
    #[error("{failed} of {total} record(s) could not be imported")]
    Records { failed: usize, total: usize },
}

/// Fail the run if any input skipped malformed records.
///
/// Under `Accumulate` the engine returns reports even when records failed to
/// parse; the binary still has to exit non-zero for them.
pub fn ensure_all_imported(reports: &[InputReport]) -> Result<(), CliError> {
    let failed: usize = reports.iter().map(|r| r.summary.failures.len()).sum();
    if failed == 0 {
        return Ok(());
    }
    let total = failed + reports.iter().map(|r| r.summary.imported).sum::<usize>();
    Err(CliError::Records { failed, total })
}

impl ImportArgs {
    /// Turn the parsed flags into a builder. Flags override the config file.
    pub fn builder(&self) -> Result<ImportBuilder, CliError> {
        let mut builder = match &self.config {
            Some(path) => ImportBuilder::from_config(ImportConfig::from_path(path)?)?,
            None => ImportBuilder::new(),
        };

        builder = builder.inputs_from_args(&self.inputs);
        if self.fail_fast {
            builder = builder.with_mode(ErrorPolicy::FastFail);
        }
        if self.emit_trailing {
            builder = builder.with_trailing(TrailingFragment::Emit);
        }
        if let Some(chunk_size) = self.chunk_size {
            builder = builder.with_chunk_size(chunk_size);
        }
        Ok(builder)
    }
}
