//! Error types and policies for line reading and offer import.
//!
//! This module provides:
//! - `ErrorPolicy`: Controls whether to fail fast or accumulate errors
//! - `Stage`: Indicates where an error occurred while consuming a source
//! - `LineReadError`: A single read/import error with context
//! - `AggregateError`: A collection of errors when using `Accumulate` policy
//! - `HandlerError`: The error a `LineHandler` returns to abort a read

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Boxed error used as the payload of every error in this crate.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorPolicy {
    /// Stop at the first error encountered
    FastFail,
    /// Collect all errors and return them together
    #[default]
    Accumulate,
}

impl FromStr for ErrorPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "fast_fail" | "fastfail" | "fast-fail" => Ok(ErrorPolicy::FastFail),
            "accumulate" => Ok(ErrorPolicy::Accumulate),
            other => Err(format!("unknown error policy: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    ResolveInput,
    /// Error while opening the source
    Open,
    /// The source failed before signalling end-of-stream
    Read,
    /// A record could not be parsed into an offer
    Parse,
    /// A line handler rejected a record
    Handle,
    /// The read was cancelled between chunks
    Cancelled,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::ResolveInput => write!(f, "ResolveInput"),
            Stage::Open => write!(f, "Open"),
            Stage::Read => write!(f, "Read"),
            Stage::Parse => write!(f, "Parse"),
            Stage::Handle => write!(f, "Handle"),
            Stage::Cancelled => write!(f, "Cancelled"),
        }
    }
}

#[derive(Debug)]
pub struct LineReadError {
    /// Stage where the error occurred
    pub stage: Stage,
    /// Identifier of the source (file path, "-" for stdin, etc.)
    pub target: String,
    /// The underlying error
    pub error: BoxError,
}

impl LineReadError {
    pub fn new(stage: Stage, target: impl Into<String>, error: impl Into<BoxError>) -> Self {
        Self {
            stage,
            target: target.into(),
            error: error.into(),
        }
    }

    pub(crate) fn from_handler(target: &str, err: HandlerError) -> Self {
        Self {
            stage: err.stage,
            target: target.to_string(),
            error: err.error,
        }
    }
}

impl fmt::Display for LineReadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.stage, self.target, self.error)
    }
}

impl std::error::Error for LineReadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.error.as_ref())
    }
}

/// Error returned by a line handler to stop the read.
///
/// Defaults to `Stage::Handle`; handlers that know better (the offer importer
/// reports `Stage::Parse`) can pick the stage themselves.
#[derive(Debug, Error)]
#[error("{error}")]
pub struct HandlerError {
    pub stage: Stage,
    #[source]
    pub error: BoxError,
}

impl HandlerError {
    pub fn new(error: impl Into<BoxError>) -> Self {
        Self::with_stage(Stage::Handle, error)
    }

    pub fn with_stage(stage: Stage, error: impl Into<BoxError>) -> Self {
        Self {
            stage,
            error: error.into(),
        }
    }
}

/// An aggregate of multiple read errors.
///
/// This is returned when several inputs are processed and at least one failed.
#[derive(Debug, Error)]
pub struct AggregateError {
    /// Collection of individual errors
    pub errors: Vec<LineReadError>,
}

impl fmt::Display for AggregateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "import encountered {} error(s):", self.errors.len())?;
        for (i, e) in self.errors.iter().enumerate() {
            writeln!(f, "  #{}: {}", i + 1, e)?;
        }
        Ok(())
    }
}

impl AggregateError {
    /// Create a new aggregate error with a single error.
    pub fn single(error: LineReadError) -> Self {
        Self {
            errors: vec![error],
        }
    }

    /// Check if there are no errors.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Get the number of errors.
    pub fn len(&self) -> usize {
        self.errors.len()
    }
}

impl From<LineReadError> for AggregateError {
    fn from(error: LineReadError) -> Self {
        Self::single(error)
    }
}

#[cfg(feature = "miette")]
mod miette_impl;

#[cfg(feature = "miette")]
pub use miette_impl::*;
