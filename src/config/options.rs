use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::line::DEFAULT_CHUNK_SIZE;

/// What happens to bytes after the last `\n` when the source ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrailingFragment {
    /// Silently drop the unterminated tail (compatible behavior).
    #[default]
    Drop,
    /// Emit the tail as a final record without a terminator.
    Emit,
}

impl fmt::Display for TrailingFragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrailingFragment::Drop => write!(f, "drop"),
            TrailingFragment::Emit => write!(f, "emit"),
        }
    }
}

impl FromStr for TrailingFragment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "drop" => Ok(TrailingFragment::Drop),
            "emit" | "flush" => Ok(TrailingFragment::Emit),
            other => Err(format!("unknown trailing fragment policy: {other}")),
        }
    }
}

/// Knobs of a single line reader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ReaderOptions {
    /// Bytes requested from the source per read. Zero is treated as one.
    pub chunk_size: usize,
    pub trailing: TrailingFragment,
}

impl Default for ReaderOptions {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            trailing: TrailingFragment::Drop,
        }
    }
}

impl ReaderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    pub fn with_trailing(mut self, trailing: TrailingFragment) -> Self {
        self.trailing = trailing;
        self
    }
}
