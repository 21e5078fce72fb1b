//! Synchronous twin of the async line reader.

use std::io::Read;
use std::path::Path;

use tracing::debug;

use super::buffer::{LineBuffer, decode_record};
use super::handler::{LineEvent, LineHandler};
use crate::config::{ReaderOptions, TrailingFragment};
use crate::error::{LineReadError, Stage};
use crate::io::{FileInput, InputProvider};

/// Reads newline-delimited records from a blocking `Read` source.
///
/// Same event contract as `LineStreamReader`, without a runtime.
pub struct BlockingLineReader {
    target: String,
    source: Box<dyn Read + Send>,
    options: ReaderOptions,
}

impl std::fmt::Debug for BlockingLineReader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockingLineReader")
            .field("target", &self.target)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl BlockingLineReader {
    pub fn new(target: impl Into<String>, source: Box<dyn Read + Send>) -> Self {
        Self {
            target: target.into(),
            source,
            options: ReaderOptions::default(),
        }
    }

    pub fn open(provider: &dyn InputProvider) -> Result<Self, LineReadError> {
        let source = provider
            .open()
            .map_err(|e| LineReadError::new(Stage::Open, provider.id(), e))?;
        Ok(Self::new(provider.id(), source))
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, LineReadError> {
        Self::open(&FileInput::new(path.as_ref()))
    }

    pub fn with_options(mut self, options: ReaderOptions) -> Self {
        self.options = options;
        self
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    /// Consume the whole source, delivering events to `handler`.
    pub fn read<H>(self, handler: &mut H) -> Result<usize, LineReadError>
    where
        H: LineHandler + ?Sized,
    {
        let target = self.target.clone();
        for event in self.into_events() {
            match event? {
                LineEvent::Line(line) => handler
                    .on_line(&line)
                    .map_err(|e| LineReadError::from_handler(&target, e))?,
                LineEvent::End(count) => {
                    handler.on_end(count);
                    return Ok(count);
                }
            }
        }
        Ok(0)
    }

    /// Iterate over the read events; `End` is the last item.
    pub fn into_events(self) -> BlockingEvents {
        BlockingEvents {
            chunk: vec![0; self.options.chunk_size.max(1)],
            target: self.target,
            source: self.source,
            trailing: self.options.trailing,
            buffer: LineBuffer::new(),
            eof: false,
            finished: false,
        }
    }

    /// Iterate over the records only, dropping the final `End`.
    pub fn into_lines(self) -> impl Iterator<Item = Result<String, LineReadError>> {
        self.into_events().filter_map(|event| match event {
            Ok(LineEvent::Line(line)) => Some(Ok(line)),
            Ok(LineEvent::End(_)) => None,
            Err(e) => Some(Err(e)),
        })
    }
}

/// Iterator returned by [`BlockingLineReader::into_events`].
pub struct BlockingEvents {
    target: String,
    source: Box<dyn Read + Send>,
    trailing: TrailingFragment,
    chunk: Vec<u8>,
    buffer: LineBuffer,
    eof: bool,
    finished: bool,
}

impl Iterator for BlockingEvents {
    type Item = Result<LineEvent, LineReadError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        loop {
            if let Some(record) = self.buffer.next_record() {
                return Some(Ok(LineEvent::Line(decode_record(record))));
            }
            if self.eof {
                self.finished = true;
                return Some(Ok(LineEvent::End(self.buffer.count())));
            }
            match self.source.read(&mut self.chunk) {
                Ok(0) => {
                    self.eof = true;
                    if self.trailing == TrailingFragment::Emit {
                        if let Some(fragment) = self.buffer.take_fragment() {
                            return Some(Ok(LineEvent::Line(decode_record(fragment))));
                        }
                    } else {
                        let dropped = self.buffer.discard_fragment();
                        if dropped > 0 {
                            debug!(input = %self.target, bytes = dropped, "dropping unterminated trailing fragment");
                        }
                    }
                }
                Ok(n) => self.buffer.push(&self.chunk[..n]),
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    self.finished = true;
                    return Some(Err(LineReadError::new(Stage::Read, self.target.clone(), e)));
                }
            }
        }
    }
}
