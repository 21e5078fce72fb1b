//! Asynchronous line reader bound to a single source.

use std::path::Path;

use futures::stream::{self, BoxStream, StreamExt};
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

use super::buffer::{LineBuffer, decode_record};
use super::handler::{LineEvent, LineHandler};
use crate::config::{ReaderOptions, TrailingFragment};
use crate::error::{LineReadError, Stage};
use crate::io::{AsyncInputProvider, FileInput};

/// Lazy, finite, non-restartable sequence of read events.
///
/// Yields every record as `LineEvent::Line` followed by exactly one
/// `LineEvent::End`. After an error item the stream is exhausted.
pub type LineStream = BoxStream<'static, Result<LineEvent, LineReadError>>;

/// Reads newline-delimited records from an async source in fixed-size chunks.
///
/// ```rust,ignore
/// use tsvstream::{LineCollector, LineStreamReader};
///
/// let reader = LineStreamReader::from_path("mocks/offers.tsv").await?;
/// let mut lines = LineCollector::new();
/// let count = reader.read(&mut lines).await?;
/// ```
pub struct LineStreamReader {
    target: String,
    source: Box<dyn AsyncRead + Unpin + Send>,
    options: ReaderOptions,
}

impl std::fmt::Debug for LineStreamReader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LineStreamReader")
            .field("target", &self.target)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl LineStreamReader {
    /// Bind a reader to an already opened source.
    pub fn new(target: impl Into<String>, source: Box<dyn AsyncRead + Unpin + Send>) -> Self {
        Self {
            target: target.into(),
            source,
            options: ReaderOptions::default(),
        }
    }

    /// Open the provider's stream and bind a reader to it.
    pub async fn open(provider: &dyn AsyncInputProvider) -> Result<Self, LineReadError> {
        let source = provider
            .open_async()
            .await
            .map_err(|e| LineReadError::new(Stage::Open, provider.id(), e))?;
        Ok(Self::new(provider.id(), source))
    }

    /// Open a file and bind a reader to it.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self, LineReadError> {
        let input = FileInput::new(path.as_ref());
        Self::open(&input).await
    }

    pub fn with_options(mut self, options: ReaderOptions) -> Self {
        self.options = options;
        self
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn options(&self) -> &ReaderOptions {
        &self.options
    }

    /// Consume the whole source, delivering events to `handler`.
    ///
    /// Resolves with the record count once the source has ended and
    /// `on_end` has been called. A source error fails the read and `on_end`
    /// is never called.
    pub async fn read<H>(self, handler: &mut H) -> Result<usize, LineReadError>
    where
        H: LineHandler + ?Sized,
    {
        let mut state = ReadState::new(self);
        loop {
            let event = state.next_event().await;
            if let Some(count) = dispatch(&state.target, event, handler)? {
                return Ok(count);
            }
        }
    }

    /// Like [`LineStreamReader::read`], but gives up between chunks once
    /// `token` is cancelled.
    ///
    /// On cancellation the source is dropped, no further events are
    /// delivered and the read fails with `Stage::Cancelled`.
    pub async fn read_with_cancel<H>(
        self,
        handler: &mut H,
        token: CancellationToken,
    ) -> Result<usize, LineReadError>
    where
        H: LineHandler + ?Sized,
    {
        let mut state = ReadState::new(self);
        let target = state.target.clone();
        loop {
            let event = tokio::select! {
                biased;
                _ = token.cancelled() => {
                    debug!(input = %target, "line read cancelled");
                    return Err(LineReadError::new(
                        Stage::Cancelled,
                        target,
                        std::io::Error::new(std::io::ErrorKind::Interrupted, "read cancelled"),
                    ));
                }
                event = state.next_event() => event,
            };
            if let Some(count) = dispatch(&target, event, handler)? {
                return Ok(count);
            }
        }
    }

    /// Turn the reader into a stream of events.
    pub fn into_stream(self) -> LineStream {
        stream::unfold(ReadState::new(self), |mut state| async move {
            state.next_event().await.map(|event| (event, state))
        })
        .boxed()
    }
}

fn dispatch<H>(
    target: &str,
    event: Option<Result<LineEvent, LineReadError>>,
    handler: &mut H,
) -> Result<Option<usize>, LineReadError>
where
    H: LineHandler + ?Sized,
{
    match event {
        Some(Ok(LineEvent::Line(line))) => {
            handler
                .on_line(&line)
                .map_err(|e| LineReadError::from_handler(target, e))?;
            Ok(None)
        }
        Some(Ok(LineEvent::End(count))) => {
            handler.on_end(count);
            Ok(Some(count))
        }
        Some(Err(e)) => Err(e),
        // next_event always yields End before running dry
        None => Ok(Some(0)),
    }
}

struct ReadState {
    target: String,
    source: Box<dyn AsyncRead + Unpin + Send>,
    trailing: TrailingFragment,
    chunk: Vec<u8>,
    buffer: LineBuffer,
    eof: bool,
    finished: bool,
}

impl ReadState {
    fn new(reader: LineStreamReader) -> Self {
        Self {
            target: reader.target,
            source: reader.source,
            trailing: reader.options.trailing,
            chunk: vec![0; reader.options.chunk_size.max(1)],
            buffer: LineBuffer::new(),
            eof: false,
            finished: false,
        }
    }

    async fn next_event(&mut self) -> Option<Result<LineEvent, LineReadError>> {
        if self.finished {
            return None;
        }
        loop {
            if let Some(record) = self.buffer.next_record() {
                return Some(Ok(LineEvent::Line(decode_record(record))));
            }
            if self.eof {
                self.finished = true;
                let count = self.buffer.count();
                debug!(input = %self.target, count, "line stream ended");
                return Some(Ok(LineEvent::End(count)));
            }
            match self.source.read(&mut self.chunk).await {
                Ok(0) => {
                    self.eof = true;
                    match self.trailing {
                        TrailingFragment::Emit => {
                            if let Some(fragment) = self.buffer.take_fragment() {
                                return Some(Ok(LineEvent::Line(decode_record(fragment))));
                            }
                        }
                        TrailingFragment::Drop => {
                            let dropped = self.buffer.discard_fragment();
                            if dropped > 0 {
                                debug!(input = %self.target, bytes = dropped, "dropping unterminated trailing fragment");
                            }
                        }
                    }
                }
                Ok(n) => {
                    trace!(input = %self.target, bytes = n, "chunk received");
                    self.buffer.push(&self.chunk[..n]);
                }
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    self.finished = true;
                    return Some(Err(LineReadError::new(Stage::Read, self.target.clone(), e)));
                }
            }
        }
    }
}
