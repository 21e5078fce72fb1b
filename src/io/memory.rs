//! In-memory input implementations for testing.

use std::collections::VecDeque;
use std::io::{self, ErrorKind, Read};
use std::sync::Arc;

use super::InputProvider;

/// In-memory input source that hands its data out in scripted chunks.
///
/// Every read returns at most one chunk (less if the caller's buffer is
/// smaller), so tests can pin chunk boundaries exactly. An optional failure
/// is reported once all chunks have been served.
#[derive(Debug, Clone)]
pub struct InMemorySource {
    id: String,
    chunks: Arc<Vec<Vec<u8>>>,
    failure: Option<(ErrorKind, String)>,
}

impl InMemorySource {
    /// Create a new in-memory source served as a single chunk.
    pub fn new(id: impl Into<String>, data: Vec<u8>) -> Self {
        Self::from_chunks(id, vec![data])
    }

    /// Create a new in-memory source from a string.
    pub fn from_string(id: impl Into<String>, data: impl Into<String>) -> Self {
        Self::new(id, data.into().into_bytes())
    }

    /// Create a source that yields exactly these chunks, in order.
    pub fn from_chunks<C>(id: impl Into<String>, chunks: impl IntoIterator<Item = C>) -> Self
    where
        C: Into<Vec<u8>>,
    {
        Self {
            id: id.into(),
            chunks: Arc::new(chunks.into_iter().map(Into::into).collect()),
            failure: None,
        }
    }

    /// Fail with an I/O error of `kind` after the last chunk instead of ending.
    pub fn fail_after_chunks(mut self, kind: ErrorKind, message: impl Into<String>) -> Self {
        self.failure = Some((kind, message.into()));
        self
    }

    fn reader(&self) -> ChunkedReader {
        ChunkedReader {
            chunks: self.chunks.iter().cloned().collect(),
            failure: self.failure.clone(),
        }
    }
}

impl InputProvider for InMemorySource {
    fn id(&self) -> &str {
        &self.id
    }

    fn open(&self) -> io::Result<Box<dyn Read + Send>> {
        Ok(Box::new(self.reader()))
    }
}

#[cfg(feature = "async")]
#[async_trait::async_trait]
impl super::AsyncInputProvider for InMemorySource {
    async fn open_async(&self) -> io::Result<Box<dyn tokio::io::AsyncRead + Unpin + Send>> {
        Ok(Box::new(self.reader()))
    }
}

/// Reader handed out by [`InMemorySource`].
#[derive(Debug)]
pub struct ChunkedReader {
    chunks: VecDeque<Vec<u8>>,
    failure: Option<(ErrorKind, String)>,
}

impl ChunkedReader {
    fn next_bytes(&mut self, max: usize) -> io::Result<Vec<u8>> {
        while self.chunks.front().is_some_and(Vec::is_empty) {
            self.chunks.pop_front();
        }
        let Some(chunk) = self.chunks.front_mut() else {
            return match self.failure.take() {
                Some((kind, message)) => Err(io::Error::new(kind, message)),
                None => Ok(Vec::new()),
            };
        };
        let n = max.min(chunk.len());
        Ok(chunk.drain(..n).collect())
    }
}

impl Read for ChunkedReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let bytes = self.next_bytes(buf.len())?;
        buf[..bytes.len()].copy_from_slice(&bytes);
        Ok(bytes.len())
    }
}

#[cfg(feature = "async")]
impl tokio::io::AsyncRead for ChunkedReader {
    fn poll_read(
        mut self: std::pin::Pin<&mut Self>,
        _cx: &mut std::task::Context<'_>,
        buf: &mut tokio::io::ReadBuf<'_>,
    ) -> std::task::Poll<io::Result<()>> {
        let result = self
            .next_bytes(buf.remaining())
            .map(|bytes| buf.put_slice(&bytes));
        std::task::Poll::Ready(result)
    }
}
