//! Pending-tail buffer that turns arbitrary chunks into complete records.

/// Record terminator.
pub const NEWLINE: u8 = b'\n';

/// Accumulates chunk bytes and hands out newline-terminated records.
///
/// The bytes visible through [`LineBuffer::pending`] are always the suffix of
/// everything pushed so far that has not been returned as a record yet: they
/// contain no `\n` once [`LineBuffer::next_record`] has returned `None`.
///
/// Splitting happens on the raw `\n` byte, which never appears inside a
/// multi-byte UTF-8 sequence, so chunk boundaries may fall anywhere.
#[derive(Debug, Default)]
pub struct LineBuffer {
    bytes: Vec<u8>,
    /// Start of the unresolved suffix inside `bytes`.
    start: usize,
    /// Everything before this index has already been searched for `\n`.
    scanned: usize,
    count: usize,
}

impl LineBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a freshly received chunk.
    pub fn push(&mut self, chunk: &[u8]) {
        if self.start > 0 {
            self.bytes.drain(..self.start);
            self.scanned -= self.start;
            self.start = 0;
        }
        self.bytes.extend_from_slice(chunk);
    }

    /// Pop the next complete record, terminator included.
    pub fn next_record(&mut self) -> Option<Vec<u8>> {
        let from = self.scanned.max(self.start);
        match self.bytes[from..].iter().position(|&b| b == NEWLINE) {
            Some(offset) => {
                let end = from + offset + 1;
                let record = self.bytes[self.start..end].to_vec();
                self.start = end;
                self.scanned = end;
                self.count += 1;
                Some(record)
            }
            None => {
                self.scanned = self.bytes.len();
                None
            }
        }
    }

    /// Bytes received but not yet resolved into a record.
    pub fn pending(&self) -> &[u8] {
        &self.bytes[self.start..]
    }

    pub fn is_empty(&self) -> bool {
        self.pending().is_empty()
    }

    /// Number of records handed out so far.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Resolve the unterminated tail into a final record and count it.
    pub fn take_fragment(&mut self) -> Option<Vec<u8>> {
        if self.is_empty() {
            return None;
        }
        let fragment = self.pending().to_vec();
        self.clear();
        self.count += 1;
        Some(fragment)
    }

    /// Throw the unterminated tail away, returning how many bytes were dropped.
    pub fn discard_fragment(&mut self) -> usize {
        let dropped = self.pending().len();
        self.clear();
        dropped
    }

    fn clear(&mut self) {
        self.bytes.clear();
        self.start = 0;
        self.scanned = 0;
    }
}

/// Decode a complete record. Invalid UTF-8 sequences become U+FFFD; the read
/// goes on.
pub(crate) fn decode_record(record: Vec<u8>) -> String {
    String::from_utf8(record)
        .unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned())
}
