//! Observation side of a read: the `line`/`end` events and their receivers.

use crate::error::HandlerError;

/// One observable event of a read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineEvent {
    /// A complete record, trailing `\n` included.
    Line(String),
    /// Total number of records emitted. Always the last event.
    End(usize),
}

/// Receives the events of a read in stream order.
///
/// `on_line` runs synchronously inside the chunk-processing step, so all
/// records of one chunk are delivered before the next chunk is awaited.
/// Returning an error aborts the read and `on_end` is not called.
pub trait LineHandler {
    fn on_line(&mut self, line: &str) -> Result<(), HandlerError>;

    fn on_end(&mut self, _count: usize) {}
}

impl<H: LineHandler + ?Sized> LineHandler for &mut H {
    fn on_line(&mut self, line: &str) -> Result<(), HandlerError> {
        (**self).on_line(line)
    }

    fn on_end(&mut self, count: usize) {
        (**self).on_end(count)
    }
}

/// Records every event it sees.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LineCollector {
    pub lines: Vec<String>,
    pub end: Option<usize>,
}

impl LineCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// The events in the order they were delivered.
    pub fn events(&self) -> Vec<LineEvent> {
        let mut events: Vec<LineEvent> = self.lines.iter().cloned().map(LineEvent::Line).collect();
        if let Some(count) = self.end {
            events.push(LineEvent::End(count));
        }
        events
    }
}

impl LineHandler for LineCollector {
    fn on_line(&mut self, line: &str) -> Result<(), HandlerError> {
        self.lines.push(line.to_string());
        Ok(())
    }

    fn on_end(&mut self, count: usize) {
        self.end = Some(count);
    }
}

/// Ignores records; useful when only the final count matters.
#[derive(Debug, Default, Clone, Copy)]
pub struct CountOnly;

impl LineHandler for CountOnly {
    fn on_line(&mut self, _line: &str) -> Result<(), HandlerError> {
        Ok(())
    }
}

/// Adapts a closure into a [`LineHandler`].
pub struct FnHandler<F> {
    on_line: F,
}

impl<F> FnHandler<F>
where
    F: FnMut(&str) -> Result<(), HandlerError>,
{
    pub fn new(on_line: F) -> Self {
        Self { on_line }
    }
}

impl<F> LineHandler for FnHandler<F>
where
    F: FnMut(&str) -> Result<(), HandlerError>,
{
    fn on_line(&mut self, line: &str) -> Result<(), HandlerError> {
        (self.on_line)(line)
    }
}
