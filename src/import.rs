//! Decoding lines into offers while a reader runs.

use thiserror::Error;
use tracing::{debug, trace, warn};

use crate::error::{ErrorPolicy, HandlerError, Stage};
use crate::line::LineHandler;
use crate::offer::{Offer, OfferParseError};

/// A parse failure together with the 1-based line it came from.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {source}")]
pub struct OfferLineError {
    pub line: usize,
    #[source]
    pub source: OfferParseError,
}

/// Outcome of importing one source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSummary {
    /// Records reported by the reader's `end` event.
    pub lines: usize,
    pub imported: usize,
    pub failures: Vec<OfferLineError>,
}

/// Line handler that turns every record into an [`Offer`] and passes it on.
///
/// Blank records are skipped. Malformed records abort the read under
/// `ErrorPolicy::FastFail`; under `ErrorPolicy::Accumulate` they are logged
/// and collected into the summary.
pub struct OfferImporter<F> {
    sink: F,
    policy: ErrorPolicy,
    line_no: usize,
    summary: ImportSummary,
}

impl<F> OfferImporter<F>
where
    F: FnMut(Offer),
{
    pub fn new(policy: ErrorPolicy, sink: F) -> Self {
        Self {
            sink,
            policy,
            line_no: 0,
            summary: ImportSummary::default(),
        }
    }

    pub fn summary(&self) -> &ImportSummary {
        &self.summary
    }

    pub fn into_summary(self) -> ImportSummary {
        self.summary
    }
}

impl<F> LineHandler for OfferImporter<F>
where
    F: FnMut(Offer),
{
    fn on_line(&mut self, line: &str) -> Result<(), HandlerError> {
        self.line_no += 1;
        if line.trim().is_empty() {
            trace!(line = self.line_no, "skipping blank record");
            return Ok(());
        }

        match Offer::from_tsv(line) {
            Ok(offer) => {
                self.summary.imported += 1;
                (self.sink)(offer);
                Ok(())
            }
            Err(source) => {
                let err = OfferLineError {
                    line: self.line_no,
                    source,
                };
                match self.policy {
                    ErrorPolicy::FastFail => Err(HandlerError::with_stage(Stage::Parse, err)),
                    ErrorPolicy::Accumulate => {
                        warn!(error = %err, "skipping malformed offer");
                        self.summary.failures.push(err);
                        Ok(())
                    }
                }
            }
        }
    }

    fn on_end(&mut self, count: usize) {
        self.summary.lines = count;
        debug!(
            lines = count,
            imported = self.summary.imported,
            failed = self.summary.failures.len(),
            "offer import finished"
        );
    }
}
