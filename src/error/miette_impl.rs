//! Rendering read and import errors through miette.

use miette::Diagnostic;
use thiserror::Error;

use super::{AggregateError, BoxError, LineReadError, Stage};

/// One failed input, or a whole failed run with every input attached as a
/// related diagnostic.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(tsvstream::read))]
pub struct ReadDiagnostic {
    pub message: String,
    /// `None` for the summary of a multi-input run.
    pub stage: Option<Stage>,
    #[source]
    pub source: Option<BoxError>,
    #[help]
    pub help: Option<String>,
    #[related]
    pub related: Vec<ReadDiagnostic>,
}

fn help_for(stage: Stage) -> &'static str {
    match stage {
        Stage::ResolveInput => "Inputs are file paths, \"-\" for stdin, or config entries of kind file/stdin",
        Stage::Open => "Check that the input path exists and is readable",
        Stage::Read => "The source failed mid-stream; re-run the whole import",
        Stage::Parse => "Each line needs 18 tab-separated offer fields",
        Stage::Handle => "A line handler rejected a record",
        Stage::Cancelled => "The import was cancelled before the source ended",
    }
}

impl From<LineReadError> for ReadDiagnostic {
    fn from(e: LineReadError) -> Self {
        ReadDiagnostic {
            message: format!("{} failed at stage {}", e.target, e.stage),
            stage: Some(e.stage),
            help: Some(help_for(e.stage).into()),
            source: Some(e.error),
            related: Vec::new(),
        }
    }
}

impl From<AggregateError> for ReadDiagnostic {
    fn from(mut agg: AggregateError) -> Self {
        if agg.errors.len() == 1 {
            if let Some(e) = agg.errors.pop() {
                return ReadDiagnostic::from(e);
            }
        }
        ReadDiagnostic {
            message: format!("{} input(s) failed", agg.errors.len()),
            stage: None,
            source: None,
            help: None,
            related: agg.errors.into_iter().map(ReadDiagnostic::from).collect(),
        }
    }
}

impl From<AggregateError> for miette::Report {
    fn from(agg: AggregateError) -> Self {
        miette::Report::new(ReadDiagnostic::from(agg))
    }
}
