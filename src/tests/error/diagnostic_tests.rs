use std::io;

use miette::Diagnostic;

use crate::error::{AggregateError, LineReadError, ReadDiagnostic, Stage};

fn err(stage: Stage, target: &str) -> LineReadError {
    LineReadError::new(stage, target, io::Error::other("boom"))
}

#[test]
fn single_error_becomes_a_flat_diagnostic() {
    let diag = ReadDiagnostic::from(AggregateError::single(err(Stage::Parse, "a.tsv")));

    assert_eq!(diag.stage, Some(Stage::Parse));
    assert_eq!(diag.to_string(), "a.tsv failed at stage Parse");
    assert!(diag.help().is_some());
    assert!(diag.related.is_empty());
}

#[test]
fn multi_input_failure_lists_each_input() {
    let agg = AggregateError {
        errors: vec![err(Stage::Open, "a.tsv"), err(Stage::Read, "b.tsv")],
    };

    let diag = ReadDiagnostic::from(agg);

    assert_eq!(diag.to_string(), "2 input(s) failed");
    assert_eq!(diag.stage, None);
    let stages: Vec<_> = diag.related.iter().map(|d| d.stage).collect();
    assert_eq!(stages, vec![Some(Stage::Open), Some(Stage::Read)]);
}
