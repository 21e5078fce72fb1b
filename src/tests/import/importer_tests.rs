//! Tests for decoding offers while reading.

use crate::error::{ErrorPolicy, Stage};
use crate::import::OfferImporter;
use crate::io::InMemorySource;
use crate::line::{BlockingLineReader, LineHandler};
use crate::offer::{Offer, OfferParseError};
use crate::tests::offer_line;

fn source(lines: &[String]) -> InMemorySource {
    let text: String = lines.iter().map(|l| format!("{l}\n")).collect();
    InMemorySource::from_string("offers.tsv", text)
}

#[test]
fn imports_every_valid_record() {
    let src = source(&[offer_line("one"), offer_line("two")]);
    let mut offers: Vec<Offer> = Vec::new();
    let mut importer = OfferImporter::new(ErrorPolicy::FastFail, |o| offers.push(o));

    let count = BlockingLineReader::open(&src)
        .unwrap()
        .read(&mut importer)
        .unwrap();

    let summary = importer.into_summary();
    assert_eq!(count, 2);
    assert_eq!(summary.lines, 2);
    assert_eq!(summary.imported, 2);
    assert!(summary.failures.is_empty());
    let titles: Vec<_> = offers.iter().map(|o| o.title.as_str()).collect();
    assert_eq!(titles, vec!["one", "two"]);
}

#[test]
fn fast_fail_stops_at_first_bad_record() {
    let src = source(&[
        offer_line("one"),
        "broken\trecord".to_string(),
        offer_line("three"),
    ]);
    let mut imported = 0;
    let mut importer = OfferImporter::new(ErrorPolicy::FastFail, |_| imported += 1);

    let err = BlockingLineReader::open(&src)
        .unwrap()
        .read(&mut importer)
        .unwrap_err();

    assert_eq!(err.stage, Stage::Parse);
    assert_eq!(err.target, "offers.tsv");
    assert!(err.to_string().contains("line 2"), "{err}");
    assert_eq!(importer.summary().lines, 0);
    drop(importer);
    assert_eq!(imported, 1);
}

#[test]
fn accumulate_collects_failures_with_line_numbers() {
    let src = source(&[
        "bad".to_string(),
        offer_line("two"),
        offer_line("three").replace("apartment", "castle"),
        offer_line("four"),
    ]);
    let mut importer = OfferImporter::new(ErrorPolicy::Accumulate, |_| {});

    let count = BlockingLineReader::open(&src)
        .unwrap()
        .read(&mut importer)
        .unwrap();

    let summary = importer.into_summary();
    assert_eq!(count, 4);
    assert_eq!(summary.imported, 2);
    let lines: Vec<usize> = summary.failures.iter().map(|f| f.line).collect();
    assert_eq!(lines, vec![1, 3]);
    assert!(matches!(
        summary.failures[0].source,
        OfferParseError::FieldCount { found: 1, .. }
    ));
    assert!(matches!(
        summary.failures[1].source,
        OfferParseError::InvalidField {
            field: "housing type",
            ..
        }
    ));
}

#[test]
fn blank_records_are_skipped_but_counted() {
    let src = source(&[
        String::new(),
        offer_line("one"),
        "  ".to_string(),
        offer_line("two"),
    ]);
    let mut importer = OfferImporter::new(ErrorPolicy::FastFail, |_| {});

    BlockingLineReader::open(&src)
        .unwrap()
        .read(&mut importer)
        .unwrap();

    let summary = importer.summary();
    assert_eq!(summary.lines, 4);
    assert_eq!(summary.imported, 2);
    assert!(summary.failures.is_empty());
}

#[test]
fn importer_can_be_driven_directly() {
    let mut importer = OfferImporter::new(ErrorPolicy::Accumulate, |_| {});

    importer.on_line(&format!("{}\n", offer_line("direct"))).unwrap();
    importer.on_line("nope\n").unwrap();
    importer.on_end(2);

    let summary = importer.into_summary();
    assert_eq!(summary.lines, 2);
    assert_eq!(summary.imported, 1);
    assert_eq!(summary.failures[0].to_string(), "line 2: expected 18 tab-separated fields, found 1");
}
