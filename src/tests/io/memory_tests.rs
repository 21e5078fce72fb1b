//! Tests for the in-memory source.

use std::io::{ErrorKind, Read};

use crate::{InMemorySource, InputProvider};

#[test]
fn in_memory_source_reads_data() {
    let src = InMemorySource::from_string("id", "hello");

    let mut reader = src.open().expect("open in-memory source");
    let mut buf = String::new();
    reader.read_to_string(&mut buf).unwrap();

    assert_eq!(buf, "hello");
    assert_eq!(src.id(), "id");
}

#[test]
fn in_memory_source_serves_one_chunk_per_read() {
    let src = InMemorySource::from_chunks("id", ["ab", "", "cde"]);
    let mut reader = InputProvider::open(&src).unwrap();
    let mut buf = [0u8; 8];

    assert_eq!(reader.read(&mut buf).unwrap(), 2);
    assert_eq!(&buf[..2], b"ab");
    assert_eq!(reader.read(&mut buf).unwrap(), 3);
    assert_eq!(&buf[..3], b"cde");
    assert_eq!(reader.read(&mut buf).unwrap(), 0);
}

#[test]
fn in_memory_source_splits_chunks_larger_than_buffer() {
    let src = InMemorySource::from_string("id", "abcdef");
    let mut reader = InputProvider::open(&src).unwrap();
    let mut buf = [0u8; 4];

    assert_eq!(reader.read(&mut buf).unwrap(), 4);
    assert_eq!(reader.read(&mut buf).unwrap(), 2);
    assert_eq!(&buf[..2], b"ef");
}

#[test]
fn in_memory_source_fails_after_chunks() {
    let src =
        InMemorySource::from_chunks("id", ["ab"]).fail_after_chunks(ErrorKind::Other, "boom");
    let mut reader = InputProvider::open(&src).unwrap();
    let mut buf = [0u8; 8];

    assert_eq!(reader.read(&mut buf).unwrap(), 2);
    let err = reader.read(&mut buf).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Other);
    assert_eq!(err.to_string(), "boom");
}

#[test]
fn every_open_starts_from_the_beginning() {
    let src = InMemorySource::from_string("id", "again");

    for _ in 0..2 {
        let mut buf = String::new();
        InputProvider::open(&src)
            .unwrap()
            .read_to_string(&mut buf)
            .unwrap();
        assert_eq!(buf, "again");
    }
}

#[cfg(feature = "async")]
#[tokio::test]
async fn in_memory_source_reads_async() {
    use tokio::io::AsyncReadExt;

    use crate::AsyncInputProvider;

    let src = InMemorySource::from_chunks("id", ["he", "llo"]);
    let mut reader = src.open_async().await.unwrap();
    let mut buf = String::new();
    reader.read_to_string(&mut buf).await.unwrap();

    assert_eq!(buf, "hello");
}
