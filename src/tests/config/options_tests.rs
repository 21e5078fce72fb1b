//! Tests for reader options and import configuration.

use crate::config::{ImportConfig, InputConfig, ReaderOptions, TrailingFragment};
use crate::line::DEFAULT_CHUNK_SIZE;

#[test]
fn reader_options_default_to_16k_and_drop() {
    let options = ReaderOptions::new();

    assert_eq!(options.chunk_size, 16 * 1024);
    assert_eq!(options.chunk_size, DEFAULT_CHUNK_SIZE);
    assert_eq!(options.trailing, TrailingFragment::Drop);
}

#[test]
fn trailing_fragment_parses_from_str() {
    assert_eq!("drop".parse(), Ok(TrailingFragment::Drop));
    assert_eq!("Emit".parse(), Ok(TrailingFragment::Emit));
    assert_eq!("flush".parse(), Ok(TrailingFragment::Emit));
    assert!("keep".parse::<TrailingFragment>().is_err());
    assert_eq!(TrailingFragment::Emit.to_string(), "emit");
}

#[test]
fn input_config_helpers() {
    let file = InputConfig::file("offers", "mocks/offers.tsv");
    assert_eq!(file.kind, "file");
    assert_eq!(file.path.as_deref(), Some("mocks/offers.tsv"));

    let stdin = InputConfig::stdin();
    assert_eq!(stdin.id, "-");
    assert!(stdin.path.is_none());
}

#[test]
fn unsupported_config_extension_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("import.toml");
    std::fs::write(&path, "inputs = []").unwrap();

    let err = ImportConfig::from_path(&path).unwrap_err();
    assert!(err.to_string().contains("unsupported config extension"), "{err}");
}

#[test]
fn missing_config_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = ImportConfig::from_path(dir.path().join("absent.yaml")).unwrap_err();
    assert!(err.to_string().starts_with("failed to read config file"), "{err}");
}

#[cfg(feature = "json")]
#[test]
fn json_config_fills_reader_defaults() {
    let config: ImportConfig = serde_json::from_str(
        r#"{
            "inputs": [{ "id": "offers", "kind": "file", "path": "offers.tsv" }],
            "reader": { "trailing": "emit" }
        }"#,
    )
    .unwrap();

    assert_eq!(config.inputs.len(), 1);
    assert!(config.error_policy.is_none());
    assert_eq!(config.reader.chunk_size, DEFAULT_CHUNK_SIZE);
    assert_eq!(config.reader.trailing, TrailingFragment::Emit);
}

#[cfg(feature = "json")]
#[test]
fn json_config_loads_from_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("import.json");
    std::fs::write(
        &path,
        r#"{ "error_policy": "fast_fail", "reader": { "chunk_size": 4096 } }"#,
    )
    .unwrap();

    let config = ImportConfig::from_path(&path).unwrap();

    assert!(config.inputs.is_empty());
    assert_eq!(config.error_policy.as_deref(), Some("fast_fail"));
    assert_eq!(config.reader.chunk_size, 4096);
    assert_eq!(config.reader.trailing, TrailingFragment::Drop);
}
