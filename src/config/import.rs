//! Import configuration loaded from YAML or JSON files.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use super::ReaderOptions;

/// Configuration for an entire import run.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImportConfig {
    /// Input configurations
    #[serde(default)]
    pub inputs: Vec<InputConfig>,
    /// Error policy: "fast_fail" or "accumulate"
    #[serde(default)]
    pub error_policy: Option<String>,
    /// Reader settings shared by every input
    #[serde(default)]
    pub reader: ReaderOptions,
}

/// Configuration for a single input source.
#[derive(Debug, Clone, Deserialize)]
pub struct InputConfig {
    /// Unique identifier for this input
    pub id: String,
    /// Kind of input: "stdin" or "file"
    pub kind: String,
    /// File path (for file inputs)
    #[serde(default)]
    pub path: Option<String>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[cfg(feature = "yaml")]
    #[error("invalid YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[cfg(feature = "json")]
    #[error("invalid JSON config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported config extension: {0:?}")]
    UnsupportedExtension(Option<String>),
}

impl ImportConfig {
    /// Create a new empty import configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an input configuration.
    pub fn add_input(mut self, input: InputConfig) -> Self {
        self.inputs.push(input);
        self
    }

    /// Set the error policy.
    pub fn with_error_policy(mut self, policy: impl Into<String>) -> Self {
        self.error_policy = Some(policy.into());
        self
    }

    pub fn with_reader(mut self, reader: ReaderOptions) -> Self {
        self.reader = reader;
        self
    }

    /// Load a config file, picking the format from its extension.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        let text = std::fs::read_to_string(path)?;

        match ext.as_deref() {
            #[cfg(feature = "yaml")]
            Some("yaml" | "yml") => Ok(serde_yaml::from_str(&text)?),
            #[cfg(feature = "json")]
            Some("json") => Ok(serde_json::from_str(&text)?),
            _ => Err(ConfigError::UnsupportedExtension(ext)),
        }
    }
}

impl InputConfig {
    pub fn file(id: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: "file".into(),
            path: Some(path.into()),
        }
    }

    pub fn stdin() -> Self {
        Self {
            id: "-".into(),
            kind: "stdin".into(),
            path: None,
        }
    }
}
