//! Files and stdin.

use std::io::{self, Read};
use std::path::{Path, PathBuf};

use super::InputProvider;

/// Command-line argument that selects stdin instead of a file.
pub const STDIN_ARG: &str = "-";

#[derive(Debug, Clone, Default)]
pub struct StdinInput;

impl StdinInput {
    pub fn new() -> Self {
        Self
    }
}

impl InputProvider for StdinInput {
    fn id(&self) -> &str {
        STDIN_ARG
    }

    fn open(&self) -> io::Result<Box<dyn Read + Send>> {
        Ok(Box::new(io::stdin()))
    }
}

/// A TSV file on disk. Opening fails with the OS error if the path is missing
/// or unreadable.
#[derive(Debug, Clone)]
pub struct FileInput {
    id: String,
    path: PathBuf,
}

impl FileInput {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self {
            id: path.to_string_lossy().into_owned(),
            path,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl InputProvider for FileInput {
    fn id(&self) -> &str {
        &self.id
    }

    fn open(&self) -> io::Result<Box<dyn Read + Send>> {
        Ok(Box::new(std::fs::File::open(&self.path)?))
    }
}

#[cfg(feature = "async")]
mod async_impl {
    use async_trait::async_trait;
    use tokio::io::AsyncRead;

    use super::{FileInput, StdinInput};
    use crate::io::AsyncInputProvider;

    #[async_trait]
    impl AsyncInputProvider for StdinInput {
        async fn open_async(&self) -> std::io::Result<Box<dyn AsyncRead + Unpin + Send>> {
            Ok(Box::new(tokio::io::stdin()))
        }
    }

    #[async_trait]
    impl AsyncInputProvider for FileInput {
        async fn open_async(&self) -> std::io::Result<Box<dyn AsyncRead + Unpin + Send>> {
            let file = tokio::fs::File::open(&self.path).await?;
            Ok(Box::new(file))
        }
    }
}

/// Map a command-line argument to a provider: [`STDIN_ARG`] is stdin, anything
/// else is a file path.
#[cfg(feature = "async")]
pub fn resolve_arg(raw: &str) -> std::sync::Arc<dyn super::AsyncInputProvider> {
    if raw == STDIN_ARG {
        std::sync::Arc::new(StdinInput::new())
    } else {
        std::sync::Arc::new(FileInput::new(raw))
    }
}
