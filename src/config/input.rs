use std::sync::Arc;

use crate::io::AsyncInputProvider;

/// A resolved input: where to read from and how it is named in errors.
#[derive(Debug, Clone)]
pub struct InputSpec {
    /// Raw input argument or configuration id
    pub raw: String,
    /// The async input provider implementation
    pub provider: Arc<dyn AsyncInputProvider>,
}

impl InputSpec {
    pub fn new(raw: impl Into<String>, provider: Arc<dyn AsyncInputProvider>) -> Self {
        Self {
            raw: raw.into(),
            provider,
        }
    }
}
