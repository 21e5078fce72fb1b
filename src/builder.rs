//! Builder for creating ImportEngine instances.

use std::sync::Arc;

use crate::config::{ImportConfig, InputConfig, InputSpec, ReaderOptions, TrailingFragment};
use crate::engine::ImportEngine;
use crate::error::{AggregateError, ErrorPolicy, LineReadError, Stage};
use crate::io::{AsyncInputProvider, FileInput, StdinInput, resolve_arg};

/// Builder for creating ImportEngine instances.
#[derive(Debug)]
pub struct ImportBuilder {
    input_args: Vec<String>,
    input_specs: Vec<InputSpec>,
    error_policy: ErrorPolicy,
    options: ReaderOptions,
}

impl Default for ImportBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ImportBuilder {
    pub fn new() -> Self {
        Self {
            input_args: Vec::new(),
            input_specs: Vec::new(),
            error_policy: ErrorPolicy::Accumulate,
            options: ReaderOptions::default(),
        }
    }

    /// Set input arguments from command line args.
    pub fn inputs_from_args(mut self, args: &[String]) -> Self {
        self.input_args = args.to_vec();
        self
    }

    /// Add a single input argument: "-" for stdin, anything else is a path.
    pub fn add_input(mut self, arg: impl Into<String>) -> Self {
        self.input_args.push(arg.into());
        self
    }

    /// Add a pre-built input specification.
    pub fn add_input_spec(mut self, spec: InputSpec) -> Self {
        self.input_specs.push(spec);
        self
    }

    /// Set the error handling policy.
    pub fn with_mode(mut self, policy: ErrorPolicy) -> Self {
        self.error_policy = policy;
        self
    }

    pub fn with_options(mut self, options: ReaderOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.options.chunk_size = chunk_size;
        self
    }

    pub fn with_trailing(mut self, trailing: TrailingFragment) -> Self {
        self.options.trailing = trailing;
        self
    }

    /// Build the ImportEngine from the current configuration.
    pub fn build(self) -> Result<ImportEngine, AggregateError> {
        if self.options.chunk_size == 0 {
            return Err(AggregateError::single(LineReadError::new(
                Stage::ResolveInput,
                "reader",
                std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    "chunk size must be greater than zero",
                ),
            )));
        }

        let mut inputs = self.resolve_inputs();
        inputs.extend(self.input_specs);

        Ok(ImportEngine::new(self.error_policy, self.options, inputs))
    }

    /// Resolve input arguments into InputSpecs.
    fn resolve_inputs(&self) -> Vec<InputSpec> {
        self.input_args
            .iter()
            .map(|raw| InputSpec::new(raw.as_str(), resolve_arg(raw)))
            .collect()
    }

    /// Create a builder from an import configuration.
    pub fn from_config(config: ImportConfig) -> Result<Self, AggregateError> {
        let mut builder = ImportBuilder::new().with_options(config.reader);

        if let Some(policy_str) = config.error_policy.as_deref() {
            let policy = policy_str.parse().unwrap_or(ErrorPolicy::Accumulate);
            builder = builder.with_mode(policy);
        }

        let mut errors = Vec::new();

        for input_cfg in config.inputs {
            match builder.input_from_config(&input_cfg) {
                Ok(spec) => builder.input_specs.push(spec),
                Err(e) => {
                    errors.push(e);
                    if matches!(builder.error_policy, ErrorPolicy::FastFail) {
                        return Err(AggregateError { errors });
                    }
                }
            }
        }

        if !errors.is_empty() {
            return Err(AggregateError { errors });
        }

        Ok(builder)
    }

    fn input_from_config(&self, cfg: &InputConfig) -> Result<InputSpec, LineReadError> {
        let provider: Arc<dyn AsyncInputProvider> = match cfg.kind.as_str() {
            "stdin" | "-" => Arc::new(StdinInput::new()),
            "file" => {
                let path = cfg.path.as_ref().ok_or_else(|| {
                    LineReadError::new(
                        Stage::ResolveInput,
                        cfg.id.clone(),
                        std::io::Error::new(
                            std::io::ErrorKind::InvalidInput,
                            "file input requires 'path' field",
                        ),
                    )
                })?;
                Arc::new(FileInput::new(path.as_str()))
            }
            other => {
                return Err(LineReadError::new(
                    Stage::ResolveInput,
                    cfg.id.clone(),
                    std::io::Error::new(
                        std::io::ErrorKind::InvalidInput,
                        format!("unknown input kind: {}", other),
                    ),
                ));
            }
        };

        Ok(InputSpec::new(cfg.id.clone(), provider))
    }
}
