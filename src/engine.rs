//! Asynchronous import engine running one line reader per input.

use futures::stream::{self, StreamExt};
use tracing::{info, warn};

use crate::config::{InputSpec, ReaderOptions};
use crate::error::{AggregateError, ErrorPolicy, LineReadError, Stage};
use crate::import::{ImportSummary, OfferImporter};
use crate::line::{CountOnly, LineStreamReader};
use crate::offer::Offer;

/// Per-input result of [`ImportEngine::import_all`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputReport {
    pub target: String,
    pub summary: ImportSummary,
}

/// Orchestrates reads over several inputs under one error policy.
#[derive(Debug)]
pub struct ImportEngine {
    error_policy: ErrorPolicy,
    options: ReaderOptions,
    inputs: Vec<InputSpec>,
}

impl ImportEngine {
    /// Create a new import engine.
    pub fn new(error_policy: ErrorPolicy, options: ReaderOptions, inputs: Vec<InputSpec>) -> Self {
        Self {
            error_policy,
            options,
            inputs,
        }
    }

    /// Get the error policy.
    pub fn error_policy(&self) -> ErrorPolicy {
        self.error_policy
    }

    pub fn options(&self) -> &ReaderOptions {
        &self.options
    }

    /// Get the input specifications.
    pub fn inputs(&self) -> &[InputSpec] {
        &self.inputs
    }

    /// Import every input in order, handing each offer to `sink` together
    /// with the id of the input it came from.
    ///
    /// With `FastFail` the first failing input stops the run; with
    /// `Accumulate` the remaining inputs are still imported and all errors
    /// are returned together.
    pub async fn import_all<F>(&self, mut sink: F) -> Result<Vec<InputReport>, AggregateError>
    where
        F: FnMut(&str, Offer),
    {
        let mut reports = Vec::with_capacity(self.inputs.len());
        let mut errors = Vec::new();

        for spec in &self.inputs {
            match self.import_one(spec, &mut sink).await {
                Ok(summary) => {
                    info!(
                        input = %spec.raw,
                        lines = summary.lines,
                        imported = summary.imported,
                        failed = summary.failures.len(),
                        "input imported"
                    );
                    reports.push(InputReport {
                        target: spec.raw.clone(),
                        summary,
                    });
                }
                Err(e) => {
                    warn!(error = %e, "input import failed");
                    errors.push(e);
                    if matches!(self.error_policy, ErrorPolicy::FastFail) {
                        return Err(AggregateError { errors });
                    }
                }
            }
        }

        if errors.is_empty() {
            Ok(reports)
        } else {
            Err(AggregateError { errors })
        }
    }

    async fn import_one<F>(
        &self,
        spec: &InputSpec,
        sink: &mut F,
    ) -> Result<ImportSummary, LineReadError>
    where
        F: FnMut(&str, Offer),
    {
        let reader = self.open_reader(spec).await?;
        let target = spec.raw.as_str();
        let mut importer = OfferImporter::new(self.error_policy, |offer| sink(target, offer));
        reader.read(&mut importer).await?;
        Ok(importer.into_summary())
    }

    /// Count the records of every input, reading up to `concurrency` inputs
    /// at once. Results come back in completion order.
    ///
    /// With `FastFail` the first error drops the reads still in flight and
    /// no further inputs are opened.
    pub async fn count_lines(
        &self,
        concurrency: usize,
    ) -> Result<Vec<(String, usize)>, AggregateError> {
        let mut results = stream::iter(self.inputs.iter().map(|spec| async move {
            let reader = self.open_reader(spec).await?;
            let count = reader.read(&mut CountOnly).await?;
            Ok::<_, LineReadError>((spec.raw.clone(), count))
        }))
        .buffer_unordered(concurrency.max(1));

        let mut counts = Vec::with_capacity(self.inputs.len());
        let mut errors = Vec::new();
        while let Some(result) = results.next().await {
            match result {
                Ok(count) => counts.push(count),
                Err(e) => {
                    warn!(error = %e, "line count failed");
                    errors.push(e);
                    if matches!(self.error_policy, ErrorPolicy::FastFail) {
                        return Err(AggregateError { errors });
                    }
                }
            }
        }

        if errors.is_empty() {
            Ok(counts)
        } else {
            Err(AggregateError { errors })
        }
    }

    async fn open_reader(&self, spec: &InputSpec) -> Result<LineStreamReader, LineReadError> {
        let source = spec
            .provider
            .open_async()
            .await
            .map_err(|e| LineReadError::new(Stage::Open, spec.raw.as_str(), e))?;
        Ok(LineStreamReader::new(spec.raw.clone(), source).with_options(self.options))
    }
}
