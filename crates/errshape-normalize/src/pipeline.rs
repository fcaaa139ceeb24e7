//! Pipeline assembly and execution.
//!
//! A [`Pipeline`] runs, in order: the short-circuit filter, every detector
//! of [`PIPELINE_ORDER`], the stack-trace truncator and the whitespace
//! normalizer. Each stage consumes the previous stage's output.

use once_cell::sync::Lazy;
use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet};

use crate::catalog::{self, DetectorSpec, PIPELINE_ORDER};
use crate::detector::Detector;
use crate::errors::CatalogError;
use crate::fingerprint::{fingerprint_normalized, Fingerprint};
use crate::report::{NormalizationReport, NormalizationStatus};
use crate::short_circuit::ShortCircuit;
use crate::stack::truncate_stack;
use crate::whitespace::collapse_whitespace;

/// Version of the stage order and vocabulary. Normalized forms produced by
/// different versions are not comparable.
pub const PIPELINE_VERSION: u32 = 1;

/// Name of the whole-message filter stage in [`Pipeline::stage_names`].
pub const SHORT_CIRCUIT_STAGE: &str = "short_circuit";
/// Name of the stack-trace stage in [`Pipeline::stage_names`].
pub const STACK_STAGE: &str = "stack_frames";
/// Name of the whitespace stage in [`Pipeline::stage_names`].
pub const WHITESPACE_STAGE: &str = "whitespace";

static DEFAULT_PIPELINE: Lazy<Pipeline> = Lazy::new(|| {
    PipelineBuilder::new()
        .build()
        .expect("built-in detector catalog must compile")
});

/// Normalizes `message` with the process-wide default pipeline.
///
/// ```rust
/// use errshape_normalize::normalize_message;
///
/// assert_eq!(normalize_message("key:ABCDEFG"), "key:{?}");
/// assert_eq!(normalize_message(""), "");
/// ```
pub fn normalize_message(message: &str) -> String {
    Pipeline::global().normalize(message)
}

/// Builder for a [`Pipeline`] with optional grammar overrides.
#[derive(Debug, Default, Clone)]
pub struct PipelineBuilder {
    overrides: BTreeMap<String, String>,
}

impl PipelineBuilder {
    /// Starts from the built-in catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the grammar of detector `name`. The detector keeps its
    /// placeholder, match kind and position.
    pub fn override_pattern(mut self, name: impl Into<String>, pattern: impl Into<String>) -> Self {
        self.overrides.insert(name.into(), pattern.into());
        self
    }

    /// Applies several overrides at once.
    pub fn override_patterns<I, K, V>(mut self, overrides: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (name, pattern) in overrides {
            self.overrides.insert(name.into(), pattern.into());
        }
        self
    }

    /// Compiles the built-in catalog in [`PIPELINE_ORDER`].
    pub fn build(self) -> Result<Pipeline, CatalogError> {
        self.build_from(catalog::CATALOG, PIPELINE_ORDER)
    }

    /// Compiles an explicit catalog applied in `order`.
    ///
    /// Every catalog entry must appear in `order` exactly once and every
    /// name in `order` (or in an override) must be defined.
    pub fn build_from(
        self,
        specs: &[DetectorSpec],
        order: &[&str],
    ) -> Result<Pipeline, CatalogError> {
        let mut defined = BTreeSet::new();
        for spec in specs {
            if !defined.insert(spec.name) {
                return Err(CatalogError::DuplicateDetector(spec.name.to_string()));
            }
        }
        if let Some(unknown) = self.overrides.keys().find(|name| !defined.contains(name.as_str())) {
            return Err(CatalogError::UnknownDetector(unknown.clone()));
        }

        let mut placed = BTreeSet::new();
        let mut detectors = Vec::with_capacity(order.len());
        for (priority, name) in order.iter().enumerate() {
            if !placed.insert(*name) {
                return Err(CatalogError::DuplicateDetector(name.to_string()));
            }
            let spec = specs
                .iter()
                .find(|spec| spec.name == *name)
                .ok_or_else(|| CatalogError::UnknownDetector(name.to_string()))?;
            let pattern = self.overrides.get(*name).map(String::as_str);
            detectors.push(Detector::compile(spec, priority, pattern)?);
        }
        if let Some(unplaced) = defined.iter().find(|name| !placed.contains(*name)) {
            return Err(CatalogError::UnorderedDetector(unplaced.to_string()));
        }

        tracing::debug!(
            version = PIPELINE_VERSION,
            detectors = detectors.len(),
            overrides = self.overrides.len(),
            "compiled normalization pipeline"
        );

        Ok(Pipeline {
            short_circuit: ShortCircuit::new()?,
            detectors,
        })
    }
}

/// Compiled, immutable normalization pipeline. Safe to share across threads.
#[derive(Debug, Clone)]
pub struct Pipeline {
    short_circuit: ShortCircuit,
    detectors: Vec<Detector>,
}

impl Pipeline {
    /// Shorthand for [`PipelineBuilder::new`].
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::new()
    }

    /// The process-wide default pipeline, compiled on first use.
    pub fn global() -> &'static Pipeline {
        &DEFAULT_PIPELINE
    }

    /// Substitution detectors in application order.
    pub fn detectors(&self) -> &[Detector] {
        &self.detectors
    }

    /// Every stage name in execution order, including the non-detector stages.
    pub fn stage_names(&self) -> Vec<&'static str> {
        let mut names = Vec::with_capacity(self.detectors.len() + 3);
        names.push(SHORT_CIRCUIT_STAGE);
        names.extend(self.detectors.iter().map(Detector::name));
        names.push(STACK_STAGE);
        names.push(WHITESPACE_STAGE);
        names
    }

    /// Normalizes one message.
    pub fn normalize(&self, message: &str) -> String {
        if message.is_empty() || self.short_circuit.matches(message) {
            return String::new();
        }
        let mut current: Cow<'_, str> = Cow::Borrowed(message);
        for detector in &self.detectors {
            let rewritten = match detector.apply(&current) {
                Cow::Owned(next) => Some(next),
                Cow::Borrowed(_) => None,
            };
            if let Some(next) = rewritten {
                current = Cow::Owned(next);
            }
        }
        finish(&current).0
    }

    /// Normalizes one message and reports which stages rewrote it.
    pub fn normalize_with_report(&self, message: &str) -> (String, NormalizationReport) {
        if message.is_empty() {
            return (
                String::new(),
                NormalizationReport::new(NormalizationStatus::Empty, PIPELINE_VERSION),
            );
        }
        if self.short_circuit.matches(message) {
            return (
                String::new(),
                NormalizationReport::new(NormalizationStatus::ShortCircuited, PIPELINE_VERSION),
            );
        }

        let mut report = NormalizationReport::new(NormalizationStatus::Unchanged, PIPELINE_VERSION);
        let mut current: Cow<'_, str> = Cow::Borrowed(message);
        for detector in &self.detectors {
            let (rewritten, count) = match detector.apply_counted(&current) {
                (Cow::Owned(next), count) => (Some(next), count),
                (Cow::Borrowed(_), count) => (None, count),
            };
            if count > 0 {
                tracing::trace!(detector = detector.name(), count, "stage rewrote message");
                report.replacements.insert(detector.name().to_string(), count);
            }
            if let Some(next) = rewritten {
                current = Cow::Owned(next);
            }
        }

        let (normalized, truncated) = finish(&current);
        report.truncated_stack = truncated;
        if normalized != message {
            report.status = NormalizationStatus::Normalized;
        }
        (normalized, report)
    }

    /// Normalizes `message` and derives its fingerprint.
    pub fn fingerprint(&self, message: &str) -> Fingerprint {
        fingerprint_normalized(&self.normalize(message))
    }
}

/// Stack truncation followed by whitespace cleanup.
fn finish(message: &str) -> (String, bool) {
    match truncate_stack(message) {
        Some(truncated) => (collapse_whitespace(&truncated), true),
        None => (collapse_whitespace(message), false),
    }
}
