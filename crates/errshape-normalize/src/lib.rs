//! Message normalization for grouping error and log messages.
//!
//! A message is rewritten by an ordered pipeline of detectors that replace
//! volatile substrings (URLs, IPs, IDs, timestamps, numbers, ...) with fixed
//! placeholder tokens, so messages that differ only in incidental values
//! share one normalized form.
//!
//! ```rust
//! use errshape_normalize::normalize_message;
//!
//! let shape = normalize_message("timeout after 3000 ms talking to 10.0.0.12:5432");
//! assert_eq!(shape, "timeout after {NUMBER} ms talking to {IP}");
//! ```
//!
//! Core invariants:
//! - The placeholder vocabulary in [`vocabulary`] is a stable contract.
//! - The stage order in [`catalog::PIPELINE_ORDER`] is versioned by [`PIPELINE_VERSION`].
//! - Normalization never fails and never mutates shared state.
//!
#![deny(missing_docs)]

/// Built-in detector definitions and their application order.
pub mod catalog;
/// Compiled detectors and match kinds.
pub mod detector;
/// Error types for pipeline construction.
pub mod errors;
/// Content-derived fingerprints of normalized messages.
pub mod fingerprint;
/// Pipeline assembly and execution.
pub mod pipeline;
/// Per-call normalization reports.
pub mod report;
/// Whole-message short-circuit filter.
pub mod short_circuit;
/// Stack-trace suffix truncation.
pub mod stack;
/// Validation helpers used by public value types.
pub mod validation;
/// Placeholder tokens emitted by the pipeline.
pub mod vocabulary;
/// Whitespace collapsing.
pub mod whitespace;

pub use catalog::{DetectorSpec, PIPELINE_ORDER};
pub use detector::{Detector, MatchKind};
pub use errors::CatalogError;
pub use fingerprint::{fingerprint, fingerprint_normalized, Fingerprint, FingerprintAlg};
pub use pipeline::{normalize_message, Pipeline, PipelineBuilder, PIPELINE_VERSION};
pub use report::{NormalizationReport, NormalizationStatus};
pub use validation::ValidationError;
pub use vocabulary::Placeholder;
