//! Error types for pipeline construction.
//!
//! Normalization itself cannot fail; every error here is raised while a
//! pipeline is being compiled and should abort startup.

use thiserror::Error;

/// Errors raised while compiling a detector catalog into a pipeline.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// A detector pattern failed to compile.
    #[error("detector '{detector}' has an invalid pattern: {source}")]
    InvalidPattern {
        /// Detector (or filter) whose pattern was rejected.
        detector: String,
        /// Underlying regex error.
        #[source]
        source: regex::Error,
    },
    /// The order or an override names a detector the catalog does not define.
    #[error("unknown detector '{0}'")]
    UnknownDetector(String),
    /// A catalog entry is missing from the application order.
    #[error("detector '{0}' is defined but has no position in the pipeline order")]
    UnorderedDetector(String),
    /// Two catalog entries, or two order positions, share a name.
    #[error("detector '{0}' appears more than once")]
    DuplicateDetector(String),
    /// A template detector does not emit its declared placeholder.
    #[error("detector '{detector}' template does not emit {placeholder}")]
    TemplateMissingPlaceholder {
        /// Detector name.
        detector: String,
        /// Placeholder the template should contain.
        placeholder: &'static str,
    },
}
