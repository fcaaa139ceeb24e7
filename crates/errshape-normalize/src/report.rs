use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Outcome of one normalization call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NormalizationStatus {
    /// Input was empty; no stage ran.
    Empty,
    /// A whole-message filter forced the empty result.
    ShortCircuited,
    /// Every stage ran and the output equals the input.
    Unchanged,
    /// At least one stage rewrote the message.
    Normalized,
}

/// Per-call report describing which stages rewrote a message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizationReport {
    /// Overall status.
    pub status: NormalizationStatus,
    /// Replacement counts keyed by detector name; detectors without matches are omitted.
    pub replacements: BTreeMap<String, u64>,
    /// Whether a stack-trace suffix was elided.
    pub truncated_stack: bool,
    /// Version of the stage order that produced the output.
    pub pipeline_version: u32,
}

impl NormalizationReport {
    pub(crate) fn new(status: NormalizationStatus, pipeline_version: u32) -> Self {
        Self {
            status,
            replacements: BTreeMap::new(),
            truncated_stack: false,
            pipeline_version,
        }
    }

    /// Total number of placeholder substitutions, the stack-trace marker included.
    pub fn total_replacements(&self) -> u64 {
        self.replacements.values().sum::<u64>() + u64::from(self.truncated_stack)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_includes_stack_marker() {
        let mut report = NormalizationReport::new(NormalizationStatus::Normalized, 1);
        report.replacements.insert("number".to_string(), 2);
        report.replacements.insert("ipv4".to_string(), 1);
        assert_eq!(report.total_replacements(), 3);
        report.truncated_stack = true;
        assert_eq!(report.total_replacements(), 4);
    }
}
