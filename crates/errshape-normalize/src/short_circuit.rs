use regex::Regex;

use crate::errors::CatalogError;

/// Synthetic placeholder-only paths such as `/t123/foo/?/?/?.ext`.
pub const PLACEHOLDER_PATH: &str = r"^/t\d+/[^/\s]+(?:/\?)+(?:\.[A-Za-z0-9]+)?$";

/// Whole-message filter for shapes that carry no information.
///
/// Patterns are matched against the trimmed message and must be anchored at
/// both ends; a substring hit never triggers the filter.
#[derive(Debug, Clone)]
pub struct ShortCircuit {
    patterns: Vec<Regex>,
}

impl ShortCircuit {
    /// Compiles the built-in filter.
    pub fn new() -> Result<Self, CatalogError> {
        Self::with_patterns(&[PLACEHOLDER_PATH])
    }

    /// Compiles a filter from explicit anchored patterns.
    pub fn with_patterns(patterns: &[&str]) -> Result<Self, CatalogError> {
        let patterns = patterns
            .iter()
            .map(|p| {
                Regex::new(p).map_err(|source| CatalogError::InvalidPattern {
                    detector: "short_circuit".to_string(),
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }

    /// Returns `true` when the whole message should normalize to `""`.
    pub fn matches(&self, message: &str) -> bool {
        let trimmed = message.trim();
        self.patterns.iter().any(|re| re.is_match(trimmed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_placeholder_path() {
        let filter = ShortCircuit::new().unwrap();
        assert!(filter.matches("/t123/foo/?/?/?.ext"));
        assert!(filter.matches("  /t9/bundle/?\n"));
    }

    #[test]
    fn partial_match_does_not_trigger() {
        let filter = ShortCircuit::new().unwrap();
        assert!(!filter.matches("failed to load /t123/foo/?/?/?.ext"));
        assert!(!filter.matches("/t123/foo/?/?/?.ext extra"));
        assert!(!filter.matches("/t123/foo/bar.js"));
    }
}
