use regex::{Captures, Regex};
use std::borrow::Cow;
use std::fmt;

use crate::catalog::DetectorSpec;
use crate::errors::CatalogError;
use crate::vocabulary::Placeholder;

/// How a detector turns a match into replacement text.
#[derive(Clone, Copy)]
pub enum MatchKind {
    /// Replace the whole match with the placeholder.
    Whole,
    /// Replace the whole match only when the predicate accepts the matched
    /// text; rejected matches are kept verbatim.
    Guarded(fn(&str) -> bool),
    /// Expand a capture template (`${name}` references) that contains the
    /// placeholder, keeping the surrounding context captured by the pattern.
    Template(&'static str),
}

impl MatchKind {
    /// Short label used in listings.
    pub fn label(&self) -> &'static str {
        match self {
            MatchKind::Whole => "whole",
            MatchKind::Guarded(_) => "guarded",
            MatchKind::Template(_) => "template",
        }
    }
}

impl fmt::Debug for MatchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchKind::Template(template) => f.debug_tuple("Template").field(template).finish(),
            other => f.write_str(other.label()),
        }
    }
}

/// A compiled detector: one stage of the substitution engine.
#[derive(Debug, Clone)]
pub struct Detector {
    name: &'static str,
    regex: Regex,
    placeholder: Placeholder,
    kind: MatchKind,
    priority: usize,
}

impl Detector {
    /// Compiles `spec` at pipeline position `priority`, using `pattern` in
    /// place of the built-in grammar when given.
    pub fn compile(
        spec: &DetectorSpec,
        priority: usize,
        pattern: Option<&str>,
    ) -> Result<Self, CatalogError> {
        let source = pattern.unwrap_or(spec.pattern);
        let regex = Regex::new(source).map_err(|source| CatalogError::InvalidPattern {
            detector: spec.name.to_string(),
            source,
        })?;

        if let MatchKind::Template(template) = spec.kind {
            if !template.contains(spec.placeholder.as_str()) {
                return Err(CatalogError::TemplateMissingPlaceholder {
                    detector: spec.name.to_string(),
                    placeholder: spec.placeholder.as_str(),
                });
            }
        }

        Ok(Self {
            name: spec.name,
            regex,
            placeholder: spec.placeholder,
            kind: spec.kind,
            priority,
        })
    }

    /// Detector name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Placeholder this detector emits.
    pub fn placeholder(&self) -> Placeholder {
        self.placeholder
    }

    /// Match kind.
    pub fn kind(&self) -> MatchKind {
        self.kind
    }

    /// Zero-based position in the pipeline.
    pub fn priority(&self) -> usize {
        self.priority
    }

    /// Pattern source the detector was compiled from.
    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }

    /// Replaces every non-overlapping leftmost match in `text`.
    pub fn apply<'t>(&self, text: &'t str) -> Cow<'t, str> {
        self.apply_counted(text).0
    }

    /// Like [`Detector::apply`], also returning how many matches were rewritten.
    pub fn apply_counted<'t>(&self, text: &'t str) -> (Cow<'t, str>, u64) {
        let mut count = 0u64;
        let token = self.placeholder.as_str();
        let rewritten = match self.kind {
            MatchKind::Whole => self.regex.replace_all(text, |_: &Captures<'_>| {
                count += 1;
                token
            }),
            MatchKind::Guarded(accept) => self.regex.replace_all(text, |caps: &Captures<'_>| {
                let matched = &caps[0];
                if accept(matched) {
                    count += 1;
                    token.to_string()
                } else {
                    matched.to_string()
                }
            }),
            MatchKind::Template(template) => {
                self.regex.replace_all(text, |caps: &Captures<'_>| {
                    count += 1;
                    let mut out = String::new();
                    caps.expand(template, &mut out);
                    out
                })
            }
        };
        (rewritten, count)
    }
}
