use serde::{Serialize, Serializer};
use std::fmt;

/// Placeholder token substituted for one category of volatile substring.
///
/// The literal strings returned by [`Placeholder::as_str`] are compared for
/// equality by downstream grouping, so they never change between pipeline
/// versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Placeholder {
    /// `{URL}`
    Url,
    /// `{IP}`, IPv4 or IPv6 with an optional port.
    Ip,
    /// `{DOMAIN}`
    Domain,
    /// `{FILE}`, source file paths.
    File,
    /// `{HASH}`, opaque identifiers: UUIDs, tokens, digests, hex.
    Hash,
    /// `{NUMBER}`
    Number,
    /// `{DATE}`, dates, times and timestamps.
    Date,
    /// `{?}`, a short code whose meaning comes from its context.
    Generic,
    /// `{StackFrames}`, elided stack-trace frames.
    StackFrames,
}

impl Placeholder {
    /// Every token in the vocabulary.
    pub const ALL: [Placeholder; 9] = [
        Placeholder::Url,
        Placeholder::Ip,
        Placeholder::Domain,
        Placeholder::File,
        Placeholder::Hash,
        Placeholder::Number,
        Placeholder::Date,
        Placeholder::Generic,
        Placeholder::StackFrames,
    ];

    /// Literal token text.
    pub const fn as_str(self) -> &'static str {
        match self {
            Placeholder::Url => "{URL}",
            Placeholder::Ip => "{IP}",
            Placeholder::Domain => "{DOMAIN}",
            Placeholder::File => "{FILE}",
            Placeholder::Hash => "{HASH}",
            Placeholder::Number => "{NUMBER}",
            Placeholder::Date => "{DATE}",
            Placeholder::Generic => "{?}",
            Placeholder::StackFrames => "{StackFrames}",
        }
    }
}

impl fmt::Display for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Placeholder {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_are_the_published_literals() {
        let tokens: Vec<&str> = Placeholder::ALL.iter().map(|p| p.as_str()).collect();
        assert_eq!(
            tokens,
            vec![
                "{URL}",
                "{IP}",
                "{DOMAIN}",
                "{FILE}",
                "{HASH}",
                "{NUMBER}",
                "{DATE}",
                "{?}",
                "{StackFrames}"
            ]
        );
    }

    #[test]
    fn serializes_as_token_text() {
        assert_eq!(
            serde_json::to_string(&Placeholder::Generic).unwrap(),
            r#""{?}""#
        );
    }
}
