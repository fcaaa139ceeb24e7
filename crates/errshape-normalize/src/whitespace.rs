use once_cell::sync::Lazy;
use regex::Regex;

static MULTI_SPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s{2,}").expect("invalid regex"));

/// Collapses every run of two or more whitespace characters to one space and
/// trims both ends.
pub fn collapse_whitespace(message: &str) -> String {
    MULTI_SPACE.replace_all(message, " ").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_and_trims() {
        assert_eq!(collapse_whitespace("  a \t\t b   c \n"), "a b c");
    }

    #[test]
    fn single_whitespace_is_kept() {
        assert_eq!(collapse_whitespace("a\tb"), "a\tb");
    }

    #[test]
    fn idempotent() {
        let once = collapse_whitespace(" x   y  \r\n z ");
        assert_eq!(collapse_whitespace(&once), once);
    }
}
