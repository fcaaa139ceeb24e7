//! Output formatting utilities.

use serde_json::Value;

/// Formats a value as canonical JSON on a single line.
pub fn format_canonical(value: &Value) -> Result<String, Box<dyn std::error::Error>> {
    let text = canonical_json::to_string(value)
        .map_err(|e| format!("Canonicalization failed: {}", e))?;
    Ok(text)
}

/// Formats one group as a table row.
pub fn format_group_row(count: u64, fingerprint: &str, normalized: &str) -> String {
    format!("{:>7} {:<43} {}", count, fingerprint, truncate(normalized, 96))
}

/// Prints the group table header.
#[allow(clippy::print_literal)]
pub fn print_group_header() {
    println!("{:>7} {:<43} {}", "COUNT", "FINGERPRINT", "NORMALIZED");
    println!("{}", "-".repeat(100));
}

/// Formats one detector stage as a table row.
pub fn format_stage_row(index: usize, name: &str, placeholder: &str, kind: &str) -> String {
    format!("{:>5} {:<20} {:<14} {}", index, name, placeholder, kind)
}

/// Prints the stage table header.
#[allow(clippy::print_literal)]
pub fn print_stage_header() {
    println!("{:>5} {:<20} {:<14} {}", "INDEX", "NAME", "PLACEHOLDER", "KIND");
    println!("{}", "-".repeat(50));
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn canonical_output_sorts_keys() {
        let value = json!({"normalized": "x", "count": 2});
        assert_eq!(format_canonical(&value).unwrap(), r#"{"count":2,"normalized":"x"}"#);
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        let long = "错".repeat(200);
        let row = format_group_row(1, "fp", &long);
        assert!(row.ends_with("..."));
    }

    #[test]
    fn short_rows_are_untouched() {
        assert!(format_group_row(3, "fp", "boom {NUMBER}").ends_with("boom {NUMBER}"));
    }
}
