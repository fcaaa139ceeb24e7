//! Normalize command implementation.

use crate::input;
use crate::output;
use errshape_normalize::{fingerprint_normalized, Pipeline};
use serde_json::json;

pub fn run(
    pipeline: &Pipeline,
    input: Option<String>,
    lines: bool,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let text = input::read_input(input.as_deref())?;

    let messages: Vec<&str> = if lines {
        text.lines().collect()
    } else {
        vec![text.as_str()]
    };

    for message in messages {
        if json {
            let (normalized, report) = pipeline.normalize_with_report(message);
            let value = json!({
                "fingerprint": fingerprint_normalized(&normalized),
                "normalized": normalized,
                "report": report,
            });
            println!("{}", output::format_canonical(&value)?);
        } else {
            println!("{}", pipeline.normalize(message));
        }
    }

    Ok(())
}
