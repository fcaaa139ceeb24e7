//! Group command implementation.

use crate::config::GroupConfig;
use crate::input;
use crate::output;
use errshape_normalize::{fingerprint_normalized, Fingerprint, Pipeline};
use serde_json::json;
use std::collections::HashMap;

/// Records sharing one normalized form.
#[derive(Debug)]
struct Group {
    fingerprint: Fingerprint,
    normalized: String,
    /// First raw record seen for this shape.
    sample: String,
    count: u64,
}

pub fn run(
    pipeline: &Pipeline,
    config: &GroupConfig,
    input: Option<String>,
    json: bool,
    min_count: u64,
) -> Result<(), Box<dyn std::error::Error>> {
    let text = input::read_input(input.as_deref())?;
    let records = input::split_records(&text, config.record_separator);

    let groups = group_records(pipeline, &records);
    tracing::debug!(
        records = records.len(),
        groups = groups.len(),
        "grouped input records"
    );

    if !json {
        output::print_group_header();
    }

    for group in groups.iter().filter(|g| g.count >= min_count) {
        if json {
            let value = json!({
                "count": group.count,
                "fingerprint": group.fingerprint,
                "normalized": group.normalized,
                "sample": group.sample,
            });
            println!("{}", output::format_canonical(&value)?);
        } else {
            println!(
                "{}",
                output::format_group_row(group.count, &group.fingerprint.b64, &group.normalized)
            );
        }
    }

    Ok(())
}

/// Groups records by fingerprint, most frequent first, ties by normalized
/// form. Records that normalize to the empty string are dropped.
fn group_records(pipeline: &Pipeline, records: &[String]) -> Vec<Group> {
    let mut by_fingerprint: HashMap<Fingerprint, Group> = HashMap::new();
    let mut dropped = 0usize;

    for record in records {
        let normalized = pipeline.normalize(record);
        if normalized.is_empty() {
            dropped += 1;
            continue;
        }
        let fingerprint = fingerprint_normalized(&normalized);
        by_fingerprint
            .entry(fingerprint.clone())
            .or_insert_with(|| Group {
                fingerprint,
                normalized,
                sample: record.clone(),
                count: 0,
            })
            .count += 1;
    }
    if dropped > 0 {
        tracing::debug!(dropped, "dropped records with an empty normalized form");
    }

    let mut groups: Vec<Group> = by_fingerprint.into_values().collect();
    groups.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| a.normalized.cmp(&b.normalized))
    });
    groups
}
