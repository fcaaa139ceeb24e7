//! Stages command implementation.

use crate::output;
use errshape_normalize::{Pipeline, PIPELINE_VERSION};
use serde_json::{json, Value};

pub fn run(pipeline: &Pipeline, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        let detectors: Vec<Value> = pipeline
            .detectors()
            .iter()
            .map(|d| {
                json!({
                    "index": d.priority(),
                    "kind": d.kind().label(),
                    "name": d.name(),
                    "pattern": d.pattern(),
                    "placeholder": d.placeholder(),
                })
            })
            .collect();
        let value = json!({
            "detectors": detectors,
            "pipeline_version": PIPELINE_VERSION,
            "stages": pipeline.stage_names(),
        });
        println!("{}", output::format_canonical(&value)?);
        return Ok(());
    }

    println!("pipeline version {}", PIPELINE_VERSION);
    output::print_stage_header();
    for d in pipeline.detectors() {
        println!(
            "{}",
            output::format_stage_row(d.priority(), d.name(), d.placeholder().as_str(), d.kind().label())
        );
    }
    Ok(())
}
