//! Input reading and record splitting.

use crate::config::RecordSeparator;
use std::io::{self, Read};

/// Reads `input` as UTF-8, or stdin when no path is given.
pub fn read_input(input: Option<&str>) -> Result<String, Box<dyn std::error::Error>> {
    match input {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .map_err(|e| format!("Failed to read file {}: {}", path, e))?;
            Ok(text)
        }
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
    }
}

/// Splits `text` into records. Blank records are dropped.
pub fn split_records(text: &str, separator: RecordSeparator) -> Vec<String> {
    match separator {
        RecordSeparator::Line => text
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(str::to_string)
            .collect(),
        RecordSeparator::BlankLine => {
            let mut records = Vec::new();
            let mut current: Vec<&str> = Vec::new();
            for line in text.lines() {
                if line.trim().is_empty() {
                    if !current.is_empty() {
                        records.push(current.join("\n"));
                        current.clear();
                    }
                } else {
                    current.push(line);
                }
            }
            if !current.is_empty() {
                records.push(current.join("\n"));
            }
            records
        }
    }
}
