//! Integration tests for CLI commands.

use serde_json::Value;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};
use tempfile::TempDir;

fn write_file(dir: &TempDir, name: &str, contents: &str) -> String {
    let path = dir.path().join(name);
    std::fs::write(&path, contents).unwrap();
    path.to_string_lossy().to_string()
}

fn command(cwd: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_errshape"));
    cmd.current_dir(cwd)
        .env_remove("ERRSHAPE_CONFIG")
        .env_remove("ERRSHAPE_LOG_LEVEL")
        .env_remove("RUST_LOG");
    cmd
}

fn run_cli(cwd: &Path, args: &[&str]) -> (bool, String, String) {
    let output = command(cwd).args(args).output().expect("Failed to execute CLI");

    let stdout = String::from_utf8(output.stdout).unwrap();
    let stderr = String::from_utf8(output.stderr).unwrap();
    (output.status.success(), stdout, stderr)
}

fn json_lines(stdout: &str) -> Vec<Value> {
    stdout
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

#[test]
fn test_normalize_file() {
    let dir = TempDir::new().unwrap();
    let input = write_file(
        &dir,
        "msg.txt",
        "timeout after 3000 ms talking to 10.0.0.12:5432\n",
    );

    let (success, stdout, _) = run_cli(dir.path(), &["normalize", &input]);
    assert!(success);
    assert_eq!(stdout.trim_end(), "timeout after {NUMBER} ms talking to {IP}");
}

#[test]
fn test_normalize_whole_input_truncates_stack() {
    let dir = TempDir::new().unwrap();
    let input = write_file(
        &dir,
        "trace.txt",
        "TypeError: x is undefined\n    at f (a.js:1:2)\n    at g (b.js:3:4)\n",
    );

    let (success, stdout, _) = run_cli(dir.path(), &["normalize", &input]);
    assert!(success);
    assert_eq!(stdout.trim_end(), "TypeError: x is undefined {StackFrames}");
}

#[test]
fn test_normalize_stdin() {
    let dir = TempDir::new().unwrap();
    let mut child = command(dir.path())
        .arg("normalize")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"user 42 not found")
        .unwrap();
    let output = child.wait_with_output().unwrap();

    assert!(output.status.success());
    assert_eq!(
        String::from_utf8(output.stdout).unwrap().trim_end(),
        "user {NUMBER} not found"
    );
}

#[test]
fn test_normalize_lines_json() {
    let dir = TempDir::new().unwrap();
    let input = write_file(&dir, "msgs.txt", "user 1 not found\nuser 2 not found\n");

    let (success, stdout, _) = run_cli(dir.path(), &["normalize", &input, "--lines", "--json"]);
    assert!(success);

    let values = json_lines(&stdout);
    assert_eq!(values.len(), 2);
    for value in &values {
        assert_eq!(value["normalized"], "user {NUMBER} not found");
        assert_eq!(value["fingerprint"]["alg"], "sha-256");
        assert_eq!(value["report"]["status"], "Normalized");
        assert_eq!(value["report"]["replacements"]["number"], 1);
    }
    assert_eq!(values[0]["fingerprint"], values[1]["fingerprint"]);
}

#[test]
fn test_group_table() {
    let dir = TempDir::new().unwrap();
    let input = write_file(
        &dir,
        "log.txt",
        "timeout after 30 ms\ndisk full\ntimeout after 45 ms\ntimeout after 10 ms\n",
    );

    let (success, stdout, _) = run_cli(dir.path(), &["group", &input]);
    assert!(success);
    assert!(stdout.contains("COUNT"));

    let rows: Vec<&str> = stdout.lines().skip(2).collect();
    assert_eq!(rows.len(), 2);
    assert!(rows[0].trim_start().starts_with('3'));
    assert!(rows[0].ends_with("timeout after {NUMBER} ms"));
    assert!(rows[1].ends_with("disk full"));
}

#[test]
fn test_group_json_min_count() {
    let dir = TempDir::new().unwrap();
    let input = write_file(
        &dir,
        "log.txt",
        "timeout after 30 ms\ndisk full\ntimeout after 45 ms\n",
    );

    let (success, stdout, _) = run_cli(
        dir.path(),
        &["group", &input, "--json", "--min-count", "2"],
    );
    assert!(success);

    let values = json_lines(&stdout);
    assert_eq!(values.len(), 1);
    assert_eq!(values[0]["count"], 2);
    assert_eq!(values[0]["normalized"], "timeout after {NUMBER} ms");
    assert_eq!(values[0]["sample"], "timeout after 30 ms");
}

#[test]
fn test_group_blank_line_records_from_config() {
    let dir = TempDir::new().unwrap();
    write_file(
        &dir,
        "errshape.toml",
        "[group]\nrecord_separator = \"blank-line\"\n",
    );
    let input = write_file(
        &dir,
        "log.txt",
        "boom 1\n    at f (a.js:1:1)\n\nboom 2\n    at g (b.js:9:9)\n",
    );

    let (success, stdout, _) = run_cli(dir.path(), &["group", &input, "--json"]);
    assert!(success);

    let values = json_lines(&stdout);
    assert_eq!(values.len(), 1);
    assert_eq!(values[0]["count"], 2);
    assert_eq!(values[0]["normalized"], "boom {NUMBER} {StackFrames}");
}

#[test]
fn test_detector_override_from_config() {
    let dir = TempDir::new().unwrap();
    let config = write_file(
        &dir,
        "custom.toml",
        "[detectors]\nnumber = '\\b\\d{4,}\\b'\n",
    );
    let input = write_file(&dir, "msg.txt", "retry 3 of 1000");

    let (success, stdout, _) = run_cli(dir.path(), &["--config", &config, "normalize", &input]);
    assert!(success);
    assert_eq!(stdout.trim_end(), "retry 3 of {NUMBER}");
}

#[test]
fn test_config_from_environment() {
    let dir = TempDir::new().unwrap();
    let config = write_file(&dir, "env.toml", "[group]\nmin_count = 2\n");
    let input = write_file(&dir, "log.txt", "a 1\nb\na 2\n");

    let output = command(dir.path())
        .env("ERRSHAPE_CONFIG", &config)
        .args(["group", input.as_str(), "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let values = json_lines(&String::from_utf8(output.stdout).unwrap());
    assert_eq!(values.len(), 1);
    assert_eq!(values[0]["normalized"], "a {NUMBER}");
}

#[test]
fn test_invalid_override_fails() {
    let dir = TempDir::new().unwrap();
    let config = write_file(&dir, "bad.toml", "[detectors]\nno_such_detector = 'x'\n");

    let (success, _, stderr) = run_cli(dir.path(), &["--config", &config, "stages"]);
    assert!(!success);
    assert!(stderr.contains("Error:"));
    assert!(stderr.contains("no_such_detector"));
}

#[test]
fn test_missing_config_fails() {
    let dir = TempDir::new().unwrap();

    let (success, _, stderr) = run_cli(dir.path(), &["--config", "missing.toml", "stages"]);
    assert!(!success);
    assert!(stderr.contains("config file not found"));
}

#[test]
fn test_stages_json() {
    let dir = TempDir::new().unwrap();

    let (success, stdout, _) = run_cli(dir.path(), &["stages", "--json"]);
    assert!(success);

    let value: Value = serde_json::from_str(stdout.trim_end()).unwrap();
    assert_eq!(value["pipeline_version"], 1);
    let detectors = value["detectors"].as_array().unwrap();
    assert_eq!(detectors[0]["name"], "url");
    assert_eq!(detectors[0]["placeholder"], "{URL}");
    assert_eq!(detectors[0]["index"], 0);
    let stages = value["stages"].as_array().unwrap();
    assert_eq!(stages.len(), detectors.len() + 3);
    assert_eq!(stages[0], "short_circuit");
}

#[test]
fn test_stages_table() {
    let dir = TempDir::new().unwrap();

    let (success, stdout, _) = run_cli(dir.path(), &["stages"]);
    assert!(success);
    assert!(stdout.starts_with("pipeline version 1"));
    assert!(stdout.contains("labeled_code"));
    assert!(stdout.contains("guarded"));
}
