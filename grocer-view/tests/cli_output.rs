// grocer-view/tests/cli_output.rs
// The CLI binary against a directory source

use serde_json::Value;
use std::process::{Command, Output};

const SALAD: &str = r#"{"items": {"leafy": {
    "as": {"s1": {"n": "Spinach", "p": 1.2}},
    "tc": {"t1": {"n": "Rocket", "p": 0.85}}
}}}"#;

fn run_cli(output: &str) -> Output {
    let dir = tempfile::tempdir().unwrap();
    let data = dir.path().join("data-3");
    std::fs::create_dir_all(&data).unwrap();
    std::fs::write(data.join("salad.json"), SALAD).unwrap();

    Command::new(env!("CARGO_BIN_EXE_grocer-view"))
        .current_dir(dir.path())
        .env("DATA_DIR", dir.path())
        .env("OUTPUT", output)
        .env("LOG_LEVEL", "debug")
        .env("DEBOUNCE_MS", "10")
        .env("DEFAULT_CATEGORY", "salad")
        .env_remove("DEFAULT_SUPERMARKET")
        .env_remove("LOG_DIR")
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

#[test]
fn test_json_output_is_parseable_with_logging_on() {
    let output = run_cli("json");
    assert!(output.status.success());

    let rows: Vec<Value> = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["name"], "Spinach");
    assert_eq!(rows[0]["price"], 120);
    assert_eq!(rows[1]["supermarket"], "Tesco");

    let logs = String::from_utf8_lossy(&output.stderr);
    assert!(logs.contains("Catalog pipeline started"));
}

#[test]
fn test_table_output_has_no_log_lines() {
    let output = run_cli("table");
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.starts_with("Salad · All supermarkets · 2 products"));
    assert!(!stdout.contains("Catalog pipeline"));
    assert!(stdout.contains("Rocket"));
}
