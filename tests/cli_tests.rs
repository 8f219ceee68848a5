use serde_json::Value;
use std::io::Write;
use std::process::{Command, Output};

fn run_cli(args: &[&str], document: &str) -> Output {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(document.as_bytes()).unwrap();

    Command::new(env!("CARGO_BIN_EXE_pet-validate"))
        .arg(file.path())
        .args(args)
        .output()
        .unwrap()
}

#[test]
fn test_valid_document() {
    let output = run_cli(
        &[],
        r#"{"name": "Rex", "age": 3, "weight": 12, "is_vaccinated": true}"#,
    );
    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(
        stdout.trim(),
        r#"record 0: ok Pet(name="Rex", age=3, weight=12.0, is_vaccinated=true)"#
    );
}

#[test]
fn test_invalid_record_in_array() {
    let output = run_cli(
        &[],
        r#"[
            {"name": "Rex", "age": 3, "weight": 12, "is_vaccinated": true},
            {"name": "Rex", "age": "five", "weight": 12, "is_vaccinated": true}
        ]"#,
    );
    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("record 0: ok"));
    assert!(stdout.contains("record 1: invalid\n1 validation error for Pet\nage\n"));
}

#[test]
fn test_allow_extra_flag() {
    let document = r#"{"name": "Rex", "age": 3, "weight": 12, "is_vaccinated": true, "color": "brown"}"#;

    let output = run_cli(&[], document);
    assert_eq!(output.status.code(), Some(1));

    let output = run_cli(&["--allow-extra"], document);
    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("record 0: warning: color:"));
}

#[test]
fn test_json_report() {
    let output = run_cli(
        &["--format", "json"],
        r#"[{"name": "Rex", "age": 3, "weight": 12, "is_vaccinated": "yes"}]"#,
    );
    assert_eq!(output.status.code(), Some(1));

    let report: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report[0]["valid"], false);
    assert!(report[0]["pet"].is_null());
    assert_eq!(report[0]["issues"][0]["field"], "is_vaccinated");
    assert_eq!(report[0]["issues"][0]["code"], "bool_type");
}

#[test]
fn test_malformed_document() {
    let output = run_cli(&[], "{not json");
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_schema_flag() {
    let output = Command::new(env!("CARGO_BIN_EXE_pet-validate"))
        .arg("--schema")
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(0));
    let schema: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(schema["title"], "Pet");
}
