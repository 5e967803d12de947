//! Binary-level tests for `pegasus-bridge`.
//!
//! Checks the stdout line and exit code for each class of outcome.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{json, Value};
use std::fs;

fn bridge() -> Command {
    let mut cmd = Command::cargo_bin("pegasus-bridge").unwrap();
    cmd.env_remove("PEGASUS_BRIDGE_CONFIG")
        .env_remove("PEGASUS_BRIDGE_LOG")
        .env_remove("PEGASUS_BRIDGE_LOG_FORMAT");
    cmd
}

fn stdout_json(output: &std::process::Output) -> Value {
    let text = String::from_utf8(output.stdout.clone()).unwrap();
    assert_eq!(text.matches('\n').count(), 1, "exactly one line: {text:?}");
    serde_json::from_str(&text).unwrap()
}

#[test]
fn test_no_arguments() {
    bridge()
        .assert()
        .success()
        .stdout("{\"error\":\"No input provided\"}\n");
}

#[test]
fn test_analyze_phone() {
    let output = bridge()
        .arg(r#"{"command":"analyze_phone","payload":{"phone":"081234567890"}}"#)
        .output()
        .unwrap();
    assert!(output.status.success());
    let value = stdout_json(&output);
    assert_eq!(value["phone_number"], "081234567890");
    assert_eq!(value["normalized"], "+6281234567890");
    assert_eq!(value["provider"], "Telkomsel");
    assert!(value.get("error").is_none());
}

#[test]
fn test_unknown_command_exits_zero() {
    bridge()
        .arg(r#"{"command":"frobnicate"}"#)
        .assert()
        .success()
        .stdout("{\"error\":\"Unknown command: frobnicate\"}\n");
}

#[test]
fn test_malformed_json_exits_zero() {
    bridge()
        .arg("{not json")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("{\"error\":\"Execution Error: "));
}

#[test]
fn test_request_from_stdin() {
    let output = bridge()
        .arg("-")
        .write_stdin("{\"command\": \"check_slik\",\n \"payload\": {\"nik\": \"3171011505900001\"}}\n")
        .output()
        .unwrap();
    assert!(output.status.success());
    let value = stdout_json(&output);
    assert_eq!(value["registry"], "SLIK OJK");
    assert_eq!(value["status"], "clear");
}

#[test]
fn test_only_first_argument_is_request() {
    let output = bridge()
        .arg(r#"{"command":"track_device","payload":{"phone":"081234567890"}}"#)
        .arg("ignored")
        .output()
        .unwrap();
    assert!(output.status.success());
    let value = stdout_json(&output);
    assert_eq!(value["status"], "tracked");
}

#[test]
fn test_unexpected_flag_is_execution_error() {
    bridge()
        .arg("--bogus")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("{\"error\":\"Execution Error: invalid arguments"));
}

#[test]
fn test_describe_lists_bindings() {
    let output = bridge().arg("--describe").output().unwrap();
    assert!(output.status.success());
    let value = stdout_json(&output);
    let bindings = value.as_array().unwrap();
    assert_eq!(bindings.len(), 7);
    assert_eq!(
        bindings[5],
        json!({
            "command": "analyze_persona",
            "collaborator": "persona_analyzer",
            "operation": "full_analysis_persona",
            "fields": ["name", "phone", "nik"]
        })
    );
}

#[test]
fn test_missing_config_is_import_error() {
    let dir = tempfile::tempdir().unwrap();
    bridge()
        .arg("--config")
        .arg(dir.path().join("absent.toml"))
        .arg(r#"{"command":"analyze_nik"}"#)
        .assert()
        .code(1)
        .stdout(predicate::str::starts_with("{\"error\":\"Import Error: "));
}

#[test]
fn test_invalid_log_filter_is_import_error() {
    bridge()
        .env("PEGASUS_BRIDGE_LOG", "pegasus_bridge=notalevel")
        .arg(r#"{"command":"analyze_nik"}"#)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Import Error: invalid log filter"));
}

#[test]
fn test_config_reference_data_applies() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("flagged.txt"), "3171011505900001\n").unwrap();
    let config = dir.path().join("bridge.toml");
    fs::write(&config, "[analyzers]\nslik_flagged = \"flagged.txt\"\n").unwrap();

    let output = bridge()
        .env("PEGASUS_BRIDGE_CONFIG", &config)
        .arg(r#"{"command":"check_slik","payload":{"nik":"3171011505900001"}}"#)
        .output()
        .unwrap();
    assert!(output.status.success());
    let value = stdout_json(&output);
    assert_eq!(value["flagged"], true);
    assert_eq!(value["status"], "flagged");
}

#[test]
fn test_logs_stay_off_stdout() {
    let output = bridge()
        .env("PEGASUS_BRIDGE_LOG", "debug")
        .arg(r#"{"command":"fraud_check_imei","payload":{"imei":"490154203237518"}}"#)
        .output()
        .unwrap();
    assert!(output.status.success());
    let value = stdout_json(&output);
    assert_eq!(value["luhn_valid"], true);
    assert!(!output.stderr.is_empty());
}
