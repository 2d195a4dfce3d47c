//! CLI integration tests

use std::process::Command;

fn bmon(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_bmon"))
        .args(args)
        .env_remove("BMON_API_URL")
        .output()
        .expect("Failed to execute command")
}

/// Test that the CLI shows help
#[test]
fn test_cli_help() {
    let output = bmon(&["--help"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "CLI help should succeed");
    assert!(
        stdout.contains("Backup Infrastructure Monitor"),
        "Should show app name"
    );
    for command in ["dashboard", "clusters", "workflows", "alerts", "reports", "search"] {
        assert!(stdout.contains(command), "Should show {} command", command);
    }
    assert!(stdout.contains("--api-url"), "Should show api-url option");
    assert!(stdout.contains("--format"), "Should show format option");
}

/// Test that the CLI shows version
#[test]
fn test_cli_version() {
    let output = bmon(&["--version"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "CLI version should succeed");
    assert!(stdout.contains("bmon"), "Should show binary name");
}

#[test]
fn test_clusters_show_help() {
    let output = bmon(&["clusters", "show", "--help"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    assert!(stdout.contains("<ID>"), "Should show id argument");
    assert!(stdout.contains("--tab"), "Should show tab option");
}

#[test]
fn test_workflows_list_help() {
    let output = bmon(&["workflows", "list", "--help"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    assert!(stdout.contains("--search"), "Should show search option");
}

#[test]
fn test_alerts_ack_requires_numeric_id() {
    let output = bmon(&["alerts", "ack", "not-a-number"]);

    assert!(!output.status.success(), "Non-numeric alert id should fail");
}

#[test]
fn test_invalid_format_rejected() {
    let output = bmon(&["--format", "xml", "dashboard"]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success(), "Unknown format should fail");
    assert!(stderr.contains("xml"), "Should mention the rejected value");
}

#[test]
fn test_unreachable_api_fails() {
    let output = bmon(&["--api-url", "http://127.0.0.1:1", "dashboard"]);

    assert!(!output.status.success(), "Unreachable API should fail");
}
