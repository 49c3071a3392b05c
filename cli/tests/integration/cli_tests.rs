//! Argument parsing and read-only commands of the `tester-unit` binary.

#![allow(clippy::expect_used)]

use assert_cmd::Command;
use predicates::prelude::*;
use serial_test::serial;
use tempfile::TempDir;

fn tester_unit() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("tester-unit"));
    cmd.env("NO_COLOR", "1").env_remove("TESTER_UNIT_CONFIG");
    cmd
}

/// Write a config whose state and registrar files live in a temp dir.
fn temp_config(extra: &str) -> (TempDir, String) {
    let dir = TempDir::new().expect("temp dir");
    let config = dir.path().join("config.yaml");
    let yaml = format!(
        "state_path: {}\nregistrar:\n  path: {}\n{extra}",
        dir.path().join("state.json").display(),
        dir.path().join("scrape-jobs.json").display(),
    );
    std::fs::write(&config, yaml).expect("write config");
    let path = config.to_string_lossy().into_owned();
    (dir, path)
}

// --- Help and version ---

#[test]
fn test_cli_no_args_shows_help_and_exits_two() {
    tester_unit()
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Lifecycle installer"));
}

#[test]
fn test_cli_help_lists_lifecycle_commands() {
    tester_unit()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("install"))
        .stdout(predicate::str::contains("start"))
        .stdout(predicate::str::contains("stop"))
        .stdout(predicate::str::contains("scrape-jobs"));
}

#[test]
fn test_cli_version_flag_shows_version() {
    tester_unit()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("tester-unit"));
}

#[test]
fn test_version_command_shows_version() {
    tester_unit()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("tester-unit 0.1.0"));
}

#[test]
fn test_version_command_json_outputs_valid_json() {
    let out = tester_unit()
        .args(["version", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let v: serde_json::Value = serde_json::from_slice(&out).expect("valid JSON");
    assert_eq!(v["version"], "0.1.0");
}

#[test]
fn test_unknown_command_fails() {
    tester_unit().arg("upgrade").assert().failure();
}

// --- status ---

#[test]
fn test_status_without_state_file_is_uninstalled() {
    let (_dir, path) = temp_config("");
    tester_unit()
        .args(["status", "--config", &path])
        .assert()
        .success()
        .stdout(predicate::str::contains("uninstalled"));
}

#[test]
fn test_status_json_reads_persisted_state() {
    let (dir, path) = temp_config("");
    std::fs::write(
        dir.path().join("state.json"),
        r#"{"phase":"stopped","status":{"state":"active"},"updated_at":"2026-01-01T00:00:00Z"}"#,
    )
    .expect("write state");

    let out = tester_unit()
        .args(["status", "--json", "--config", &path])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let v: serde_json::Value = serde_json::from_slice(&out).expect("valid JSON");
    assert_eq!(v["phase"], "stopped");
}

#[test]
fn test_status_with_corrupt_state_fails() {
    let (dir, path) = temp_config("");
    std::fs::write(dir.path().join("state.json"), "not json").expect("write state");
    tester_unit()
        .args(["status", "--config", &path])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Error:"));
}

// --- scrape-jobs ---

#[test]
fn test_scrape_jobs_json_carries_topology_and_labels() {
    let (_dir, path) = temp_config(
        "topology:\n  model: lab\n  model_uuid: abcd-1234\n  application: prometheus-tester\n  unit: prometheus-tester/0\n",
    );
    let out = tester_unit()
        .args(["scrape-jobs", "--json", "--config", &path])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let v: serde_json::Value = serde_json::from_slice(&out).expect("valid JSON");
    let job = &v["scrape_jobs"][0];
    assert_eq!(job["job_name"], "juju_lab_prometheus-tester_prometheus_scrape");
    assert_eq!(job["scrape_interval"], "1s");
    assert_eq!(job["static_configs"][0]["targets"][0], "*:8000");
    assert_eq!(job["static_configs"][0]["labels"]["status"], "testing");
    assert_eq!(job["static_configs"][0]["labels"]["juju_model"], "lab");
}

#[test]
#[serial]
fn test_scrape_jobs_reads_config_from_env() {
    let (_dir, path) = temp_config("scrape:\n  interval: 30s\n");
    Command::new(assert_cmd::cargo::cargo_bin!("tester-unit"))
        .env("NO_COLOR", "1")
        .env("TESTER_UNIT_CONFIG", &path)
        .args(["scrape-jobs", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""scrape_interval": "30s""#));
}

#[test]
fn test_json_error_is_reported_on_stdout() {
    let (_dir, path) = temp_config("packages: []\n");
    tester_unit()
        .args(["scrape-jobs", "--json", "--config", &path])
        .assert()
        .code(1)
        .stdout(predicate::str::contains(r#""error": true"#));
}
