//! Integration tests for `tester-unit config`.
//!
//! Every test points `--config` at a temp path so the host's
//! `/etc/tester-unit/config.yaml` is never read.

#![allow(clippy::expect_used)]

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn tester_unit() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("tester-unit"));
    cmd.env("NO_COLOR", "1").env_remove("TESTER_UNIT_CONFIG");
    cmd
}

fn temp_config_path() -> (TempDir, String) {
    let dir = TempDir::new().expect("temp dir");
    let path = dir
        .path()
        .join("config.yaml")
        .to_string_lossy()
        .into_owned();
    (dir, path)
}

#[test]
fn test_config_help_shows_show_subcommand() {
    tester_unit()
        .args(["config", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("show"));
}

#[test]
fn test_config_show_missing_file_uses_defaults() {
    let (_dir, path) = temp_config_path();
    tester_unit()
        .args(["config", "show", "--config", &path])
        .assert()
        .success()
        .stdout(predicate::str::contains("python3 python3-pip"))
        .stdout(predicate::str::contains("pip3 install prometheus-client"));
}

#[test]
fn test_config_show_names_the_file_it_read() {
    let (_dir, path) = temp_config_path();
    tester_unit()
        .args(["config", "show", "--config", &path])
        .assert()
        .success()
        .stdout(predicate::str::contains(path.as_str()));
}

#[test]
fn test_config_show_json_reflects_file_values() {
    let (_dir, path) = temp_config_path();
    std::fs::write(&path, "packages: [python3, curl]\nscrape:\n  interval: 15s\n")
        .expect("write config");

    let out = tester_unit()
        .args(["config", "show", "--json", "--config", &path])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let v: serde_json::Value = serde_json::from_slice(&out).expect("valid JSON");
    assert_eq!(v["packages"][1], "curl");
    assert_eq!(v["scrape"]["interval"], "15s");
    assert_eq!(v["runtime"]["manager"], "pip3");
}

#[test]
fn test_config_show_invalid_interval_fails() {
    let (_dir, path) = temp_config_path();
    std::fs::write(&path, "scrape:\n  interval: soon\n").expect("write config");
    tester_unit()
        .args(["config", "show", "--config", &path])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("invalid configuration"));
}

#[test]
fn test_config_show_malformed_yaml_fails() {
    let (_dir, path) = temp_config_path();
    std::fs::write(&path, "packages: [unterminated\n").expect("write config");
    tester_unit()
        .args(["config", "show", "--config", &path])
        .assert()
        .failure();
}
