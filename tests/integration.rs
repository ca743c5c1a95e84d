// Integration tests for the suscoin CLI surface.
//
// These tests use assert_cmd to invoke the binary and verify
// exit codes and argument handling.

use assert_cmd::Command;
use predicates::prelude::*;

/// Helper to build a Command for the suscoin binary.
fn suscoin() -> Command {
    Command::cargo_bin("suscoin").expect("binary should exist")
}

#[test]
fn cli_version_flag() {
    suscoin()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("suscoin"));
}

#[test]
fn cli_help_flag() {
    suscoin()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("transport scoring engine"));
}

#[test]
fn score_requires_mode_and_distance() {
    suscoin()
        .arg("score")
        .assert()
        .failure()
        .stderr(predicate::str::contains("required"));

    suscoin()
        .args(["score", "bike"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("required"));
}

#[test]
fn score_rejects_non_numeric_distance() {
    suscoin()
        .args(["score", "bike", "far"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn batch_requires_trip_file() {
    suscoin()
        .arg("batch")
        .assert()
        .failure()
        .stderr(predicate::str::contains("required"));
}

#[test]
fn quiet_conflicts_with_verbose() {
    suscoin()
        .args(["modes", "-q", "-v"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}
