#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const TABLE: &str = "\
distance_km,bike,walking,car (solo/taxi),plane (domestic),train (intercity)
20,9,6,1,0,5
25,9,0,1,0,5
100,8,0,1,0,9
300,0,0,1,2.5,9
1500,0,0,1,4,9
";

fn write_table(dir: &Path) -> PathBuf {
    let path = dir.join("scores.csv");
    fs::write(&path, TABLE).expect("score table should write");
    path
}

/// Runs the binary with an isolated HOME so no global config leaks in.
fn suscoin(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("suscoin").expect("binary should compile");
    cmd.env("HOME", home).env_remove("RUST_LOG");
    cmd
}

#[test]
fn score_outputs_json_result() {
    let dir = TempDir::new().expect("temp dir should be created");
    let table = write_table(dir.path());

    suscoin(dir.path())
        .args(["score", "bike", "100", "--table"])
        .arg(&table)
        .assert()
        .code(0)
        .stdout(predicate::str::contains("\"outcome\": \"scored\""))
        .stdout(predicate::str::contains("\"coins\": 160"))
        .stdout(predicate::str::contains("\"co2eSavedKg\": 17.1"))
        .stdout(predicate::str::contains("\"distanceKm\": 100"));
}

#[test]
fn score_short_flight_is_not_viable() {
    let dir = TempDir::new().expect("temp dir should be created");
    let table = write_table(dir.path());

    suscoin(dir.path())
        .args(["score", "plane (domestic)", "100", "--table"])
        .arg(&table)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("\"kind\": \"below_minimum\""))
        .stdout(predicate::str::contains("\"coins\"").not());
}

#[test]
fn score_long_walk_reports_limit_in_markdown() {
    let dir = TempDir::new().expect("temp dir should be created");
    let table = write_table(dir.path());

    suscoin(dir.path())
        .args(["score", "walking", "40", "--format", "md", "--table"])
        .arg(&table)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("not viable beyond 25 km"))
        .stdout(predicate::str::contains("- distance_km: 25"));
}

#[test]
fn score_negative_distance_is_invalid_input() {
    let dir = TempDir::new().expect("temp dir should be created");
    let table = write_table(dir.path());

    suscoin(dir.path())
        .args(["score", "bike", "-5", "--table"])
        .arg(&table)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("\"kind\": \"invalid_distance\""))
        .stdout(predicate::str::contains("\"distanceKm\": 0"));
}

#[test]
fn score_uses_configured_table_and_economy() {
    let dir = TempDir::new().expect("temp dir should be created");
    write_table(dir.path());
    fs::write(
        dir.path().join("suscoin.toml"),
        r#"
[table]
path = "scores.csv"

[economy]
coin_per_band = 0.5
"#,
    )
    .expect("config should write");

    suscoin(dir.path())
        .arg("--root")
        .arg(dir.path())
        .args(["score", "bike", "100"])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("\"coins\": 80"));
}

#[test]
fn score_fails_when_table_missing() {
    let dir = TempDir::new().expect("temp dir should be created");

    suscoin(dir.path())
        .arg("--root")
        .arg(dir.path())
        .args(["score", "bike", "10"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("score table not found"));
}

#[test]
fn invalid_config_is_a_runtime_failure() {
    let dir = TempDir::new().expect("temp dir should be created");
    fs::write(
        dir.path().join("suscoin.toml"),
        r#"
[[rules]]
modes = ["intercity rail"]
cap_km = 1500.0
"#,
    )
    .expect("config should write");

    suscoin(dir.path())
        .arg("--root")
        .arg(dir.path())
        .arg("modes")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("unknown mode 'intercity rail'"));
}

#[test]
fn modes_lists_factors_and_baseline() {
    let dir = TempDir::new().expect("temp dir should be created");

    suscoin(dir.path())
        .arg("--root")
        .arg(dir.path())
        .arg("modes")
        .assert()
        .code(0)
        .stdout(predicate::str::contains("Baseline: car (solo/taxi)"))
        .stdout(predicate::str::contains("| plane (domestic) | 255 | not viable below 250 km |"));
}

#[test]
fn modes_json_includes_rules() {
    let dir = TempDir::new().expect("temp dir should be created");

    suscoin(dir.path())
        .arg("--root")
        .arg(dir.path())
        .args(["modes", "--format", "json"])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("\"baselineMode\": \"car (solo/taxi)\""))
        .stdout(predicate::str::contains("\"cap_km\": 1500.0"));
}

#[test]
fn table_summarizes_rows_and_gaps() {
    let dir = TempDir::new().expect("temp dir should be created");
    let table = write_table(dir.path());

    suscoin(dir.path())
        .arg("table")
        .arg(&table)
        .assert()
        .code(0)
        .stdout(predicate::str::contains("- rows: 5"))
        .stdout(predicate::str::contains("- bands: 20-1500 km"))
        .stdout(predicate::str::contains("- missing_bands: 496"));
}

#[test]
fn table_rejects_malformed_resource() {
    let dir = TempDir::new().expect("temp dir should be created");
    let path = dir.path().join("broken.csv");
    fs::write(&path, "distance_km,bike\n5,1\n5,2\n").expect("table should write");

    suscoin(dir.path())
        .arg("table")
        .arg(&path)
        .assert()
        .code(3)
        .stderr(predicate::str::contains("duplicate band 5"));
}

#[test]
fn batch_writes_report_file() {
    let dir = TempDir::new().expect("temp dir should be created");
    let table = write_table(dir.path());
    let trips = dir.path().join("trips.csv");
    fs::write(
        &trips,
        "mode,distance_km\nbike,100\nwalking,40\nplane (domestic),300\nbike,oops\n",
    )
    .expect("trips should write");
    let out = dir.path().join("out/report.json");

    suscoin(dir.path())
        .arg("batch")
        .arg(&trips)
        .arg("--table")
        .arg(&table)
        .arg("--out")
        .arg(&out)
        .assert()
        .code(0)
        .stdout(predicate::str::contains("- trips: 4"))
        .stdout(predicate::str::contains("- scored: 2"))
        .stdout(predicate::str::contains("- coins: 310"))
        .stdout(predicate::str::contains("report file:"));

    let written = fs::read_to_string(&out).expect("report should exist");
    assert!(written.contains("\"tableFingerprint\": \""));
    assert!(written.contains("\"generatedAt\""));
}

#[test]
fn batch_without_out_prints_json() {
    let dir = TempDir::new().expect("temp dir should be created");
    let table = write_table(dir.path());
    let trips = dir.path().join("trips.csv");
    fs::write(&trips, "mode,distance_km\ntrain (intercity),2000\n").expect("trips should write");

    suscoin(dir.path())
        .arg("batch")
        .arg(&trips)
        .arg("--table")
        .arg(&table)
        .assert()
        .code(0)
        .stdout(predicate::str::contains("\"distanceKm\": 1500"))
        .stdout(predicate::str::contains("\"coins\": 2700"));
}

#[test]
fn bundled_table_scores_short_bike_ride() {
    let dir = TempDir::new().expect("temp dir should be created");
    let bundled = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("data/transport_scores_0to2500km_step5.csv");

    suscoin(dir.path())
        .args(["score", "bike", "5"])
        .arg("--table")
        .arg(&bundled)
        .assert()
        .code(0)
        .stdout(predicate::str::contains("\"score\": 10.0"))
        .stdout(predicate::str::contains("\"coins\": 10"));
}
