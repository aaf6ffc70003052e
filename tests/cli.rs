//! End-to-end tests for the surfrank binary.

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn corpus() -> TempDir {
    let dir = TempDir::new().unwrap();
    let pages = [
        ("1.html", vec!["2.html"]),
        ("2.html", vec!["1.html", "3.html"]),
        ("3.html", vec!["2.html", "4.html"]),
        ("4.html", vec!["2.html"]),
    ];
    for (name, links) in pages {
        let body: String = links
            .iter()
            .map(|l| format!("<a href=\"{l}\">{l}</a>\n"))
            .collect();
        fs::write(dir.path().join(name), format!("<html><body>{body}</body></html>")).unwrap();
    }
    dir
}

fn surfrank() -> Command {
    let mut cmd = Command::cargo_bin("surfrank").unwrap();
    for var in [
        "SURFRANK_DAMPING",
        "SURFRANK_SAMPLES",
        "SURFRANK_TOLERANCE",
        "SURFRANK_MAX_ITERATIONS",
        "SURFRANK_SEED",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

#[test]
fn test_text_report() {
    let dir = corpus();
    surfrank()
        .arg(dir.path())
        .args(["--seed", "7", "--samples", "5000"])
        .assert()
        .success()
        .stdout(predicate::str::contains("PageRank Results from Sampling (n = 5000)"))
        .stdout(predicate::str::contains("PageRank Results from Iteration"))
        .stdout(predicate::str::contains("  2.html: 0.429"));
}

#[test]
fn test_json_report() {
    let dir = corpus();
    let output = surfrank()
        .arg(dir.path())
        .args(["--seed", "7", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let sampled: f64 = report["sampling"]
        .as_object()
        .unwrap()
        .values()
        .map(|v| v.as_f64().unwrap())
        .sum();
    assert!((sampled - 1.0).abs() < 1e-9);
    assert!(report["iterations"].as_u64().unwrap() >= 1);
    assert!(report["iteration"]["4.html"].as_f64().is_some());
}

#[test]
fn test_config_file_and_override() {
    let dir = corpus();
    let config = dir.path().join("rank.json");
    fs::write(&config, r#"{"sample_count": 0}"#).unwrap();

    surfrank()
        .arg(dir.path())
        .arg("--config")
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("sample count must be at least 1"));

    surfrank()
        .arg(dir.path())
        .arg("--config")
        .arg(&config)
        .args(["--samples", "100"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(n = 100)"));
}

#[test]
fn test_rejects_bad_damping() {
    let dir = corpus();
    surfrank()
        .arg(dir.path())
        .args(["--damping", "1.5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("damping factor"));
}

#[test]
fn test_missing_corpus() {
    surfrank()
        .arg("/no/such/corpus")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load corpus"));
}
