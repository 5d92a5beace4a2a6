//! Drives the `restverify` binary end to end.

mod common;

use common::mock_api::{Behaviour, MockApi};
use serde_json::json;
use std::fs;
use std::process::{Command, Output};

fn restverify(args: &[&str]) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_restverify"));
    for var in [
        "RESTVERIFY_CONFIG",
        "RESTVERIFY_BASE_URL",
        "RESTVERIFY_BASE_PATH",
        "RESTVERIFY_TIMEOUT_SECS",
        "RESTVERIFY_SCHEMA_DIR",
        "RUST_LOG",
    ] {
        cmd.env_remove(var);
    }
    cmd.env("RESTVERIFY_LOG_LEVEL", "warn")
        .args(args)
        .output()
        .expect("spawn restverify")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_list_prints_every_scenario() {
    let output = restverify(&["list"]);
    assert_eq!(output.status.code(), Some(0));
    let text = stdout(&output);
    for name in [
        "get_user_by_id",
        "get_user_by_missing_id",
        "get_users_page",
        "users_pages_are_consistent",
        "create_user",
        "get_resource_matches_schema",
    ] {
        assert!(text.contains(name), "missing {name} in:\n{text}");
    }
}

#[test]
fn test_run_against_faithful_api_exits_zero() {
    let mock = MockApi::start(Behaviour::Faithful);
    let output = restverify(&["run", "--base-url", &mock.base_url]);
    let text = stdout(&output);
    assert_eq!(output.status.code(), Some(0), "{text}");
    assert!(text.contains("6 passed, 0 failed"), "{text}");
}

#[test]
fn test_run_against_broken_api_exits_one() {
    let mock = MockApi::start(Behaviour::Broken);
    let output = restverify(&["run", "--base-url", &mock.base_url, "-s", "get_user_by_id"]);
    let text = stdout(&output);
    assert_eq!(output.status.code(), Some(1), "{text}");
    assert!(text.contains("FAIL get_user_by_id [AssertionFailure]"), "{text}");
    assert!(text.contains("0 passed, 1 failed"), "{text}");
}

#[test]
fn test_run_reads_config_file() {
    let mock = MockApi::start(Behaviour::Faithful);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    fs::write(&path, format!("base_url: {}\ntimeout_secs: 5\n", mock.base_url)).unwrap();

    let output = restverify(&[
        "run",
        "--config",
        path.to_str().unwrap(),
        "--scenario",
        "get_user_by_missing_id",
    ]);
    assert_eq!(output.status.code(), Some(0), "{}", stdout(&output));
    assert_eq!(mock.requests_to("/api/users/23").len(), 1);
}

#[test]
fn test_unknown_scenario_is_a_setup_error() {
    let output = restverify(&["run", "--scenario", "no_such_scenario"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("no_such_scenario"));
}

#[test]
fn test_validate_payload_files() {
    let dir = tempfile::tempdir().unwrap();
    let good = dir.path().join("good.json");
    let bad = dir.path().join("bad.json");
    let body = json!({
        "data": {"id": 2, "name": "fuchsia rose", "year": 2001, "color": "#C74375", "pantone_value": "17-2031"},
        "support": {"url": "https://reqres.in/#support-heading", "text": "support"}
    });
    fs::write(&good, body.to_string()).unwrap();
    let mut broken = body.clone();
    broken["data"]["id"] = json!("2");
    fs::write(&bad, broken.to_string()).unwrap();

    let schema = "single-resource-byid-response-scheme.json";
    let ok = restverify(&["validate", "--schema", schema, "--payload", good.to_str().unwrap()]);
    assert_eq!(ok.status.code(), Some(0), "{}", stdout(&ok));

    let failed = restverify(&["validate", "--schema", schema, "--payload", bad.to_str().unwrap()]);
    assert_eq!(failed.status.code(), Some(1));
}

#[test]
fn test_validate_unknown_schema_exits_two() {
    let dir = tempfile::tempdir().unwrap();
    let payload = dir.path().join("body.json");
    fs::write(&payload, "{}").unwrap();
    let output = restverify(&["validate", "--schema", "nope.json", "--payload", payload.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(2));
}
