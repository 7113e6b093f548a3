//! Integration tests for the `terra` CLI binary.
//!
//! Argument parsing, help output, completions, the session gate and
//! favorites persistence run without any network. The country listing
//! tests run against a wiremock registry.
#![allow(clippy::unwrap_used)]

use std::path::{Path, PathBuf};

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `terra` binary with env isolation.
///
/// Clears all `TERRA_*` env vars and points config and state at `home`
/// so tests never touch the user's real files.
fn terra_cmd(home: &Path) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("terra");
    cmd.env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join("config"))
        .env("XDG_DATA_HOME", home.join("data"))
        .env("TERRA_CONFIG", home.join("config.toml"))
        .env("TERRA_STATE_FILE", state_file(home))
        .env("NO_COLOR", "1")
        .env_remove("TERRA_REGISTRY_URL")
        .env_remove("TERRA_AUTH_URL")
        .env_remove("TERRA_OUTPUT")
        .env_remove("TERRA_INSECURE")
        .env_remove("TERRA_TIMEOUT")
        .env_remove("TERRA_PASSWORD");
    cmd
}

fn state_file(home: &Path) -> PathBuf {
    home.join("state.json")
}

/// Pretend a previous `terra login` stored a token.
fn seed_session(home: &Path) {
    std::fs::write(
        state_file(home),
        json!({ "token": "test-token", "user": { "username": "ada" } }).to_string(),
    )
    .unwrap();
}

fn read_state(home: &Path) -> serde_json::Value {
    serde_json::from_str(&std::fs::read_to_string(state_file(home)).unwrap()).unwrap()
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let home = TempDir::new().unwrap();
    let output = terra_cmd(home.path()).output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    let home = TempDir::new().unwrap();
    terra_cmd(home.path()).arg("--help").assert().success().stdout(
        predicate::str::contains("countries")
            .and(predicate::str::contains("favorites"))
            .and(predicate::str::contains("login")),
    );
}

#[test]
fn test_version_flag() {
    let home = TempDir::new().unwrap();
    terra_cmd(home.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("terra"));
}

#[test]
fn test_completions_zsh() {
    let home = TempDir::new().unwrap();
    terra_cmd(home.path())
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

#[test]
fn test_desc_requires_sort() {
    let home = TempDir::new().unwrap();
    let output = terra_cmd(home.path())
        .args(["countries", "list", "--desc"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_search_conflicts_with_region() {
    let home = TempDir::new().unwrap();
    let output = terra_cmd(home.path())
        .args(["countries", "list", "--search", "ger", "--region", "Europe"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    let text = combined_output(&output);
    assert!(text.contains("cannot be used with"), "Expected usage error:\n{text}");
}

// ── Session gate ────────────────────────────────────────────────────

#[test]
fn test_countries_require_login() {
    let home = TempDir::new().unwrap();
    let output = terra_cmd(home.path())
        .args(["countries", "list"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(3), "Expected auth exit code");
    let text = combined_output(&output);
    assert!(text.contains("terra login"), "Expected login hint:\n{text}");
}

#[test]
fn test_favorites_require_login() {
    let home = TempDir::new().unwrap();
    terra_cmd(home.path())
        .args(["favorites", "toggle", "FRA"])
        .assert()
        .code(3);
}

#[test]
fn test_logout_clears_token_only() {
    let home = TempDir::new().unwrap();
    seed_session(home.path());

    terra_cmd(home.path()).arg("logout").assert().success();

    let state = read_state(home.path());
    assert!(state.get("token").is_none());
    assert_eq!(state["user"]["username"], "ada");

    terra_cmd(home.path()).args(["countries", "show", "FRA"]).assert().code(3);
}

#[test]
fn test_whoami_plain() {
    let home = TempDir::new().unwrap();
    seed_session(home.path());
    terra_cmd(home.path())
        .args(["whoami", "-o", "plain"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ada"));
}

// ── Favorites ───────────────────────────────────────────────────────

#[test]
fn test_favorites_toggle_persists() {
    let home = TempDir::new().unwrap();
    seed_session(home.path());

    terra_cmd(home.path())
        .args(["favorites", "toggle", "fra"])
        .assert()
        .success()
        .stderr(predicate::str::contains("FRA added"));
    assert_eq!(read_state(home.path())["favorites"], json!(["FRA"]));

    terra_cmd(home.path())
        .args(["favorites", "toggle", "FRA"])
        .assert()
        .success()
        .stderr(predicate::str::contains("FRA removed"));
    assert_eq!(read_state(home.path())["favorites"], json!([]));
}

#[test]
fn test_favorites_list_empty_needs_no_registry() {
    let home = TempDir::new().unwrap();
    seed_session(home.path());
    terra_cmd(home.path())
        .args(["favorites", "list", "-o", "json"])
        .arg("--registry-url")
        .arg("http://127.0.0.1:1/v3.1")
        .assert()
        .success()
        .stdout(predicate::str::contains("[]"));
}

// ── Config ──────────────────────────────────────────────────────────

#[test]
fn test_config_path_honours_env() {
    let home = TempDir::new().unwrap();
    terra_cmd(home.path())
        .args(["config", "path", "-o", "plain"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

// ── Registry-backed commands ────────────────────────────────────────

fn registry_body() -> serde_json::Value {
    json!([
        {
            "name": { "common": "Germany", "official": "Federal Republic of Germany" },
            "cca3": "DEU",
            "region": "Europe",
            "capital": ["Berlin"],
            "population": 83_240_525,
            "area": 357_114.0
        },
        {
            "name": { "common": "France", "official": "French Republic" },
            "cca3": "FRA",
            "region": "Europe",
            "capital": ["Paris"],
            "population": 67_391_582,
            "area": 551_695.0
        }
    ])
}

#[tokio::test(flavor = "multi_thread")]
async fn test_list_sorted_by_area_json() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v3.1/all"))
        .respond_with(ResponseTemplate::new(200).set_body_json(registry_body()))
        .mount(&server)
        .await;

    let home = TempDir::new().unwrap();
    seed_session(home.path());

    let output = terra_cmd(home.path())
        .args(["countries", "list", "--sort", "area", "--desc", "-o", "json"])
        .arg("--registry-url")
        .arg(format!("{}/v3.1", server.uri()))
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", combined_output(&output));

    let listed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let codes: Vec<&str> = listed
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["code"].as_str().unwrap())
        .collect();
    assert_eq!(codes, ["FRA", "DEU"]);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_search_without_match_is_not_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v3.1/name/atlantis"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"status": 404})))
        .mount(&server)
        .await;

    let home = TempDir::new().unwrap();
    seed_session(home.path());

    terra_cmd(home.path())
        .args(["countries", "list", "--search", "atlantis", "-o", "plain"])
        .arg("--registry-url")
        .arg(format!("{}/v3.1", server.uri()))
        .assert()
        .success()
        .stderr(predicate::str::contains("No countries found"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_registry_failure_exit_code() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v3.1/all"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let home = TempDir::new().unwrap();
    seed_session(home.path());

    terra_cmd(home.path())
        .args(["countries", "list"])
        .arg("--registry-url")
        .arg(format!("{}/v3.1", server.uri()))
        .assert()
        .code(7);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_show_unknown_code() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v3.1/alpha/ZZZ"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let home = TempDir::new().unwrap();
    seed_session(home.path());

    terra_cmd(home.path())
        .args(["countries", "show", "zzz"])
        .arg("--registry-url")
        .arg(format!("{}/v3.1", server.uri()))
        .assert()
        .code(4);
}
