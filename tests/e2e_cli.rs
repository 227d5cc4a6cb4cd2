//! CLI end-to-end tests.

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::process::Command;
use tempfile::tempdir;

#[allow(deprecated)]
fn plexdeck_cmd() -> Command {
    let mut cmd = Command::cargo_bin("plexdeck").unwrap();
    cmd.env_remove("PLEXDECK_CONFIG")
        .env_remove("PLEX_URL")
        .env_remove("PLEX_TOKEN")
        .env_remove("SECRET_KEY");
    cmd
}

#[test]
fn test_cli_no_args_shows_help() {
    plexdeck_cmd()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_cli_version_command() {
    plexdeck_cmd()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("plexdeck "));
}

#[test]
fn test_cli_start_help() {
    plexdeck_cmd()
        .args(["start", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Start the web server"))
        .stdout(predicate::str::contains("--plex-token"));
}

#[test]
fn test_cli_generate_secret() {
    let output = plexdeck_cmd().arg("generate-secret").output().unwrap();
    assert!(output.status.success());
    let secret = String::from_utf8(output.stdout).unwrap();
    let secret = secret.trim();
    assert_eq!(secret.len(), 64);
    assert!(secret.chars().all(|c| c.is_ascii_hexdigit()));
}

#[test]
fn test_cli_validate_defaults_warns_about_token() {
    plexdeck_cmd()
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("using defaults"))
        .stdout(predicate::str::contains("plex.token is empty"));
}

#[test]
fn test_cli_validate_config_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("plexdeck.json");
    fs::write(
        &path,
        r#"{
            "server": {"port": 8080},
            "plex": {"url": "http://nas:32400", "token": "abc"},
            "session": {"secret": "0123456789abcdef0123456789abcdef"}
        }"#,
    )
    .unwrap();

    plexdeck_cmd()
        .arg("validate")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration is valid"))
        .stdout(predicate::str::contains("0.0.0.0:8080"))
        .stdout(predicate::str::contains("No warnings"));
}

#[test]
fn test_cli_validate_rejects_bad_json() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("broken.json");
    fs::write(&path, "{ not json").unwrap();

    plexdeck_cmd()
        .args(["--config", path.to_str().unwrap(), "validate"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("config parse error"));
}
