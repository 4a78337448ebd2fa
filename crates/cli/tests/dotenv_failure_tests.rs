//! Integration tests for dotenv failure handling in the CLI.
//!
//! Invariants:
//! - Tests must explicitly clear `DOTENV_DISABLED` to enable dotenv loading.
//! - Tests use temp directories and set current_dir to isolate `.env` file effects.

mod common;

use common::fixtures;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn cmd_in(dir: &TempDir) -> assert_cmd::Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("sealcfg");
    cmd.current_dir(dir.path())
        .env_remove("DOTENV_DISABLED")
        .env_remove("SEALCFG_KEYRING_HOME")
        .env_remove("GNUPGHOME");
    cmd
}

#[test]
fn test_invalid_dotenv_causes_cli_failure() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join(".env"), "INVALID_LINE_WITHOUT_EQUALS").unwrap();

    cmd_in(&temp_dir)
        .args(["env-name", "svc", "port"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains(".env"));
}

#[test]
fn test_invalid_dotenv_does_not_leak_secrets() {
    let temp_dir = TempDir::new().unwrap();
    let secret = "supersecret_value_67890";
    fs::write(
        temp_dir.path().join(".env"),
        format!("SEALCFG_TOKEN={}\nINVALID_LINE_WITHOUT_EQUALS", secret),
    )
    .unwrap();

    cmd_in(&temp_dir)
        .args(["env-name", "svc", "port"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(secret).not());
}

#[test]
fn test_dotenv_disabled_skips_invalid_file() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join(".env"), "INVALID_LINE_WITHOUT_EQUALS").unwrap();

    cmd_in(&temp_dir)
        .env("DOTENV_DISABLED", "1")
        .args(["env-name", "svc", "port"])
        .assert()
        .success()
        .stdout("port=SVC_PORT\n");
}

#[test]
fn test_dotenv_supplies_keyring_home() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join(".env"),
        format!(
            "SEALCFG_KEYRING_HOME={}\n",
            fixtures().join("keyring").display()
        ),
    )
    .unwrap();

    cmd_in(&temp_dir)
        .args(["keyring", "--output", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("secret_keys"));
}
