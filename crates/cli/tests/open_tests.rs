//! Integration tests for `sealcfg open`.

mod common;

use common::{sealcfg_cmd, secret};
use predicates::prelude::*;

#[test]
fn test_open_binary_message_strips_one_newline() {
    sealcfg_cmd()
        .arg("open")
        .arg(secret("service-account.gpg"))
        .assert()
        .success()
        .stdout("service-account-123\n");
}

#[test]
fn test_open_armored_message() {
    sealcfg_cmd()
        .arg("open")
        .arg(secret("db-password.asc"))
        .assert()
        .success()
        .stdout("hunter2\n");
}

#[test]
fn test_open_missing_file_returns_exit_code_3() {
    sealcfg_cmd()
        .arg("open")
        .arg(secret("does-not-exist.gpg"))
        .assert()
        .code(3)
        .stderr(predicate::str::contains("does-not-exist.gpg"));
}

#[test]
fn test_open_foreign_message_returns_exit_code_4() {
    sealcfg_cmd()
        .arg("open")
        .arg(secret("foreign.gpg"))
        .assert()
        .code(4)
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_open_garbage_returns_exit_code_4() {
    sealcfg_cmd()
        .arg("open")
        .arg(secret("garbage.gpg"))
        .assert()
        .code(4);
}

#[test]
fn test_open_without_keyring_returns_exit_code_2() {
    let empty = tempfile::TempDir::new().unwrap();

    sealcfg_cmd()
        .env("SEALCFG_KEYRING_HOME", empty.path())
        .arg("open")
        .arg(secret("service-account.gpg"))
        .assert()
        .code(2)
        .stderr(predicate::str::contains("No usable keyring"));
}
