//! Integration tests for `sealcfg seal`.

mod common;

use common::sealcfg_cmd;
use predicates::prelude::*;
use tempfile::TempDir;

#[test]
fn test_seal_then_open_round_trip() {
    let dir = TempDir::new().unwrap();
    let sealed = dir.path().join("token.gpg");

    sealcfg_cmd()
        .arg("seal")
        .arg("--output")
        .arg(&sealed)
        .write_stdin("s3cr3t-value\n")
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    sealcfg_cmd()
        .arg("open")
        .arg(&sealed)
        .assert()
        .success()
        .stdout("s3cr3t-value\n");
}

#[test]
fn test_seal_armor_writes_pgp_message_to_stdout() {
    sealcfg_cmd()
        .args(["seal", "--armor"])
        .write_stdin("hunter2")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("-----BEGIN PGP MESSAGE-----"));
}

#[test]
fn test_seal_reads_input_file() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("plain.txt");
    let sealed = dir.path().join("plain.asc");
    std::fs::write(&input, "from-a-file").unwrap();

    sealcfg_cmd()
        .args(["seal", "--armor", "--output"])
        .arg(&sealed)
        .arg(&input)
        .assert()
        .success();

    sealcfg_cmd()
        .arg("open")
        .arg(&sealed)
        .assert()
        .success()
        .stdout("from-a-file\n");
}

#[test]
fn test_seal_missing_input_returns_exit_code_3() {
    let dir = TempDir::new().unwrap();

    sealcfg_cmd()
        .arg("seal")
        .arg(dir.path().join("absent.txt"))
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Failed to read plaintext"));
}
