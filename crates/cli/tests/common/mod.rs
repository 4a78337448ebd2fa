//! Shared test utilities for sealcfg integration tests.
//!
//! Responsibilities:
//! - Provide a hermetic CLI command factory that prevents dotenv loading.
//! - Point the command at the checked-in test keyring.
//!
//! Invariants / Assumptions:
//! - All integration tests using this helper are hermetic by default.
//! - `SEALCFG_KEYRING_HOME` names the fixture keyring unless overridden.

use assert_cmd::Command;
use std::path::PathBuf;

/// The fixtures shared with the `sealed-config` crate.
pub fn fixtures() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../config/tests/fixtures")
}

#[allow(dead_code)]
pub fn secret(name: &str) -> PathBuf {
    fixtures().join("secrets").join(name)
}

/// Returns a hermetic `sealcfg` command for integration testing.
///
/// It ensures:
/// - `DOTENV_DISABLED=1` is set to prevent local `.env` contamination.
/// - `SEALCFG_KEYRING_HOME` points at the fixture keyring.
/// - `GNUPGHOME` and `RUST_LOG` are cleared to ensure no leakage from the host.
pub fn sealcfg_cmd() -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("sealcfg");

    // Hermeticity: prevent loading local .env
    cmd.env("DOTENV_DISABLED", "1");
    cmd.env("SEALCFG_KEYRING_HOME", fixtures().join("keyring"));

    // Clear potential host leakage
    cmd.env_remove("GNUPGHOME").env_remove("RUST_LOG");

    cmd
}
