//! Tests for the configuration builder pipeline.
//!
//! Invariants:
//! - Tests use `serial_test` to prevent environment variable pollution.
//! - Tests use `global_test_lock()` for additional synchronization.
//! - Every builder gets its own keyring loader unless a test shares one on purpose.

use std::sync::Mutex;

pub mod precedence_tests;

/// Returns the global test lock for environment variable isolation.
pub fn env_lock() -> &'static Mutex<()> {
    crate::test_util::global_test_lock()
}
