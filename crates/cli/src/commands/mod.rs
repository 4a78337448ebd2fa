//! CLI command implementations.

pub mod env_name;
pub mod keyring;
pub mod open;
pub mod seal;

use anyhow::{Context, Result};
use sealed_config::{Keyring, KeyringLoader};
use std::path::Path;
use std::sync::Arc;

/// Load the keyring once for this process.
pub(crate) fn load_keyring(home: &Path) -> Result<Arc<Keyring>> {
    KeyringLoader::global()
        .load(home)
        .with_context(|| format!("Failed to load keyring from {}", home.display()))
}
