//! Decrypt an option file the same way a service resolves it.

use anyhow::{Context, Result};
use secrecy::ExposeSecret;
use sealed_config::resolve_file;
use std::path::Path;

use super::load_keyring;

pub fn run(home: &Path, file: &Path) -> Result<()> {
    let keyring = load_keyring(home)?;
    let option = file
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| file.display().to_string());

    let value = resolve_file(&option, file, &keyring)
        .with_context(|| format!("Failed to open {}", file.display()))?;
    println!("{}", value.expose_secret());
    Ok(())
}
