//! Encrypt a plaintext value into an option file.

use anyhow::{Context, Result};
use std::io::{Read, Write};
use std::path::Path;

use super::load_keyring;

pub fn run(home: &Path, input: Option<&Path>, output: Option<&Path>, armor: bool) -> Result<()> {
    let plaintext = match input {
        Some(path) => std::fs::read(path)
            .with_context(|| format!("Failed to read plaintext from {}", path.display()))?,
        None => {
            let mut buf = Vec::new();
            std::io::stdin()
                .read_to_end(&mut buf)
                .context("Failed to read plaintext from stdin")?;
            buf
        }
    };

    let keyring = load_keyring(home)?;
    let message = keyring
        .encrypt(&plaintext, armor)
        .context("Failed to encrypt plaintext")?;
    tracing::info!(
        bytes = plaintext.len(),
        recipients = keyring.public_keys().len(),
        armor,
        "Sealed value"
    );

    match output {
        Some(path) => std::fs::write(path, &message)
            .with_context(|| format!("Failed to write {}", path.display()))?,
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(&message)?;
            stdout.flush()?;
        }
    }
    Ok(())
}
