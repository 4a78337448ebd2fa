//! OpenPGP keyring loading and message decryption.
//!
//! Responsibilities:
//! - Load secret and public key entities from `secring.gpg` / `pubring.gpg`.
//! - Guard the load so it happens exactly once per `KeyringLoader`.
//! - Decrypt (and, for tooling and tests, encrypt) OpenPGP messages.
//!
//! Does NOT handle:
//! - Mapping option names to files (see `resolver`).
//! - Passphrase-protected secret keys; the passphrase callback always answers empty.
//!
//! Invariants:
//! - A loaded `Keyring` is never mutated; it is shared as `Arc<Keyring>`.
//! - One unreadable keyring file is tolerated and recorded; both failing is `KeyringError`.
//! - A cached load failure is returned to every later caller instead of an empty keyring.

mod error;
mod loader;
mod ring;

pub use error::{DecryptError, EncryptError, KeyringError, KeyringFileError};
pub use loader::{KeyringLoader, default_keyring_home};
pub use ring::Keyring;
