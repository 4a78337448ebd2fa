//! Keyring and message error types.

use std::io::ErrorKind;
use std::path::PathBuf;
use thiserror::Error;

/// Failure to use one of the two keyring files.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KeyringFileError {
    #[error("keyring file {} does not exist", .path.display())]
    Missing { path: PathBuf },

    #[error("keyring file {} could not be read: {kind}", .path.display())]
    Unreadable { path: PathBuf, kind: ErrorKind },

    #[error("keyring file {} could not be parsed: {message}", .path.display())]
    Parse { path: PathBuf, message: String },
}

impl KeyringFileError {
    pub fn path(&self) -> &PathBuf {
        match self {
            Self::Missing { path } | Self::Unreadable { path, .. } | Self::Parse { path, .. } => {
                path
            }
        }
    }

    pub(crate) fn from_io(path: PathBuf, error: &std::io::Error) -> Self {
        match error.kind() {
            ErrorKind::NotFound => Self::Missing { path },
            kind => Self::Unreadable { path, kind },
        }
    }
}

/// The keyring could not be loaded at all.
///
/// Cloneable so a cached failure can be handed to every caller of
/// [`KeyringLoader::load`](crate::KeyringLoader::load).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KeyringError {
    #[error("No usable keyring in {}: {secret}; {public}", .home.display())]
    Unavailable {
        home: PathBuf,
        secret: KeyringFileError,
        public: KeyringFileError,
    },
}

/// Failure to decrypt a single message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecryptError {
    #[error("keyring holds no secret keys")]
    NoSecretKeys,

    #[error("malformed OpenPGP message: {0}")]
    Malformed(String),

    #[error("no key in the keyring can decrypt the message")]
    NoMatchingKey,

    #[error("message has no literal data")]
    EmptyMessage,

    #[error("plaintext is not valid UTF-8")]
    NotUtf8,
}

/// Failure to encrypt a message to the keyring's public keys.
#[derive(Error, Debug)]
pub enum EncryptError {
    #[error("keyring holds no public encryption subkeys")]
    NoRecipients,

    #[error("OpenPGP error: {0}")]
    Pgp(#[from] pgp::errors::Error),
}
