//! CLI exit codes for scripting and automation.
//!
//! Responsibilities:
//! - Define structured exit codes that scripts can use to distinguish error types.
//! - Map library errors found anywhere in an `anyhow` chain to those codes.
//!
//! Does NOT handle:
//! - Error message formatting (handled by anyhow Display).
//!
//! Invariants:
//! - Exit codes 1-4 are reserved for specific error categories.

use sealed_config::{ConfigError, DecryptError, EncryptError, KeyringError, ResolveError};

/// Structured exit codes for sealcfg.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Success - command completed successfully.
    Success = 0,

    /// General error - unhandled or generic failure.
    GeneralError = 1,

    /// Keyring unavailable - neither keyring file is usable, or it holds no
    /// keys suitable for the operation.
    KeyringUnavailable = 2,

    /// Input error - missing input file or invalid arguments.
    InputError = 3,

    /// Decryption failed - the message is malformed or addressed to other keys.
    DecryptionFailed = 4,
}

impl ExitCode {
    /// Convert the exit code to an i32 for use with std::process::exit().
    pub const fn as_i32(self) -> i32 {
        self as u8 as i32
    }
}

impl From<&ResolveError> for ExitCode {
    fn from(err: &ResolveError) -> Self {
        match err {
            ResolveError::FileNotFound { .. } => ExitCode::InputError,
            ResolveError::DecryptionFailed {
                reason: DecryptError::NoSecretKeys,
                ..
            } => ExitCode::KeyringUnavailable,
            ResolveError::DecryptionFailed { .. } => ExitCode::DecryptionFailed,
        }
    }
}

/// Extension trait for anyhow::Error to extract exit codes.
pub trait ExitCodeExt {
    /// Returns ExitCode::GeneralError if no known error is in the chain.
    fn exit_code(&self) -> ExitCode;
}

impl ExitCodeExt for anyhow::Error {
    fn exit_code(&self) -> ExitCode {
        for cause in self.chain() {
            if cause.downcast_ref::<KeyringError>().is_some() {
                return ExitCode::KeyringUnavailable;
            }
            if let Some(err) = cause.downcast_ref::<ResolveError>() {
                return ExitCode::from(err);
            }
            if let Some(err) = cause.downcast_ref::<DecryptError>() {
                return match err {
                    DecryptError::NoSecretKeys => ExitCode::KeyringUnavailable,
                    _ => ExitCode::DecryptionFailed,
                };
            }
            if let Some(EncryptError::NoRecipients) = cause.downcast_ref::<EncryptError>() {
                return ExitCode::KeyringUnavailable;
            }
            if let Some(
                ConfigError::Input(_)
                | ConfigError::InvalidOptionName(_)
                | ConfigError::DuplicateOption { .. },
            ) = cause.downcast_ref::<ConfigError>()
            {
                return ExitCode::InputError;
            }
            if let Some(err) = cause.downcast_ref::<std::io::Error>()
                && err.kind() == std::io::ErrorKind::NotFound
            {
                return ExitCode::InputError;
            }
        }

        ExitCode::GeneralError
    }
}
