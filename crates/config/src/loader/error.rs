//! Error types for configuration loading.
//!
//! Responsibilities:
//! - Define the fatal and query-time error variants of the crate.
//! - Wrap keyring and command-line failures so callers handle one error type.
//!
//! Does NOT handle:
//! - Per-option resolution failures (see `resolver::ResolveError`); those are
//!   aggregated and returned next to a usable configuration, not as `ConfigError`.
//!
//! Invariants:
//! - Errors name options, variables and paths, never decrypted values.
//! - Dotenv errors NEVER include raw .env line contents to prevent secret leakage.

use std::io::ErrorKind;
use thiserror::Error;

use crate::keyring::KeyringError;
use crate::types::Namespace;

/// Errors that can occur while declaring, building or querying configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A required initialization parameter is missing.
    #[error("Invalid input: {0}")]
    Input(String),

    #[error("Option '{name}' is already registered in the {namespace} namespace")]
    DuplicateOption { name: String, namespace: Namespace },

    #[error("Invalid option name '{0}': must be non-empty, not 'help', and contain no whitespace, '=' or leading '-'")]
    InvalidOptionName(String),

    #[error(transparent)]
    Keyring(#[from] KeyringError),

    #[error("Unknown option: {0}")]
    UnknownOption(String),

    #[error("Option '{0}' has no resolved value")]
    Unresolved(String),

    #[error("Option '{name}' is not a {expected} value")]
    TypeMismatch { name: String, expected: &'static str },

    #[error("Invalid value for {var}: {message}")]
    InvalidValue { var: String, message: String },

    #[error(transparent)]
    Cli(#[from] clap::Error),

    /// Failed to parse the `.env` file due to invalid syntax.
    ///
    /// SAFETY: This error only includes the byte index of the parse failure,
    /// NOT the offending line content, to prevent leaking secrets.
    #[error(
        "Failed to parse .env file at position {error_index}. Hint: set DOTENV_DISABLED=1 to skip .env loading"
    )]
    DotenvParse { error_index: usize },

    /// Failed to read the `.env` file due to an I/O error.
    #[error("Failed to read .env file: {kind}")]
    DotenvIo { kind: ErrorKind },

    /// Unknown dotenv error (future variants from dotenvy crate).
    #[error("Failed to load .env file. Hint: set DOTENV_DISABLED=1 to skip .env loading")]
    DotenvUnknown,
}
