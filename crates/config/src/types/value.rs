//! Resolved configuration values.

use secrecy::{ExposeSecret, SecretString};
use std::fmt;

/// Where a resolved value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueOrigin {
    /// Explicitly passed on the command line.
    CommandLine,
    /// Read from the option's environment variable.
    Environment,
    /// Decrypted from an encrypted-file option.
    EncryptedFile,
    /// The declared default.
    Default,
}

impl fmt::Display for ValueOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::CommandLine => "command-line",
            Self::Environment => "environment",
            Self::EncryptedFile => "encrypted-file",
            Self::Default => "default",
        };
        f.write_str(s)
    }
}

/// A final, typed configuration value.
#[derive(Debug, Clone)]
pub enum ConfigValue {
    String(String),
    Int(i64),
    Bool(bool),
    /// Plaintext decrypted from an encrypted-file option.
    Secret(SecretString),
}

impl ConfigValue {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::String(_) => "string",
            Self::Int(_) => "int",
            Self::Bool(_) => "bool",
            Self::Secret(_) => "secret",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_secret(&self) -> Option<&SecretString> {
        match self {
            Self::Secret(s) => Some(s),
            _ => None,
        }
    }
}

impl PartialEq for ConfigValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Secret(a), Self::Secret(b)) => a.expose_secret() == b.expose_secret(),
            _ => false,
        }
    }
}
