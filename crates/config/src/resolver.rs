//! Encrypted option resolution.
//!
//! Responsibilities:
//! - Turn the path held by an encrypted-file option into its decrypted plaintext.
//! - Resolve many options with per-option failure isolation and one aggregate error.
//!
//! Does NOT handle:
//! - Choosing which path an option refers to (see `store::select_reference`).
//! - Loading the keyring (see `keyring`).
//!
//! Invariants:
//! - Exactly one trailing `\n` is stripped from the plaintext, nothing else.
//! - A failure for one option never prevents resolving the others.
//! - Aggregated failures are ordered by option name, independent of resolution order.

use secrecy::SecretString;
use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::keyring::{DecryptError, Keyring};

/// Failure to resolve one encrypted option.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("{option}: cannot open {}: {kind}", .path.display())]
    FileNotFound {
        option: String,
        path: PathBuf,
        kind: ErrorKind,
    },

    #[error("{option}: cannot decrypt {}: {reason}", .path.display())]
    DecryptionFailed {
        option: String,
        path: PathBuf,
        reason: DecryptError,
    },
}

impl ResolveError {
    pub fn option(&self) -> &str {
        match self {
            Self::FileNotFound { option, .. } | Self::DecryptionFailed { option, .. } => option,
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            Self::FileNotFound { path, .. } | Self::DecryptionFailed { path, .. } => path,
        }
    }
}

/// Every per-option failure of one resolution pass.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{} encrypted option(s) failed to resolve: {}", .0.len(), join(.0))]
pub struct ResolveErrors(Vec<ResolveError>);

fn join(errors: &[ResolveError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl ResolveErrors {
    /// `None` when there is nothing to report.
    pub fn from_vec(mut errors: Vec<ResolveError>) -> Option<Self> {
        if errors.is_empty() {
            return None;
        }
        errors.sort_by(|a, b| a.option().cmp(b.option()));
        Some(Self(errors))
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResolveError> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The failure recorded for `option`, if any.
    pub fn for_option(&self, option: &str) -> Option<&ResolveError> {
        self.0.iter().find(|e| e.option() == option)
    }

    pub fn into_vec(self) -> Vec<ResolveError> {
        self.0
    }
}

/// Outcome of resolving a batch of encrypted options.
#[derive(Debug, Default)]
pub struct ResolvedSecrets {
    /// Plaintext per option name, for every option that resolved.
    pub values: BTreeMap<String, SecretString>,
    /// Every failure, or `None` when all options resolved.
    pub errors: Option<ResolveErrors>,
}

/// Decrypt the OpenPGP message at `path` for `option`.
pub fn resolve_file(
    option: &str,
    path: &Path,
    keyring: &Keyring,
) -> Result<SecretString, ResolveError> {
    let ciphertext = std::fs::read(path).map_err(|e| ResolveError::FileNotFound {
        option: option.to_string(),
        path: path.to_path_buf(),
        kind: e.kind(),
    })?;

    let decryption_failed = |reason| ResolveError::DecryptionFailed {
        option: option.to_string(),
        path: path.to_path_buf(),
        reason,
    };

    let mut plaintext = keyring.decrypt(&ciphertext).map_err(decryption_failed)?;
    if plaintext.last() == Some(&b'\n') {
        plaintext.pop();
    }
    let plaintext =
        String::from_utf8(plaintext).map_err(|_| decryption_failed(DecryptError::NotUtf8))?;

    Ok(SecretString::new(plaintext.into()))
}

/// Resolve every `(option, path)` request against `keyring`.
///
/// Successes and failures are both kept; see [`ResolvedSecrets`].
pub fn resolve_all<'a, I>(requests: I, keyring: &Keyring) -> ResolvedSecrets
where
    I: IntoIterator<Item = (&'a str, &'a Path)>,
{
    let mut values = BTreeMap::new();
    let mut errors = Vec::new();

    for (option, path) in requests {
        match resolve_file(option, path, keyring) {
            Ok(plaintext) => {
                tracing::debug!(option, path = %path.display(), "Resolved encrypted option");
                values.insert(option.to_string(), plaintext);
            }
            Err(e) => {
                tracing::warn!(option, error = %e, "Failed to resolve encrypted option");
                errors.push(e);
            }
        }
    }

    ResolvedSecrets {
        values,
        errors: ResolveErrors::from_vec(errors),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::sync::OnceLock;

    fn fixtures() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
    }

    fn keyring() -> &'static Keyring {
        static KEYRING: OnceLock<Keyring> = OnceLock::new();
        KEYRING.get_or_init(|| Keyring::load(&fixtures().join("keyring")).unwrap())
    }

    #[test]
    fn test_trailing_newline_is_stripped_once() {
        let value = resolve_file(
            "service-account",
            &fixtures().join("secrets/service-account.gpg"),
            keyring(),
        )
        .unwrap();
        assert_eq!(value.expose_secret(), "service-account-123");
    }

    #[test]
    fn test_value_without_newline_is_unchanged() {
        let value = resolve_file(
            "api-token",
            &fixtures().join("secrets/api-token.gpg"),
            keyring(),
        )
        .unwrap();
        assert_eq!(value.expose_secret(), "no-trailing-newline");
    }

    #[test]
    fn test_missing_file_is_file_not_found() {
        let path = fixtures().join("secrets/does-not-exist.gpg");
        let err = resolve_file("db-password", &path, keyring()).unwrap_err();

        assert_eq!(
            err,
            ResolveError::FileNotFound {
                option: "db-password".to_string(),
                path,
                kind: ErrorKind::NotFound,
            }
        );
    }

    #[test]
    fn test_foreign_message_is_decryption_failure() {
        let err = resolve_file("other", &fixtures().join("secrets/foreign.gpg"), keyring())
            .unwrap_err();
        assert!(matches!(
            err,
            ResolveError::DecryptionFailed {
                reason: DecryptError::NoMatchingKey,
                ..
            }
        ));
    }

    #[test]
    fn test_resolve_all_isolates_failures() {
        let good = fixtures().join("secrets/service-account.gpg");
        let armored = fixtures().join("secrets/db-password.asc");
        let missing = fixtures().join("secrets/missing.gpg");
        let garbage = fixtures().join("secrets/garbage.gpg");

        let resolved = resolve_all(
            [
                ("z-missing", missing.as_path()),
                ("service-account", good.as_path()),
                ("a-garbage", garbage.as_path()),
                ("db-password", armored.as_path()),
            ],
            keyring(),
        );

        assert_eq!(resolved.values.len(), 2);
        assert_eq!(
            resolved.values["service-account"].expose_secret(),
            "service-account-123"
        );
        assert_eq!(resolved.values["db-password"].expose_secret(), "hunter2");

        let errors = resolved.errors.unwrap();
        let options: Vec<&str> = errors.iter().map(ResolveError::option).collect();
        assert_eq!(options, vec!["a-garbage", "z-missing"]);
        assert!(matches!(
            errors.for_option("z-missing"),
            Some(ResolveError::FileNotFound { .. })
        ));
        assert!(matches!(
            errors.for_option("a-garbage"),
            Some(ResolveError::DecryptionFailed { .. })
        ));
    }

    #[test]
    fn test_aggregate_message_names_every_option() {
        let errors = ResolveErrors::from_vec(vec![
            ResolveError::FileNotFound {
                option: "b".into(),
                path: "/x/b.gpg".into(),
                kind: ErrorKind::NotFound,
            },
            ResolveError::DecryptionFailed {
                option: "a".into(),
                path: "/x/a.gpg".into(),
                reason: DecryptError::NoMatchingKey,
            },
        ])
        .unwrap();

        let message = errors.to_string();
        assert!(message.starts_with("2 encrypted option(s) failed to resolve"));
        assert!(message.find("a: cannot decrypt").unwrap() < message.find("b: cannot open").unwrap());
    }

    #[test]
    fn test_no_errors_means_none() {
        assert!(ResolveErrors::from_vec(Vec::new()).is_none());
    }
}
