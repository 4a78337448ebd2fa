//! Exactly-once keyring loading.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock};

use super::error::KeyringError;
use super::ring::Keyring;
use crate::constants::{DEFAULT_KEYRING_HOME, GNUPGHOME_ENV};
use crate::loader::env_var_or_none;

/// Loads a [`Keyring`] at most once and hands the same result to every caller.
///
/// The first call to [`load`](Self::load) reads the keyring files; concurrent
/// callers block until that read finishes. Later calls return the cached
/// keyring (or the cached [`KeyringError`]) regardless of the `home` they pass,
/// so the home directory must be settled before first use.
#[derive(Debug, Default)]
pub struct KeyringLoader {
    keyring: OnceLock<Result<Arc<Keyring>, KeyringError>>,
    loads: AtomicUsize,
}

impl KeyringLoader {
    pub const fn new() -> Self {
        Self {
            keyring: OnceLock::new(),
            loads: AtomicUsize::new(0),
        }
    }

    /// The process-wide loader used by [`init_config`](crate::init_config).
    pub fn global() -> Arc<KeyringLoader> {
        static GLOBAL: OnceLock<Arc<KeyringLoader>> = OnceLock::new();
        Arc::clone(GLOBAL.get_or_init(|| Arc::new(KeyringLoader::new())))
    }

    /// Load the keyring from `home`, or return the result of the first load.
    pub fn load(&self, home: &Path) -> Result<Arc<Keyring>, KeyringError> {
        let result = self.keyring.get_or_init(|| {
            self.loads.fetch_add(1, Ordering::SeqCst);
            Keyring::load(home).map(Arc::new)
        });

        if let Ok(keyring) = result
            && keyring.home() != home
        {
            tracing::debug!(
                requested = %home.display(),
                loaded = %keyring.home().display(),
                "Keyring already loaded; ignoring new home directory"
            );
        }

        result.clone()
    }

    /// The cached result, if a load has happened.
    pub fn get(&self) -> Option<Result<Arc<Keyring>, KeyringError>> {
        self.keyring.get().cloned()
    }

    /// Home directory of the loaded keyring; `None` before a successful load.
    pub fn home(&self) -> Option<&Path> {
        match self.keyring.get() {
            Some(Ok(keyring)) => Some(keyring.home()),
            _ => None,
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.keyring.get().is_some()
    }

    /// How many times the keyring files were actually read. Never more than one.
    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }
}

/// The keyring home to use when the caller does not name one.
///
/// `GNUPGHOME` wins when set; otherwise the build-time [`DEFAULT_KEYRING_HOME`].
pub fn default_keyring_home() -> PathBuf {
    env_var_or_none(GNUPGHOME_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_KEYRING_HOME))
}
