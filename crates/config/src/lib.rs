//! Service configuration from command-line flags, environment variables and
//! OpenPGP-encrypted secret files.
//!
//! Options are declared as [`OptionDescriptor`] values and handed to a
//! [`ConfigBuilder`] (or [`init_config`]). Plain options resolve by precedence:
//! command line, then `<SERVICE>_<OPTION>` environment variable, then default.
//! Encrypted-file options resolve the same way to a *path*, which is then
//! decrypted with the keyring in `secring.gpg` / `pubring.gpg`; only the
//! plaintext reaches the [`ResolvedConfig`].

pub mod constants;
pub mod keyring;
mod loader;
pub mod registry;
pub mod resolver;
pub mod source;
pub mod store;
pub mod types;

pub use keyring::{
    DecryptError, EncryptError, Keyring, KeyringError, KeyringFileError, KeyringLoader,
    default_keyring_home,
};
pub use loader::{
    ConfigBuilder, ConfigError, EnvBindings, Resolution, bind_all, derive_env_name,
    env_var_or_none, init_config,
};
pub use registry::OptionRegistry;
pub use resolver::{ResolveError, ResolveErrors, ResolvedSecrets, resolve_all, resolve_file};
pub use source::{ArgSource, MapSource, OptionSource};
pub use store::{ResolvedConfig, ResolvedValue};
pub use types::{ConfigValue, Namespace, OptionDescriptor, OptionKind, OptionValue, ValueOrigin};

#[cfg(test)]
pub(crate) mod test_util {
    use std::path::PathBuf;
    use std::sync::{Mutex, OnceLock};

    pub fn global_test_lock() -> &'static Mutex<()> {
        static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
        LOCK.get_or_init(|| Mutex::new(()))
    }

    pub fn fixtures() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
    }
}
