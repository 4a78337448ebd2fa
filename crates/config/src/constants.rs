//! Centralized constants for the sealed-config workspace.

// =============================================================================
// Keyring Layout
// =============================================================================

/// File name of the secret keyring inside the keyring home directory.
pub const SECRET_KEYRING_FILE: &str = "secring.gpg";

/// File name of the public keyring inside the keyring home directory.
pub const PUBLIC_KEYRING_FILE: &str = "pubring.gpg";

/// Build-time default keyring home.
///
/// Deployments without a standard keyring location override this by setting
/// `SEALED_CONFIG_KEYRING_HOME` in the environment of the build.
pub const DEFAULT_KEYRING_HOME: &str = match option_env!("SEALED_CONFIG_KEYRING_HOME") {
    Some(home) => home,
    None => "/root/.gnupg",
};

/// Runtime variable that overrides [`DEFAULT_KEYRING_HOME`], following GnuPG's convention.
pub const GNUPGHOME_ENV: &str = "GNUPGHOME";

// =============================================================================
// Messages
// =============================================================================

/// Prefix identifying an ASCII-armored OpenPGP message.
pub const ARMORED_MESSAGE_PREFIX: &[u8] = b"-----BEGIN PGP MESSAGE";

// =============================================================================
// Environment
// =============================================================================

/// Setting this to `1` or `true` disables `.env` loading.
pub const DOTENV_DISABLED_ENV: &str = "DOTENV_DISABLED";
