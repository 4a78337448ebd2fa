//! The loaded keyring and the decrypt/encrypt primitives built on it.

use pgp::crypto::sym::SymmetricKeyAlgorithm;
use pgp::ser::Serialize;
use pgp::types::PublicKeyTrait;
use pgp::{Deserializable, Message, SignedPublicKey, SignedPublicSubKey, SignedSecretKey};
use std::fmt;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use super::error::{DecryptError, EncryptError, KeyringError, KeyringFileError};
use crate::constants::{ARMORED_MESSAGE_PREFIX, PUBLIC_KEYRING_FILE, SECRET_KEYRING_FILE};

/// An immutable, ordered collection of OpenPGP key entities.
///
/// Secret keys come from `secring.gpg` and are tried in file order when
/// decrypting. Public keys come from `pubring.gpg` and are only used as
/// encryption recipients.
pub struct Keyring {
    home: PathBuf,
    secret_keys: Vec<SignedSecretKey>,
    public_keys: Vec<SignedPublicKey>,
    partial_failures: Vec<KeyringFileError>,
}

impl Keyring {
    /// Load `secring.gpg` and `pubring.gpg` from `home`.
    ///
    /// If one file is missing or unparsable the failure is recorded in
    /// [`partial_failures`](Self::partial_failures) and the other file is used.
    /// Both failing returns [`KeyringError::Unavailable`].
    pub fn load(home: &Path) -> Result<Self, KeyringError> {
        let secret = read_entities::<SignedSecretKey>(&home.join(SECRET_KEYRING_FILE));
        let public = read_entities::<SignedPublicKey>(&home.join(PUBLIC_KEYRING_FILE));

        let (secret_keys, public_keys, partial_failures) = match (secret, public) {
            (Err(secret), Err(public)) => {
                return Err(KeyringError::Unavailable {
                    home: home.to_path_buf(),
                    secret,
                    public,
                });
            }
            (Ok(secret_keys), Ok(public_keys)) => (secret_keys, public_keys, Vec::new()),
            (Ok(secret_keys), Err(failure)) => (secret_keys, Vec::new(), vec![failure]),
            (Err(failure), Ok(public_keys)) => (Vec::new(), public_keys, vec![failure]),
        };

        for failure in &partial_failures {
            tracing::warn!(error = %failure, "Continuing with a partial keyring");
        }
        tracing::info!(
            home = %home.display(),
            secret_keys = secret_keys.len(),
            public_keys = public_keys.len(),
            "Loaded keyring"
        );

        Ok(Self {
            home: home.to_path_buf(),
            secret_keys,
            public_keys,
            partial_failures,
        })
    }

    /// Build a keyring from already-parsed entities.
    pub fn from_keys(
        home: impl Into<PathBuf>,
        secret_keys: Vec<SignedSecretKey>,
        public_keys: Vec<SignedPublicKey>,
    ) -> Self {
        Self {
            home: home.into(),
            secret_keys,
            public_keys,
            partial_failures: Vec::new(),
        }
    }

    pub fn home(&self) -> &Path {
        &self.home
    }

    pub fn secret_keys(&self) -> &[SignedSecretKey] {
        &self.secret_keys
    }

    pub fn public_keys(&self) -> &[SignedPublicKey] {
        &self.public_keys
    }

    /// Keyring files that failed to load while the other one succeeded.
    pub fn partial_failures(&self) -> &[KeyringFileError] {
        &self.partial_failures
    }

    pub fn can_decrypt(&self) -> bool {
        !self.secret_keys.is_empty()
    }

    /// Upper-case hex key ids of the secret key entities, in keyring order.
    pub fn secret_key_ids(&self) -> Vec<String> {
        self.secret_keys
            .iter()
            .map(|key| hex::encode_upper(key.key_id()))
            .collect()
    }

    /// Upper-case hex key ids of the public key entities, in keyring order.
    pub fn public_key_ids(&self) -> Vec<String> {
        self.public_keys
            .iter()
            .map(|key| hex::encode_upper(key.key_id()))
            .collect()
    }

    /// Decrypt a binary or ASCII-armored OpenPGP message.
    ///
    /// Every secret key entity is tried in keyring order and the first one that
    /// decrypts the message wins. The returned bytes are the literal body, unmodified.
    pub fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>, DecryptError> {
        if self.secret_keys.is_empty() {
            return Err(DecryptError::NoSecretKeys);
        }

        let message = parse_message(ciphertext)?;
        for key in &self.secret_keys {
            match message.decrypt(String::new, &[key]) {
                Ok((decrypted, _)) => {
                    return decrypted
                        .get_content()
                        .map_err(|e| DecryptError::Malformed(e.to_string()))?
                        .ok_or(DecryptError::EmptyMessage);
                }
                Err(e) => {
                    tracing::trace!(
                        key_id = %hex::encode_upper(key.key_id()),
                        error = %e,
                        "Key did not decrypt message"
                    );
                }
            }
        }

        Err(DecryptError::NoMatchingKey)
    }

    /// Encrypt `plaintext` to the encryption subkeys of every public key entity.
    pub fn encrypt(&self, plaintext: &[u8], armor: bool) -> Result<Vec<u8>, EncryptError> {
        let recipients: Vec<&SignedPublicSubKey> = self
            .public_keys
            .iter()
            .flat_map(|key| key.public_subkeys.iter())
            .filter(|subkey| subkey.is_encryption_key())
            .collect();
        if recipients.is_empty() {
            return Err(EncryptError::NoRecipients);
        }

        let mut rng = rand::thread_rng();
        let encrypted = Message::new_literal_bytes("", plaintext).encrypt_to_keys_seipdv1(
            &mut rng,
            SymmetricKeyAlgorithm::AES256,
            &recipients[..],
        )?;

        if armor {
            Ok(encrypted.to_armored_string(None.into())?.into_bytes())
        } else {
            Ok(encrypted.to_bytes()?)
        }
    }
}

impl fmt::Debug for Keyring {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Keyring")
            .field("home", &self.home)
            .field("secret_keys", &self.secret_key_ids())
            .field("public_keys", &self.public_key_ids())
            .field("partial_failures", &self.partial_failures)
            .finish()
    }
}

fn parse_message(bytes: &[u8]) -> Result<Message, DecryptError> {
    let is_armored = bytes.trim_ascii_start().starts_with(ARMORED_MESSAGE_PREFIX);
    let parsed = if is_armored {
        Message::from_armor_single(Cursor::new(bytes)).map(|(message, _headers)| message)
    } else {
        Message::from_bytes(Cursor::new(bytes))
    };
    parsed.map_err(|e| DecryptError::Malformed(e.to_string()))
}

/// Read every transferable key in a binary keyring file.
///
/// Entities that fail to parse are skipped. A file that yields no entities
/// but did contain unparsable data is reported as a parse failure; an empty
/// file is a valid, empty keyring.
fn read_entities<T: Deserializable>(path: &Path) -> Result<Vec<T>, KeyringFileError> {
    let bytes =
        std::fs::read(path).map_err(|e| KeyringFileError::from_io(path.to_path_buf(), &e))?;

    if bytes.is_empty() {
        return Ok(Vec::new());
    }

    let entities = T::from_bytes_many(Cursor::new(bytes));

    let mut parsed = Vec::new();
    let mut last_error = None;
    for entity in entities {
        match entity {
            Ok(entity) => parsed.push(entity),
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "Skipping unparsable key entity");
                last_error = Some(e.to_string());
            }
        }
    }

    match last_error {
        Some(message) if parsed.is_empty() => Err(KeyringFileError::Parse {
            path: path.to_path_buf(),
            message,
        }),
        _ => Ok(parsed),
    }
}
