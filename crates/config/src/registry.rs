//! Declared option registry.
//!
//! Responsibilities:
//! - Hold the plain and encrypted-reference namespaces.
//! - Reject duplicate names within a namespace and malformed names.
//!
//! Does NOT handle:
//! - Reading option values (see `source` and `loader::env`).
//!
//! Invariants:
//! - Names are unique per namespace; the first registration of a name is kept.
//! - Iteration order is deterministic: plain options then encrypted ones, each by name.

use std::collections::BTreeMap;

use crate::loader::ConfigError;
use crate::types::{Namespace, OptionDescriptor};

/// The two namespaces of declared options.
#[derive(Debug, Clone, Default)]
pub struct OptionRegistry {
    plain: BTreeMap<String, OptionDescriptor>,
    encrypted: BTreeMap<String, OptionDescriptor>,
}

impl OptionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a descriptor into the namespace its kind belongs to.
    pub fn register(&mut self, descriptor: OptionDescriptor) -> Result<(), ConfigError> {
        match descriptor.namespace() {
            Namespace::Plain => self.register_plain(descriptor),
            Namespace::Encrypted => self.register_encrypted_file(descriptor),
        }
    }

    /// Register a plain option. Encrypted-file descriptors are rejected.
    pub fn register_plain(&mut self, descriptor: OptionDescriptor) -> Result<(), ConfigError> {
        if descriptor.is_encrypted() {
            return Err(ConfigError::InvalidValue {
                var: descriptor.name().to_string(),
                message: "encrypted-file options belong in the encrypted namespace".to_string(),
            });
        }
        self.insert(Namespace::Plain, descriptor)
    }

    /// Register an encrypted-file option.
    pub fn register_encrypted_file(
        &mut self,
        descriptor: OptionDescriptor,
    ) -> Result<(), ConfigError> {
        if !descriptor.is_encrypted() {
            return Err(ConfigError::InvalidValue {
                var: descriptor.name().to_string(),
                message: format!(
                    "{} options belong in the plain namespace",
                    descriptor.kind()
                ),
            });
        }
        self.insert(Namespace::Encrypted, descriptor)
    }

    fn insert(
        &mut self,
        namespace: Namespace,
        descriptor: OptionDescriptor,
    ) -> Result<(), ConfigError> {
        validate_name(descriptor.name())?;

        let (own, other) = match namespace {
            Namespace::Plain => (&mut self.plain, &self.encrypted),
            Namespace::Encrypted => (&mut self.encrypted, &self.plain),
        };

        if own.contains_key(descriptor.name()) {
            return Err(ConfigError::DuplicateOption {
                name: descriptor.name().to_string(),
                namespace,
            });
        }
        if other.contains_key(descriptor.name()) {
            tracing::warn!(
                option = descriptor.name(),
                "Option name is registered in both namespaces; both share one flag and one environment variable"
            );
        }

        own.insert(descriptor.name().to_string(), descriptor);
        Ok(())
    }

    pub fn get(&self, namespace: Namespace, name: &str) -> Option<&OptionDescriptor> {
        match namespace {
            Namespace::Plain => self.plain.get(name),
            Namespace::Encrypted => self.encrypted.get(name),
        }
    }

    /// Whether `name` is registered in either namespace.
    pub fn contains(&self, name: &str) -> bool {
        self.plain.contains_key(name) || self.encrypted.contains_key(name)
    }

    pub fn plain(&self) -> impl Iterator<Item = &OptionDescriptor> {
        self.plain.values()
    }

    pub fn encrypted(&self) -> impl Iterator<Item = &OptionDescriptor> {
        self.encrypted.values()
    }

    /// Every option, plain first.
    pub fn iter(&self) -> impl Iterator<Item = &OptionDescriptor> {
        self.plain().chain(self.encrypted())
    }

    pub fn len(&self) -> usize {
        self.plain.len() + self.encrypted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plain.is_empty() && self.encrypted.is_empty()
    }

    pub fn has_encrypted(&self) -> bool {
        !self.encrypted.is_empty()
    }
}

/// Flag names the command-line parser claims for itself.
const RESERVED_NAMES: &[&str] = &["help"];

fn validate_name(name: &str) -> Result<(), ConfigError> {
    let valid = !name.is_empty()
        && !RESERVED_NAMES.contains(&name)
        && !name.starts_with('-')
        && !name.contains('=')
        && !name.chars().any(char::is_whitespace);
    if valid {
        Ok(())
    } else {
        Err(ConfigError::InvalidOptionName(name.to_string()))
    }
}
