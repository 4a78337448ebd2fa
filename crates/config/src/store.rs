//! The merged, read-only configuration store.
//!
//! Responsibilities:
//! - Apply source precedence per option: command line > environment > decrypted file / default.
//! - Parse raw text into typed values and expose them by option name.
//!
//! Does NOT handle:
//! - Decryption (see `resolver`); decrypted plaintext arrives already resolved.
//!
//! Invariants:
//! - The store never holds an encrypted option's path, only its decrypted plaintext.
//! - The store is immutable after `merge`; concurrent reads are safe.
//! - One value per name: if a name is registered in both namespaces and the
//!   encrypted option resolves, its plaintext replaces the plain value.

use secrecy::SecretString;
use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

use crate::loader::{ConfigError, EnvBindings};
use crate::registry::OptionRegistry;
use crate::source::OptionSource;
use crate::types::{ConfigValue, OptionDescriptor, OptionKind, OptionValue, ValueOrigin};

/// A final value and the source that supplied it.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedValue {
    pub value: ConfigValue,
    pub origin: ValueOrigin,
}

/// Raw text picked for an option, before typing.
struct Selected {
    raw: String,
    origin: ValueOrigin,
    /// How the value was supplied, for error messages.
    supplied_by: String,
}

fn select(
    descriptor: &OptionDescriptor,
    source: &dyn OptionSource,
    bindings: &EnvBindings,
) -> Selected {
    let name = descriptor.name();
    if let Some(raw) = source.current_value_of(name) {
        return Selected {
            raw: raw.to_string(),
            origin: ValueOrigin::CommandLine,
            supplied_by: format!("--{name}"),
        };
    }
    if let Some((var, raw)) = bindings.lookup(name) {
        return Selected {
            raw,
            origin: ValueOrigin::Environment,
            supplied_by: var.to_string(),
        };
    }
    Selected {
        raw: descriptor.default_value().to_raw(),
        origin: ValueOrigin::Default,
        supplied_by: format!("default of {name}"),
    }
}

/// Pick the file an encrypted option refers to, by the same precedence as plain options.
///
/// Returns `None` when the selected path is empty, meaning the option is not configured.
pub fn select_reference(
    descriptor: &OptionDescriptor,
    source: &dyn OptionSource,
    bindings: &EnvBindings,
) -> Option<(PathBuf, ValueOrigin)> {
    let selected = select(descriptor, source, bindings);
    let path = selected.raw.trim();
    if path.is_empty() {
        None
    } else {
        Some((PathBuf::from(path), selected.origin))
    }
}

/// Parse a boolean the way command-line users write them.
pub fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn typed_value(descriptor: &OptionDescriptor, selected: Selected) -> Result<ConfigValue, ConfigError> {
    if selected.origin == ValueOrigin::Default {
        return Ok(match descriptor.default_value() {
            OptionValue::String(s) | OptionValue::Path(s) => ConfigValue::String(s.clone()),
            OptionValue::Int(i) => ConfigValue::Int(*i),
            OptionValue::Bool(b) => ConfigValue::Bool(*b),
        });
    }

    match descriptor.kind() {
        OptionKind::String | OptionKind::EncryptedFile => Ok(ConfigValue::String(selected.raw)),
        OptionKind::Int => selected
            .raw
            .trim()
            .parse()
            .map(ConfigValue::Int)
            .map_err(|_| ConfigError::InvalidValue {
                var: selected.supplied_by,
                message: "must be an integer".to_string(),
            }),
        OptionKind::Bool => {
            parse_bool(&selected.raw)
                .map(ConfigValue::Bool)
                .ok_or_else(|| ConfigError::InvalidValue {
                    var: selected.supplied_by,
                    message: "must be true or false".to_string(),
                })
        }
    }
}

/// The final configuration: one typed value per resolved option.
#[derive(Debug, Clone, Default)]
pub struct ResolvedConfig {
    values: BTreeMap<String, ResolvedValue>,
    registered: BTreeSet<String>,
}

impl ResolvedConfig {
    /// Merge every registered option by precedence.
    ///
    /// Plain options take the command-line value, else the bound environment
    /// variable, else their default. Encrypted options take their entry in
    /// `decrypted`; an encrypted option missing from `decrypted` has no value.
    pub fn merge(
        registry: &OptionRegistry,
        source: &dyn OptionSource,
        bindings: &EnvBindings,
        decrypted: BTreeMap<String, SecretString>,
    ) -> Result<Self, ConfigError> {
        let mut values = BTreeMap::new();

        for descriptor in registry.plain() {
            let selected = select(descriptor, source, bindings);
            let origin = selected.origin;
            let value = typed_value(descriptor, selected)?;
            values.insert(descriptor.name().to_string(), ResolvedValue { value, origin });
        }

        for (name, plaintext) in decrypted {
            if registry.encrypted().all(|d| d.name() != name) {
                continue;
            }
            values.insert(
                name,
                ResolvedValue {
                    value: ConfigValue::Secret(plaintext),
                    origin: ValueOrigin::EncryptedFile,
                },
            );
        }

        Ok(Self {
            values,
            registered: registry.iter().map(|d| d.name().to_string()).collect(),
        })
    }

    /// The value of `name`.
    ///
    /// `UnknownOption` if `name` was never registered; `Unresolved` if it is an
    /// encrypted option whose file was not configured or did not decrypt.
    pub fn get(&self, name: &str) -> Result<&ConfigValue, ConfigError> {
        self.entry(name).map(|entry| &entry.value)
    }

    pub fn origin(&self, name: &str) -> Result<ValueOrigin, ConfigError> {
        self.entry(name).map(|entry| entry.origin)
    }

    fn entry(&self, name: &str) -> Result<&ResolvedValue, ConfigError> {
        match self.values.get(name) {
            Some(entry) => Ok(entry),
            None if self.registered.contains(name) => {
                Err(ConfigError::Unresolved(name.to_string()))
            }
            None => Err(ConfigError::UnknownOption(name.to_string())),
        }
    }

    pub fn get_str(&self, name: &str) -> Result<&str, ConfigError> {
        self.get(name)?
            .as_str()
            .ok_or_else(|| mismatch(name, "string"))
    }

    pub fn get_int(&self, name: &str) -> Result<i64, ConfigError> {
        self.get(name)?.as_int().ok_or_else(|| mismatch(name, "int"))
    }

    pub fn get_bool(&self, name: &str) -> Result<bool, ConfigError> {
        self.get(name)?.as_bool().ok_or_else(|| mismatch(name, "bool"))
    }

    pub fn get_secret(&self, name: &str) -> Result<&SecretString, ConfigError> {
        self.get(name)?
            .as_secret()
            .ok_or_else(|| mismatch(name, "secret"))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Every resolved value, by option name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ResolvedValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

fn mismatch(name: &str, expected: &'static str) -> ConfigError {
    ConfigError::TypeMismatch {
        name: name.to_string(),
        expected,
    }
}
