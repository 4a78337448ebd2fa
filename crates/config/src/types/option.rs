//! Declared option descriptors.

use std::fmt;

/// The type of value an option carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionKind {
    String,
    Int,
    Bool,
    /// The value is a path to an OpenPGP message holding the real value.
    EncryptedFile,
}

impl OptionKind {
    /// The namespace options of this kind are registered into.
    pub fn namespace(self) -> Namespace {
        match self {
            Self::EncryptedFile => Namespace::Encrypted,
            _ => Namespace::Plain,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Int => "int",
            Self::Bool => "bool",
            Self::EncryptedFile => "encrypted-file",
        }
    }
}

impl fmt::Display for OptionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Disjoint option namespaces. Names are unique within a namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Namespace {
    /// Values supplied directly.
    Plain,
    /// Values are paths to encrypted files.
    Encrypted,
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Plain => f.write_str("plain"),
            Self::Encrypted => f.write_str("encrypted"),
        }
    }
}

/// A declared default value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionValue {
    String(String),
    Int(i64),
    Bool(bool),
    /// Default path of an encrypted-file option.
    Path(String),
}

impl OptionValue {
    /// Render the value the way it would be written on the command line.
    pub fn to_raw(&self) -> String {
        match self {
            Self::String(s) | Self::Path(s) => s.clone(),
            Self::Int(i) => i.to_string(),
            Self::Bool(b) => b.to_string(),
        }
    }
}

/// A declared configuration option.
///
/// Descriptors are plain values: build them with the constructor functions and hand
/// them to [`ConfigBuilder`](crate::ConfigBuilder) or an
/// [`OptionRegistry`](crate::OptionRegistry). They are never mutated after registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionDescriptor {
    name: String,
    kind: OptionKind,
    default: OptionValue,
    usage: String,
}

impl OptionDescriptor {
    /// A plain string option.
    pub fn string(name: impl Into<String>, default: impl Into<String>, usage: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: OptionKind::String,
            default: OptionValue::String(default.into()),
            usage: usage.into(),
        }
    }

    /// A plain integer option.
    pub fn int(name: impl Into<String>, default: i64, usage: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: OptionKind::Int,
            default: OptionValue::Int(default),
            usage: usage.into(),
        }
    }

    /// A plain boolean option.
    pub fn bool(name: impl Into<String>, default: bool, usage: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: OptionKind::Bool,
            default: OptionValue::Bool(default),
            usage: usage.into(),
        }
    }

    /// An option whose value is read from an OpenPGP-encrypted file.
    ///
    /// `default_path` is the file used when neither a flag nor an environment
    /// variable names one. An empty default means the option is unset unless supplied.
    pub fn encrypted_file(
        name: impl Into<String>,
        default_path: impl Into<String>,
        usage: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            kind: OptionKind::EncryptedFile,
            default: OptionValue::Path(default_path.into()),
            usage: usage.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> OptionKind {
        self.kind
    }

    pub fn namespace(&self) -> Namespace {
        self.kind.namespace()
    }

    pub fn default_value(&self) -> &OptionValue {
        &self.default
    }

    pub fn usage(&self) -> &str {
        &self.usage
    }

    pub fn is_encrypted(&self) -> bool {
        self.namespace() == Namespace::Encrypted
    }
}
