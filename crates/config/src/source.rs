//! Option value sources.
//!
//! Responsibilities:
//! - Define the small capability interface the pipeline needs from a flag parser.
//! - Provide a `clap`-backed implementation for real command lines and an
//!   in-memory implementation for embedding and tests.
//!
//! Does NOT handle:
//! - Environment variables or defaults (see `loader::env` and `store`).
//! - Typed parsing; sources hand back the raw text the user supplied.
//!
//! Invariants:
//! - `current_value_of` only returns values that were explicitly supplied.

use clap::parser::ValueSource;
use clap::{Arg, ArgAction, Command};
use std::collections::{BTreeMap, BTreeSet};
use std::ffi::OsString;

use crate::loader::ConfigError;
use crate::types::{OptionDescriptor, OptionKind};

/// The capabilities the pipeline needs from the underlying flag mechanism.
pub trait OptionSource {
    /// Declare an option so the source accepts a value for it.
    fn register_option(&mut self, descriptor: &OptionDescriptor);

    /// Consume the source's input once every option is registered.
    fn parse(&mut self) -> Result<(), ConfigError> {
        Ok(())
    }

    /// The raw value explicitly supplied for `name`, if any.
    fn current_value_of(&self, name: &str) -> Option<&str>;

    /// Call `visitor` with the name of every registered option.
    fn visit_all(&self, visitor: &mut dyn FnMut(&str));
}

/// Command-line source backed by `clap`.
///
/// One long flag is created per option. Boolean flags accept `--flag` as
/// well as `--flag=true|false`; every other flag takes one value.
#[derive(Debug)]
pub struct ArgSource {
    name: String,
    args: Vec<OsString>,
    registered: Vec<Arg>,
    names: BTreeSet<String>,
    explicit: BTreeMap<String, String>,
}

impl ArgSource {
    /// `args` includes the program name as its first element, like `std::env::args_os()`.
    pub fn new<I, T>(name: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        Self {
            name: name.into(),
            args: args.into_iter().map(Into::into).collect(),
            registered: Vec::new(),
            names: BTreeSet::new(),
            explicit: BTreeMap::new(),
        }
    }

    fn command(&self) -> Command {
        Command::new(self.name.clone()).args(self.registered.iter().cloned())
    }

    /// Rendered `--help` text for the registered options.
    pub fn render_help(&self) -> String {
        self.command().render_help().to_string()
    }
}

impl OptionSource for ArgSource {
    fn register_option(&mut self, descriptor: &OptionDescriptor) {
        // Cross-namespace duplicates share one flag.
        if !self.names.insert(descriptor.name().to_string()) {
            return;
        }

        let default = descriptor.default_value().to_raw();
        let help = if default.is_empty() {
            descriptor.usage().to_string()
        } else {
            format!("{} [default: {}]", descriptor.usage(), default)
        };

        let arg = Arg::new(descriptor.name().to_string())
            .long(descriptor.name().to_string())
            .help(help);
        let arg = match descriptor.kind() {
            OptionKind::Bool => arg
                .action(ArgAction::Set)
                .num_args(0..=1)
                .require_equals(true)
                .default_missing_value("true")
                .value_name("BOOL"),
            OptionKind::Int => arg
                .action(ArgAction::Set)
                .allow_negative_numbers(true)
                .value_name("INT"),
            OptionKind::String => arg.action(ArgAction::Set).value_name("VALUE"),
            OptionKind::EncryptedFile => arg.action(ArgAction::Set).value_name("FILE"),
        };
        self.registered.push(arg);
    }

    fn parse(&mut self) -> Result<(), ConfigError> {
        let matches = self.command().try_get_matches_from(self.args.iter())?;

        self.explicit = self
            .names
            .iter()
            .filter(|name| matches.value_source(name.as_str()) == Some(ValueSource::CommandLine))
            .filter_map(|name| {
                matches
                    .get_one::<String>(name.as_str())
                    .map(|value| (name.clone(), value.clone()))
            })
            .collect();
        Ok(())
    }

    fn current_value_of(&self, name: &str) -> Option<&str> {
        self.explicit.get(name).map(String::as_str)
    }

    fn visit_all(&self, visitor: &mut dyn FnMut(&str)) {
        for name in &self.names {
            visitor(name);
        }
    }
}

/// In-memory source: explicit values are set directly instead of parsed.
#[derive(Debug, Clone, Default)]
pub struct MapSource {
    names: BTreeSet<String>,
    values: BTreeMap<String, String>,
}

impl MapSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Supply an explicit value, as if it had been passed on the command line.
    pub fn with_value(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }
}

impl OptionSource for MapSource {
    fn register_option(&mut self, descriptor: &OptionDescriptor) {
        self.names.insert(descriptor.name().to_string());
    }

    fn current_value_of(&self, name: &str) -> Option<&str> {
        if self.names.contains(name) {
            self.values.get(name).map(String::as_str)
        } else {
            None
        }
    }

    fn visit_all(&self, visitor: &mut dyn FnMut(&str)) {
        for name in &self.names {
            visitor(name);
        }
    }
}
