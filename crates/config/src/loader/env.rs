//! Environment variable binding for declared options.
//!
//! Responsibilities:
//! - Derive the canonical environment variable name for each option.
//! - Record one binding per option in both namespaces.
//! - Read bound variables with empty/whitespace filtering.
//!
//! Does NOT handle:
//! - Choosing between command line, environment and defaults (see `store`).
//! - .env file loading (see `builder::load_dotenv`).
//!
//! Invariants:
//! - Names are `<SERVICE>_<OPTION>`, uppercased, with every hyphen turned into an underscore.
//! - Empty or whitespace-only environment variables are treated as unset.
//! - Returned values are trimmed (leading/trailing whitespace removed).

use std::collections::BTreeMap;

use crate::registry::OptionRegistry;

/// Read an environment variable, returning None if unset, empty, or whitespace-only.
/// Returns the trimmed value (leading/trailing whitespace removed) if present.
pub fn env_var_or_none(key: &str) -> Option<String> {
    std::env::var(key).ok().and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.len() == s.len() {
            // No trimming needed, return original to avoid allocation
            Some(s)
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// Derive the environment variable bound to `option` for `service`.
///
/// `derive_env_name("my-cool-service", "service-account")` is
/// `MY_COOL_SERVICE_SERVICE_ACCOUNT`.
pub fn derive_env_name(service: &str, option: &str) -> String {
    format!("{}_{}", canonical(service), canonical(option))
}

fn canonical(part: &str) -> String {
    part.replace('-', "_").to_uppercase()
}

/// Option name to environment variable name, for every registered option.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvBindings {
    vars: BTreeMap<String, String>,
}

impl EnvBindings {
    /// The variable bound to `option`.
    pub fn var_name(&self, option: &str) -> Option<&str> {
        self.vars.get(option).map(String::as_str)
    }

    /// Read the bound variable for `option`, returning its trimmed value if set.
    pub fn lookup(&self, option: &str) -> Option<(&str, String)> {
        let var = self.var_name(option)?;
        env_var_or_none(var).map(|value| (var, value))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

/// Bind every option in both namespaces to its derived variable.
pub fn bind_all(registry: &OptionRegistry, service: &str) -> EnvBindings {
    let vars = registry
        .iter()
        .map(|descriptor| {
            let var = derive_env_name(service, descriptor.name());
            tracing::debug!(option = descriptor.name(), env = %var, "Bound option to environment");
            (descriptor.name().to_string(), var)
        })
        .collect();
    EnvBindings { vars }
}
