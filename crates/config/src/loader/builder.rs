//! Configuration builder and initialization pipeline.
//!
//! Responsibilities:
//! - Collect option declarations and run the pipeline:
//!   keyring loading, environment binding, argument parsing, secret resolution, merging.
//! - Provide the `init_config` convenience entry point backed by the global keyring loader.
//! - Load `.env` files on request, gated by `DOTENV_DISABLED`.
//!
//! Does NOT handle:
//! - Precedence rules themselves (see `store`).
//! - Decryption details (see `resolver` and `keyring`).
//!
//! Invariants / Assumptions:
//! - A blank service name fails with `ConfigError::Input` before any file I/O.
//! - Fatal errors (input, duplicate option, keyring, CLI) abort before a store exists.
//! - Per-option resolution failures never abort: they come back next to the store.
//! - The keyring is only loaded when at least one encrypted option is declared.
//! - `init_config` is meant to be called once, at startup, from the main thread.

use std::fmt;
use std::ffi::OsString;
use std::path::PathBuf;
use std::sync::Arc;

use super::env::bind_all;
use super::error::ConfigError;
use crate::constants::DOTENV_DISABLED_ENV;
use crate::keyring::{KeyringLoader, default_keyring_home};
use crate::registry::OptionRegistry;
use crate::resolver::{ResolveErrors, ResolvedSecrets, resolve_all};
use crate::source::{ArgSource, OptionSource};
use crate::store::{ResolvedConfig, select_reference};
use crate::types::OptionDescriptor;

/// Pipeline stages, logged as the build progresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    KeyringLoading,
    OptionsBound,
    Resolving,
    Merged,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::KeyringLoading => "keyring-loading",
            Self::OptionsBound => "options-bound",
            Self::Resolving => "resolving",
            Self::Merged => "merged",
        };
        f.write_str(s)
    }
}

/// Result of a successful build: the store plus any per-option failures.
#[derive(Debug)]
pub struct Resolution {
    /// Every option that resolved.
    pub config: ResolvedConfig,
    /// Encrypted options that failed to resolve, if any.
    pub errors: Option<ResolveErrors>,
}

impl Resolution {
    /// Whether every configured encrypted option resolved.
    pub fn is_complete(&self) -> bool {
        self.errors.is_none()
    }

    /// Reject partial success: any resolution failure becomes the error.
    pub fn into_strict(self) -> Result<ResolvedConfig, ResolveErrors> {
        match self.errors {
            Some(errors) => Err(errors),
            None => Ok(self.config),
        }
    }

    pub fn into_parts(self) -> (ResolvedConfig, Option<ResolveErrors>) {
        (self.config, self.errors)
    }
}

/// Builder for a service's configuration.
///
/// Each builder owns its option declarations and, unless one is injected with
/// [`keyring_loader`](Self::keyring_loader), its own keyring loader, so
/// independent builders never share state.
pub struct ConfigBuilder {
    service: String,
    options: Vec<OptionDescriptor>,
    keyring_home: Option<PathBuf>,
    keyring_loader: Option<Arc<KeyringLoader>>,
}

impl ConfigBuilder {
    /// Create a builder for `service`. The name prefixes every environment variable.
    pub fn new(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            options: Vec::new(),
            keyring_home: None,
            keyring_loader: None,
        }
    }

    /// Check if dotenv loading is disabled via environment variable.
    fn dotenv_disabled() -> bool {
        matches!(
            std::env::var(DOTENV_DISABLED_ENV).ok().as_deref(),
            Some("true") | Some("1")
        )
    }

    /// Load environment variables from a `.env` file in the working directory, if present.
    ///
    /// If `DOTENV_DISABLED` is set to "true" or "1" the file is not loaded.
    /// Missing `.env` files are silently ignored.
    ///
    /// SAFETY: Error messages never include raw .env line contents to prevent secret leakage.
    pub fn load_dotenv(self) -> Result<Self, ConfigError> {
        if Self::dotenv_disabled() {
            return Ok(self);
        }

        match dotenvy::dotenv() {
            Ok(_) => Ok(self),
            Err(e) if Self::is_not_found(&e) => Ok(self),
            Err(dotenvy::Error::LineParse(_, idx)) => {
                Err(ConfigError::DotenvParse { error_index: idx })
            }
            Err(dotenvy::Error::Io(io_err)) => Err(ConfigError::DotenvIo {
                kind: io_err.kind(),
            }),
            Err(_) => Err(ConfigError::DotenvUnknown),
        }
    }

    fn is_not_found(err: &dotenvy::Error) -> bool {
        matches!(
            err,
            dotenvy::Error::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound
        )
    }

    /// Declare one option.
    pub fn option(mut self, descriptor: OptionDescriptor) -> Self {
        self.options.push(descriptor);
        self
    }

    /// Declare several options.
    pub fn options(mut self, descriptors: impl IntoIterator<Item = OptionDescriptor>) -> Self {
        self.options.extend(descriptors);
        self
    }

    /// Directory holding `secring.gpg` and `pubring.gpg`.
    ///
    /// Defaults to [`default_keyring_home`].
    pub fn keyring_home(mut self, home: impl Into<PathBuf>) -> Self {
        self.keyring_home = Some(home.into());
        self
    }

    /// Share a keyring loader, e.g. [`KeyringLoader::global`].
    pub fn keyring_loader(mut self, loader: Arc<KeyringLoader>) -> Self {
        self.keyring_loader = Some(loader);
        self
    }

    pub fn service(&self) -> &str {
        &self.service
    }

    /// Build from command-line arguments; `args` starts with the program name.
    pub fn build_from_args<I, T>(self, args: I) -> Result<Resolution, ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let source = ArgSource::new(self.service.clone(), args);
        self.build_with_source(source)
    }

    /// Build using any option source.
    pub fn build_with_source<S: OptionSource>(self, mut source: S) -> Result<Resolution, ConfigError> {
        if self.service.trim().is_empty() {
            return Err(ConfigError::Input("service name is required".to_string()));
        }

        let mut registry = OptionRegistry::new();
        for descriptor in self.options {
            registry.register(descriptor)?;
        }

        tracing::debug!(service = %self.service, stage = %Stage::KeyringLoading);
        let keyring = if registry.has_encrypted() {
            let loader = self
                .keyring_loader
                .unwrap_or_else(|| Arc::new(KeyringLoader::new()));
            let home = self.keyring_home.unwrap_or_else(default_keyring_home);
            Some(loader.load(&home)?)
        } else {
            None
        };

        tracing::debug!(service = %self.service, stage = %Stage::OptionsBound);
        let bindings = bind_all(&registry, &self.service);
        for descriptor in registry.iter() {
            source.register_option(descriptor);
        }
        source.parse()?;

        tracing::debug!(service = %self.service, stage = %Stage::Resolving);
        let references: Vec<(String, PathBuf)> = registry
            .encrypted()
            .filter_map(|descriptor| {
                select_reference(descriptor, &source, &bindings)
                    .map(|(path, _origin)| (descriptor.name().to_string(), path))
            })
            .collect();
        let resolved = match keyring {
            Some(keyring) => resolve_all(
                references
                    .iter()
                    .map(|(name, path)| (name.as_str(), path.as_path())),
                &keyring,
            ),
            None => ResolvedSecrets::default(),
        };

        let config = ResolvedConfig::merge(&registry, &source, &bindings, resolved.values)?;
        tracing::debug!(
            service = %self.service,
            stage = %Stage::Merged,
            values = config.len(),
            failures = resolved.errors.as_ref().map_or(0, ResolveErrors::len)
        );

        Ok(Resolution {
            config,
            errors: resolved.errors,
        })
    }
}

/// Initialize configuration for `service` from the process command line.
///
/// Uses the process-wide [`KeyringLoader::global`] and [`default_keyring_home`].
/// Intended to be called once at startup.
pub fn init_config(
    service: &str,
    options: impl IntoIterator<Item = OptionDescriptor>,
) -> Result<Resolution, ConfigError> {
    ConfigBuilder::new(service)
        .options(options)
        .keyring_loader(KeyringLoader::global())
        .build_from_args(std::env::args_os())
}
