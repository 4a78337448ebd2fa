//! Configuration loading: environment binding, the builder pipeline and its errors.
//!
//! Responsibilities:
//! - Bind every declared option to an environment variable.
//! - Provide the builder-pattern `ConfigBuilder` and the `init_config` entry point.
//! - Enforce the `DOTENV_DISABLED` gate before `.env` loading.
//!
//! Does NOT handle:
//! - Decrypting secrets (see `resolver` and `keyring`).
//! - Precedence between sources (see `store`).
//!
//! Invariants / Assumptions:
//! - Command-line values take precedence over environment variables, which take
//!   precedence over declared defaults. For encrypted options this picks the file.
//! - `load_dotenv()` must be called explicitly to enable `.env` file loading.

mod builder;
mod env;
mod error;

pub use builder::{ConfigBuilder, Resolution, init_config};
pub use env::{EnvBindings, bind_all, derive_env_name, env_var_or_none};
pub use error::ConfigError;

#[cfg(test)]
mod tests;
