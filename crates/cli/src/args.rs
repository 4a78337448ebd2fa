//! CLI argument definitions and parsing.
//!
//! Responsibilities:
//! - Define the CLI structure using clap derive macros.
//! - Resolve the keyring home from the flag or `SEALCFG_KEYRING_HOME`, else the library default.
//!
//! Non-responsibilities:
//! - Does not execute commands (see `dispatch` module).

use clap::{Parser, Subcommand, ValueEnum};
use sealed_config::default_keyring_home;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sealcfg")]
#[command(about = "Encrypt, inspect and decrypt sealed-config option files", long_about = None)]
#[command(version)]
#[command(
    after_help = "Examples:\n  printf 'hunter2' | sealcfg seal --output db-password.gpg\n  sealcfg open db-password.gpg\n  sealcfg env-name billing-api db-password port\n  sealcfg --keyring-home /etc/billing/keys keyring --output json\n"
)]
pub struct Cli {
    /// Directory holding secring.gpg and pubring.gpg (defaults to $GNUPGHOME)
    #[arg(long, global = true, env = "SEALCFG_KEYRING_HOME", value_name = "DIR")]
    pub keyring_home: Option<PathBuf>,

    /// Log format for diagnostics written to stderr
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// The keyring home to use, falling back to the library default.
    pub fn keyring_home(&self) -> PathBuf {
        self.keyring_home
            .clone()
            .unwrap_or_else(default_keyring_home)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Encrypt a value to every public key in the keyring
    Seal {
        /// Write an ASCII-armored message instead of binary
        #[arg(long)]
        armor: bool,

        /// Output file (defaults to stdout)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Plaintext file (defaults to stdin)
        #[arg(value_name = "INPUT")]
        input: Option<PathBuf>,
    },

    /// Decrypt an option file and print its value
    Open {
        /// Encrypted option file, binary or armored
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Print the environment variable bound to each option of a service
    EnvName {
        /// Service name, as passed to the configuration builder
        service: String,

        /// Option names
        #[arg(required = true)]
        options: Vec<String>,
    },

    /// Show the keys loaded from the keyring home
    Keyring {
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        output: OutputFormat,
    },
}
