//! sealcfg - operator tool for sealed-config services.
//!
//! Responsibilities:
//! - Parse command-line arguments and environment variables.
//! - Install the tracing subscriber (text or JSON, on stderr).
//! - Run the selected command and map failures to structured exit codes.
//!
//! Does NOT handle:
//! - Keyring parsing or OpenPGP message handling (see `sealed-config`).
//!
//! Invariants:
//! - `load_dotenv()` is called BEFORE CLI parsing so `.env` can provide clap env defaults.
//! - Log output always goes to stderr; stdout carries only command output.

mod args;
mod commands;
mod dispatch;
mod error;

use args::{Cli, LogFormat};
use clap::Parser;
use dispatch::run_command;
use error::{ExitCode, ExitCodeExt};
use sealed_config::ConfigBuilder;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() {
    // Load .env file BEFORE CLI parsing so clap env defaults can read .env values
    if let Err(e) = ConfigBuilder::new("sealcfg").load_dotenv() {
        eprintln!("Failed to load environment: {}", e);
        std::process::exit(ExitCode::GeneralError.as_i32());
    }

    let cli = Cli::parse();

    let registry = tracing_subscriber::registry().with(EnvFilter::from_default_env());
    match cli.log_format {
        LogFormat::Text => registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .init(),
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init(),
    }

    let exit_code = match run_command(cli) {
        Ok(()) => ExitCode::Success,
        Err(e) => {
            eprintln!("{:#}", e);
            e.exit_code()
        }
    };

    std::process::exit(exit_code.as_i32());
}
