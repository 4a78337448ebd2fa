//! Command dispatch logic.
//!
//! Responsibilities:
//! - Route parsed CLI arguments to the matching command handler.
//!
//! Does NOT handle:
//! - CLI structure definitions (see `args` module).
//! - Exit code mapping (see `error` module).

use anyhow::Result;

use crate::args::{Cli, Commands};
use crate::commands;

pub(crate) fn run_command(cli: Cli) -> Result<()> {
    let home = cli.keyring_home();
    match cli.command {
        Commands::Seal {
            armor,
            output,
            input,
        } => commands::seal::run(&home, input.as_deref(), output.as_deref(), armor),
        Commands::Open { file } => commands::open::run(&home, &file),
        Commands::EnvName { service, options } => commands::env_name::run(&service, &options),
        Commands::Keyring { output } => commands::keyring::run(&home, output),
    }
}
