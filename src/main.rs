//! kioskctl host binary.
//!
//! Parses arguments, initialises stderr diagnostics, dispatches to the
//! command handler and maps errors to exit codes. Stdout is reserved for
//! channel responses.

mod cli;
mod commands;

use cli::{Cli, LogFormat};
use kioskctl::error::{KioskError, Result};
use kioskctl::exit_codes;
use std::io;
use std::process::ExitCode;
use tracing_subscriber::{EnvFilter, fmt};

fn main() -> ExitCode {
    let cli = Cli::parse_args();

    if let Err(err) = init_tracing(cli.log_format) {
        eprintln!("Error: {}", err);
        return ExitCode::from(err.exit_code() as u8);
    }

    match commands::dispatch(cli.command, cli.config.as_deref()) {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::from(err.exit_code() as u8)
        }
    }
}

fn init_tracing(log_format: LogFormat) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = fmt().with_env_filter(env_filter).with_writer(io::stderr);

    match log_format {
        LogFormat::Text => subscriber
            .try_init()
            .map_err(|err| KioskError::UserError(format!("failed to init tracing: {err}")))?,
        LogFormat::Json => subscriber
            .json()
            .try_init()
            .map_err(|err| KioskError::UserError(format!("failed to init tracing: {err}")))?,
    }

    Ok(())
}
