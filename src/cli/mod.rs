//! CLI argument parsing for the kioskctl host binary.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// kioskctl: device-lockdown session manager.
///
/// Bridges a UI layer to the platform facility that puts the device into
/// (and out of) restricted kiosk mode.
#[derive(Parser, Debug)]
#[command(name = "kioskctl")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the YAML configuration file (defaults apply when omitted).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log output format for stderr diagnostics.
    #[arg(long, value_enum, default_value_t = LogFormat::Text, global = true)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Serve the method channel over stdin/stdout.
    ///
    /// Reads one JSON method call per line and writes one JSON response per
    /// line until stdin is closed.
    Serve,

    /// Validate the configuration and print it with defaults applied.
    CheckConfig,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
