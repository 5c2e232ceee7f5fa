//! Command implementations for the kioskctl host binary.

use crate::cli::Command;
use kioskctl::channel::{self, KioskChannel};
use kioskctl::config::Config;
use kioskctl::error::Result;
use kioskctl::events::EventLog;
use kioskctl::facility;
use kioskctl::instance::acquire_instance_lock;
use kioskctl::session::LockdownSessionManager;
use std::io;
use std::path::Path;
use tracing::info;

/// Dispatch a command to its implementation.
pub fn dispatch(command: Command, config_path: Option<&Path>) -> Result<()> {
    let config = Config::load_or_default(config_path)?;

    match command {
        Command::Serve => cmd_serve(&config),
        Command::CheckConfig => cmd_check_config(&config),
    }
}

fn cmd_serve(config: &Config) -> Result<()> {
    let _instance = config
        .instance_lock
        .as_deref()
        .map(acquire_instance_lock)
        .transpose()?;

    let facility = facility::from_config(&config.facility);
    let mut manager = LockdownSessionManager::new(facility);
    if let Some(path) = &config.events_path {
        manager = manager.with_audit_log(EventLog::new(path));
    }

    let channel = KioskChannel::new(config.channel.clone(), manager);

    let stdin = io::stdin();
    let stdout = io::stdout();
    let stats = channel::serve(&channel, stdin.lock(), stdout.lock())?;

    info!(
        requests = stats.requests,
        succeeded = stats.succeeded,
        bad_requests = stats.bad_requests,
        final_state = %channel.manager().state(),
        "serve finished"
    );
    Ok(())
}

fn cmd_check_config(config: &Config) -> Result<()> {
    let yaml = config.to_yaml()?;
    print!("{}", yaml);
    Ok(())
}
