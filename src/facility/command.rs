//! A facility that runs external commands to acquire and release the lock.
//!
//! Command lines are split with shell-words and executed directly (no shell).
//! Exit status 0 is success; anything else is a failure whose detail is the
//! command's stderr.

use super::LockFacility;
use std::process::Command;
use tracing::debug;

/// Maximum number of characters of stderr carried into a failure detail.
pub const MAX_DETAIL_CHARS: usize = 1024;

/// Runs one command line to acquire the lock and another to release it.
#[derive(Debug, Clone)]
pub struct CommandFacility {
    acquire: String,
    release: String,
}

impl CommandFacility {
    pub fn new(acquire: impl Into<String>, release: impl Into<String>) -> Self {
        Self {
            acquire: acquire.into(),
            release: release.into(),
        }
    }
}

impl LockFacility for CommandFacility {
    fn name(&self) -> &str {
        "command"
    }

    fn acquire_lock(&mut self) -> Result<(), String> {
        run_command(&self.acquire)
    }

    fn release_lock(&mut self) -> Result<(), String> {
        run_command(&self.release)
    }
}

fn run_command(command: &str) -> Result<(), String> {
    let command = command.trim();
    if command.is_empty() {
        return Err("command is empty".to_string());
    }

    let args = shell_words::split(command)
        .map_err(|e| format!("failed to parse command '{}': {}", command, e))?;

    let Some((program, cmd_args)) = args.split_first() else {
        return Err(format!("command is empty after parsing: {}", command));
    };

    debug!(%command, "running facility command");

    let output = Command::new(program)
        .args(cmd_args)
        .output()
        .map_err(|e| format!("failed to execute '{}': {}", program, e))?;

    if output.status.success() {
        return Ok(());
    }

    let stderr = String::from_utf8_lossy(&output.stderr);
    let stderr = stderr.trim();
    if stderr.is_empty() {
        return Err(match output.status.code() {
            Some(code) => format!("'{}' exited with code {}", program, code),
            None => format!("'{}' was terminated by a signal", program),
        });
    }

    Err(truncate_detail(stderr))
}

fn truncate_detail(detail: &str) -> String {
    if detail.chars().count() <= MAX_DETAIL_CHARS {
        return detail.to_string();
    }
    let mut truncated: String = detail.chars().take(MAX_DETAIL_CHARS).collect();
    truncated.push_str("...");
    truncated
}
