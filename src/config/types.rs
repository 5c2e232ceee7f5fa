//! Configuration types and defaults.

use serde::{Deserialize, Serialize};

/// Default method channel name.
pub const DEFAULT_CHANNEL: &str = "com.ghost.focusos/kiosk";

/// Which platform facility enforces lockdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FacilityConfig {
    /// Always succeeds without touching the platform (default).
    #[default]
    Simulated,
    /// Runs one command to acquire and another to release the lock.
    Command { acquire: String, release: String },
}

pub fn default_channel() -> String {
    DEFAULT_CHANNEL.to_string()
}
