//! Config struct definition and default implementation.

use super::types::{FacilityConfig, default_channel};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for a kioskctl host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Name of the method channel requests must address (when they name one).
    #[serde(default = "default_channel")]
    pub channel: String,

    /// The platform facility that enforces lockdown.
    #[serde(default)]
    pub facility: FacilityConfig,

    /// NDJSON audit log of facility-backed transitions. Disabled when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub events_path: Option<PathBuf>,

    /// Instance lock file held while serving. Disabled when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance_lock: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            channel: default_channel(),
            facility: FacilityConfig::default(),
            events_path: None,
            instance_lock: None,
        }
    }
}
