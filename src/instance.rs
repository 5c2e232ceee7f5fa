//! Single-instance lock for the host process.
//!
//! Only one process may drive a platform facility at a time. When configured,
//! `serve` holds a lock file created with **create_new** semantics and
//! containing JSON metadata about the holder. The [`InstanceGuard`] removes
//! the file when dropped; a failed removal is logged, never a panic.

use crate::error::{KioskError, Result};
use crate::events::get_actor_string;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Metadata stored in the instance lock file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstanceMetadata {
    /// Owner of the lock (e.g., `user@HOST`).
    pub owner: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub pid: Option<u32>,

    pub created_at: DateTime<Utc>,
}

impl InstanceMetadata {
    pub fn current() -> Self {
        Self {
            owner: get_actor_string(),
            pid: Some(std::process::id()),
            created_at: Utc::now(),
        }
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            KioskError::UserError(format!(
                "failed to read instance lock '{}': {}",
                path.display(),
                e
            ))
        })?;

        serde_json::from_str(&content).map_err(|e| {
            KioskError::UserError(format!(
                "failed to parse instance lock '{}': {}",
                path.display(),
                e
            ))
        })
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            KioskError::UserError(format!("failed to serialize instance metadata: {}", e))
        })
    }
}

/// RAII guard for the instance lock file.
#[derive(Debug)]
pub struct InstanceGuard {
    path: PathBuf,
    released: bool,
}

impl InstanceGuard {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Release the lock now and report removal errors.
    pub fn release(mut self) -> Result<()> {
        self.released = true;
        fs::remove_file(&self.path).map_err(|e| {
            KioskError::UserError(format!(
                "failed to release instance lock '{}': {}",
                self.path.display(),
                e
            ))
        })
    }
}

impl Drop for InstanceGuard {
    fn drop(&mut self) {
        if !self.released
            && let Err(e) = fs::remove_file(&self.path)
        {
            warn!(path = %self.path.display(), error = %e, "failed to release instance lock");
        }
    }
}

/// Acquire the instance lock at `path`.
///
/// Fails with [`KioskError::InstanceLocked`] if the file already exists.
pub fn acquire_instance_lock(path: &Path) -> Result<InstanceGuard> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        fs::create_dir_all(parent).map_err(|e| {
            KioskError::UserError(format!(
                "failed to create instance lock directory '{}': {}",
                parent.display(),
                e
            ))
        })?;
    }

    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::AlreadyExists {
                let holder = match InstanceMetadata::from_file(path) {
                    Ok(meta) => format!(
                        "{} (held by {}, pid {}, since {})",
                        path.display(),
                        meta.owner,
                        meta.pid.map_or_else(|| "unknown".to_string(), |p| p.to_string()),
                        meta.created_at.to_rfc3339()
                    ),
                    Err(_) => path.display().to_string(),
                };
                KioskError::InstanceLocked(holder)
            } else {
                KioskError::UserError(format!(
                    "failed to create instance lock '{}': {}",
                    path.display(),
                    e
                ))
            }
        })?;

    let json = InstanceMetadata::current().to_json()?;
    if let Err(e) = file.write_all(json.as_bytes()).and_then(|()| file.sync_all()) {
        let _ = fs::remove_file(path);
        return Err(KioskError::UserError(format!(
            "failed to write instance lock '{}': {}",
            path.display(),
            e
        )));
    }

    debug!(path = %path.display(), "instance lock acquired");
    Ok(InstanceGuard {
        path: path.to_path_buf(),
        released: false,
    })
}
