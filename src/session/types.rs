//! Lockdown state and transition failure types.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Lockdown state of the running session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LockdownState {
    /// Normal operation (initial state).
    #[default]
    Unlocked,
    /// Restricted mode: navigation and app switching are suppressed by the platform.
    Locked,
}

impl std::fmt::Display for LockdownState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LockdownState::Unlocked => write!(f, "unlocked"),
            LockdownState::Locked => write!(f, "locked"),
        }
    }
}

/// Which platform call failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// The platform refused or failed to enter restricted mode.
    LockAcquisitionError,
    /// The platform refused or failed to exit restricted mode.
    LockReleaseError,
}

impl FailureKind {
    /// Wire name of this failure kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::LockAcquisitionError => "lock_acquisition_error",
            FailureKind::LockReleaseError => "lock_release_error",
        }
    }
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A failed transition: the kind plus the detail reported by the platform.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {detail}")]
pub struct TransitionFailure {
    pub kind: FailureKind,
    pub detail: String,
}

impl TransitionFailure {
    pub fn acquisition(detail: impl Into<String>) -> Self {
        Self {
            kind: FailureKind::LockAcquisitionError,
            detail: detail.into(),
        }
    }

    pub fn release(detail: impl Into<String>) -> Self {
        Self {
            kind: FailureKind::LockReleaseError,
            detail: detail.into(),
        }
    }
}

/// Result of `enter`/`exit`.
pub type TransitionResult = std::result::Result<(), TransitionFailure>;
