//! Process-level error types for kioskctl.
//!
//! Lockdown transition failures are not errors of this kind: they are
//! reported as values by the session manager (see [`crate::session`]).
//! `KioskError` covers what can stop the host process itself.

use crate::exit_codes;
use thiserror::Error;

/// Main error type for kioskctl host operations.
#[derive(Error, Debug)]
pub enum KioskError {
    /// User provided invalid arguments or configuration.
    #[error("{0}")]
    UserError(String),

    /// Reading requests or writing responses failed.
    #[error("Transport failed: {0}")]
    TransportError(String),

    /// The audit log could not be written or read.
    #[error("Audit log failed: {0}")]
    AuditError(String),

    /// Another process holds the instance lock.
    #[error("Instance lock is held: {0}")]
    InstanceLocked(String),
}

impl KioskError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            KioskError::UserError(_) => exit_codes::USER_ERROR,
            KioskError::TransportError(_) => exit_codes::TRANSPORT_FAILURE,
            KioskError::AuditError(_) => exit_codes::AUDIT_FAILURE,
            KioskError::InstanceLocked(_) => exit_codes::INSTANCE_LOCKED,
        }
    }
}

/// Result type alias for kioskctl operations.
pub type Result<T> = std::result::Result<T, KioskError>;
