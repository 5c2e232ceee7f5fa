//! Exit code constants for the kioskctl host binary.
//!
//! - 0: Success
//! - 1: User error (bad args, invalid config)
//! - 2: Transport failure (stdin/stdout I/O)
//! - 3: Another instance holds the instance lock
//! - 4: Audit log I/O failure

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments or an invalid configuration file.
pub const USER_ERROR: i32 = 1;

/// Transport failure: the request/response stream could not be read or written.
pub const TRANSPORT_FAILURE: i32 = 2;

/// Instance lock failure: another kioskctl process already drives the facility.
pub const INSTANCE_LOCKED: i32 = 3;

/// Audit failure: the audit log could not be written or read.
pub const AUDIT_FAILURE: i32 = 4;
