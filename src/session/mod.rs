//! Lockdown session management.
//!
//! A [`LockdownSessionManager`] owns the lockdown state of the running
//! process and the [`LockFacility`](crate::facility::LockFacility) that
//! enforces it.
//!
//! # State machine
//!
//! ```text
//!            enter (facility ok)
//! Unlocked ─────────────────────▶ Locked
//!     ▲                             │
//!     └─────────────────────────────┘
//!            exit (facility ok)
//! ```
//!
//! `enter` on `Locked` and `exit` on `Unlocked` succeed without touching
//! the facility. A facility failure leaves the state as it was.

mod manager;
mod types;

#[cfg(test)]
mod tests;

pub use manager::LockdownSessionManager;
pub use types::{FailureKind, LockdownState, TransitionFailure, TransitionResult};
