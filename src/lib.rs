//! kioskctl: device-lockdown session manager.
//!
//! A [`session::LockdownSessionManager`] owns the lockdown state of one
//! session and drives a [`facility::LockFacility`] to enforce it. The
//! [`channel`] module exposes the manager to a UI layer as a two-method
//! channel (`startKiosk` / `stopKiosk`).

pub mod channel;
pub mod config;
pub mod error;
pub mod events;
pub mod exit_codes;
pub mod facility;
pub mod instance;
pub mod session;

#[cfg(test)]
pub(crate) mod test_support;
