//! Platform lock facilities.
//!
//! A [`LockFacility`] is the capability the session manager drives: it
//! actually puts the device into (and out of) restricted mode. The manager
//! never talks to the platform any other way, so any facility can be swapped
//! in, including a scripted fake in tests.

mod command;
mod simulated;

pub use command::CommandFacility;
pub use simulated::SimulatedFacility;

use crate::config::FacilityConfig;

/// Capability interface over the platform lock mechanism.
///
/// Both calls are synchronous and run to completion. On failure they return a
/// human-readable detail string sourced from the platform.
pub trait LockFacility: Send {
    /// Short name used in logs and audit events.
    fn name(&self) -> &str;

    /// Put the device into restricted mode.
    fn acquire_lock(&mut self) -> Result<(), String>;

    /// Take the device out of restricted mode.
    fn release_lock(&mut self) -> Result<(), String>;
}

/// Build the facility described by the configuration.
pub fn from_config(config: &FacilityConfig) -> Box<dyn LockFacility> {
    match config {
        FacilityConfig::Simulated => Box::new(SimulatedFacility),
        FacilityConfig::Command { acquire, release } => {
            Box::new(CommandFacility::new(acquire.clone(), release.clone()))
        }
    }
}
